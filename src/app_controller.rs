use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::Path;

use crate::app_config::Config;
use crate::clip_planner::ClipPlanner;
use crate::extraction::ExtractionDriver;
use crate::file_utils::FileManager;
use crate::report::{ClipFailure, Report, RunReport};
use crate::selection::Selection;
use crate::subtitle;

// @module: Application controller for clip extraction

/// Runs the parse, plan and extract steps over a selection
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Planner built from the configured offset and margin
    planner: ClipPlanner,

    // @field: Plan and log only, never invoke the driver
    dry_run: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let planner = ClipPlanner::new(config.normalizer()?, config.output_root.clone());
        Ok(Self {
            config,
            planner,
            dry_run: false,
        })
    }

    /// Only plan clips and log what would be extracted
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn planner(&self) -> &ClipPlanner {
        &self.planner
    }

    /// Process every pair in order. Failures are recorded per pair and per
    /// cue; they never stop the run.
    pub async fn run(&self, selection: &Selection, driver: &dyn ExtractionDriver) -> RunReport {
        let start_time = std::time::Instant::now();
        let mut run_report = RunReport::default();

        info!("Processing {} subtitle/media pair(s) with offset {}", selection.len(), self.config.offset);

        for (subtitle_path, media_path) in selection.pairs() {
            let report = self.process_pair(subtitle_path, media_path, driver).await;
            run_report.pairs.push(report);
        }

        info!(
            "Done in {}: {} clip(s) extracted, {} failed, {} file(s) not parsed",
            Self::format_duration(start_time.elapsed()),
            run_report.total_extracted(),
            run_report.total_failures(),
            run_report.failed_pairs()
        );

        run_report
    }

    /// Process one subtitle/media pair
    pub async fn process_pair(&self, subtitle_path: &Path, media_path: &Path, driver: &dyn ExtractionDriver) -> Report {
        let mut report = Report::new(subtitle_path, media_path);
        report.info(format!("{} -> {}", subtitle_path.display(), media_path.display()));

        let cues = match subtitle::load(subtitle_path, &mut report) {
            Ok(cues) => cues,
            Err(e) => {
                report.error(format!("Skipping {}: {}", subtitle_path.display(), e));
                report.parse_error = Some(e.to_string());
                return report;
            }
        };
        report.cues = cues.len();

        let output_dir = self.planner.output_dir(media_path);
        if !self.dry_run {
            match FileManager::ensure_dir(&output_dir) {
                Ok(true) => report.info(format!("Created output folder '{}'", output_dir.display())),
                Ok(false) => report.debug(format!("Output folder '{}' already exists", output_dir.display())),
                Err(e) => {
                    report.warn(format!("{:#}", e));
                    report.directory_error = Some(format!("{:#}", e));
                }
            }
        }

        let progress_bar = Self::create_progress_bar(cues.len() as u64);

        for cue in &cues {
            let plan = self.planner.plan(cue, media_path);
            report.debug(format!(
                "Cue {}: -ss {} -t {} -> {}",
                cue.id,
                plan.request.seek,
                plan.request.duration,
                plan.output_path().display()
            ));

            if self.dry_run {
                report.info(format!(
                    "[dry-run] {} +{} {}",
                    plan.request.seek,
                    plan.request.duration,
                    plan.output_path().display()
                ));
            } else {
                match driver.extract(&plan.request).await {
                    Ok(()) => report.extracted += 1,
                    Err(e) => report.record_failure(ClipFailure {
                        cue_id: cue.id.clone(),
                        output_path: plan.output_path().to_path_buf(),
                        message: e.to_string(),
                    }),
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        if report.has_issues() && !self.dry_run && FileManager::dir_exists(&output_dir) {
            if let Err(e) = FileManager::write_issues_log(&output_dir, &report) {
                log::warn!("Failed to write issues log: {}", e);
            }
        }

        report.info(format!(
            "{}: {}/{} clip(s) extracted",
            media_path.display(),
            report.extracted,
            report.cues
        ));
        report
    }

    fn create_progress_bar(len: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cues ({percent}%) {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=> "));
        progress_bar
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
