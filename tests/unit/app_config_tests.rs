/*!
 * Tests for application configuration
 */

use anyhow::Result;
use subclip::app_config::{Config, LogLevel};
use subclip::timecode::MAX_MARGIN_MS;
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert_eq!(config.offset, "00:00:00.000");
    assert_eq!(config.margin_ms, 500);
    assert_eq!(config.extraction.ffmpeg_path, "ffmpeg");
    assert_eq!(config.extraction.timeout_secs, None);
    assert!(!config.extraction.overwrite);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withBadOffset_shouldFail() {
    let config = Config {
        offset: "1.5s".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withEmptyToolOrZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.extraction.ffmpeg_path = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.extraction.timeout_secs = Some(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{ "offset": "-00:00:00.750", "extraction": { "timeout_secs": 30 }, "log_level": "debug" }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.offset, "-00:00:00.750");
    assert_eq!(config.margin_ms, 500);
    assert_eq!(config.extraction.ffmpeg_path, "ffmpeg");
    assert_eq!(config.extraction.timeout_secs, Some(30));
    assert_eq!(config.log_level, LogLevel::Debug);

    let normalizer = config.normalizer()?;
    assert!(normalizer.offset().negative);
    Ok(())
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config, Config::default());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded, config);
    Ok(())
}

#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_withMarginAboveOneDay_shouldFail() {
    let config = Config {
        margin_ms: MAX_MARGIN_MS + 1,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        margin_ms: u64::MAX,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        margin_ms: MAX_MARGIN_MS,
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}
