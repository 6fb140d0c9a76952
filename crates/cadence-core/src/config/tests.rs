//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_apply_without_sources() {
    tracing::debug!("Testing settings defaults");

    let settings = Settings::from_toml_str("").unwrap();

    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.event.timezone, "UTC");
    assert!(!settings.event.all_day);
    assert_eq!(settings.output.mode, OutputMode::Export);
}

#[test]
fn test_toml_overrides_defaults() {
    let settings = Settings::from_toml_str(
        r#"
        [event]
        timezone = "Asia/Tokyo"
        all_day = true

        [output]
        mode = "normalize"
        "#,
    )
    .unwrap();

    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.event.timezone, "Asia/Tokyo");
    assert!(settings.event.all_day);
    assert_eq!(settings.output.mode, OutputMode::Normalize);
    assert_eq!(settings.event_timezone().unwrap(), Tz::Asia__Tokyo);
}

#[test]
fn test_unknown_output_mode_is_rejected() {
    let result = Settings::from_toml_str(
        r#"
        [output]
        mode = "upload"
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn test_unknown_timezone_is_config_error() {
    let settings = Settings::from_toml_str(
        r#"
        [event]
        timezone = "Mars/Olympus"
        "#,
    )
    .unwrap();

    let err = settings.event_timezone().unwrap_err();
    assert!(matches!(err, CoreError::ConfigError(ref msg) if msg.contains("Mars/Olympus")));
}

#[test]
fn test_windows_timezone_name_resolves() {
    let settings = Settings::from_toml_str(
        r#"
        [event]
        timezone = "Tokyo Standard Time"
        "#,
    )
    .unwrap();

    assert_eq!(settings.event_timezone().unwrap(), Tz::Asia__Tokyo);
}

#[test]
fn test_settings_clone() {
    let settings = Settings::from_toml_str("[logging]\nlevel = \"trace\"").unwrap();
    let cloned = settings.clone();

    assert_eq!(cloned.logging.level, "trace");
    assert_eq!(cloned.output.mode, settings.output.mode);
}
