//! Configuration tests
//!
//! The round-trip tests guard `to_toml()`: when a field is added to `Config`
//! but not to the template (or the other way round), they fail.

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    |_| None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.locale = "en_US".to_string();
    config.error_marker = "[E]\"quoted\"".to_string();
    config.auto_connect = true;
    config.endpoint.host = "console.internal:9000".to_string();
    config.endpoint.secure = true;
    config.tui.theme = "nord".to_string();
    config.tui.show_diagnostics = false;
    config.tui.tick_ms = 50;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let reloaded = Config::from_sources(file, no_env());

    assert_eq!(reloaded.locale, "en_US");
    assert_eq!(reloaded.error_marker, "[E]\"quoted\"");
    assert!(reloaded.auto_connect);
    assert_eq!(reloaded.endpoint, config.endpoint);
    assert_eq!(reloaded.tui.theme, "nord");
    assert!(!reloaded.tui.show_diagnostics);
    assert_eq!(reloaded.tui.tick_ms, 50);
    assert_eq!(reloaded.logging.level, "debug");
    assert!(reloaded.logging.file_enabled);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn control_characters_survive_the_roundtrip() {
    let mut config = Config::default();
    config.error_marker = "ERR\n\t\u{1b}[31m\\".to_string();
    config.logging.file_prefix = "console\r\nlog'\"".to_string();

    let toml_str = config.to_toml();
    let file: FileConfig = toml::from_str(&toml_str)
        .unwrap_or_else(|e| panic!("Config should parse.\nTOML:\n{}\nError: {}", toml_str, e));
    let reloaded = Config::from_sources(file, no_env());

    assert_eq!(reloaded.error_marker, config.error_marker);
    assert_eq!(reloaded.logging.file_prefix, config.logging.file_prefix);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_file_gives_defaults() {
    let config = Config::from_sources(FileConfig::default(), no_env());
    let defaults = Config::default();
    assert_eq!(config.endpoint, defaults.endpoint);
    assert_eq!(config.locale, defaults.locale);
    assert_eq!(config.error_marker, "[ERR]:");
    assert!(config.enable_tui);
    assert!(!config.auto_connect);
}

#[test]
fn env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
        locale = "de_DE"
        auto_connect = false

        [endpoint]
        host = "from-file:8080"
        secure = false

        [tui]
        theme = "light"
        "#,
    )
    .unwrap();

    let env = env_from(&[
        ("LOGDECK_HOST", "from-env:7000"),
        ("LOGDECK_SECURE", "true"),
        ("LOGDECK_LOCALE", "en_GB"),
        ("LOGDECK_AUTO_CONNECT", "1"),
        ("LOGDECK_THEME", "nord"),
    ]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.endpoint.host, "from-env:7000");
    assert!(config.endpoint.secure);
    assert_eq!(config.locale, "en_GB");
    assert!(config.auto_connect);
    assert_eq!(config.tui.theme, "nord");
}

#[test]
fn no_tui_flag_disables_tui() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[("LOGDECK_NO_TUI", "1")]));
    assert!(!config.enable_tui);

    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("LOGDECK_NO_TUI", "false")]),
    );
    assert!(config.enable_tui);
}

#[test]
fn zero_tick_falls_back_to_default() {
    let file: FileConfig = toml::from_str("[tui]\ntick_ms = 0\n").unwrap();
    let config = Config::from_sources(file, no_env());
    assert_eq!(config.tui.tick_ms, TuiConfig::default().tick_ms);
}

#[test]
fn unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
}

#[test]
fn malformed_file_is_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("auto_connect = \"maybe\"");
    assert!(parsed.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Derived settings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn session_settings_follow_endpoint() {
    let mut config = Config::default();
    config.endpoint.secure = true;
    config.endpoint.host = "ops.example.org".to_string();
    config.error_marker = "!!".to_string();

    let settings = config.session_settings();
    assert_eq!(settings.stream_url, "wss://ops.example.org/ws/logs");
    assert_eq!(settings.api_base, "/api");
    assert_eq!(settings.error_marker, "!!");
}

#[test]
fn bad_locale_is_an_error() {
    let mut config = Config::default();
    assert!(config.timestamper().is_ok());
    config.locale = "klingon".to_string();
    assert!(config.timestamper().is_err());
}
