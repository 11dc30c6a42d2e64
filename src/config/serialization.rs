//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Render a string as a TOML string literal, escapes included
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Render the full config file, comments included
    pub fn to_toml(&self) -> String {
        format!(
            r#"# logdeck configuration
# Precedence: command-line flags > environment variables > this file > defaults

# Locale for entry timestamps (time of day only), e.g. "fr_FR", "en_US"
locale = {locale}

# Entries whose message contains this marker are shown as errors
error_marker = {error_marker}

# Connect to the log stream on startup
auto_connect = {auto_connect}

[endpoint]
# host[:port] of the console server (LOGDECK_HOST)
host = {host}
# Use wss:// and https:// (LOGDECK_SECURE)
secure = {secure}
stream_path = {stream_path}
api_base = {api_base}

[tui]
# "dark", "light" or "nord" (LOGDECK_THEME)
theme = {theme}
show_diagnostics = {show_diagnostics}
# Redraw interval in milliseconds
tick_ms = {tick_ms}

[logging]
# trace, debug, info, warn, error (RUST_LOG overrides)
level = {level}
file_enabled = {file_enabled}
file_dir = {file_dir}
# "hourly", "daily" or "never"
file_rotation = {file_rotation}
file_prefix = {file_prefix}
"#,
            locale = quoted(&self.locale),
            error_marker = quoted(&self.error_marker),
            auto_connect = self.auto_connect,
            host = quoted(&self.endpoint.host),
            secure = self.endpoint.secure,
            stream_path = quoted(&self.endpoint.stream_path),
            api_base = quoted(&self.endpoint.api_base),
            theme = quoted(&self.tui.theme),
            show_diagnostics = self.tui.show_diagnostics,
            tick_ms = self.tui.tick_ms,
            level = quoted(&self.logging.level),
            file_enabled = self.logging.file_enabled,
            file_dir = quoted(&self.logging.file_dir.display().to_string()),
            file_rotation = quoted(self.logging.file_rotation.as_str()),
            file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
