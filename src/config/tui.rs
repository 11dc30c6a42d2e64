//! Terminal UI configuration

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", "nord"
    pub theme: String,
    /// Show the console's own tracing output under the log view
    pub show_diagnostics: bool,
    /// Redraw interval in milliseconds
    pub tick_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            show_diagnostics: true,
            tick_ms: 200,
        }
    }
}

/// [tui] as loaded from the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTui {
    pub theme: Option<String>,
    pub show_diagnostics: Option<bool>,
    pub tick_ms: Option<u64>,
}

impl TuiConfig {
    pub fn from_file(file: Option<FileTui>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            theme: file.theme.unwrap_or(defaults.theme),
            show_diagnostics: file.show_diagnostics.unwrap_or(defaults.show_diagnostics),
            // Zero would spin the redraw loop
            tick_ms: file.tick_ms.filter(|ms| *ms > 0).unwrap_or(defaults.tick_ms),
        }
    }
}
