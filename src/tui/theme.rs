// Theme system for the TUI
//
// A handful of built-in palettes, switchable at runtime with `t`.

use ratatui::style::Color;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    /// Look up a theme by config name; unknown names fall back to Dark
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,
    pub toast: Color,

    // Selection
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Operator log
    pub timestamp: Color,
    pub log_ok: Color,
    pub log_error: Color,
    pub placeholder: Color,

    // Connection indicator
    pub state_connected: Color,
    pub state_connecting: Color,
    pub state_disconnected: Color,

    // Controls
    pub key_enabled: Color,
    pub key_disabled: Color,

    // Diagnostics by level
    pub diag_error: Color,
    pub diag_warn: Color,
    pub diag_info: Color,
    pub diag_debug: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,
            toast: Color::Yellow,

            selection_bg: Color::DarkGray,
            selection_fg: Color::Yellow,

            timestamp: Color::DarkGray,
            log_ok: Color::LightGreen,
            log_error: Color::LightRed,
            placeholder: Color::DarkGray,

            state_connected: Color::Green,
            state_connecting: Color::Yellow,
            state_disconnected: Color::Red,

            key_enabled: Color::White,
            key_disabled: Color::DarkGray,

            diag_error: Color::Red,
            diag_warn: Color::Yellow,
            diag_info: Color::Blue,
            diag_debug: Color::Gray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,
            toast: Color::Rgb(184, 134, 11), // Dark goldenrod

            selection_bg: Color::LightBlue,
            selection_fg: Color::Black,

            timestamp: Color::Gray,
            log_ok: Color::Green,
            log_error: Color::Red,
            placeholder: Color::Gray,

            state_connected: Color::Green,
            state_connecting: Color::Rgb(184, 134, 11),
            state_disconnected: Color::Red,

            key_enabled: Color::Black,
            key_disabled: Color::Gray,

            diag_error: Color::Red,
            diag_warn: Color::Rgb(184, 134, 11),
            diag_info: Color::Blue,
            diag_debug: Color::DarkGray,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208),

            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(163, 190, 140),
            toast: Color::Rgb(235, 203, 139),

            selection_bg: Color::Rgb(67, 76, 94),
            selection_fg: Color::Rgb(235, 203, 139),

            timestamp: Color::Rgb(76, 86, 106),
            log_ok: Color::Rgb(163, 190, 140),
            log_error: Color::Rgb(191, 97, 106),
            placeholder: Color::Rgb(76, 86, 106),

            state_connected: Color::Rgb(163, 190, 140),
            state_connecting: Color::Rgb(235, 203, 139),
            state_disconnected: Color::Rgb(191, 97, 106),

            key_enabled: Color::Rgb(216, 222, 233),
            key_disabled: Color::Rgb(76, 86, 106),

            diag_error: Color::Rgb(191, 97, 106),
            diag_warn: Color::Rgb(235, 203, 139),
            diag_info: Color::Rgb(129, 161, 193),
            diag_debug: Color::Rgb(76, 86, 106),
        }
    }
}
