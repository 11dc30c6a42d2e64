//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a fixed duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_secs(2);

/// A toast notification that auto-dismisses
pub struct Toast {
    pub message: String,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 2 chars padding each side, borders included
        let width = (self.message.chars().count() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.toast))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        // Clear the area first so toast appears on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_toast_is_visible() {
        let toast = Toast::new("Copied");
        assert!(!toast.is_expired());
        assert_eq!(toast.message, "Copied");
    }
}
