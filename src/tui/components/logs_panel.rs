//! Operator log panel
//!
//! Renders the session's log buffer in arrival order: `[time] message`,
//! error-marked entries in the error colour, everything else in the ok colour.
//! The panel owns scroll and selection state but never the entries; they are
//! passed in on each frame so a buffer reset is picked up immediately.

use super::scrollbar::render_scrollbar;
use crate::session::LogEntry;
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const PLACEHOLDER: &str = "Waiting for logs...";

pub struct LogsPanel {
    scroll: ScrollState,

    /// Selected entry (None = auto-follow mode)
    pub selected: Option<usize>,

    /// Entry count seen at the last sync (for bounds checking)
    entry_count: usize,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            selected: None,
            entry_count: 0,
        }
    }

    /// Sync with the current buffer (call each frame before rendering)
    pub fn sync_entries(&mut self, count: usize, viewport_height: usize) {
        // Buffer shrank: a new connection cleared it
        if count < self.entry_count {
            self.selected = None;
            self.scroll.auto_follow = true;
        }
        self.entry_count = count;
        self.scroll.update_dimensions(count, viewport_height);
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Text of the selected entry, or the newest one when nothing is selected
    pub fn copy_text(&self, entries: &[LogEntry]) -> Option<String> {
        let idx = self.selected.or_else(|| entries.len().checked_sub(1))?;
        entries.get(idx).map(LogEntry::display_line)
    }

    fn select(&mut self, idx: usize) {
        self.selected = Some(idx);
        self.scroll.reveal(idx);
    }

    fn select_next(&mut self) {
        match self.selected {
            Some(idx) if idx + 1 < self.entry_count => self.select(idx + 1),
            None if self.entry_count > 0 => self.select(self.entry_count - 1),
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        match self.selected {
            Some(idx) if idx > 0 => self.select(idx - 1),
            None if self.entry_count > 0 => self.select(self.entry_count - 1),
            _ => {}
        }
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        entries: &[LogEntry],
        error_marker: &str,
        theme: &Theme,
    ) {
        let title = if self.selected.is_some() {
            " Logs [select] "
        } else if self.scroll.auto_follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .title(title)
            .title_bottom(Line::from(self.focus_hint().unwrap_or_default()).right_aligned());

        if entries.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .style(Style::default().fg(theme.placeholder))
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }

        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = entries[start..end.min(entries.len())]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let message_style = if entry.is_error(error_marker) {
                    Style::default().fg(theme.log_error)
                } else {
                    Style::default().fg(theme.log_ok)
                };

                let line = Line::from(vec![
                    Span::styled(
                        format!("[{}] ", entry.timestamp),
                        Style::default().fg(theme.timestamp),
                    ),
                    Span::styled(entry.message.clone(), message_style),
                ]);

                if self.selected == Some(start + i) {
                    ListItem::new(line).style(
                        Style::default()
                            .bg(theme.selection_bg)
                            .fg(theme.selection_fg)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll.scroll_to_top();
                if self.entry_count > 0 {
                    self.selected = Some(0);
                }
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll.scroll_to_bottom();
                self.selected = None;
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.scroll.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.scroll.page_down();
                Handled::Yes
            }
            KeyCode::Esc => {
                // Clear selection if any, return to auto-follow
                if self.selected.is_some() {
                    self.selected = None;
                    self.scroll.scroll_to_bottom();
                    Handled::Yes
                } else {
                    Handled::No
                }
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some(" ↑↓:select  y:copy  Esc:follow ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(panel: &mut LogsPanel, code: KeyCode) -> Handled {
        panel.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry::new("10:00:00", format!("line {}", i)))
            .collect()
    }

    #[test]
    fn first_selection_starts_at_newest() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(5, 3);
        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.selected, Some(4));
        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.selected, Some(3));
    }

    #[test]
    fn selection_stops_at_bounds() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(2, 5);
        press(&mut panel, KeyCode::Home);
        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.selected, Some(0));
        press(&mut panel, KeyCode::Down);
        press(&mut panel, KeyCode::Down);
        assert_eq!(panel.selected, Some(1));
    }

    #[test]
    fn esc_clears_selection_once() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(3, 5);
        press(&mut panel, KeyCode::Up);
        assert_eq!(press(&mut panel, KeyCode::Esc), Handled::Yes);
        assert_eq!(panel.selected, None);
        assert_eq!(press(&mut panel, KeyCode::Esc), Handled::No);
    }

    #[test]
    fn buffer_reset_drops_selection() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(10, 5);
        press(&mut panel, KeyCode::Up);
        assert!(panel.selected.is_some());

        panel.sync_entries(1, 5);
        assert_eq!(panel.selected, None);
        assert_eq!(panel.entry_count(), 1);
    }

    #[test]
    fn copy_uses_selection_or_newest() {
        let mut panel = LogsPanel::new();
        let lines = entries(3);
        panel.sync_entries(lines.len(), 5);
        assert_eq!(
            panel.copy_text(&lines).as_deref(),
            Some("[10:00:00] line 2")
        );

        press(&mut panel, KeyCode::Home);
        assert_eq!(
            panel.copy_text(&lines).as_deref(),
            Some("[10:00:00] line 0")
        );
        assert_eq!(panel.copy_text(&[]), None);
    }

    #[test]
    fn unrelated_keys_are_not_handled() {
        let mut panel = LogsPanel::new();
        assert_eq!(press(&mut panel, KeyCode::Char('c')), Handled::No);
    }
}
