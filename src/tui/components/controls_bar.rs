// Controls bar component
//
// One hint per operator action; hints for actions the current connection
// state does not allow are dimmed.

use crate::tui::app::{Action, App};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let mut spans = Vec::new();

    for action in Action::all() {
        let style = if action.available_in(state) {
            Style::default()
                .fg(app.theme.key_enabled)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.key_disabled)
        };
        spans.push(Span::styled(
            format!(" [{}] {} ", action.key(), action.label()),
            style,
        ));
    }

    let muted = Style::default().fg(app.theme.key_disabled);
    spans.push(Span::styled("│", Style::default().fg(app.theme.border)));
    spans.push(Span::styled(" [l] Diagnostics  [t] Theme  [q] Quit", muted));

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border))
            .title(" Controls "),
    );

    f.render_widget(bar, area);
}
