// Title bar component
//
// App name, the stream URL and a coloured connection badge.

use crate::session::ConnectionState;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let state_color = match state {
        ConnectionState::Connected => app.theme.state_connected,
        ConnectionState::Connecting => app.theme.state_connecting,
        ConnectionState::Disconnected => app.theme.state_disconnected,
    };

    let line = Line::from(vec![
        Span::styled(
            " logdeck ",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("──── ", Style::default().fg(app.theme.border)),
        Span::styled(app.stream_url.as_str(), Style::default().fg(app.theme.foreground)),
    ]);

    let badge = Line::from(Span::styled(
        format!(" ● {} ", state.label()),
        Style::default().fg(state_color).add_modifier(Modifier::BOLD),
    ))
    .right_aligned();

    let title = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.title))
            .title_top(badge),
    );

    f.render_widget(title, area);
}
