// Status bar component
//
// Uptime, entry and error counts, and in-flight control requests.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let logs = app.session.logs();

    let mut status_text = format!(
        " {} │ {} │ 📜 {} │ ✗ {}",
        app.uptime(),
        app.theme_kind.name(),
        logs.len(),
        app.error_count(),
    );
    if app.pending_commands > 0 {
        status_text.push_str(&format!(" │ ⏳ {} pending", app.pending_commands));
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
