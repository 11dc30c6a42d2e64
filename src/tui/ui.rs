// UI rendering - called on every frame
//
// Layout, top to bottom:
// - Title bar (3 lines)
// - Controls bar (3 lines)
// - Logs panel (fills remaining space)
// - Diagnostics panel (8 lines, toggled with `l`)
// - Status bar (2 lines)

use super::app::App;
use super::components::{controls_bar, diagnostics_panel, status_bar, title_bar};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

const DIAGNOSTICS_HEIGHT: u16 = 8;

pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let diagnostics_height = if app.show_diagnostics {
        DIAGNOSTICS_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(diagnostics_height),
            Constraint::Length(2),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    controls_bar::render(f, chunks[1], app);

    // Logs: sync scroll state with the buffer before drawing
    let logs_area = chunks[2];
    let viewport = logs_area.height.saturating_sub(2) as usize;
    let entries = app.session.logs().entries();
    app.logs_panel.sync_entries(entries.len(), viewport);
    app.logs_panel.render(
        f,
        logs_area,
        entries,
        app.session.error_marker(),
        &app.theme,
    );

    if app.show_diagnostics {
        diagnostics_panel::render(f, chunks[3], app);
    }

    status_bar::render(f, chunks[4], app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
