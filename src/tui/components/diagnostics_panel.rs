// Diagnostics panel
//
// Tail of the console's own tracing output, coloured by level. Distinct from
// the operator log: this is what logdeck itself reports.

use crate::logging::Diagnostic;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use tracing::Level;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // Borders take two rows
    let visible = area.height.saturating_sub(2) as usize;
    let diagnostics = app.diagnostics.tail(visible);

    let items: Vec<ListItem> = diagnostics
        .iter()
        .map(|d| ListItem::new(line_for(d, app)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border))
            .title(format!(" Diagnostics ({}) ", app.diagnostics.len())),
    );

    f.render_widget(list, area);
}

fn line_for<'a>(diagnostic: &Diagnostic, app: &App) -> Line<'a> {
    let theme = &app.theme;
    let color = match diagnostic.level {
        Level::ERROR => theme.diag_error,
        Level::WARN => theme.diag_warn,
        Level::INFO => theme.diag_info,
        _ => theme.diag_debug,
    };

    Line::from(Span::styled(
        diagnostic.display_line(),
        Style::default().fg(color),
    ))
}
