//! Scrollbar rendering helper

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar on the right edge of a panel
///
/// Only renders if content exceeds the viewport.
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);

    // ScrollbarState wants: content_length (how much can scroll) and position
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut scrollbar_state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}
