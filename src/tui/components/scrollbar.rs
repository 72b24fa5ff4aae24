//! Scrollbar rendering helper

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar on the right edge of `area`
///
/// Only renders if content exceeds the viewport.
///
/// ```ignore
/// render_scrollbar(f, inner, &self.scroll, Style::default().fg(theme.muted));
/// ```
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, style: Style) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .style(style);

    // ScrollbarState wants: content_length (how much can scroll) and position
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut scrollbar_state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}
