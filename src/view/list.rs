//! Suggestion list surface
//!
//! Reads rows from the shared [`RowSource`] the adapter writes into, keeps
//! the highlighted row inside the visible window, and draws itself with the
//! dark or light popup palette.

use super::{
    detach, ChildView, DropdownEmbedder, ListSurface, ParentLink, RowSource, RowSourceId,
    ViewId, Visibility,
};
use crate::suggestions::SuggestionRow;
use crate::theme::{PopupTheme, PopupThemes};
use crate::tui::components::scrollbar::render_scrollbar;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crate::util::truncate_to_width;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Popup border rows (top + bottom)
const FRAME_ROWS: u16 = 2;

/// Terminal list of suggestion rows
#[derive(Debug)]
pub struct SuggestionsList {
    id: ViewId,
    visibility: Visibility,
    parent: Option<ParentLink>,
    embedder: Option<Rc<dyn DropdownEmbedder>>,
    rows: RowSource,
    selected: usize,
    use_dark: bool,
    themes: Rc<PopupThemes>,
    scroll: ScrollState,
    /// Popup rect computed by the last `show()`, relative to the embedder
    measured: Option<Rect>,
    show_count: u64,
    /// Rows that fit inside the popup frame
    max_rows: usize,
}

impl SuggestionsList {
    /// `slot_height` is the container slot the popup frame must fit into.
    pub fn new(rows: RowSource, themes: Rc<PopupThemes>, slot_height: u16) -> Self {
        Self {
            id: ViewId::next(),
            visibility: Visibility::Gone,
            parent: None,
            embedder: None,
            rows,
            selected: 0,
            use_dark: false,
            themes,
            scroll: ScrollState::new(),
            measured: None,
            show_count: 0,
            max_rows: slot_height.saturating_sub(FRAME_ROWS) as usize,
        }
    }

    /// Palette currently in effect
    pub fn theme(&self) -> &PopupTheme {
        self.themes.pick(self.use_dark)
    }

    #[cfg(test)]
    pub fn use_dark(&self) -> bool {
        self.use_dark
    }

    #[cfg(test)]
    pub fn embedder(&self) -> Option<&Rc<dyn DropdownEmbedder>> {
        self.embedder.as_ref()
    }

    #[cfg(test)]
    pub fn measured(&self) -> Option<Rect> {
        self.measured
    }

    /// Number of times the reveal hook ran
    #[cfg(test)]
    pub fn show_count(&self) -> u64 {
        self.show_count
    }

    /// Row under the highlight, if any
    pub fn selected_row(&self) -> Option<SuggestionRow> {
        let rows = self.rows.borrow();
        self.selected_index().and_then(|i| rows.get(i).cloned())
    }

    /// Popup rect for the current row count, hanging off `anchor`
    fn measure(&self, anchor: Rect, width: u16) -> Rect {
        let visible_rows = self.rows.borrow().len().min(self.max_rows) as u16;
        Rect {
            x: anchor.x,
            y: anchor.y.saturating_add(anchor.height),
            width,
            height: visible_rows + FRAME_ROWS,
        }
    }

    /// Where the popup frame goes inside the container `slot`.
    ///
    /// Aligns horizontally to the live embedder anchor so a resize while the
    /// popup is open realigns it; without an embedder the whole slot is used.
    pub fn popup_area(&self, slot: Rect) -> Rect {
        let Some(embedder) = &self.embedder else {
            return slot;
        };
        let popup = self.measure(embedder.anchor(), embedder.alignment_width());

        let x = popup.x.clamp(slot.x, slot.right());
        let width = popup.width.min(slot.right() - x);
        Rect {
            x,
            y: slot.y,
            width,
            height: popup.height.min(slot.height),
        }
    }

    fn sync_dimensions(&mut self) {
        let total = self.rows.borrow().len();
        self.scroll.update_dimensions(total, self.max_rows);
    }

    fn row_line(&self, row: &SuggestionRow, width: usize, selected: bool) -> Line<'static> {
        let theme = self.theme();
        let base = if selected {
            Style::default()
                .bg(theme.selection)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };

        let gutter = format!(" {} ", row.kind.glyph());
        let budget = width.saturating_sub(gutter.width());
        let label = truncate_to_width(&row.label(), budget);
        let remaining = budget.saturating_sub(label.width());

        let mut spans = vec![
            Span::styled(gutter, base.fg(theme.accent)),
            Span::styled(label, base),
        ];

        // URL only when at least a few columns of it fit
        if let Some(url) = &row.url {
            if remaining > 6 {
                let url = truncate_to_width(url, remaining - 3);
                spans.push(Span::styled(" - ", base.fg(theme.muted)));
                spans.push(Span::styled(url, base.fg(theme.url)));
            }
        }

        Line::from(spans)
    }
}

impl ChildView for SuggestionsList {
    fn id(&self) -> ViewId {
        self.id
    }

    fn parent(&self) -> Option<ViewId> {
        self.parent.as_ref().map(ParentLink::parent)
    }

    fn attach_to(&mut self, link: ParentLink) {
        self.parent = Some(link);
    }

    fn detach_from_parent(&mut self) {
        detach(self.id, &mut self.parent);
    }
}

impl ListSurface for SuggestionsList {
    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn show(&mut self) {
        self.visibility = Visibility::Visible;
        self.measured = self
            .embedder
            .as_ref()
            .map(|e| self.measure(e.anchor(), e.alignment_width()));
        self.sync_dimensions();
        self.scroll.reveal(self.selected);
        self.show_count += 1;
        tracing::debug!(
            "Suggestion list shown: {} rows, measured {:?}",
            self.rows.borrow().len(),
            self.measured
        );
    }

    fn set_embedder(&mut self, embedder: Option<Rc<dyn DropdownEmbedder>>) {
        self.embedder = embedder;
    }

    fn set_selection(&mut self, index: usize) {
        self.sync_dimensions();
        self.selected = index;
        self.scroll.reveal(index);
    }

    fn refresh_background(&mut self, use_dark: bool) {
        self.use_dark = use_dark;
    }

    fn row_source(&self) -> RowSourceId {
        RowSourceId::of(&self.rows)
    }
}

impl Component for SuggestionsList {
    fn id(&self) -> ComponentId {
        ComponentId::Dropdown
    }

    /// Draw the rows into the popup's inner area.
    ///
    /// Draws nothing unless the list is attached and `Visible`.
    fn render(&self, f: &mut Frame, area: Rect, _ctx: &RenderContext) {
        if self.visibility != Visibility::Visible || self.parent.is_none() {
            return;
        }

        let rows = self.rows.borrow();
        let (start, end) = self.scroll.visible_range();
        let scrollbar_cols = usize::from(self.scroll.needs_scrollbar());
        let width = (area.width as usize).saturating_sub(scrollbar_cols);

        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|(i, row)| ListItem::new(self.row_line(row, width, i == self.selected)))
            .collect();

        let theme = self.theme();
        let list = List::new(items).style(Style::default().bg(theme.background));
        f.render_widget(list, area);

        render_scrollbar(f, area, &self.scroll, Style::default().fg(theme.muted));
    }
}

impl Scrollable for SuggestionsList {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for SuggestionsList {
    fn selected_index(&self) -> Option<usize> {
        let count = self.item_count();
        (count > 0).then(|| self.selected.min(count - 1))
    }

    fn select(&mut self, index: usize) {
        let clamped = index.min(self.item_count().saturating_sub(1));
        self.set_selection(clamped);
    }

    fn item_count(&self) -> usize {
        self.rows.borrow().len()
    }
}

impl Interactive for SuggestionsList {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::PageUp => {
                let target = self.selected.saturating_sub(self.max_rows.max(1));
                self.select(target);
            }
            KeyCode::PageDown => {
                let target = self.selected.saturating_add(self.max_rows.max(1));
                self.select(target);
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  Enter:open  Esc:dismiss")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::properties::SuggestionKind;
    use crate::view::{DropdownContainer, ViewContainer};
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;

    #[derive(Debug)]
    struct Anchor(Rect);

    impl DropdownEmbedder for Anchor {
        fn anchor(&self) -> Rect {
            self.0
        }
    }

    fn rows(n: usize) -> RowSource {
        let rows = (0..n)
            .map(|i| SuggestionRow::new(SuggestionKind::History, format!("entry {i}")))
            .collect();
        Rc::new(RefCell::new(rows))
    }

    fn list_with(n: usize, slot_height: u16) -> SuggestionsList {
        SuggestionsList::new(rows(n), Rc::new(PopupThemes::bundled()), slot_height)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn starts_gone_and_detached() {
        let list = list_with(0, 10);
        assert_eq!(ListSurface::visibility(&list), Visibility::Gone);
        assert!(list.parent().is_none());
        assert_eq!(list.show_count(), 0);
    }

    #[test]
    fn show_measures_against_embedder() {
        let mut list = list_with(3, 10);
        list.set_embedder(Some(Rc::new(Anchor(Rect::new(4, 1, 30, 3)))));

        list.show();

        assert_eq!(ListSurface::visibility(&list), Visibility::Visible);
        assert_eq!(list.measured(), Some(Rect::new(4, 4, 30, 5)));
        assert_eq!(list.show_count(), 1);
    }

    #[test]
    fn show_without_embedder_still_reveals() {
        let mut list = list_with(2, 10);
        list.show();
        assert_eq!(ListSurface::visibility(&list), Visibility::Visible);
        assert!(list.measured().is_none());
    }

    #[test]
    fn measured_height_caps_at_slot() {
        let mut list = list_with(50, 6);
        list.set_embedder(Some(Rc::new(Anchor(Rect::new(0, 0, 20, 1)))));
        list.show();
        assert_eq!(list.measured().map(|r| r.height), Some(6));
    }

    #[test]
    fn selection_scrolls_into_view() {
        let mut list = list_with(20, 6);
        list.set_selection(10);
        assert_eq!(list.scroll.visible_range(), (7, 11));

        list.set_selection(0);
        assert_eq!(list.scroll.visible_range(), (0, 4));
    }

    #[test]
    fn selection_on_empty_rows_is_harmless() {
        let mut list = list_with(0, 10);
        list.set_selection(0);
        assert_eq!(list.selected_index(), None);
        assert!(list.selected_row().is_none());
    }

    #[test]
    fn keys_move_selection_within_bounds() {
        let mut list = list_with(3, 10);
        let key = |code: KeyCode| KeyEvent::from(code);

        assert_eq!(list.handle_key(key(KeyCode::Down)), Handled::Yes);
        assert_eq!(list.selected_index(), Some(1));
        list.handle_key(key(KeyCode::End));
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.selected_index(), Some(2));
        list.handle_key(key(KeyCode::PageUp));
        assert_eq!(list.selected_index(), Some(0));
        list.handle_key(key(KeyCode::Up));
        assert_eq!(list.selected_index(), Some(0));

        assert_eq!(list.handle_key(key(KeyCode::Char('x'))), Handled::No);
    }

    #[test]
    fn refresh_background_switches_palette() {
        let mut list = list_with(1, 10);
        list.refresh_background(true);
        assert_eq!(list.theme().name, "Popup Dark");
        list.refresh_background(false);
        assert_eq!(list.theme().name, "Popup Light");
    }

    #[test]
    fn popup_area_aligns_to_anchor_inside_slot() {
        let mut list = list_with(2, 10);
        list.set_embedder(Some(Rc::new(Anchor(Rect::new(10, 0, 100, 3)))));

        let slot = Rect::new(0, 3, 60, 10);
        let area = list.popup_area(slot);

        assert_eq!(area.x, 10);
        assert_eq!(area.right(), slot.right());
        assert_eq!(area.y, slot.y);
        assert_eq!(area.height, 4);
    }

    #[test]
    fn renders_rows_only_when_attached_and_visible() {
        let themes = Rc::new(PopupThemes::bundled());
        let source: RowSource = Rc::new(RefCell::new(vec![
            SuggestionRow::search("rust"),
            SuggestionRow::new(SuggestionKind::Bookmark, "The Rust Book")
                .with_url("doc.rust-lang.org/book"),
        ]));
        let mut list = SuggestionsList::new(Rc::clone(&source), Rc::clone(&themes), 10);
        let mut container = DropdownContainer::new(10);
        let ctx = RenderContext::new(&themes.dark, ComponentId::Omnibox, 0);

        let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();

        // Visible but detached: nothing drawn
        list.show();
        terminal
            .draw(|f| list.render(f, f.area(), &ctx))
            .unwrap();
        assert!(!buffer_text(&terminal).contains("rust"));

        container.add_child(&mut list);
        terminal
            .draw(|f| list.render(f, f.area(), &ctx))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Search for \"rust\""));
        assert!(text.contains("The Rust Book"));
        assert!(text.contains("doc.rust-lang.org"));
    }

    #[test]
    fn long_labels_are_truncated() {
        let themes = Rc::new(PopupThemes::bundled());
        let source: RowSource = Rc::new(RefCell::new(vec![SuggestionRow::new(
            SuggestionKind::History,
            "a".repeat(80),
        )]));
        let mut list = SuggestionsList::new(source, Rc::clone(&themes), 10);
        let mut container = DropdownContainer::new(10);
        container.add_child(&mut list);
        list.show();

        let ctx = RenderContext::new(&themes.light, ComponentId::Omnibox, 0);
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        terminal
            .draw(|f| list.render(f, f.area(), &ctx))
            .unwrap();

        assert!(buffer_text(&terminal).contains('…'));
    }
}
