//! Dropdown container
//!
//! Owns the layout slot beneath the omnibox. The slot is sized by config
//! and survives `Invisible`; only `Gone` gives the rows back to the layout.

use super::{ChildList, ChildView, ParentLink, ViewContainer, ViewId, Visibility};
use crate::theme::PopupTheme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Popup frame that hosts the suggestion list
#[derive(Debug)]
pub struct DropdownContainer {
    id: ViewId,
    visibility: Visibility,
    children: ChildList,
    /// Rows reserved in layout while the container is not `Gone`
    slot_height: u16,
}

impl DropdownContainer {
    pub fn new(slot_height: u16) -> Self {
        Self {
            id: ViewId::next(),
            visibility: Visibility::Gone,
            children: Rc::new(RefCell::new(Vec::new())),
            slot_height,
        }
    }

    /// Rows this container occupies in the current layout pass
    pub fn layout_height(&self) -> u16 {
        if self.visibility.reserves_space() {
            self.slot_height
        } else {
            0
        }
    }

    /// Ids of attached children, in attach order
    #[cfg(test)]
    pub fn children(&self) -> Vec<ViewId> {
        self.children.borrow().clone()
    }

    #[cfg(test)]
    pub fn has_child(&self, id: ViewId) -> bool {
        self.children.borrow().contains(&id)
    }

    /// Draw the popup frame and return the inner area for children.
    ///
    /// Returns `None` when nothing should be drawn (not `Visible`).
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &PopupTheme) -> Option<Rect> {
        if self.visibility != Visibility::Visible || area.height == 0 {
            return None;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);

        f.render_widget(Clear, area);
        f.render_widget(block, area);
        Some(inner)
    }
}

impl ViewContainer for DropdownContainer {
    fn id(&self) -> ViewId {
        self.id
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn add_child<V: ChildView>(&mut self, child: &mut V) {
        assert!(
            child.parent().is_none(),
            "view {:?} already has parent {:?}; detach it first",
            child.id(),
            child.parent()
        );
        self.children.borrow_mut().push(child.id());
        child.attach_to(ParentLink::new(self.id, &self.children));
    }
}
