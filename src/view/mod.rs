//! Retained view toolkit for the suggestion dropdown
//!
//! The binder never touches ratatui directly. It talks to three small
//! contracts that mirror a classic retained view hierarchy:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ ViewContainer (popup slot)   │  set_visibility, add_child
//! │  ┌────────────────────────┐  │
//! │  │ ListSurface (rows)     │  │  parent, detach_from_parent, show,
//! │  │                        │  │  set_embedder, set_selection,
//! │  └────────────────────────┘  │  refresh_background
//! └──────────────────────────────┘
//!             ▲
//!             │ rows
//!      RowAdapter (replace_rows)
//! ```
//!
//! Concrete terminal implementations live in the submodules.

pub mod adapter;
pub mod container;
pub mod list;

pub use adapter::SuggestionsAdapter;
pub use container::DropdownContainer;
pub use list::SuggestionsList;

use crate::suggestions::SuggestionRow;
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU32, Ordering};

// ─────────────────────────────────────────────────────────────────────────────
// Identity and visibility
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a view inside the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u32);

impl ViewId {
    /// Allocate a fresh, process-unique id
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Visibility of a view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Rendered and participates in layout
    Visible,
    /// Not rendered, but keeps its layout slot so neighbours don't reflow
    Invisible,
    /// Not rendered and collapsed out of layout
    #[default]
    Gone,
}

impl Visibility {
    /// Whether the view still occupies space in layout
    pub fn reserves_space(self) -> bool {
        !matches!(self, Visibility::Gone)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parenting
// ─────────────────────────────────────────────────────────────────────────────

/// Children of a container, shared with each child through a `Weak` link
pub type ChildList = Rc<RefCell<Vec<ViewId>>>;

/// A child's back-reference to the container it is attached to
#[derive(Debug, Clone)]
pub struct ParentLink {
    parent: ViewId,
    children: Weak<RefCell<Vec<ViewId>>>,
}

impl ParentLink {
    pub fn new(parent: ViewId, children: &ChildList) -> Self {
        Self {
            parent,
            children: Rc::downgrade(children),
        }
    }

    pub fn parent(&self) -> ViewId {
        self.parent
    }

    /// Remove `child` from the parent's child list (if the parent still exists)
    fn unlink(&self, child: ViewId) {
        if let Some(children) = self.children.upgrade() {
            children.borrow_mut().retain(|id| *id != child);
        }
    }
}

/// Anything that can be placed inside a [`ViewContainer`]
pub trait ChildView {
    fn id(&self) -> ViewId;

    /// Current parent, `None` when detached
    fn parent(&self) -> Option<ViewId>;

    /// Record the parent link. Called by the container from `add_child`.
    fn attach_to(&mut self, link: ParentLink);

    /// Remove this view from its parent's child list.
    ///
    /// Detaching an already detached view is a no-op.
    fn detach_from_parent(&mut self);
}

/// Shared implementation of [`ChildView::detach_from_parent`]
pub(crate) fn detach(id: ViewId, link: &mut Option<ParentLink>) {
    if let Some(link) = link.take() {
        link.unlink(id);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator contracts used by the binder
// ─────────────────────────────────────────────────────────────────────────────

/// Container that owns layout, visibility and parenting of the popup
pub trait ViewContainer {
    fn id(&self) -> ViewId;

    fn visibility(&self) -> Visibility;

    fn set_visibility(&mut self, visibility: Visibility);

    /// Attach `child` as the last child of this container.
    ///
    /// # Panics
    /// If `child` already has a parent. Callers guard with
    /// [`ChildView::parent`] first.
    fn add_child<V: ChildView>(&mut self, child: &mut V);
}

/// Scrollable surface that renders suggestion rows
pub trait ListSurface: ChildView {
    fn visibility(&self) -> Visibility;

    fn set_visibility(&mut self, visibility: Visibility);

    /// Reveal hook: run measurement against the embedder and make the surface visible
    fn show(&mut self);

    /// Install the object supplying sizing/positioning context
    fn set_embedder(&mut self, embedder: Option<Rc<dyn DropdownEmbedder>>);

    /// Make `index` the active row
    fn set_selection(&mut self, index: usize);

    /// Re-resolve popup/background styling for dark or light mode
    fn refresh_background(&mut self, use_dark: bool);

    /// Identity of the row storage this surface renders from
    fn row_source(&self) -> RowSourceId;
}

/// Translates an ordered sequence of rows into what the list surface renders
pub trait RowAdapter {
    /// Replace every row. The adapter decides what to recycle.
    fn replace_rows(&mut self, rows: &[SuggestionRow]);

    /// Identity of the row storage this adapter writes into
    fn row_source(&self) -> RowSourceId;
}

/// Identity of a shared row store (pointer identity of the `Rc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSourceId(usize);

/// Rows shared between an adapter (writer) and a list surface (reader)
pub type RowSource = Rc<RefCell<Vec<SuggestionRow>>>;

impl RowSourceId {
    pub fn of(source: &RowSource) -> Self {
        Self(Rc::as_ptr(source) as *const () as usize)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Embedder
// ─────────────────────────────────────────────────────────────────────────────

/// Supplies the positioning context the dropdown attaches to
///
/// In the terminal app this is the omnibox input line: the popup is drawn
/// directly beneath the anchor and aligned to its width.
pub trait DropdownEmbedder: std::fmt::Debug {
    /// Area of the view the dropdown hangs off
    fn anchor(&self) -> Rect;

    /// Width the dropdown should align to (defaults to the anchor width)
    fn alignment_width(&self) -> u16 {
        self.anchor().width
    }
}
