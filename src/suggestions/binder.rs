//! Suggestion list view binder
//!
//! Maps one property change to the minimal set of view mutations. The binder
//! holds no state: every branch reads the current model value and derives the
//! view state from it, so re-dispatching an unchanged key reproduces the same
//! view state.
//!
//! # State machine
//!
//! ```text
//! VISIBLE=true   container → Visible, attach list if unparented, list.show()
//! VISIBLE=false  list → Gone, detach list if parented, container → Invisible
//! EMBEDDER       list.set_embedder(value)
//! SUGGESTION_MODELS
//!                adapter.replace_rows(value), list.set_selection(0)
//! USE_DARK_BACKGROUND
//!                list.refresh_background(value)
//! ```

use super::properties::{PropertyKey, SuggestionListModel};
use crate::view::{ListSurface, RowAdapter, ViewContainer, Visibility};

/// The view handles the binder mutates
///
/// Built once per session from three already-initialized views and handed to
/// every [`bind`] call. Members are read-only fields; the views themselves are
/// mutated through the borrow passed to `bind`.
#[derive(Debug)]
pub struct SuggestionListViewHolder<C, L, A> {
    container: C,
    list: L,
    adapter: A,
}

impl<C, L, A> SuggestionListViewHolder<C, L, A>
where
    C: ViewContainer,
    L: ListSurface,
    A: RowAdapter,
{
    /// Bundle the three views.
    ///
    /// # Panics
    /// If the adapter does not write into the rows the list renders, or if
    /// the list and container are the same view. Either is a wiring bug and
    /// would leave the dropdown in an inconsistent visual state.
    pub fn new(container: C, list: L, adapter: A) -> Self {
        assert_eq!(
            list.row_source(),
            adapter.row_source(),
            "adapter must render into the list surface's rows"
        );
        assert_ne!(
            container.id(),
            list.id(),
            "list surface cannot be its own container"
        );
        Self {
            container,
            list,
            adapter,
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    #[cfg(test)]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the list for view-local interaction (selection keys)
    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }
}

/// Apply the view mutations for `key` using the current value in `model`
pub fn bind<C, L, A>(
    model: &SuggestionListModel,
    view: &mut SuggestionListViewHolder<C, L, A>,
    key: PropertyKey,
) where
    C: ViewContainer,
    L: ListSurface,
    A: RowAdapter,
{
    tracing::trace!(key = %key, "bind suggestion list property");

    match key {
        PropertyKey::Visible => {
            if model.visible() {
                view.container.set_visibility(Visibility::Visible);
                if view.list.parent().is_none() {
                    view.container.add_child(&mut view.list);
                }
                view.list.show();
            } else {
                view.list.set_visibility(Visibility::Gone);
                if view.list.parent().is_some() {
                    view.list.detach_from_parent();
                }
                view.container.set_visibility(Visibility::Invisible);
            }
        }
        PropertyKey::Embedder => {
            view.list.set_embedder(model.embedder());
        }
        PropertyKey::SuggestionModels => {
            view.adapter.replace_rows(model.suggestion_models());
            view.list.set_selection(0);
        }
        PropertyKey::UseDarkBackground => {
            view.list.refresh_background(model.use_dark_background());
        }
    }
}
