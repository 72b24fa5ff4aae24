//! Suggestion list mediator, the only writer of the suggestion list model
//!
//! Turns omnibox events (text edits, provider answers, dismissals, theme
//! toggles) into property updates. It never touches the views directly except
//! for moving the highlighted row, which is view-local state.

use super::binder::{bind, SuggestionListViewHolder};
use super::processor::PropertyModelChangeProcessor;
use super::properties::{PropertyUpdate, SuggestionListModel, SuggestionRow};
use super::provider::{SuggestionBatch, SuggestionRequest};
use crate::theme::PopupThemes;
use crate::tui::traits::{Handled, Interactive};
use crate::view::{DropdownContainer, DropdownEmbedder, SuggestionsAdapter, SuggestionsList};
use crossterm::event::KeyEvent;
use std::rc::Rc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// The dropdown as drawn in the terminal
pub type TerminalSuggestionView =
    SuggestionListViewHolder<DropdownContainer, SuggestionsList, SuggestionsAdapter>;

/// Wire the three terminal views into a holder
pub fn build_terminal_view(
    dropdown_height: u16,
    themes: Rc<PopupThemes>,
) -> TerminalSuggestionView {
    let container = DropdownContainer::new(dropdown_height);
    let adapter = SuggestionsAdapter::new();
    let list = SuggestionsList::new(adapter.row_source_handle(), themes, dropdown_height);
    SuggestionListViewHolder::new(container, list, adapter)
}

pub struct SuggestionListMediator {
    processor: PropertyModelChangeProcessor<TerminalSuggestionView>,
    requests: mpsc::Sender<SuggestionRequest>,
    /// Generation of the most recent request; older batches are stale
    generation: u64,
    /// Query the dropdown currently answers (trimmed)
    query: String,
    /// A request is out and nothing has answered or cancelled it yet
    pending: bool,
    /// Latest request that found the queue full; sent once there is room
    unsent: Option<SuggestionRequest>,
}

impl SuggestionListMediator {
    pub fn new(
        view: TerminalSuggestionView,
        requests: mpsc::Sender<SuggestionRequest>,
        use_dark_background: bool,
    ) -> Self {
        let mut model = SuggestionListModel::new();
        model.apply(PropertyUpdate::UseDarkBackground(use_dark_background));

        Self {
            processor: PropertyModelChangeProcessor::new(model, view, bind),
            requests,
            generation: 0,
            query: String::new(),
            pending: false,
            unsent: None,
        }
    }

    pub fn attach_embedder(&mut self, embedder: Rc<dyn DropdownEmbedder>) {
        self.processor
            .update(PropertyUpdate::Embedder(Some(embedder)));
    }

    pub fn set_dark_background(&mut self, dark: bool) {
        self.processor.update(PropertyUpdate::UseDarkBackground(dark));
    }

    /// Flip dark/light and return the new value
    pub fn toggle_dark_background(&mut self) -> bool {
        let dark = !self.processor.model().use_dark_background();
        self.set_dark_background(dark);
        dark
    }

    /// The omnibox text changed.
    ///
    /// A blank query hides the dropdown. Anything else asks the provider for
    /// rows; the dropdown stays as it is until the answer arrives.
    pub fn on_text_changed(&mut self, text: &str) {
        self.generation += 1;
        let query = text.trim();

        if query.is_empty() {
            self.query.clear();
            self.cancel_requests();
            self.hide();
            return;
        }

        self.query = query.to_string();
        self.pending = true;
        self.send(SuggestionRequest {
            generation: self.generation,
            query: self.query.clone(),
        });
    }

    /// Retry a request that found the queue full. Called on every tick.
    pub fn flush_unsent(&mut self) {
        if let Some(request) = self.unsent.take() {
            self.send(request);
        }
    }

    fn send(&mut self, request: SuggestionRequest) {
        match self.requests.try_send(request) {
            Ok(()) => self.unsent = None,
            Err(TrySendError::Full(request)) => {
                tracing::debug!("Suggestion request queue full, holding {:?}", request.query);
                self.unsent = Some(request);
            }
            Err(TrySendError::Closed(_)) => {
                self.cancel_requests();
                tracing::warn!("Suggestion provider is gone");
            }
        }
    }

    fn cancel_requests(&mut self) {
        self.pending = false;
        self.unsent = None;
    }

    /// A provider answer arrived. Returns whether it was applied.
    pub fn on_suggestions(&mut self, batch: SuggestionBatch) -> bool {
        // The provider just took a request off the queue
        self.flush_unsent();

        if batch.generation != self.generation {
            tracing::debug!(
                "Dropping stale suggestions for {:?} (generation {}, current {})",
                batch.query,
                batch.generation,
                self.generation
            );
            return false;
        }

        self.pending = false;
        if batch.rows.is_empty() {
            self.hide();
        } else {
            self.processor
                .update(PropertyUpdate::SuggestionModels(batch.rows));
            self.processor.update(PropertyUpdate::Visible(true));
        }
        true
    }

    /// Hide the dropdown and ignore any answer still in flight
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.cancel_requests();
        self.hide();
    }

    fn hide(&mut self) {
        self.processor.update(PropertyUpdate::Visible(false));
    }

    /// Waiting for the provider to answer the current query
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_visible(&self) -> bool {
        self.processor.model().visible()
    }

    /// Highlighted row while the dropdown is shown
    pub fn selected_row(&self) -> Option<SuggestionRow> {
        if !self.is_visible() {
            return None;
        }
        self.processor.view().list().selected_row()
    }

    /// Route a navigation key to the list. Ignored while hidden.
    pub fn move_selection(&mut self, key: KeyEvent) -> Handled {
        if !self.is_visible() {
            return Handled::No;
        }
        self.processor.view_mut().list_mut().handle_key(key)
    }

    /// Commit the highlighted row: dismiss and return the text for the omnibox
    pub fn commit_selection(&mut self) -> Option<String> {
        let row = self.selected_row()?;
        tracing::info!("Committed suggestion: {}", row.commit_text());
        self.dismiss();
        Some(row.commit_text().to_string())
    }

    pub fn view(&self) -> &TerminalSuggestionView {
        self.processor.view()
    }

    pub fn model(&self) -> &SuggestionListModel {
        self.processor.model()
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Debug for SuggestionListMediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionListMediator")
            .field("generation", &self.generation)
            .field("query", &self.query)
            .field("visible", &self.is_visible())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::properties::SuggestionKind;
    use crate::view::{ChildView, ListSurface, ViewContainer, Visibility};
    use crossterm::event::KeyCode;
    use ratatui::layout::Rect;

    #[derive(Debug)]
    struct Anchor;

    impl DropdownEmbedder for Anchor {
        fn anchor(&self) -> Rect {
            Rect::new(2, 0, 40, 3)
        }
    }

    fn mediator() -> (SuggestionListMediator, mpsc::Receiver<SuggestionRequest>) {
        let (tx, rx) = mpsc::channel(8);
        let view = build_terminal_view(10, Rc::new(PopupThemes::bundled()));
        (SuggestionListMediator::new(view, tx, true), rx)
    }

    fn batch(generation: u64, titles: &[&str]) -> SuggestionBatch {
        SuggestionBatch {
            generation,
            query: "q".into(),
            rows: titles
                .iter()
                .map(|t| SuggestionRow::new(SuggestionKind::History, *t))
                .collect(),
        }
    }

    #[test]
    fn initial_state_is_hidden_with_configured_background() {
        let (m, _rx) = mediator();
        assert!(!m.is_visible());
        assert!(m.view().list().use_dark());
        // Initial VISIBLE=false leaves the slot reserved but empty
        assert_eq!(m.view().container().visibility(), Visibility::Invisible);
        assert!(m.view().list().parent().is_none());
    }

    #[test]
    fn text_change_sends_request_with_new_generation() {
        let (mut m, mut rx) = mediator();
        m.on_text_changed("  rust ");
        m.on_text_changed("rusty");

        assert!(m.is_pending());
        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.query, "rust");
        assert_eq!(second.generation, first.generation + 1);
        assert_eq!(m.query(), "rusty");
    }

    #[test]
    fn batch_shows_rows_and_attaches_list() {
        let (mut m, _rx) = mediator();
        m.attach_embedder(Rc::new(Anchor));
        m.on_text_changed("a");

        assert!(m.on_suggestions(batch(m.generation(), &["alpha", "beta"])));
        assert!(!m.is_pending());

        assert!(m.is_visible());
        let view = m.view();
        assert_eq!(view.container().visibility(), Visibility::Visible);
        assert_eq!(view.list().parent(), Some(view.container().id()));
        assert_eq!(ListSurface::visibility(view.list()), Visibility::Visible);
        assert_eq!(view.adapter().len(), 2);
        assert_eq!(view.list().measured(), Some(Rect::new(2, 3, 40, 4)));
        assert_eq!(m.selected_row().map(|r| r.title), Some("alpha".into()));
    }

    #[test]
    fn stale_batch_is_dropped() {
        let (mut m, _rx) = mediator();
        m.on_text_changed("a");
        let stale = m.generation();
        m.on_text_changed("ab");

        assert!(!m.on_suggestions(batch(stale, &["alpha"])));
        assert!(!m.is_visible());
        assert!(m.view().adapter().is_empty());
    }

    #[test]
    fn empty_batch_hides() {
        let (mut m, _rx) = mediator();
        m.on_text_changed("a");
        m.on_suggestions(batch(m.generation(), &["alpha"]));
        m.on_text_changed("ax");
        m.on_suggestions(batch(m.generation(), &[]));

        assert!(!m.is_visible());
        assert!(m.view().list().parent().is_none());
        assert_eq!(m.view().container().visibility(), Visibility::Invisible);
    }

    #[test]
    fn clearing_text_hides_and_invalidates_in_flight() {
        let (mut m, mut rx) = mediator();
        m.on_text_changed("a");
        m.on_suggestions(batch(m.generation(), &["alpha"]));
        let in_flight = m.generation();
        m.on_text_changed("");

        assert!(!m.is_visible());
        assert!(!m.on_suggestions(batch(in_flight, &["alpha"])));
        // Only the non-empty query reached the provider
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn selection_moves_and_commits() {
        let (mut m, _rx) = mediator();
        m.on_text_changed("a");
        m.on_suggestions(batch(m.generation(), &["alpha", "beta", "gamma"]));

        assert_eq!(m.move_selection(KeyEvent::from(KeyCode::Down)), Handled::Yes);
        assert_eq!(m.selected_row().map(|r| r.title), Some("beta".into()));

        assert_eq!(m.commit_selection().as_deref(), Some("beta"));
        assert!(!m.is_visible());
        assert_eq!(m.commit_selection(), None);
    }

    #[test]
    fn new_rows_reset_selection() {
        let (mut m, _rx) = mediator();
        m.on_text_changed("a");
        m.on_suggestions(batch(m.generation(), &["alpha", "beta"]));
        m.move_selection(KeyEvent::from(KeyCode::Down));

        m.on_text_changed("al");
        m.on_suggestions(batch(m.generation(), &["alpha", "alps"]));
        assert_eq!(m.selected_row().map(|r| r.title), Some("alpha".into()));
    }

    #[test]
    fn navigation_ignored_while_hidden() {
        let (mut m, _rx) = mediator();
        assert_eq!(m.move_selection(KeyEvent::from(KeyCode::Down)), Handled::No);
        assert!(m.selected_row().is_none());
    }

    #[test]
    fn toggle_dark_background_refreshes_list() {
        let (mut m, _rx) = mediator();
        assert!(!m.toggle_dark_background());
        assert!(!m.view().list().use_dark());
        assert_eq!(m.view().list().theme().name, "Popup Light");
    }

    #[test]
    fn full_queue_holds_latest_query_until_there_is_room() {
        let (tx, mut rx) = mpsc::channel(1);
        let view = build_terminal_view(10, Rc::new(PopupThemes::bundled()));
        let mut m = SuggestionListMediator::new(view, tx, true);

        m.on_text_changed("a");
        m.on_text_changed("ab");
        assert!(m.is_pending());

        // Answering the queued request frees the slot for the held one
        let first = rx.try_recv().unwrap();
        assert_eq!(first.query, "a");
        assert!(!m.on_suggestions(batch(first.generation, &["alpha"])));
        assert!(m.is_pending());

        let second = rx.try_recv().unwrap();
        assert_eq!(second.query, "ab");
        assert_eq!(second.generation, m.generation());

        assert!(m.on_suggestions(batch(second.generation, &["abc"])));
        assert!(!m.is_pending());
        assert!(m.is_visible());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn held_request_is_retried_on_flush() {
        let (tx, mut rx) = mpsc::channel(1);
        let view = build_terminal_view(10, Rc::new(PopupThemes::bundled()));
        let mut m = SuggestionListMediator::new(view, tx, true);

        m.on_text_changed("a");
        m.on_text_changed("ab");
        m.on_text_changed("abc");
        let _ = rx.try_recv();

        m.flush_unsent();
        let held = rx.try_recv().unwrap();
        assert_eq!(held.query, "abc");
        assert_eq!(held.generation, m.generation());

        // Nothing left to send
        m.flush_unsent();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dismiss_drops_held_request() {
        let (tx, mut rx) = mpsc::channel(1);
        let view = build_terminal_view(10, Rc::new(PopupThemes::bundled()));
        let mut m = SuggestionListMediator::new(view, tx, true);

        m.on_text_changed("a");
        m.on_text_changed("ab");
        m.dismiss();
        let _ = rx.try_recv();

        m.flush_unsent();
        assert!(rx.try_recv().is_err());
        assert!(!m.is_pending());
    }

    #[test]
    fn closed_provider_does_not_panic() {
        let (mut m, rx) = mediator();
        drop(rx);
        m.on_text_changed("a");
        assert!(!m.is_visible());
    }
}
