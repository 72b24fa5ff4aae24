//! Row adapter: writes suggestion rows into the storage a list surface renders

use super::{RowAdapter, RowSource, RowSourceId};
use crate::suggestions::SuggestionRow;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the write side of a [`RowSource`]
#[derive(Debug)]
pub struct SuggestionsAdapter {
    rows: RowSource,
}

impl SuggestionsAdapter {
    pub fn new() -> Self {
        Self {
            rows: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Handle for the list surface that reads these rows
    pub fn row_source_handle(&self) -> RowSource {
        Rc::clone(&self.rows)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl Default for SuggestionsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl RowAdapter for SuggestionsAdapter {
    fn replace_rows(&mut self, rows: &[SuggestionRow]) {
        let mut current = self.rows.borrow_mut();
        let kept = current
            .iter()
            .zip(rows)
            .take_while(|(old, new)| old == new)
            .count();

        current.clear();
        current.extend_from_slice(rows);

        tracing::debug!(
            "Suggestion rows replaced: {} rows ({} leading unchanged)",
            rows.len(),
            kept
        );
    }

    fn row_source(&self) -> RowSourceId {
        RowSourceId::of(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::properties::SuggestionKind;

    #[test]
    fn replace_is_wholesale() {
        let mut adapter = SuggestionsAdapter::new();
        let handle = adapter.row_source_handle();

        adapter.replace_rows(&[
            SuggestionRow::search("a"),
            SuggestionRow::new(SuggestionKind::History, "alpha"),
        ]);
        assert_eq!(handle.borrow().len(), 2);

        adapter.replace_rows(&[SuggestionRow::search("b")]);
        assert_eq!(*handle.borrow(), vec![SuggestionRow::search("b")]);
    }

    #[test]
    fn empty_replace_clears() {
        let mut adapter = SuggestionsAdapter::new();
        adapter.replace_rows(&[SuggestionRow::search("x")]);
        adapter.replace_rows(&[]);
        assert!(adapter.is_empty());
    }

    #[test]
    fn handle_shares_identity() {
        let adapter = SuggestionsAdapter::new();
        let handle = adapter.row_source_handle();
        assert_eq!(adapter.row_source(), RowSourceId::of(&handle));
        assert_ne!(
            adapter.row_source(),
            SuggestionsAdapter::new().row_source()
        );
    }
}
