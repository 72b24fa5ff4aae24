//! Property change processor
//!
//! Connects a [`SuggestionListModel`] to a view through a binder function.
//! Every write goes through [`PropertyModelChangeProcessor::update`], which
//! stores the value and immediately dispatches the changed key. There is no
//! queue: one update is fully applied before the next can start, and it all
//! happens on the UI thread (the processor is `!Send` via `Rc` in the model).

use super::properties::{PropertyKey, PropertyUpdate, SuggestionListModel};

/// Binder signature: read the model, mutate the view for one key
pub type ViewBinder<V> = fn(&SuggestionListModel, &mut V, PropertyKey);

/// Owns the model and the view and keeps them in sync (model → view only)
pub struct PropertyModelChangeProcessor<V> {
    model: SuggestionListModel,
    view: V,
    binder: ViewBinder<V>,
    /// Number of dispatches performed, including the initial bind
    dispatches: u64,
}

impl<V> PropertyModelChangeProcessor<V> {
    /// Create the processor and bind every key once so the view starts in
    /// sync with the model.
    pub fn new(model: SuggestionListModel, view: V, binder: ViewBinder<V>) -> Self {
        let mut processor = Self {
            model,
            view,
            binder,
            dispatches: 0,
        };
        for key in PropertyKey::ALL {
            processor.dispatch(key);
        }
        processor
    }

    /// Write a value and bind the key it changed.
    ///
    /// Equal values are dispatched too.
    pub fn update(&mut self, update: PropertyUpdate) {
        let key = self.model.apply(update);
        tracing::debug!("Property changed: {}", key);
        self.dispatch(key);
    }

    fn dispatch(&mut self, key: PropertyKey) {
        (self.binder)(&self.model, &mut self.view, key);
        self.dispatches += 1;
    }

    pub fn model(&self) -> &SuggestionListModel {
        &self.model
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable view access for view-local interaction that bypasses the model
    /// (moving the highlighted row, measuring). Never use it to change a
    /// bound property.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub fn dispatch_count(&self) -> u64 {
        self.dispatches
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for PropertyModelChangeProcessor<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyModelChangeProcessor")
            .field("model", &self.model)
            .field("view", &self.view)
            .field("dispatches", &self.dispatches)
            .finish()
    }
}
