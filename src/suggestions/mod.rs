//! Omnibox suggestion dropdown
//!
//! ```text
//!  keystroke ──► SuggestionListMediator ──request──► provider task
//!                      │        ▲                        │
//!                      │        └────────batch───────────┘
//!                      ▼
//!      PropertyModelChangeProcessor (model + view)
//!                      │ key
//!                      ▼
//!                bind(model, view, key)
//!                      │
//!       container / list surface / adapter
//! ```
//!
//! The model is the only writer-facing surface. Views are mutated exclusively
//! by [`binder::bind`], one property key at a time.

pub mod binder;
pub mod mediator;
pub mod processor;
pub mod properties;
pub mod provider;

pub use mediator::SuggestionListMediator;
pub use properties::SuggestionRow;
pub use provider::{Corpus, SuggestionBatch, SuggestionRequest};
