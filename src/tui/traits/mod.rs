//! Component trait system for the terminal front end
//!
//! Panels declare their own capabilities through traits instead of the
//! App knowing how to render and navigate every one of them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │       (orchestrator: routes keys, owns the mediator)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │ Omnibox  │   │ Dropdown │   │   Logs   │
//!        │          │   │   list   │   │  Panel   │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] / [`Selectable`] - list navigation
//! - [`Interactive`] - keyboard input

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use interactive::{Handled, Interactive};
pub use scrollable::{Scrollable, Selectable};
