//! Interactive trait for components that handle keyboard input

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global handlers: Ctrl+C, Ctrl+T, Esc)
///    │
///    │ if not handled
///    ▼
/// Dropdown list (Up/Down/Home/End) when visible
///    │
///    ▼
/// Omnibox (text editing)
/// ```
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints shown in the status bar while this component is active
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
