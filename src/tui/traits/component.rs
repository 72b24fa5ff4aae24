//! Core component trait
//!
//! Every UI element that can be rendered implements `Component`.

use crate::theme::PopupTheme;
use ratatui::{layout::Rect, Frame};

/// Identifier for a component, used for focus tracking and key routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Text input line the dropdown hangs off
    Omnibox,
    /// Suggestion list inside the popup
    Dropdown,
    /// System logs panel
    Logs,
}

impl ComponentId {
    /// Tab behaviour: toggle between the omnibox and the logs
    pub fn next_focus(self) -> Self {
        match self {
            Self::Omnibox => Self::Logs,
            Self::Logs => Self::Omnibox,
            Self::Dropdown => Self::Omnibox,
        }
    }
}

/// Immutable context passed to components during rendering
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Palette currently in effect (dark or light)
    pub theme: &'a PopupTheme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Animation frame counter (for the pending-request spinner)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a PopupTheme, focus: ComponentId, animation_frame: usize) -> Self {
        Self {
            theme,
            focus,
            animation_frame,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Spinner character for the current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Base trait for all UI components
///
/// # Example
///
/// ```ignore
/// impl Component for LogsPanel {
///     fn id(&self) -> ComponentId {
///         ComponentId::Logs
///     }
///
///     fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
///         let focused = ctx.is_focused(self.id());
///         // ...
///     }
/// }
/// ```
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render the component into `area`
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
