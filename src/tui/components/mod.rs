// Components module - reusable UI building blocks
//
// - Omnibox: text input the dropdown hangs off
// - Logs panel: tail of the in-memory log buffer
// - Status bar: mode, dropdown state, key hints
// - Toast: transient notifications
//
// The dropdown itself lives in `crate::view`.

pub mod logs_panel;
pub mod omnibox;
pub mod scrollbar;
pub mod status_bar;
pub mod toast;

pub use logs_panel::LogsPanel;
pub use omnibox::Omnibox;
pub use toast::Toast;
