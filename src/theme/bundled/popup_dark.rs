//! Dark popup background

pub const THEME: &str = r##"# Dark popup for omnibar

[meta]
name = "Popup Dark"
version = 1

[popup]
background = "#28292d"
foreground = "#d4cfc9"
border = "#3a3b40"
selection_bg = "#3d3834"
selection_fg = "#e8e4df"
muted = "#8a8279"
url = "#6b98b8"
accent = "#c9a66b"
border_type = "rounded"
"##;
