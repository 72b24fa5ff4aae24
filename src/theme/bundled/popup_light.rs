//! Light popup background

pub const THEME: &str = r##"# Light popup for omnibar

[meta]
name = "Popup Light"
version = 1

[popup]
background = "#fdf6e3"
foreground = "#434343"
border = "#c8c1ae"
selection_bg = "#e4dcc6"
selection_fg = "#1f1f1f"
muted = "#8a8a80"
url = "#2f6f9f"
accent = "#9f6b1f"
border_type = "rounded"
"##;
