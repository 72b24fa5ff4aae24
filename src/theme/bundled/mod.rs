//! Bundled popup themes (compiled into binary)
//!
//! Users override them by dropping `dark.toml` / `light.toml` into
//! ~/.config/omnibar/themes/.

mod popup_dark;
mod popup_light;

/// A bundled theme with its filename and TOML content
pub struct BundledTheme {
    pub filename: &'static str,
    pub content: &'static str,
}

pub const DARK: BundledTheme = BundledTheme {
    filename: "dark.toml",
    content: popup_dark::THEME,
};

pub const LIGHT: BundledTheme = BundledTheme {
    filename: "light.toml",
    content: popup_light::THEME,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TomlTheme;

    #[test]
    fn bundled_themes_parse() {
        for theme in [DARK, LIGHT] {
            let parsed = TomlTheme::from_str(theme.content);
            assert!(
                parsed.is_ok(),
                "{} failed to parse: {:?}",
                theme.filename,
                parsed.err()
            );
        }
    }
}
