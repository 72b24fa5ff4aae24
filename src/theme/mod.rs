// Popup theme system
//
// The dropdown has exactly two backgrounds: dark and light. Which one is
// active is driven by the USE_DARK_BACKGROUND property, so both are resolved
// once at startup and the list surface just picks one.
//
// Theme loading priority (per variant):
// 1. External TOML from ~/.config/omnibar/themes/{dark,light}.toml
// 2. Bundled TOML (compiled into binary)
// 3. Hardcoded fallback

mod bundled;
mod toml_format;

pub use toml_format::TomlTheme;

use ratatui::style::Color;
use ratatui::widgets::BorderType;
use std::path::PathBuf;

/// Configuration options for theme resolution
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            use_theme_background: true,
        }
    }
}

/// Fully resolved popup palette
#[derive(Debug, Clone, PartialEq)]
pub struct PopupTheme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub muted: Color,
    pub url: Color,
    pub accent: Color,
    pub border_type: BorderType,
}

impl PopupTheme {
    /// Resolve the dark or light popup theme
    pub fn load(dark: bool, config: &ThemeConfig) -> Self {
        let bundled = if dark { bundled::DARK } else { bundled::LIGHT };

        if let Some(theme) = Self::load_external(bundled.filename, config) {
            return theme;
        }

        match TomlTheme::from_str(bundled.content) {
            Ok(toml) => Self::from_toml(toml, config),
            Err(e) => {
                tracing::warn!("Bundled theme {} is invalid: {}", bundled.filename, e);
                Self::hardcoded(dark, config)
            }
        }
    }

    fn load_external(filename: &str, config: &ThemeConfig) -> Option<Self> {
        let path = Self::themes_dir()?.join(filename);
        if !path.exists() {
            return None;
        }

        let contents = std::fs::read_to_string(&path).ok()?;
        match TomlTheme::from_str(&contents) {
            Ok(toml) => {
                tracing::debug!("Loaded popup theme from {}", path.display());
                Some(Self::from_toml(toml, config))
            }
            Err(e) => {
                tracing::warn!("Ignoring invalid theme {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get themes directory path
    pub fn themes_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("omnibar").join("themes"))
    }

    /// Parse border type string to BorderType enum
    fn parse_border_type(value: Option<&str>) -> BorderType {
        match value {
            Some("rounded") => BorderType::Rounded,
            Some("double") => BorderType::Double,
            Some("thick") => BorderType::Thick,
            _ => BorderType::Plain,
        }
    }

    /// Create theme from native TOML format
    pub fn from_toml(toml: TomlTheme, config: &ThemeConfig) -> Self {
        let parse = TomlTheme::parse_color;
        let popup = &toml.popup;

        let background = if config.use_theme_background {
            parse(&popup.background)
        } else {
            Color::Reset
        };

        Self {
            name: toml.meta.name.clone(),
            background,
            foreground: parse(&popup.foreground),
            border: parse(&popup.border),
            selection: parse(&popup.selection_bg),
            selection_fg: parse(&popup.selection_fg),
            muted: parse(&popup.muted),
            url: parse(&popup.url),
            accent: parse(&popup.accent),
            border_type: Self::parse_border_type(popup.border_type.as_deref()),
        }
    }

    /// Hardcoded fallback when no themes can be loaded
    fn hardcoded(dark: bool, config: &ThemeConfig) -> Self {
        let (name, background, foreground, selection) = if dark {
            ("Fallback Dark", Color::Black, Color::Gray, Color::DarkGray)
        } else {
            ("Fallback Light", Color::White, Color::Black, Color::Gray)
        };

        Self {
            name: name.to_string(),
            background: if config.use_theme_background {
                background
            } else {
                Color::Reset
            },
            foreground,
            border: Color::DarkGray,
            selection,
            selection_fg: foreground,
            muted: Color::DarkGray,
            url: Color::Blue,
            accent: Color::Yellow,
            border_type: BorderType::Plain,
        }
    }
}

/// Both popup variants, resolved once and shared with the list surface
#[derive(Debug, Clone)]
pub struct PopupThemes {
    pub dark: PopupTheme,
    pub light: PopupTheme,
}

impl PopupThemes {
    pub fn load(config: &ThemeConfig) -> Self {
        Self {
            dark: PopupTheme::load(true, config),
            light: PopupTheme::load(false, config),
        }
    }

    /// Bundled variants only, no filesystem access
    pub fn bundled() -> Self {
        let config = ThemeConfig::default();
        let parse = |content: &str, dark: bool| match TomlTheme::from_str(content) {
            Ok(toml) => PopupTheme::from_toml(toml, &config),
            Err(_) => PopupTheme::hardcoded(dark, &config),
        };
        Self {
            dark: parse(bundled::DARK.content, true),
            light: parse(bundled::LIGHT.content, false),
        }
    }

    pub fn pick(&self, dark: bool) -> &PopupTheme {
        if dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

impl Default for PopupThemes {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_variants_differ() {
        let themes = PopupThemes::bundled();
        assert_eq!(themes.dark.name, "Popup Dark");
        assert_eq!(themes.light.name, "Popup Light");
        assert_ne!(themes.dark.background, themes.light.background);
        assert_eq!(themes.dark.border_type, BorderType::Rounded);
    }

    #[test]
    fn pick_selects_variant() {
        let themes = PopupThemes::bundled();
        assert_eq!(themes.pick(true), &themes.dark);
        assert_eq!(themes.pick(false), &themes.light);
    }

    #[test]
    fn terminal_background_when_disabled() {
        let config = ThemeConfig {
            use_theme_background: false,
        };
        let toml = TomlTheme::from_str(bundled::DARK.content).unwrap();
        let theme = PopupTheme::from_toml(toml, &config);
        assert_eq!(theme.background, Color::Reset);
    }

    #[test]
    fn hardcoded_fallback_is_usable() {
        let theme = PopupTheme::hardcoded(false, &ThemeConfig::default());
        assert_eq!(theme.background, Color::White);
        assert_eq!(theme.border_type, BorderType::Plain);
    }
}
