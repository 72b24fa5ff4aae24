//! Configuration for the omnibar
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/omnibar/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::theme::ThemeConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

mod observability;
mod serialization;


pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest popup slot that still shows one row inside its border
pub const MIN_DROPDOWN_HEIGHT: u16 = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Start with the dark popup background
    pub dark_background: bool,

    /// Use the popup theme's background color (true) or the terminal's default (false)
    pub use_theme_background: bool,

    /// Maximum rows per suggestion batch, search row included
    pub max_suggestions: usize,

    /// Quiet period before the provider answers a query
    pub debounce_ms: u64,

    /// Rows reserved beneath the omnibox for the popup, border included
    pub dropdown_height: u16,

    /// Optional TOML corpus replacing the built-in suggestions
    pub corpus_file: Option<PathBuf>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark_background: true,
            use_theme_background: true,
            max_suggestions: 8,
            debounce_ms: 60,
            dropdown_height: 10,
            corpus_file: None,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub dark_background: Option<bool>,
    pub use_theme_background: Option<bool>,
    pub max_suggestions: Option<usize>,
    pub debounce_ms: Option<u64>,
    pub dropdown_height: Option<u16>,
    pub corpus_file: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/omnibar/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("omnibar").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed:
    /// a broken config fails fast instead of silently running on defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Negative or non-numeric sizes\n");
                    eprintln!("  To reset, run `omnibar config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Dark background: env > file > default
        let dark_background = env("OMNIBAR_DARK")
            .and_then(|v| parse_bool(&v))
            .or(file.dark_background)
            .unwrap_or(defaults.dark_background);

        // Theme background: file > default
        let use_theme_background = file
            .use_theme_background
            .unwrap_or(defaults.use_theme_background);

        // Suggestion limit: env > file > default, at least the search row
        let max_suggestions = env("OMNIBAR_MAX_SUGGESTIONS")
            .and_then(|v| v.parse().ok())
            .or(file.max_suggestions)
            .unwrap_or(defaults.max_suggestions)
            .max(1);

        let debounce_ms = file.debounce_ms.unwrap_or(defaults.debounce_ms);

        let dropdown_height = file
            .dropdown_height
            .unwrap_or(defaults.dropdown_height)
            .max(MIN_DROPDOWN_HEIGHT);

        // Corpus file: env > file > none (built-in corpus)
        let corpus_file = env("OMNIBAR_CORPUS")
            .filter(|v| !v.is_empty())
            .or(file.corpus_file)
            .map(PathBuf::from);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            dark_background,
            use_theme_background,
            max_suggestions,
            debounce_ms,
            dropdown_height,
            corpus_file,
            logging,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn theme_config(&self) -> ThemeConfig {
        ThemeConfig {
            use_theme_background: self.use_theme_background,
        }
    }
}

/// `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off`, anything else is unset
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
