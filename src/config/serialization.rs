//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        let corpus_line = match &self.corpus_file {
            Some(path) => format!("corpus_file = {:?}", path.display().to_string()),
            None => "# corpus_file = \"~/.config/omnibar/corpus.toml\"".to_string(),
        };

        format!(
            r#"# omnibar configuration

# Start with the dark popup background (Ctrl+T toggles at runtime)
dark_background = {dark}

# Use the popup theme's background color (true) or the terminal's default (false)
use_theme_background = {use_bg}

# Maximum rows in the dropdown, "Search for" row included
max_suggestions = {max}

# Wait this long after the last keystroke before querying (milliseconds)
debounce_ms = {debounce}

# Rows reserved beneath the omnibox for the popup, border included
dropdown_height = {height}

# Suggestion corpus ([[entries]] with kind/title/url); built-in when unset
{corpus_line}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (JSON lines, in addition to the TUI log panel)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            dark = self.dark_background,
            use_bg = self.use_theme_background,
            max = self.max_suggestions,
            debounce = self.debounce_ms,
            height = self.dropdown_height,
            corpus_line = corpus_line,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
