// CLI module - command-line argument parsing and handlers
//
// Subcommands for configuration management:
// - config --show: Display effective configuration
// - config --path: Print the config file location
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// Omnibar - terminal address bar with a suggestion dropdown
#[derive(Parser)]
#[command(name = "omnibar")]
#[command(version = VERSION)]
#[command(about = "Terminal address bar with a suggestion dropdown", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset()?;
            } else {
                println!("Usage: omnibar config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", render_effective(&config));

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

/// Effective values in config file syntax
fn render_effective(config: &Config) -> String {
    let corpus = match &config.corpus_file {
        Some(path) => format!("corpus_file = {:?}\n", path.display().to_string()),
        None => "# corpus_file: built-in\n".to_string(),
    };

    format!(
        "dark_background = {}\n\
         use_theme_background = {}\n\
         max_suggestions = {}\n\
         debounce_ms = {}\n\
         dropdown_height = {}\n\
         {}\n\
         [logging]\n\
         level = {:?}\n\
         file_enabled = {}\n\
         file_dir = {:?}\n\
         file_rotation = {:?}\n\
         file_prefix = {:?}\n",
        config.dark_background,
        config.use_theme_background,
        config.max_suggestions,
        config.debounce_ms,
        config.dropdown_height,
        corpus,
        config.logging.level,
        config.logging.file_enabled,
        config.logging.file_dir.display().to_string(),
        config.logging.file_rotation.as_str(),
        config.logging.file_prefix,
    )
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().context("Failed to flush prompt")?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_config_flags() {
        let cli = Cli::try_parse_from(["omnibar", "config", "--show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                show: true,
                reset: false,
                path: false
            })
        ));

        let cli = Cli::try_parse_from(["omnibar"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_effective_config_parses_as_toml() {
        let rendered = render_effective(&Config::default());
        let value: toml::Value = toml::from_str(&rendered).unwrap();
        assert_eq!(value["max_suggestions"].as_integer(), Some(8));
        assert_eq!(value["logging"]["file_rotation"].as_str(), Some("daily"));
        assert!(rendered.contains("# corpus_file: built-in"));
    }
}
