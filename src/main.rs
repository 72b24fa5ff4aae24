// Omnibar - terminal address bar with a suggestion dropdown
//
// Type into the omnibox and a popup of suggestions hangs beneath it.
//
// Architecture:
// - Suggestions: property model + change processor + binder drive the dropdown
// - View: terminal view toolkit (container, list surface, row adapter)
// - Provider: async task matching queries against a corpus
// - TUI (ratatui): omnibox, dropdown slot, logs panel, status bar
// - mpsc channels connect the TUI and the provider

mod cli;
mod config;
mod logging;
mod suggestions;
mod theme;
mod tui;
mod util;
mod view;

use anyhow::Result;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use suggestions::provider::{ProviderConfig, SuggestionProvider};
use suggestions::Corpus;
use theme::PopupThemes;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Capacity of the request and batch channels
const CHANNEL_CAPACITY: usize = 32;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    if cli::handle_cli()? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Logs go to the in-memory buffer: writing to stderr would garble the TUI
    let log_buffer = LogBuffer::new();
    let _file_guard = init_logging(&config, &log_buffer);

    tracing::info!("omnibar v{} starting", config::VERSION);

    let corpus = load_corpus(&config);
    let themes = PopupThemes::load(&config.theme_config());

    let (request_tx, request_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (batch_tx, batch_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let provider = SuggestionProvider::new(
        corpus,
        ProviderConfig {
            debounce: config.debounce(),
            max_suggestions: config.max_suggestions,
        },
        request_rx,
        batch_tx,
    );
    let provider_handle = tokio::spawn(async move {
        if let Err(e) = provider.run().await {
            tracing::error!("Suggestion provider failed: {:?}", e);
        }
    });

    let committed = tui::run_tui(config, themes, log_buffer, request_tx, batch_rx).await?;

    // Dropping the request sender inside the TUI ends the provider loop
    let _ = provider_handle.await;

    // Print the committed text so the binary can be used in scripts
    if let Some(text) = committed {
        println!("{}", text);
    }

    Ok(())
}

/// Initialize tracing.
///
/// Precedence: RUST_LOG env var > config file > default "info". Returns the
/// file writer guard, which must live for the whole run so logs flush.
fn init_logging(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("omnibar={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()));

    if !config.logging.file_enabled {
        registry.init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
        registry.init();
        tracing::warn!(
            "Could not create log directory {:?}: {}",
            config.logging.file_dir,
            e
        );
        return None;
    }

    let file_appender = match config.logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.logging.file_dir, &config.logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&config.logging.file_dir, &config.logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&config.logging.file_dir, &config.logging.file_prefix)
        }
    };

    // Writes happen on a background thread; JSON for structured parsing
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    registry
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

/// Configured corpus file, falling back to the built-in entries
fn load_corpus(config: &Config) -> Corpus {
    let Some(path) = &config.corpus_file else {
        return Corpus::builtin();
    };

    match Corpus::load(path) {
        Ok(corpus) if !corpus.is_empty() => {
            tracing::info!("Loaded {} suggestions from {}", corpus.len(), path.display());
            corpus
        }
        Ok(_) => {
            tracing::warn!("{} has no entries, using built-in corpus", path.display());
            Corpus::builtin()
        }
        Err(e) => {
            tracing::warn!("{:#}, using built-in corpus", e);
            Corpus::builtin()
        }
    }
}
