//! Suggestion provider: answers omnibox queries off the UI thread
//!
//! The UI sends a `SuggestionRequest` for every edit. The provider waits until
//! the user pauses typing (debounce), matches the latest query against its
//! corpus and replies with a `SuggestionBatch` tagged with the request's
//! generation so the UI can drop answers to queries it no longer shows.
//!
//! The corpus is a flat list of rows, built in or loaded from TOML:
//!
//! ```toml
//! [[entries]]
//! kind = "bookmark"
//! title = "The Rust Book"
//! url = "https://doc.rust-lang.org/book/"
//! ```

use super::properties::{SuggestionKind, SuggestionRow};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

/// A query from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub generation: u64,
    pub query: String,
}

/// Rows answering one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionBatch {
    pub generation: u64,
    pub query: String,
    pub rows: Vec<SuggestionRow>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Corpus
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    entries: Vec<SuggestionRow>,
}

/// Rows the provider matches queries against
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<SuggestionRow>,
}

impl Corpus {
    pub fn new(entries: Vec<SuggestionRow>) -> Self {
        Self { entries }
    }

    /// Small built-in corpus used when no corpus file is configured
    pub fn builtin() -> Self {
        use SuggestionKind::*;
        let entry = |kind, title: &str, url: &str| SuggestionRow::new(kind, title).with_url(url);
        Self::new(vec![
            entry(Bookmark, "The Rust Programming Language", "https://doc.rust-lang.org/book/"),
            entry(Bookmark, "Rust by Example", "https://doc.rust-lang.org/rust-by-example/"),
            entry(History, "crates.io: Rust Package Registry", "https://crates.io/"),
            entry(History, "docs.rs", "https://docs.rs/"),
            entry(History, "ratatui - Rust", "https://docs.rs/ratatui/"),
            entry(History, "tokio - An asynchronous Rust runtime", "https://tokio.rs/"),
            entry(Bookmark, "This Week in Rust", "https://this-week-in-rust.org/"),
            entry(Url, "github.com", "https://github.com/"),
            entry(Url, "news.ycombinator.com", "https://news.ycombinator.com/"),
            entry(History, "Wikipedia, the free encyclopedia", "https://en.wikipedia.org/"),
            entry(Bookmark, "MDN Web Docs", "https://developer.mozilla.org/"),
            entry(History, "Weather forecast", "https://weather.example.com/"),
        ])
    }

    /// Parse a TOML corpus (`[[entries]]` tables)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CorpusFile = toml::from_str(content).context("Invalid corpus TOML")?;
        Ok(Self::new(file.entries))
    }

    /// Load a corpus file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus file {}", path.display()))?;
        let corpus = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse corpus file {}", path.display()))?;
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows for `query`, at most `limit` of them.
    ///
    /// A blank query yields nothing. Otherwise the first row is always the
    /// search row for the query, followed by matches: title prefix, then url
    /// prefix, then title substring, then url substring; shorter titles first
    /// within a rank. Matching ignores case.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SuggestionRow> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        let mut ranked: Vec<(u8, &SuggestionRow)> = self
            .entries
            .iter()
            .filter_map(|row| Self::rank(row, &needle).map(|rank| (rank, row)))
            .collect();
        // Stable sort keeps corpus order for ties
        ranked.sort_by_key(|(rank, row)| (*rank, row.title.chars().count()));

        let mut rows = Vec::with_capacity(limit.max(1));
        rows.push(SuggestionRow::search(query));
        rows.extend(
            ranked
                .into_iter()
                .map(|(_, row)| row.clone())
                .take(limit.max(1) - 1),
        );
        rows
    }

    fn rank(row: &SuggestionRow, needle: &str) -> Option<u8> {
        let title = row.title.to_lowercase();
        let url = row.url.as_deref().map(strip_scheme).map(str::to_lowercase);

        if title.starts_with(needle) {
            Some(0)
        } else if url.as_deref().is_some_and(|u| u.starts_with(needle)) {
            Some(1)
        } else if title.contains(needle) {
            Some(2)
        } else if url.as_deref().is_some_and(|u| u.contains(needle)) {
            Some(3)
        } else {
            None
        }
    }
}

/// `https://www.example.com/` → `example.com/`
fn strip_scheme(url: &str) -> &str {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    rest.strip_prefix("www.").unwrap_or(rest)
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider task
// ─────────────────────────────────────────────────────────────────────────────

/// Provider tuning, taken from config
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfig {
    /// Quiet period after the last request before answering
    pub debounce: Duration,
    /// Maximum rows per batch, search row included
    pub max_suggestions: usize,
}

/// Async worker answering suggestion requests
pub struct SuggestionProvider {
    corpus: Corpus,
    config: ProviderConfig,
    request_rx: mpsc::Receiver<SuggestionRequest>,
    batch_tx: mpsc::Sender<SuggestionBatch>,
}

impl SuggestionProvider {
    pub fn new(
        corpus: Corpus,
        config: ProviderConfig,
        request_rx: mpsc::Receiver<SuggestionRequest>,
        batch_tx: mpsc::Sender<SuggestionBatch>,
    ) -> Self {
        Self {
            corpus,
            config,
            request_rx,
            batch_tx,
        }
    }

    /// Run until either channel closes.
    ///
    /// Requests arriving during the debounce window replace the pending one,
    /// so a burst of keystrokes produces a single batch for the last query.
    pub async fn run(mut self) -> Result<()> {
        tracing::debug!(
            "Suggestion provider started: {} entries, debounce {:?}",
            self.corpus.len(),
            self.config.debounce
        );

        while let Some(mut request) = self.request_rx.recv().await {
            loop {
                match tokio::time::timeout(self.config.debounce, self.request_rx.recv()).await {
                    Ok(Some(newer)) => request = newer,
                    Ok(None) => return Ok(()),
                    Err(_elapsed) => break,
                }
            }

            let rows = self
                .corpus
                .search(&request.query, self.config.max_suggestions);
            tracing::debug!(
                "Answering query {:?} (generation {}): {} rows",
                request.query,
                request.generation,
                rows.len()
            );

            let batch = SuggestionBatch {
                generation: request.generation,
                query: request.query,
                rows,
            };
            if self.batch_tx.send(batch).await.is_err() {
                break;
            }
        }

        tracing::debug!("Suggestion provider stopped");
        Ok(())
    }
}
