//! Property model for the suggestion list
//!
//! The model is a plain typed store. It knows nothing about views: writing a
//! value through [`SuggestionListModel::apply`] only returns the key that
//! changed, and the change processor turns that into a bind call.
//!
//! Writes are never de-duplicated. Setting a property to the value it already
//! holds still reports the key, so every bind branch must be idempotent.

use crate::view::DropdownEmbedder;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Observable facets of the suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Whether the dropdown is shown
    Visible,
    /// Positioning context the dropdown attaches to
    Embedder,
    /// Ordered rows to display
    SuggestionModels,
    /// Dark or light popup background
    UseDarkBackground,
}

impl PropertyKey {
    /// Every key, in initial-bind order
    pub const ALL: [PropertyKey; 4] = [
        PropertyKey::Visible,
        PropertyKey::Embedder,
        PropertyKey::SuggestionModels,
        PropertyKey::UseDarkBackground,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PropertyKey::Visible => "VISIBLE",
            PropertyKey::Embedder => "EMBEDDER",
            PropertyKey::SuggestionModels => "SUGGESTION_MODELS",
            PropertyKey::UseDarkBackground => "USE_DARK_BACKGROUND",
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row view-models
// ─────────────────────────────────────────────────────────────────────────────

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Search,
    History,
    Bookmark,
    Url,
}

impl SuggestionKind {
    /// Single-cell glyph shown in the row gutter
    pub fn glyph(&self) -> &'static str {
        match self {
            SuggestionKind::Search => "?",
            SuggestionKind::History => "↺",
            SuggestionKind::Bookmark => "★",
            SuggestionKind::Url => "→",
        }
    }
}

/// One row in the dropdown
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestionRow {
    pub kind: SuggestionKind,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl SuggestionRow {
    pub fn new(kind: SuggestionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Search row for a raw query
    pub fn search(query: &str) -> Self {
        Self::new(SuggestionKind::Search, query)
    }

    /// Text shown in the dropdown
    pub fn label(&self) -> Cow<'_, str> {
        match self.kind {
            SuggestionKind::Search => Cow::Owned(format!("Search for \"{}\"", self.title)),
            _ => Cow::Borrowed(&self.title),
        }
    }

    /// Text placed into the omnibox when this row is committed
    pub fn commit_text(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.title)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────────────────────────────────────

/// A single write to the model
#[derive(Debug, Clone)]
pub enum PropertyUpdate {
    Visible(bool),
    Embedder(Option<Rc<dyn DropdownEmbedder>>),
    SuggestionModels(Vec<SuggestionRow>),
    UseDarkBackground(bool),
}

impl PropertyUpdate {
    pub fn key(&self) -> PropertyKey {
        match self {
            PropertyUpdate::Visible(_) => PropertyKey::Visible,
            PropertyUpdate::Embedder(_) => PropertyKey::Embedder,
            PropertyUpdate::SuggestionModels(_) => PropertyKey::SuggestionModels,
            PropertyUpdate::UseDarkBackground(_) => PropertyKey::UseDarkBackground,
        }
    }
}

/// Current value of every suggestion list property
///
/// Every key always has a readable value; defaults are hidden, no embedder,
/// no rows and a light background.
#[derive(Debug, Clone, Default)]
pub struct SuggestionListModel {
    visible: bool,
    embedder: Option<Rc<dyn DropdownEmbedder>>,
    suggestion_models: Vec<SuggestionRow>,
    use_dark_background: bool,
}

impl SuggestionListModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn embedder(&self) -> Option<Rc<dyn DropdownEmbedder>> {
        self.embedder.clone()
    }

    pub fn suggestion_models(&self) -> &[SuggestionRow] {
        &self.suggestion_models
    }

    pub fn use_dark_background(&self) -> bool {
        self.use_dark_background
    }

    /// Store a new value and report which key changed
    pub fn apply(&mut self, update: PropertyUpdate) -> PropertyKey {
        let key = update.key();
        match update {
            PropertyUpdate::Visible(visible) => self.visible = visible,
            PropertyUpdate::Embedder(embedder) => self.embedder = embedder,
            PropertyUpdate::SuggestionModels(rows) => self.suggestion_models = rows,
            PropertyUpdate::UseDarkBackground(dark) => self.use_dark_background = dark,
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[derive(Debug)]
    struct FixedAnchor;

    impl DropdownEmbedder for FixedAnchor {
        fn anchor(&self) -> Rect {
            Rect::new(0, 0, 40, 1)
        }
    }

    #[test]
    fn defaults_are_readable() {
        let model = SuggestionListModel::new();
        assert!(!model.visible());
        assert!(model.embedder().is_none());
        assert!(model.suggestion_models().is_empty());
        assert!(!model.use_dark_background());
    }

    #[test]
    fn apply_reports_key_and_stores_value() {
        let mut model = SuggestionListModel::new();

        assert_eq!(
            model.apply(PropertyUpdate::Visible(true)),
            PropertyKey::Visible
        );
        assert!(model.visible());

        let rows = vec![SuggestionRow::search("rust")];
        assert_eq!(
            model.apply(PropertyUpdate::SuggestionModels(rows.clone())),
            PropertyKey::SuggestionModels
        );
        assert_eq!(model.suggestion_models(), rows.as_slice());

        assert_eq!(
            model.apply(PropertyUpdate::Embedder(Some(Rc::new(FixedAnchor)))),
            PropertyKey::Embedder
        );
        assert_eq!(model.embedder().map(|e| e.alignment_width()), Some(40));

        assert_eq!(
            model.apply(PropertyUpdate::UseDarkBackground(true)),
            PropertyKey::UseDarkBackground
        );
        assert!(model.use_dark_background());
    }

    #[test]
    fn equal_value_still_reports_key() {
        let mut model = SuggestionListModel::new();
        model.apply(PropertyUpdate::UseDarkBackground(true));
        assert_eq!(
            model.apply(PropertyUpdate::UseDarkBackground(true)),
            PropertyKey::UseDarkBackground
        );
    }

    #[test]
    fn key_names() {
        let names: Vec<_> = PropertyKey::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            ["VISIBLE", "EMBEDDER", "SUGGESTION_MODELS", "USE_DARK_BACKGROUND"]
        );
    }

    #[test]
    fn commit_text_prefers_url() {
        let row = SuggestionRow::new(SuggestionKind::Bookmark, "Rust").with_url("rust-lang.org");
        assert_eq!(row.commit_text(), "rust-lang.org");
        let search = SuggestionRow::search("q");
        assert_eq!(search.commit_text(), "q");
        assert_eq!(search.label(), "Search for \"q\"");
    }
}
