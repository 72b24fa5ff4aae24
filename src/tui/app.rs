// App state - everything the event loop mutates and the UI draws
//
// Key routing, in order:
//   1. Global chords (Ctrl+C, Ctrl+T, Tab, Esc, Enter)
//   2. Logs panel when it has focus
//   3. Dropdown navigation (Up/Down/PageUp/PageDown) while it is shown
//   4. Omnibox text editing; edits are forwarded to the mediator

use super::components::{LogsPanel, Omnibox, Toast};
use super::traits::{ComponentId, Handled, Interactive};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::suggestions::mediator::build_terminal_view;
use crate::suggestions::{SuggestionBatch, SuggestionListMediator, SuggestionRequest};
use crate::theme::{PopupTheme, PopupThemes};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::rc::Rc;
use std::time::Instant;
use tokio::sync::mpsc;

pub struct App {
    pub omnibox: Omnibox,
    pub suggestions: SuggestionListMediator,
    pub logs_panel: LogsPanel,
    pub themes: Rc<PopupThemes>,
    pub focus: ComponentId,
    pub animation_frame: usize,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    /// Last text committed with Enter
    pub committed: Option<String>,
    start_time: Instant,
}

impl App {
    pub fn new(
        config: &Config,
        themes: Rc<PopupThemes>,
        log_buffer: LogBuffer,
        requests: mpsc::Sender<SuggestionRequest>,
    ) -> Self {
        let view = build_terminal_view(config.dropdown_height, Rc::clone(&themes));
        let mut suggestions =
            SuggestionListMediator::new(view, requests, config.dark_background);
        let omnibox = Omnibox::new();
        suggestions.attach_embedder(omnibox.embedder());

        Self {
            omnibox,
            suggestions,
            logs_panel: LogsPanel::new(log_buffer),
            themes,
            focus: ComponentId::Omnibox,
            animation_frame: 0,
            toast: None,
            should_quit: false,
            committed: None,
            start_time: Instant::now(),
        }
    }

    /// Palette for the app chrome, following the dropdown's background
    pub fn theme(&self) -> &PopupTheme {
        self.themes
            .pick(self.suggestions.model().use_dark_background())
    }

    pub fn awaiting_suggestions(&self) -> bool {
        self.suggestions.is_pending()
    }

    /// Hints for whatever receives keys right now
    pub fn key_hint(&self) -> &'static str {
        let hint = if self.focus == ComponentId::Logs {
            self.logs_panel.focus_hint()
        } else if self.suggestions.is_visible() {
            self.suggestions.view().list().focus_hint()
        } else {
            self.omnibox.focus_hint()
        };
        hint.unwrap_or("")
    }

    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }

    /// Advance the spinner, retry a held-back request and drop an expired toast
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.suggestions.flush_unsent();
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn on_suggestions(&mut self, batch: SuggestionBatch) {
        self.suggestions.on_suggestions(batch);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.handle_global_key(key) {
            return;
        }

        if self.focus == ComponentId::Logs {
            self.logs_panel.handle_key(key);
            return;
        }

        let navigation = matches!(
            key.code,
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown
        );
        if navigation && self.suggestions.move_selection(key) == Handled::Yes {
            return;
        }

        let before = self.omnibox.text().to_string();
        if self.omnibox.handle_key(key).was_handled() && self.omnibox.text() != before {
            self.suggestions.on_text_changed(self.omnibox.text());
        }
    }

    /// Returns true if the key was consumed
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('t') if ctrl => {
                let dark = self.suggestions.toggle_dark_background();
                self.show_toast(if dark {
                    "Dark background"
                } else {
                    "Light background"
                });
            }
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.next_focus(),
            KeyCode::Esc => self.escape(),
            KeyCode::Enter if self.focus == ComponentId::Omnibox => self.commit(),
            _ => return false,
        }
        true
    }

    /// Esc: hide the dropdown, then clear the text, then quit
    fn escape(&mut self) {
        if self.focus == ComponentId::Logs {
            self.focus = ComponentId::Omnibox;
        } else if self.suggestions.is_visible() || self.suggestions.is_pending() {
            self.suggestions.dismiss();
        } else if !self.omnibox.text().is_empty() {
            self.omnibox.clear();
            self.suggestions.on_text_changed("");
        } else {
            self.should_quit = true;
        }
    }

    /// Enter: take the highlighted row, or the raw text when nothing is shown
    fn commit(&mut self) {
        let text = match self.suggestions.commit_selection() {
            Some(text) => text,
            None => {
                let raw = self.omnibox.text().trim().to_string();
                if raw.is_empty() {
                    return;
                }
                self.suggestions.dismiss();
                raw
            }
        };

        self.omnibox.set_text(text.clone());
        self.show_toast(format!("Opened {}", text));
        self.committed = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::properties::SuggestionKind;
    use crate::suggestions::SuggestionRow;

    fn app() -> (App, mpsc::Receiver<SuggestionRequest>) {
        let (tx, rx) = mpsc::channel(32);
        let app = App::new(
            &Config::default(),
            Rc::new(PopupThemes::bundled()),
            LogBuffer::new(),
            tx,
        );
        (app, rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn answer(app: &mut App, rx: &mut mpsc::Receiver<SuggestionRequest>) {
        let mut last = None;
        while let Ok(request) = rx.try_recv() {
            last = Some(request);
        }
        let request = last.expect("a request was sent");
        app.on_suggestions(SuggestionBatch {
            generation: request.generation,
            query: request.query.clone(),
            rows: vec![
                SuggestionRow::search(&request.query),
                SuggestionRow::new(SuggestionKind::Bookmark, "Rust").with_url("https://rust-lang.org"),
            ],
        });
    }

    #[test]
    fn test_typing_requests_suggestions() {
        let (mut app, mut rx) = app();
        type_str(&mut app, "ru");

        let requests: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].query, "ru");
        assert!(app.awaiting_suggestions());
    }

    #[test]
    fn test_cursor_moves_do_not_request() {
        let (mut app, mut rx) = app();
        type_str(&mut app, "a");
        let _ = rx.try_recv();
        press(&mut app, KeyCode::Left);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_enter_commits_selected_row() {
        let (mut app, mut rx) = app();
        type_str(&mut app, "rust");
        answer(&mut app, &mut rx);
        assert!(app.suggestions.is_visible());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.committed.as_deref(), Some("https://rust-lang.org"));
        assert_eq!(app.omnibox.text(), "https://rust-lang.org");
        assert!(!app.suggestions.is_visible());
        // Committing does not trigger a fresh query
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_enter_without_dropdown_commits_raw_text() {
        let (mut app, _rx) = app();
        type_str(&mut app, "example.com ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.committed.as_deref(), Some("example.com"));
        assert!(!app.awaiting_suggestions());
    }

    #[test]
    fn test_escape_sequence() {
        let (mut app, mut rx) = app();
        type_str(&mut app, "rust");
        answer(&mut app, &mut rx);

        press(&mut app, KeyCode::Esc);
        assert!(!app.suggestions.is_visible());
        assert_eq!(app.omnibox.text(), "rust");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.omnibox.text(), "");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_t_toggles_background() {
        let (mut app, _rx) = app();
        assert!(app.suggestions.model().use_dark_background());
        ctrl(&mut app, 't');
        assert!(!app.suggestions.model().use_dark_background());
        assert_eq!(app.theme().name, "Popup Light");
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (mut app, _rx) = app();
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_routes_keys_to_logs() {
        let (mut app, mut rx) = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, ComponentId::Logs);

        type_str(&mut app, "k");
        assert_eq!(app.omnibox.text(), "");
        assert!(rx.try_recv().is_err());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, ComponentId::Omnibox);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let (mut app, _rx) = app();
        let mut key = KeyEvent::from(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert_eq!(app.omnibox.text(), "");
    }
}
