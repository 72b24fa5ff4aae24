//! Omnibox input line
//!
//! Single-line text editor the dropdown hangs off. Every frame publishes its
//! area to a shared cell; [`OmniboxEmbedder`] reads that cell so the popup
//! always aligns with where the omnibox was last drawn.

use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crate::view::DropdownEmbedder;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::cell::Cell;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Positioning context handed to the suggestion list
#[derive(Debug)]
pub struct OmniboxEmbedder {
    anchor: Rc<Cell<Rect>>,
}

impl DropdownEmbedder for OmniboxEmbedder {
    fn anchor(&self) -> Rect {
        self.anchor.get()
    }
}

#[derive(Debug, Default)]
pub struct Omnibox {
    text: String,
    /// Cursor position as a char index into `text`
    cursor: usize,
    anchor: Rc<Cell<Rect>>,
}

impl Omnibox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn embedder(&self) -> Rc<dyn DropdownEmbedder> {
        Rc::new(OmniboxEmbedder {
            anchor: Rc::clone(&self.anchor),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text and put the cursor at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    /// Record where the omnibox is drawn this frame
    pub fn publish_anchor(&self, area: Rect) {
        self.anchor.set(area);
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn delete_word(&mut self) -> bool {
        let before: Vec<char> = self.text.chars().take(self.cursor).collect();
        let trimmed = before.iter().rev().take_while(|c| c.is_whitespace()).count();
        let word = before[..before.len() - trimmed]
            .iter()
            .rev()
            .take_while(|c| !c.is_whitespace())
            .count();
        let remove = trimmed + word;
        if remove == 0 {
            return false;
        }
        let start = self.byte_index(self.cursor - remove);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= remove;
        true
    }
}

impl Component for Omnibox {
    fn id(&self) -> ComponentId {
        ComponentId::Omnibox
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        self.publish_anchor(area);

        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let border = if focused { theme.accent } else { theme.border };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" omnibar ");
        let inner = block.inner(area);

        let line = if self.text.is_empty() {
            Line::from(Span::styled(
                "Search or type a URL",
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                self.text.as_str(),
                Style::default().fg(theme.foreground),
            ))
        };

        // Keep the cursor on screen for long input
        let before_cursor: String = self.text.chars().take(self.cursor).collect();
        let cursor_col = before_cursor.width() as u16;
        let scroll = cursor_col.saturating_sub(inner.width.saturating_sub(1));

        f.render_widget(
            Paragraph::new(line).block(block).scroll((0, scroll)),
            area,
        );

        if focused && inner.width > 0 && inner.height > 0 {
            f.set_cursor_position(Position::new(inner.x + cursor_col - scroll, inner.y));
        }
    }
}

impl Interactive for Omnibox {
    /// Text editing keys. Returns `Yes` for anything that edits or moves the cursor.
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let len = self.text.chars().count();

        match key.code {
            KeyCode::Char('w') if ctrl => {
                self.delete_word();
            }
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(_) if ctrl => return Handled::No,
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => {
                self.backspace();
            }
            KeyCode::Delete => {
                self.delete();
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("type:search  Ctrl+W:del word  Ctrl+T:theme  Esc:dismiss")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(omnibox: &mut Omnibox, code: KeyCode) -> Handled {
        omnibox.handle_key(KeyEvent::from(code))
    }

    fn type_str(omnibox: &mut Omnibox, s: &str) {
        for c in s.chars() {
            press(omnibox, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_editing() {
        let mut omnibox = Omnibox::new();
        type_str(&mut omnibox, "rusr");
        press(&mut omnibox, KeyCode::Backspace);
        type_str(&mut omnibox, "t");
        assert_eq!(omnibox.text(), "rust");

        press(&mut omnibox, KeyCode::Home);
        press(&mut omnibox, KeyCode::Delete);
        assert_eq!(omnibox.text(), "ust");
        assert_eq!(omnibox.cursor(), 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut omnibox = Omnibox::new();
        type_str(&mut omnibox, "日本");
        press(&mut omnibox, KeyCode::Left);
        type_str(&mut omnibox, "x");
        assert_eq!(omnibox.text(), "日x本");
        press(&mut omnibox, KeyCode::Backspace);
        press(&mut omnibox, KeyCode::Backspace);
        assert_eq!(omnibox.text(), "本");
    }

    #[test]
    fn test_ctrl_w_deletes_previous_word() {
        let mut omnibox = Omnibox::new();
        omnibox.set_text("rust book  ");
        let handled = omnibox.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(handled, Handled::Yes);
        assert_eq!(omnibox.text(), "rust ");
    }

    #[test]
    fn test_other_ctrl_chords_bubble_up() {
        let mut omnibox = Omnibox::new();
        let handled = omnibox.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(handled, Handled::No);
        assert_eq!(omnibox.text(), "");
    }

    #[test]
    fn test_embedder_tracks_published_anchor() {
        let omnibox = Omnibox::new();
        let embedder = omnibox.embedder();
        omnibox.publish_anchor(Rect::new(0, 0, 50, 3));
        assert_eq!(embedder.anchor(), Rect::new(0, 0, 50, 3));
        assert_eq!(embedder.alignment_width(), 50);

        omnibox.publish_anchor(Rect::new(0, 0, 80, 3));
        assert_eq!(embedder.alignment_width(), 80);
    }
}
