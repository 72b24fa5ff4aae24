//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer. Follows new entries until the
//! user scrolls up while the panel has focus; End resumes following.

use super::scrollbar::render_scrollbar;
use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::theme::PopupTheme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    buffer: LogBuffer,
    scroll: ScrollState,
    /// Stick to the newest entry
    follow: bool,
}

impl LogsPanel {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            scroll: ScrollState::new(),
            follow: true,
        }
    }

    /// Sync scroll dimensions with the buffer (call before each draw)
    pub fn sync(&mut self, area: Rect) {
        let viewport = area.height.saturating_sub(2) as usize;
        self.scroll.update_dimensions(self.buffer.len(), viewport);
        if self.follow {
            self.scroll.scroll_to_bottom();
        }
    }

}

fn level_color(level: LogLevel, theme: &PopupTheme) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => theme.foreground,
        LogLevel::Debug | LogLevel::Trace => theme.muted,
    }
}

fn format_entry(entry: &LogEntry, theme: &PopupTheme) -> Line<'static> {
    let color = level_color(entry.level, theme);
    Line::from(vec![
        Span::styled(
            format!("{} ", entry.timestamp.format("%H:%M:%S")),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("{:5} ", entry.level.as_str()), Style::default().fg(color)),
        Span::styled(
            format!("{}: ", entry.short_target()),
            Style::default().fg(theme.accent),
        ),
        Span::styled(entry.message.clone(), Style::default().fg(color)),
    ])
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let (start, end) = self.scroll.visible_range();
        let entries = self.buffer.tail(self.scroll.total());

        let items: Vec<ListItem> = entries
            .iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|entry| ListItem::new(format_entry(entry, theme)))
            .collect();

        let border = if ctx.is_focused(self.id()) {
            theme.accent
        } else {
            theme.border
        };
        let title = if self.follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border))
                .title(title),
        );
        f.render_widget(list, area);

        render_scrollbar(f, area, &self.scroll, Style::default().fg(theme.muted));
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.follow = false;
                self.scroll_up();
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home | KeyCode::Char('g') => {
                self.follow = false;
                self.scroll_to_top();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.follow = true;
                self.scroll_to_bottom();
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  End:follow  Tab:omnibox")
    }
}
