// Status bar component
//
// Bottom line: background mode, dropdown state, key hints for the active
// component, uptime.

use crate::tui::app::App;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Left-hand status segments, without styling
pub fn status_segments(app: &App, ctx: &RenderContext) -> Vec<String> {
    let mode = if app.suggestions.model().use_dark_background() {
        "dark"
    } else {
        "light"
    };

    let dropdown = if app.suggestions.is_visible() {
        format!("{} suggestions", app.suggestions.model().suggestion_models().len())
    } else if app.awaiting_suggestions() {
        format!("{} searching", ctx.spinner_char())
    } else {
        "hidden".to_string()
    };

    vec![
        format!(" {} ", mode),
        format!(" {} ", dropdown),
        format!(" {} ", app.key_hint()),
    ]
}

pub fn render(f: &mut Frame, area: Rect, app: &App, ctx: &RenderContext) {
    let theme = ctx.theme;
    let segments = status_segments(app, ctx);

    let mut spans = Vec::with_capacity(segments.len() * 2 + 1);
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", Style::default().fg(theme.border)));
        }
        let style = if i == 0 {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        spans.push(Span::styled(segment, style));
    }
    spans.push(Span::styled(
        format!("│ {} ", app.uptime()),
        Style::default().fg(theme.muted),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
