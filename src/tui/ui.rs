// UI rendering - called on every frame
//
//   ┌ omnibar ─────────────────────────┐  3 rows, anchor for the popup
//   └──────────────────────────────────┘
//     ╭ suggestions ────────────╮         dropdown slot (0 rows when Gone)
//     ╰─────────────────────────╯
//   ┌ Logs ────────────────────────────┐  remaining space
//   └──────────────────────────────────┘
//    dark │ 3 suggestions │ hints │ uptime   status bar

use super::app::App;
use super::components::status_bar;
use super::traits::{Component, RenderContext};
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let view = app.suggestions.view();
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(view.container().layout_height()),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(f.area());

    app.logs_panel.sync(chunks[2]);

    let app = &*app;
    let theme = app.theme();
    let ctx = RenderContext::new(theme, app.focus, app.animation_frame);

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        f.area(),
    );

    // Omnibox first: it publishes the anchor the popup aligns to
    app.omnibox.render(f, chunks[0], &ctx);

    let view = app.suggestions.view();
    let list = view.list();
    let popup = list.popup_area(chunks[1]);
    if let Some(inner) = view.container().render(f, popup, list.theme()) {
        list.render(f, inner, &ctx);
    }

    app.logs_panel.render(f, chunks[2], &ctx);
    status_bar::render(f, chunks[3], app, &ctx);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), theme);
    }
}
