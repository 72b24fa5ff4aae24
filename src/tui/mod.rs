// TUI module - Terminal User Interface
//
// Sets up the terminal, runs the event loop and restores the terminal on
// exit. The loop multiplexes keyboard input, a redraw tick and suggestion
// batches from the provider task.

pub mod app;
pub mod components;
pub mod scroll;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::suggestions::{SuggestionBatch, SuggestionRequest};
use crate::theme::PopupThemes;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI until the user quits.
///
/// Returns the last committed omnibox text, if any.
pub async fn run_tui(
    config: Config,
    themes: PopupThemes,
    log_buffer: LogBuffer,
    requests: mpsc::Sender<SuggestionRequest>,
    mut batches: mpsc::Receiver<SuggestionBatch>,
) -> Result<Option<String>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, Rc::new(themes), log_buffer, requests);

    let result = run_event_loop(&mut terminal, &mut app, &mut batches).await;

    // Restore the terminal even when the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result.map(|()| app.committed)
}

/// Main event loop
///
/// Handles:
/// 1. Keyboard input
/// 2. Timer ticks (spinner, toast expiry)
/// 3. Suggestion batches from the provider
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    batches: &mut mpsc::Receiver<SuggestionBatch>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => app.handle_key(key),
                        Ok(_) => {}
                        Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(batch) = batches.recv() => {
                app.on_suggestions(batch);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
