//! prospectus-tui: Terminal chat front end for the prospectus assistant
//!
//! This crate provides:
//! - A transcript pane and input bar drawn with ratatui
//! - [`ChatView`], the terminal implementation of the chat surface
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
mod input;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod ui;
mod view;
mod widgets;

pub use app::App;
pub use event::{key_to_action, mouse_to_action, Action, Event, EventHandler};
pub use input::TextInputState;
pub use prospectus_engine;
pub use theme::Theme;
pub use view::{ChatView, SCROLL_SPEED};
pub use widgets::{transcript_lines, InputBar, TranscriptPane};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prospectus_engine::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the chat TUI until the user quits.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit, including on error.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    tracing::info!(session_id = %app.session().id(), "chat opened");

    let mut events = EventHandler::new(config.tick_rate_ms);
    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    app.shutdown();
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            ui::render(app, area, frame.buffer_mut());
        })?;

        if app.should_quit {
            return Ok(());
        }

        // Answers land on the next tick at the latest.
        app.poll_answer().await;

        match events.next().await {
            Some(Event::Key(key)) => app.handle_action(key_to_action(key)),
            Some(Event::Mouse(mouse)) => app.handle_action(mouse_to_action(mouse)),
            Some(Event::Tick) => app.tick(),
            Some(Event::Resize(_, _)) => {}
            None => return Ok(()),
        }
    }
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
