//! Test utilities for rendering the TUI into an in-memory buffer.

use crate::app::App;
use prospectus_engine::{Latency, MockProvider};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app whose provider answers immediately.
pub fn create_test_app() -> App {
    App::with_provider(MockProvider::new(Latency::none()))
}

/// Render the whole screen at the default size and return it as text.
pub fn render_app_to_string(app: &mut App) -> String {
    let mut terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
    terminal
        .draw(|frame| {
            let area = frame.area();
            crate::ui::render(app, area, frame.buffer_mut());
        })
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}

/// Convert a buffer to a string, one line per row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    crate::headless::buffer_to_string(buffer)
}
