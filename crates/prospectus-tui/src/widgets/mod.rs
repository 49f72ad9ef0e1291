//! Widgets for the chat screen.

mod input_bar;
mod transcript;

pub use input_bar::InputBar;
pub use transcript::{transcript_lines, TranscriptPane};
