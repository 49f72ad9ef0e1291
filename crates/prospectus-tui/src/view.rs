//! Terminal chat surface: transcript, input line and scroll position.

use prospectus_engine::{ChatSurface, Message, PendingHandle, Transcript};

use crate::input::TextInputState;

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// The surface the controller draws on in the TUI.
///
/// Scrolling is measured in lines back from the bottom, so `0` always shows
/// the newest entry.
#[derive(Debug, Default)]
pub struct ChatView {
    transcript: Transcript,
    input: TextInputState,
    scroll_back: usize,
    max_scroll: usize,
}

impl ChatView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// The transcript being shown.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The input line.
    pub fn input(&self) -> &TextInputState {
        &self.input
    }

    /// Mutable input line, for key handling.
    pub fn input_mut(&mut self) -> &mut TextInputState {
        &mut self.input
    }

    /// Lines scrolled back from the newest entry.
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// Whether the newest entry is in view.
    pub fn is_at_latest(&self) -> bool {
        self.scroll_back == 0
    }

    /// Scroll towards older entries.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = (self.scroll_back + lines).min(self.max_scroll);
    }

    /// Scroll towards newer entries.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Jump to the newest entry.
    pub fn scroll_to_latest(&mut self) {
        self.scroll_back = 0;
    }

    /// Record how far back the last draw could scroll, clamping the position.
    pub fn set_max_scroll(&mut self, max_scroll: usize) {
        self.max_scroll = max_scroll;
        self.scroll_back = self.scroll_back.min(max_scroll);
    }
}

impl ChatSurface for ChatView {
    fn render(&mut self, message: &Message) {
        self.transcript.render(message);
        self.scroll_to_latest();
    }

    fn show_pending(&mut self) -> PendingHandle {
        let handle = self.transcript.show_pending();
        self.scroll_to_latest();
        handle
    }

    fn resolve_pending(&mut self, handle: PendingHandle) {
        self.transcript.resolve_pending(handle);
    }

    fn clear_input(&mut self) {
        self.input.submit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_snaps_to_latest() {
        let mut view = ChatView::new();
        view.set_max_scroll(20);
        view.scroll_up(SCROLL_SPEED * 2);
        assert_eq!(view.scroll_back(), 6);
        assert!(!view.is_at_latest());

        view.render(&Message::user("hello"));
        assert!(view.is_at_latest());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = ChatView::new();
        view.set_max_scroll(4);
        view.scroll_up(10);
        assert_eq!(view.scroll_back(), 4);

        view.scroll_down(1);
        assert_eq!(view.scroll_back(), 3);

        view.set_max_scroll(2);
        assert_eq!(view.scroll_back(), 2);

        view.scroll_down(10);
        assert!(view.is_at_latest());
    }

    #[test]
    fn test_clear_input_keeps_history() {
        let mut view = ChatView::new();
        view.input_mut().insert_str("fees?");
        view.clear_input();
        assert!(view.input().is_empty());

        view.input_mut().history_prev();
        assert_eq!(view.input().content(), "fees?");
    }

    #[test]
    fn test_pending_round_trip() {
        let mut view = ChatView::new();
        let handle = view.show_pending();
        assert_eq!(view.transcript().pending_count(), 1);
        view.resolve_pending(handle);
        view.resolve_pending(handle);
        assert!(view.transcript().is_empty());
    }
}
