//! Question input bar with the send control.
//!
//! ```text
//! ┌ Ask a question ───────────────── [ Send ] ┐
//! │> What are the admission requirements?█    │
//! └───────────────────────────────────────────┘
//! ```
//!
//! While an answer is in flight the control reads `[ Thinking... ]` and is
//! dimmed; typing stays possible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use prospectus_engine::SubmitControl;

use crate::input::TextInputState;
use crate::text::{tail_to_width, visual_width};
use crate::theme::Theme;

const PROMPT: &str = "> ";
const CURSOR: &str = "\u{2588}"; // █

/// Full-width input bar.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    control: &'a SubmitControl,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, control: &'a SubmitControl, theme: &'a Theme) -> Self {
        Self {
            input,
            control,
            theme,
        }
    }

    fn control_span(&self) -> Span<'static> {
        let label = format!(" [ {} ] ", self.control.label());
        let style = if self.control.is_enabled() {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM)
        };
        Span::styled(label, style)
    }

    /// The visible part of the input: text before the cursor is kept in view.
    fn input_line(&self, width: usize) -> Line<'static> {
        let content = self.input.content();
        let split = content
            .char_indices()
            .nth(self.input.cursor())
            .map_or(content.len(), |(offset, _)| offset);
        let (before, after) = content.split_at(split);

        let room = width.saturating_sub(visual_width(PROMPT) + visual_width(CURSOR));
        let before = tail_to_width(before, room);
        let after_room = room.saturating_sub(visual_width(before));
        let after: String = after
            .chars()
            .scan(0, |used, ch| {
                *used += UnicodeWidthChar::width(ch).unwrap_or(0);
                (*used <= after_room).then_some(ch)
            })
            .collect();

        Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(self.theme.primary)),
            Span::styled(before.to_string(), Style::default().fg(self.theme.text)),
            Span::styled(CURSOR, Style::default().fg(self.theme.text)),
            Span::styled(after, Style::default().fg(self.theme.text)),
        ])
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.control.is_enabled() {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .title(" Ask a question ")
            .title_style(Style::default().fg(self.theme.text))
            .title_top(Line::from(self.control_span()).right_aligned())
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.surface));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        Paragraph::new(self.input_line(inner.width as usize)).render(inner, buf);
    }
}
