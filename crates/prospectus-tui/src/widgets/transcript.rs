//! Transcript pane widget.
//!
//! ```text
//! ┌ Conversation ─────────────────────────────┐
//! │You: Who is the vice chancellor?           │
//! │                                           │
//! │AI: The Vice Chancellor of Igbinedion      │
//! │    University Okada is Prof. Lawrence ... │
//! │    📄 Sources: Pages 5, 12                │
//! │                                           │
//! │AI: Thinking...                            │
//! └───────────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use prospectus_engine::{Author, Entry, Message, Transcript};

use crate::text::{visual_width, wrap_text};
use crate::theme::Theme;

/// Hint shown before the first question.
const EMPTY_HINT: [&str; 2] = [
    "Ask anything about the prospectus.",
    "Try: Who is the vice chancellor?",
];

/// Build every display line of the transcript for the given width.
pub fn transcript_lines(
    transcript: &Transcript,
    theme: &Theme,
    width: usize,
    tick: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (idx, entry) in transcript.entries().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        match entry {
            Entry::Message(message) => push_message(&mut lines, message, theme, width),
            Entry::Pending(_) => lines.push(pending_line(theme, tick)),
        }
    }

    lines
}

fn author_color(message: &Message, theme: &Theme) -> ratatui::style::Color {
    if message.is_user() {
        theme.user
    } else {
        theme.assistant
    }
}

fn push_message(lines: &mut Vec<Line<'static>>, message: &Message, theme: &Theme, width: usize) {
    let label = format!("{}: ", message.author.label());
    let indent = " ".repeat(visual_width(&label));
    let body_width = width.saturating_sub(indent.len()).max(1);
    let label_style = Style::default()
        .fg(author_color(message, theme))
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text);

    let wrapped = wrap_text(&message.text, body_width);
    for (i, chunk) in wrapped.into_iter().enumerate() {
        let prefix = if i == 0 {
            Span::styled(label.clone(), label_style)
        } else {
            Span::raw(indent.clone())
        };
        lines.push(Line::from(vec![prefix, Span::styled(chunk, text_style)]));
    }

    if let Some(pages) = message.sources_label() {
        lines.push(Line::from(vec![
            Span::raw(indent),
            Span::styled("\u{1f4c4} ", Style::default().fg(theme.subtext)),
            Span::styled(
                "Sources:",
                Style::default().fg(theme.subtext).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {pages}"), Style::default().fg(theme.subtext)),
        ]));
    }
}

fn pending_line(theme: &Theme, tick: usize) -> Line<'static> {
    let dots = ".".repeat(tick % 4);
    Line::from(vec![
        Span::styled(
            format!("{}: ", Author::Assistant.label()),
            Style::default()
                .fg(theme.assistant)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("Thinking{dots}"),
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        ),
    ])
}

/// Transcript pane widget.
pub struct TranscriptPane<'a> {
    transcript: &'a Transcript,
    theme: &'a Theme,
    scroll_back: usize,
    tick: usize,
}

impl<'a> TranscriptPane<'a> {
    /// Create a new transcript pane.
    pub fn new(transcript: &'a Transcript, theme: &'a Theme) -> Self {
        Self {
            transcript,
            theme,
            scroll_back: 0,
            tick: 0,
        }
    }

    /// Lines scrolled back from the bottom.
    #[must_use]
    pub fn scroll_back(mut self, scroll_back: usize) -> Self {
        self.scroll_back = scroll_back;
        self
    }

    /// Animation tick for the pending placeholder.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    fn block(&self) -> Block<'static> {
        let mut block = Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));

        if self.scroll_back > 0 {
            block = block.title_bottom(
                Line::styled(
                    format!(" \u{2193} {} more ", self.scroll_back),
                    Style::default().fg(self.theme.warning),
                )
                .right_aligned(),
            );
        }
        block
    }

    /// How far back this pane can scroll when drawn into `area`.
    pub fn max_scroll(&self, area: Rect) -> usize {
        let inner = self.block().inner(area);
        let width = inner.width as usize;
        let lines = transcript_lines(self.transcript, self.theme, width, self.tick);
        lines.len().saturating_sub(inner.height as usize)
    }
}

impl Widget for TranscriptPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.transcript.is_empty() {
            let hint: Vec<Line<'_>> = EMPTY_HINT
                .iter()
                .map(|text| Line::styled(*text, Style::default().fg(self.theme.muted)))
                .collect();
            Paragraph::new(hint).render(inner, buf);
            return;
        }

        let lines = transcript_lines(self.transcript, self.theme, inner.width as usize, self.tick);
        let height = inner.height as usize;
        let max_scroll = lines.len().saturating_sub(height);
        let start = max_scroll - self.scroll_back.min(max_scroll);

        let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(height).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}
