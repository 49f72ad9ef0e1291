//! Screen layout: header, transcript, input bar and key hints.
//!
//! ```text
//! Prospectus Assistant        session user_1700000000000 since 22:13 UTC
//! ┌ Conversation ──────────────────────────────────────────────────────┐
//! │...                                                                 │
//! └────────────────────────────────────────────────────────────────────┘
//! ┌ Ask a question ─────────────────────────────────────────── [ Send ] ┐
//! │> █                                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//!  Enter send  ↑↓ history  PgUp/PgDn scroll  Esc quit
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::App;
use crate::widgets::{InputBar, TranscriptPane};

const TITLE: &str = "Prospectus Assistant";

const HINTS: [(&str, &str); 4] = [
    ("Enter", "send"),
    ("\u{2191}\u{2193}", "history"),
    ("PgUp/PgDn", "scroll"),
    ("Esc", "quit"),
];

/// Draw the whole screen.
///
/// Takes the app mutably to record the scroll range and viewport size of
/// this draw.
pub fn render(app: &mut App, area: Rect, buf: &mut Buffer) {
    let [header, body, input, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let pane = TranscriptPane::new(app.view().transcript(), &app.theme)
        .scroll_back(app.view().scroll_back())
        .tick(app.tick);
    let max_scroll = pane.max_scroll(body);
    app.viewport_height = body.height.saturating_sub(2) as usize;
    app.view_mut().set_max_scroll(max_scroll);

    render_header(app, header, buf);
    TranscriptPane::new(app.view().transcript(), &app.theme)
        .scroll_back(app.view().scroll_back())
        .tick(app.tick)
        .render(body, buf);
    InputBar::new(app.view().input(), app.control(), &app.theme).render(input, buf);
    render_footer(app, footer, buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let session = format!(
        "session {} since {} UTC",
        app.session().id(),
        app.session().started_at().format("%H:%M")
    );

    let [left, right] = Layout::horizontal([
        Constraint::Min(u16::try_from(TITLE.len()).unwrap_or(u16::MAX)),
        Constraint::Length(u16::try_from(session.len()).unwrap_or(u16::MAX)),
    ])
    .areas(area);

    Paragraph::new(Span::styled(
        TITLE,
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    ))
    .render(left, buf);
    Paragraph::new(Line::styled(session, Style::default().fg(theme.muted)).right_aligned())
        .render(right, buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let mut spans = Vec::with_capacity(HINTS.len() * 2);
    for (key, label) in HINTS {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(theme.subtext).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {label} "), Style::default().fg(theme.muted)));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}
