//! Transcript model and the rendering capability the controller drives.

use crate::message::Message;

/// Handle to a pending placeholder returned by [`ChatSurface::show_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingHandle(u64);

impl PendingHandle {
    /// Raw handle value.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Where a conversation is drawn.
///
/// Implementations append in call order and never fail. Removing a
/// placeholder that is already gone is silently ignored.
pub trait ChatSurface {
    /// Append a message and bring the newest entry into view.
    fn render(&mut self, message: &Message);

    /// Append an "answer in progress" placeholder.
    fn show_pending(&mut self) -> PendingHandle;

    /// Remove a placeholder. Unknown handles are a no-op.
    fn resolve_pending(&mut self, handle: PendingHandle);

    /// Empty the input field, if the surface has one.
    fn clear_input(&mut self) {}
}

/// One transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A rendered message.
    Message(Message),
    /// A placeholder for an answer in flight.
    Pending(PendingHandle),
}

/// Append-only conversation transcript.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Rendered messages only, skipping placeholders.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            Entry::Pending(_) => None,
        })
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.entries.iter().rev().find_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            Entry::Pending(_) => None,
        })
    }

    /// Number of placeholders currently shown.
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, Entry::Pending(_)))
            .count()
    }

    /// Number of entries, placeholders included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been shown yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text rendering, one block per entry.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                Entry::Message(message) => {
                    out.push_str(message.author.label());
                    out.push_str(": ");
                    out.push_str(&message.text);
                    out.push('\n');
                    if let Some(sources) = message.sources_label() {
                        out.push_str("  Sources: ");
                        out.push_str(&sources);
                        out.push('\n');
                    }
                }
                Entry::Pending(_) => out.push_str("AI: Thinking...\n"),
            }
        }
        out
    }
}

impl ChatSurface for Transcript {
    fn render(&mut self, message: &Message) {
        self.entries.push(Entry::Message(message.clone()));
    }

    fn show_pending(&mut self) -> PendingHandle {
        let handle = PendingHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry::Pending(handle));
        handle
    }

    fn resolve_pending(&mut self, handle: PendingHandle) {
        let before = self.entries.len();
        self.entries.retain(|entry| *entry != Entry::Pending(handle));
        if self.entries.len() == before {
            tracing::trace!(handle = handle.id(), "pending placeholder already resolved");
        }
    }
}
