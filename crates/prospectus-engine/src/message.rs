//! Chat message types.

use serde::{Deserialize, Serialize};

/// Text shown to the user when the answer provider fails.
pub const FALLBACK_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Message typed by the user.
    User,
    /// Answer from the assistant.
    Assistant,
}

impl Author {
    /// Short label drawn in front of the message text.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "AI",
        }
    }
}

/// A single rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub author: Author,
    /// Message text.
    pub text: String,
    /// Cited page numbers, in the order given by the provider.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<u32>,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    /// Create an assistant message with citations.
    pub fn assistant(text: impl Into<String>, sources: Vec<u32>) -> Self {
        Self {
            author: Author::Assistant,
            text: text.into(),
            sources,
        }
    }

    /// The fixed assistant reply used when answering failed.
    pub fn fallback() -> Self {
        Self::assistant(FALLBACK_TEXT, Vec::new())
    }

    /// Whether this message was written by the user.
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    /// Citation text such as `Pages 5, 12`, or `None` without sources.
    pub fn sources_label(&self) -> Option<String> {
        if self.sources.is_empty() {
            return None;
        }
        let pages: Vec<String> = self.sources.iter().map(u32::to_string).collect();
        Some(format!("Pages {}", pages.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("Hello");
        assert_eq!(user.author, Author::User);
        assert!(user.is_user());
        assert!(user.sources.is_empty());

        let answer = Message::assistant("Hi", vec![5, 12]);
        assert_eq!(answer.author, Author::Assistant);
        assert_eq!(answer.sources, vec![5, 12]);
    }

    #[test]
    fn test_sources_label() {
        assert_eq!(
            Message::assistant("x", vec![5, 12]).sources_label(),
            Some("Pages 5, 12".into())
        );
        assert_eq!(Message::assistant("x", vec![1]).sources_label(), Some("Pages 1".into()));
        assert_eq!(Message::user("x").sources_label(), None);
    }

    #[test]
    fn test_fallback_has_no_sources() {
        let msg = Message::fallback();
        assert_eq!(msg.text, FALLBACK_TEXT);
        assert_eq!(msg.author, Author::Assistant);
        assert!(msg.sources_label().is_none());
    }

    #[test]
    fn test_author_labels() {
        assert_eq!(Author::User.label(), "You");
        assert_eq!(Author::Assistant.label(), "AI");
    }

    #[test]
    fn test_message_json_shape() {
        let json = serde_json::to_value(Message::assistant("Fees vary", vec![45, 46])).unwrap();
        assert_eq!(json["author"], "assistant");
        assert_eq!(json["sources"], serde_json::json!([45, 46]));

        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert!(json.get("sources").is_none());
    }
}
