//! Reply shapes of the prospectus question service.
//!
//! ```text
//! success: {"question": ..., "answer": ..., "source_pages": [5, 12], "session_id": "user_..."}
//! failure: {"error": "internal server error. please try again later.", "question": ...}
//! loading: {"error": "service not ready. please try again later."}
//! ```
//!
//! Every error shape collapses into [`AnswerError::Unavailable`]; callers
//! only ever show the fallback message. A reply saying the prospectus has no
//! answer is still a success.

use serde::{Deserialize, Serialize};

use crate::provider::{Answer, AnswerError};
use crate::session::SessionId;

/// Error text the service uses when answering blew up.
pub(crate) const INTERNAL_ERROR: &str = "internal server error. please try again later.";

/// A successful reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredReply {
    pub question: String,
    pub answer: String,
    /// 1-based page numbers, ascending and unique.
    #[serde(default)]
    pub source_pages: Vec<u32>,
    pub session_id: SessionId,
}

/// A failed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
    /// Absent when the service was not ready to take questions at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

/// Either reply shape, told apart by its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceReply {
    Answered(AnsweredReply),
    Error(ErrorReply),
}

impl ServiceReply {
    /// Reply carrying an answer.
    pub fn answered(question: &str, answer: &Answer, session_id: &SessionId) -> Self {
        Self::Answered(AnsweredReply {
            question: question.to_string(),
            answer: answer.answer.clone(),
            source_pages: answer.sources.clone(),
            session_id: session_id.clone(),
        })
    }

    /// Reply carrying an error message.
    pub fn error(error: impl Into<String>, question: Option<&str>) -> Self {
        Self::Error(ErrorReply {
            error: error.into(),
            question: question.map(str::to_string),
        })
    }

    /// Map the reply onto the provider contract.
    pub fn into_result(self) -> Result<Answer, AnswerError> {
        match self {
            Self::Answered(reply) => Ok(Answer::new(reply.answer, reply.source_pages)),
            Self::Error(reply) => Err(AnswerError::Unavailable(reply.error)),
        }
    }
}
