//! Answer provider seam and the simulated backend.
//!
//! The controller only knows the [`AnswerProvider`] trait. [`MockProvider`]
//! stands in for a real backend: it waits a random latency and answers from
//! the keyword intent table.

use crate::config::MockConfig;
use crate::intent::Intent;
use crate::reply::{ServiceReply, INTERNAL_ERROR};
use crate::session::SessionId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// A question sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Trimmed question text.
    pub question: String,
    /// Session the question belongs to.
    pub session_id: SessionId,
}

/// A successful provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text.
    pub answer: String,
    /// Cited page numbers, ascending and unique.
    pub sources: Vec<u32>,
}

impl Answer {
    /// Build an answer, sorting and de-duplicating the cited pages.
    pub fn new(answer: impl Into<String>, sources: impl IntoIterator<Item = u32>) -> Self {
        let mut sources: Vec<u32> = sources.into_iter().collect();
        sources.sort_unstable();
        sources.dedup();
        Self {
            answer: answer.into(),
            sources,
        }
    }
}

/// Provider failure.
///
/// Callers treat every variant the same way; the payload is diagnostic only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnswerError {
    /// The provider could not produce an answer.
    #[error("answer provider unavailable: {0}")]
    Unavailable(String),

    /// The request was cut short before the provider settled.
    #[error("answer request interrupted: {0}")]
    Interrupted(String),
}

/// Maps a question to an answer with citations.
pub trait AnswerProvider: Send + Sync {
    /// Answer a single request.
    fn answer(
        &self,
        request: &AnswerRequest,
    ) -> impl Future<Output = Result<Answer, AnswerError>> + Send;
}

/// Uniform random latency range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min: Duration,
    max: Duration,
}

impl Latency {
    /// Create a latency range; the bounds are swapped if given out of order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draw a delay from the range.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (lo, hi) = (self.min.as_millis() as u64, self.max.as_millis() as u64);
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}

/// Simulated backend that answers from the intent table.
#[derive(Debug, Clone)]
pub struct MockProvider {
    latency: Latency,
    failure_rate: f64,
}

impl MockProvider {
    /// Create a mock with the given latency and no failures.
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            failure_rate: 0.0,
        }
    }

    /// Create a mock from configuration.
    pub fn from_config(config: &MockConfig) -> Self {
        Self::new(Latency::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        ))
        .with_failure_rate(config.failure_rate)
    }

    /// Fail this fraction of requests, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self
    }

    /// The configured latency range.
    pub fn latency(&self) -> Latency {
        self.latency
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::from_config(&MockConfig::default())
    }
}

impl AnswerProvider for MockProvider {
    fn answer(
        &self,
        request: &AnswerRequest,
    ) -> impl Future<Output = Result<Answer, AnswerError>> + Send {
        // Draw everything random up front; ThreadRng must not live across the await.
        let delay = self.latency.sample();
        let fail = self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate);
        let request = request.clone();

        async move {
            tracing::debug!(?delay, "mock provider answering");
            tokio::time::sleep(delay).await;

            let question = request.question.as_str();
            let reply = if fail {
                ServiceReply::error(INTERNAL_ERROR, Some(question))
            } else {
                let answer = Intent::classify(question).respond(question);
                ServiceReply::answered(question, &answer, &request.session_id)
            };
            reply.into_result()
        }
    }
}
