//! prospectus-engine: Headless engine for the prospectus chat widget
//!
//! This crate holds everything that does not touch a terminal:
//! - Session identity and chat messages
//! - The transcript model and the [`ChatSurface`] rendering seam
//! - The answer provider seam, its simulated backend and intent table
//! - The question service's reply shapes
//! - The conversation controller
//! - Configuration

pub mod config;
pub mod controller;
pub mod intent;
pub mod message;
pub mod provider;
pub mod reply;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use config::{Config, ConfigError, MockConfig, DEFAULT_CONFIG_PATH};
pub use controller::{ControlState, Controller, PendingTurn, Skip, SubmitControl, SubmitOutcome};
pub use intent::Intent;
pub use message::{Author, Message, FALLBACK_TEXT};
pub use provider::{Answer, AnswerError, AnswerProvider, AnswerRequest, Latency, MockProvider};
pub use reply::{AnsweredReply, ErrorReply, ServiceReply};
pub use session::{Session, SessionId};
pub use transcript::{ChatSurface, Entry, PendingHandle, Transcript};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
