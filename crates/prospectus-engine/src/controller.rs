//! Conversation controller.
//!
//! Turns raw input into one question/answer exchange:
//!
//! ```text
//! submit(raw)
//!   ├─ trim → empty?          → Skipped(Empty), nothing touched
//!   ├─ control busy?          → Skipped(Busy)
//!   ├─ render user message, clear input, control → Busy, show placeholder
//!   ├─ await provider
//!   ├─ remove placeholder, render answer (or fallback)
//!   └─ control → Idle          (always, via TurnGuard)
//! ```
//!
//! Event loops that must keep drawing while the provider works use the split
//! form: [`Controller::begin`], run the request elsewhere, then
//! [`Controller::complete`]. A turn whose request is cancelled (on exit, for
//! instance) goes to [`Controller::abandon`] instead, which renders nothing.

use std::sync::Arc;

use crate::message::Message;
use crate::provider::{Answer, AnswerError, AnswerProvider, AnswerRequest};
use crate::session::{Session, SessionId};
use crate::transcript::{ChatSurface, PendingHandle};

/// State of the submission control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    /// Ready to accept a question.
    #[default]
    Idle,
    /// Waiting for an answer.
    Busy,
}

/// The send control: enabled and labelled "Send" when idle.
#[derive(Debug, Default)]
pub struct SubmitControl {
    state: ControlState,
}

impl SubmitControl {
    /// Current state.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Whether a submission would currently be accepted.
    pub fn is_enabled(&self) -> bool {
        self.state == ControlState::Idle
    }

    /// Button label for the current state.
    pub fn label(&self) -> &'static str {
        match self.state {
            ControlState::Idle => "Send",
            ControlState::Busy => "Thinking...",
        }
    }

    fn acquire(&mut self) -> bool {
        if self.state == ControlState::Busy {
            return false;
        }
        self.state = ControlState::Busy;
        true
    }

    fn release(&mut self) {
        self.state = ControlState::Idle;
    }
}

/// Why a submission was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Input was empty after trimming.
    Empty,
    /// An earlier question is still in flight.
    Busy,
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing happened.
    Skipped(Skip),
    /// The provider answered; this is the rendered message.
    Answered(Message),
    /// The provider failed and the fallback message was rendered.
    Failed,
}

impl SubmitOutcome {
    /// The assistant message for a successful turn.
    pub fn answer(&self) -> Option<&Message> {
        match self {
            Self::Answered(message) => Some(message),
            _ => None,
        }
    }
}

/// A question that has been shown and is waiting for its answer.
///
/// Hand it back to [`Controller::complete`] once the request settles, or to
/// [`Controller::abandon`] if it never will.
#[derive(Debug)]
#[must_use = "a pending turn keeps the control busy until completed"]
pub struct PendingTurn {
    request: AnswerRequest,
    handle: PendingHandle,
}

impl PendingTurn {
    /// The request to send to the provider.
    pub fn request(&self) -> &AnswerRequest {
        &self.request
    }

    /// The placeholder shown for this turn.
    pub fn handle(&self) -> PendingHandle {
        self.handle
    }
}

/// Restores the control and removes the placeholder on every exit path.
struct TurnGuard<'a, S: ChatSurface> {
    surface: &'a mut S,
    control: &'a mut SubmitControl,
    session_id: &'a SessionId,
    pending: Option<PendingHandle>,
}

impl<'a, S: ChatSurface> TurnGuard<'a, S> {
    fn new(
        surface: &'a mut S,
        control: &'a mut SubmitControl,
        session_id: &'a SessionId,
        handle: PendingHandle,
    ) -> Self {
        Self {
            surface,
            control,
            session_id,
            pending: Some(handle),
        }
    }

    fn settle(mut self, outcome: Result<Answer, AnswerError>) -> SubmitOutcome {
        if let Some(handle) = self.pending.take() {
            self.surface.resolve_pending(handle);
        }

        match outcome {
            Ok(answer) => {
                tracing::debug!(
                    session_id = %self.session_id,
                    sources = ?answer.sources,
                    "answer received"
                );
                let message = Message::assistant(answer.answer, answer.sources);
                self.surface.render(&message);
                SubmitOutcome::Answered(message)
            }
            Err(error) => {
                tracing::warn!(session_id = %self.session_id, %error, "answer provider failed");
                self.surface.render(&Message::fallback());
                SubmitOutcome::Failed
            }
        }
    }
}

impl<S: ChatSurface> Drop for TurnGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            tracing::debug!(
                session_id = %self.session_id,
                "turn dropped before the answer arrived"
            );
            self.surface.resolve_pending(handle);
        }
        self.control.release();
    }
}

/// Drives question/answer turns against a provider and a surface.
#[derive(Debug)]
pub struct Controller<P, S> {
    session: Session,
    provider: Arc<P>,
    surface: S,
    control: SubmitControl,
}

impl<P: AnswerProvider, S: ChatSurface> Controller<P, S> {
    /// Create a controller for one session.
    pub fn new(session: Session, provider: Arc<P>, surface: S) -> Self {
        Self {
            session,
            provider,
            surface,
            control: SubmitControl::default(),
        }
    }

    /// The session this controller belongs to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the rendering surface (input editing, scrolling).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The submission control.
    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// Shared handle to the provider, for running requests off the UI loop.
    pub fn provider(&self) -> Arc<P> {
        Arc::clone(&self.provider)
    }

    /// Run one full turn.
    pub async fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let turn = match self.begin(raw) {
            Ok(turn) => turn,
            Err(skip) => return SubmitOutcome::Skipped(skip),
        };

        let guard = TurnGuard::new(
            &mut self.surface,
            &mut self.control,
            self.session.id(),
            turn.handle,
        );
        let outcome = self.provider.answer(&turn.request).await;
        guard.settle(outcome)
    }

    /// Validate input and show the question; everything before the provider call.
    pub fn begin(&mut self, raw: &str) -> Result<PendingTurn, Skip> {
        let question = raw.trim();
        if question.is_empty() {
            tracing::trace!(session_id = %self.session.id(), "empty submission ignored");
            return Err(Skip::Empty);
        }
        if !self.control.acquire() {
            tracing::debug!(session_id = %self.session.id(), "submission ignored while busy");
            return Err(Skip::Busy);
        }

        tracing::debug!(
            session_id = %self.session.id(),
            chars = question.chars().count(),
            "question submitted"
        );

        self.surface.render(&Message::user(question));
        self.surface.clear_input();
        let handle = self.surface.show_pending();

        Ok(PendingTurn {
            request: AnswerRequest {
                question: question.to_string(),
                session_id: self.session.id().clone(),
            },
            handle,
        })
    }

    /// Finish a turn started with [`Controller::begin`].
    pub fn complete(
        &mut self,
        turn: PendingTurn,
        outcome: Result<Answer, AnswerError>,
    ) -> SubmitOutcome {
        TurnGuard::new(
            &mut self.surface,
            &mut self.control,
            self.session.id(),
            turn.handle,
        )
        .settle(outcome)
    }

    /// Drop a turn started with [`Controller::begin`] without answering it.
    ///
    /// The placeholder goes away and the control is released; no fallback is
    /// shown since nothing failed.
    pub fn abandon(&mut self, turn: PendingTurn) {
        drop(TurnGuard::new(
            &mut self.surface,
            &mut self.control,
            self.session.id(),
            turn.handle,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Author, FALLBACK_TEXT};
    use chrono::Utc;
    use crate::provider::{Latency, MockProvider};
    use crate::transcript::Transcript;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Surface that records every call in order.
    #[derive(Default)]
    struct Recorder {
        transcript: Transcript,
        log: Vec<String>,
        input_cleared: usize,
    }

    impl ChatSurface for Recorder {
        fn render(&mut self, message: &Message) {
            self.log.push(format!("render:{}", message.author.label()));
            self.transcript.render(message);
        }

        fn show_pending(&mut self) -> PendingHandle {
            self.log.push("pending".into());
            self.transcript.show_pending()
        }

        fn resolve_pending(&mut self, handle: PendingHandle) {
            self.log.push("resolve".into());
            self.transcript.resolve_pending(handle);
        }

        fn clear_input(&mut self) {
            self.input_cleared += 1;
        }
    }

    struct Failing;

    impl AnswerProvider for Failing {
        fn answer(
            &self,
            _request: &AnswerRequest,
        ) -> impl Future<Output = Result<Answer, AnswerError>> + Send {
            std::future::ready(Err(AnswerError::Unavailable("backend down".into())))
        }
    }

    struct Hanging;

    impl AnswerProvider for Hanging {
        fn answer(
            &self,
            _request: &AnswerRequest,
        ) -> impl Future<Output = Result<Answer, AnswerError>> + Send {
            std::future::pending()
        }
    }

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl AnswerProvider for Counting {
        fn answer(
            &self,
            request: &AnswerRequest,
        ) -> impl Future<Output = Result<Answer, AnswerError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(Answer::new(format!("echo {}", request.question), [])))
        }
    }

    fn with_recorder<P: AnswerProvider>(provider: Arc<P>) -> Controller<P, Recorder> {
        Controller::new(Session::start(), provider, Recorder::default())
    }

    fn mock_controller() -> Controller<MockProvider, Recorder> {
        with_recorder(Arc::new(MockProvider::new(Latency::none())))
    }

    #[tokio::test]
    async fn test_empty_input_is_noop() {
        let provider = Arc::new(Counting::default());
        let mut controller = with_recorder(Arc::clone(&provider));

        for raw in ["", "   ", "\n\t "] {
            assert_eq!(controller.submit(raw).await, SubmitOutcome::Skipped(Skip::Empty));
        }

        assert!(controller.surface().transcript.is_empty());
        assert!(controller.surface().log.is_empty());
        assert_eq!(controller.surface().input_cleared, 0);
        assert_eq!(controller.control().state(), ControlState::Idle);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_vice_chancellor_answer() {
        let mut controller = mock_controller();
        let outcome = controller.submit("Who is the vice chancellor?").await;

        let answer = outcome.answer().unwrap();
        assert_eq!(answer.author, Author::Assistant);
        assert!(answer.text.contains("Lawrence Ezemonye"));
        assert!(answer.sources.contains(&5));
    }

    #[tokio::test]
    async fn test_keyword_sources() {
        let mut controller = mock_controller();

        let outcome = controller.submit("What are the admission requirements?").await;
        let sources = &outcome.answer().unwrap().sources;
        for page in [15, 16, 17] {
            assert!(sources.contains(&page));
        }

        let outcome = controller.submit("school fees").await;
        assert_eq!(outcome.answer().unwrap().sources, vec![45, 46]);
    }

    #[tokio::test]
    async fn test_unrecognized_question_echoes() {
        let mut controller = mock_controller();
        let outcome = controller.submit("  Is there a swimming pool?  ").await;

        let answer = outcome.answer().unwrap();
        assert!(answer.text.contains("\"Is there a swimming pool?\""));
        assert_eq!(answer.sources, vec![1]);

        // User message is recorded trimmed.
        let first = controller.surface().transcript.messages().next().unwrap();
        assert_eq!(first.text, "Is there a swimming pool?");
    }

    #[tokio::test]
    async fn test_turn_order_has_exactly_one_placeholder() {
        let mut controller = mock_controller();
        controller.submit("fees").await;

        assert_eq!(
            controller.surface().log,
            vec!["render:You", "pending", "resolve", "render:AI"]
        );
        assert_eq!(controller.surface().input_cleared, 1);
        assert_eq!(controller.surface().transcript.pending_count(), 0);
        assert_eq!(controller.control().state(), ControlState::Idle);
        assert!(controller.control().is_enabled());
        assert_eq!(controller.control().label(), "Send");
    }

    #[tokio::test]
    async fn test_failure_renders_fallback_and_restores_idle() {
        let mut controller = with_recorder(Arc::new(Failing));
        let outcome = controller.submit("fees").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let last = controller.surface().transcript.last_message().unwrap();
        assert_eq!(last.text, FALLBACK_TEXT);
        assert!(last.sources.is_empty());
        assert_eq!(
            controller.surface().log,
            vec!["render:You", "pending", "resolve", "render:AI"]
        );
        assert_eq!(controller.control().state(), ControlState::Idle);

        // The user can retry after a failure.
        let outcome = controller.submit("fees").await;
        assert_eq!(outcome, SubmitOutcome::Failed);
    }

    #[tokio::test]
    async fn test_dropped_submit_restores_idle() {
        let mut controller = with_recorder(Arc::new(Hanging));

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), controller.submit("fees")).await;
        assert!(timed_out.is_err());

        assert_eq!(controller.control().state(), ControlState::Idle);
        assert_eq!(controller.surface().transcript.pending_count(), 0);
        assert_eq!(controller.surface().log, vec!["render:You", "pending", "resolve"]);
    }

    #[test]
    fn test_abandon_renders_no_fallback() {
        let mut controller = with_recorder(Arc::new(Hanging));

        let turn = controller.begin("fees").unwrap();
        controller.abandon(turn);

        assert_eq!(controller.control().state(), ControlState::Idle);
        assert_eq!(controller.surface().transcript.pending_count(), 0);
        assert_eq!(controller.surface().log, vec!["render:You", "pending", "resolve"]);
        let last = controller.surface().transcript.last_message().unwrap();
        assert_eq!(last.author, Author::User);
        assert_eq!(last.text, "fees");

        // The control is free for the next question.
        assert!(controller.begin("tuition").is_ok());
    }

    #[tokio::test]
    async fn test_busy_control_rejects_second_submission() {
        let provider = Arc::new(Counting::default());
        let mut controller = with_recorder(Arc::clone(&provider));

        let turn = controller.begin("first").unwrap();
        assert_eq!(controller.control().state(), ControlState::Busy);
        assert_eq!(controller.control().label(), "Thinking...");
        assert!(!controller.control().is_enabled());

        assert_eq!(controller.submit("second").await, SubmitOutcome::Skipped(Skip::Busy));
        assert_eq!(controller.begin("third").unwrap_err(), Skip::Busy);
        assert_eq!(controller.surface().transcript.pending_count(), 1);

        let answer = provider.answer(turn.request()).await;
        let outcome = controller.complete(turn, answer);
        assert_eq!(outcome.answer().unwrap().text, "echo first");
        assert_eq!(controller.control().state(), ControlState::Idle);
        assert_eq!(controller.surface().transcript.pending_count(), 0);
    }

    #[test]
    fn test_begin_builds_request_with_session() {
        let session = Session::with_id(SessionId::from_time(Utc::now()));
        let id = session.id().clone();
        let provider = Arc::new(Counting::default());
        let mut controller = Controller::new(session, provider, Transcript::new());

        let turn = controller.begin("  fees  ").unwrap();
        assert_eq!(turn.request().question, "fees");
        assert_eq!(turn.request().session_id, id);

        let aborted = Err(AnswerError::Interrupted("task aborted".into()));
        let outcome = controller.complete(turn, aborted);
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.control().state(), ControlState::Idle);
    }
}
