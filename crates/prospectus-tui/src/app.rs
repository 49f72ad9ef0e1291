//! Application state for the prospectus TUI.

use std::sync::Arc;

use prospectus_engine::{
    Answer, AnswerError, AnswerProvider, Config, Controller, MockProvider, PendingTurn, Session,
    SubmitControl, SubmitOutcome,
};
use tokio::task::JoinHandle;

use crate::event::Action;
use crate::theme::Theme;
use crate::view::{ChatView, SCROLL_SPEED};

/// A question whose answer is being produced off the UI loop.
struct InFlight {
    turn: PendingTurn,
    task: JoinHandle<Result<Answer, AnswerError>>,
}

/// Main application state.
pub struct App {
    controller: Controller<MockProvider, ChatView>,
    in_flight: Option<InFlight>,

    /// Color palette.
    pub theme: Theme,

    /// Animation tick counter.
    pub tick: usize,

    /// Whether the app should quit.
    pub should_quit: bool,

    /// Height of the transcript viewport at the last draw.
    pub(crate) viewport_height: usize,
}

impl App {
    /// Create an app with a fresh session and the configured mock provider.
    pub fn new(config: &Config) -> Self {
        Self::with_provider(MockProvider::from_config(&config.mock))
    }

    /// Create an app around a specific provider.
    pub fn with_provider(provider: MockProvider) -> Self {
        tracing::debug!(latency = ?provider.latency(), "mock provider ready");
        Self {
            controller: Controller::new(Session::start(), Arc::new(provider), ChatView::new()),
            in_flight: None,
            theme: Theme::from_env(),
            tick: 0,
            should_quit: false,
            viewport_height: 0,
        }
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        self.controller.session()
    }

    /// The chat surface.
    pub fn view(&self) -> &ChatView {
        self.controller.surface()
    }

    pub(crate) fn view_mut(&mut self) -> &mut ChatView {
        self.controller.surface_mut()
    }

    /// The send control.
    pub fn control(&self) -> &SubmitControl {
        self.controller.control()
    }

    /// Whether an answer is on its way.
    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handle a user action.
    pub fn handle_action(&mut self, action: Action) {
        let page = self.viewport_height.max(1);

        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => self.submit(),
            Action::None => {}
            _ => self.edit_view(action, page),
        }
    }

    fn edit_view(&mut self, action: Action, page: usize) {
        let view = self.view_mut();
        match action {
            Action::Insert(c) => view.input_mut().insert(c),
            Action::Backspace => view.input_mut().backspace(),
            Action::Delete => view.input_mut().delete(),
            Action::CursorLeft => view.input_mut().move_left(),
            Action::CursorRight => view.input_mut().move_right(),
            Action::CursorHome => view.input_mut().move_home(),
            // End also brings the newest entry back into view.
            Action::CursorEnd => {
                view.input_mut().move_end();
                view.scroll_to_latest();
            }
            Action::HistoryPrev => view.input_mut().history_prev(),
            Action::HistoryNext => view.input_mut().history_next(),
            Action::ScrollUp => view.scroll_up(SCROLL_SPEED),
            Action::ScrollDown => view.scroll_down(SCROLL_SPEED),
            Action::PageUp => view.scroll_up(page),
            Action::PageDown => view.scroll_down(page),
            Action::JumpToLatest => view.scroll_to_latest(),
            Action::Quit | Action::Submit | Action::None => {}
        }
    }

    /// Send the input line. Blank input and input typed while busy stay put.
    fn submit(&mut self) {
        let text = self.view().input().content().to_string();
        let Ok(turn) = self.controller.begin(&text) else {
            return;
        };

        let provider = self.controller.provider();
        let request = turn.request().clone();
        let task = tokio::spawn(async move { provider.answer(&request).await });
        self.in_flight = Some(InFlight { turn, task });
    }

    /// Finish the in-flight turn if its answer has arrived.
    pub async fn poll_answer(&mut self) -> Option<SubmitOutcome> {
        if self.in_flight.as_ref()?.task.is_finished() {
            self.await_answer().await
        } else {
            None
        }
    }

    /// Wait for the in-flight turn and finish it.
    pub async fn await_answer(&mut self) -> Option<SubmitOutcome> {
        let InFlight { turn, task } = self.in_flight.take()?;
        let outcome = task
            .await
            .unwrap_or_else(|e| Err(AnswerError::Interrupted(e.to_string())));
        Some(self.controller.complete(turn, outcome))
    }

    /// Stop any in-flight request. The question stays unanswered.
    pub fn shutdown(&mut self) {
        if let Some(InFlight { turn, task }) = self.in_flight.take() {
            task.abort();
            tracing::debug!(
                session_id = %self.session().id(),
                "answer task aborted on exit"
            );
            self.controller.abandon(turn);
        }
    }
}
