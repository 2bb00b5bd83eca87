//! AuthSession — one authentication session bound to a presentation sink.
//!
//! Owns the session's [`DialogueState`] and applies the caller-side busy
//! policy: an utterance that arrives while a turn is in flight is dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::dialogue::{
    DialogueMachine, DialogueState, DraftSnapshot, LoginForm, OutgoingPrompt, Step, Turn,
    TurnOutcome,
};
use crate::error::{LoginError, SessionError};

/// Receives everything the user should see or hear.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    /// Display or speak a prompt or error.
    async fn present(&self, prompt: &OutgoingPrompt);

    /// Update the signup progress display.
    async fn progress(&self, snapshot: &DraftSnapshot);

    /// Signup finished for `username`.
    async fn account_created(&self, _username: &str) {}
}

/// A single authentication session.
pub struct AuthSession {
    machine: Arc<DialogueMachine>,
    sink: Arc<dyn PresentationSink>,
    state: Mutex<DialogueState>,
}

impl AuthSession {
    /// Create a session. Call [`greet`](Self::greet) to show the first prompt.
    pub fn new(machine: Arc<DialogueMachine>, sink: Arc<dyn PresentationSink>) -> Self {
        let (state, _) = machine.start();
        Self {
            machine,
            sink,
            state: Mutex::new(state),
        }
    }

    /// Present the prompt for the current step.
    pub async fn greet(&self) {
        let step = self.state.lock().await.step;
        let prompt = OutgoingPrompt::prompt(self.machine.prompts().for_step(step));
        self.sink.present(&prompt).await;
    }

    /// Whether a turn or login attempt is in flight.
    pub fn is_busy(&self) -> bool {
        match self.state.try_lock() {
            Ok(state) => state.busy,
            Err(_) => true,
        }
    }

    pub async fn step(&self) -> Step {
        self.state.lock().await.step
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    pub async fn snapshot(&self) -> DraftSnapshot {
        self.state.lock().await.draft.snapshot()
    }

    /// Feed one utterance through the dialogue and present the result.
    ///
    /// Returns [`SessionError::Busy`] without touching the state when a
    /// previous call has not finished.
    pub async fn submit_utterance(&self, utterance: &str) -> Result<Turn, SessionError> {
        let mut state = self.state.try_lock().map_err(|_| {
            debug!("Dropping utterance received while busy");
            SessionError::Busy
        })?;

        let turn = self.machine.handle_utterance(&mut state, utterance).await;
        let snapshot = state.draft.snapshot();
        let show_progress = state.step.is_signup();
        drop(state);

        if let Some(ref prompt) = turn.prompt {
            self.sink.present(prompt).await;
        }
        if show_progress {
            self.sink.progress(&snapshot).await;
        }
        if let TurnOutcome::AccountCreated { ref username } = turn.outcome {
            self.sink.account_created(username).await;
        }

        Ok(turn)
    }

    /// Submit the manual login form. Errors are also presented to the sink.
    pub async fn submit_login(&self, form: LoginForm) -> Result<(), crate::Error> {
        let mut state = self.state.try_lock().map_err(|_| SessionError::Busy)?;

        let result = self.machine.submit_login(&mut state, form).await;
        let error = state.last_error.clone();
        drop(state);

        if let (Err(e), Some(message)) = (&result, error) {
            let kind = match e {
                LoginError::MissingFields(_) => crate::dialogue::ErrorKind::Validation,
                LoginError::Backend(_) => crate::dialogue::ErrorKind::Failure,
            };
            self.sink.present(&OutgoingPrompt::error(kind, message)).await;
        }

        result.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    use crate::dialogue::machine::tests::{ScriptedBackend, machine_with};
    use crate::dialogue::PromptKind;

    #[derive(Default)]
    struct RecordingSink {
        prompts: StdMutex<Vec<OutgoingPrompt>>,
        progress: StdMutex<Vec<DraftSnapshot>>,
        created: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl PresentationSink for RecordingSink {
        async fn present(&self, prompt: &OutgoingPrompt) {
            self.prompts.lock().unwrap().push(prompt.clone());
        }

        async fn progress(&self, snapshot: &DraftSnapshot) {
            self.progress.lock().unwrap().push(snapshot.clone());
        }

        async fn account_created(&self, username: &str) {
            self.created.lock().unwrap().push(username.to_string());
        }
    }

    fn session() -> (AuthSession, Arc<RecordingSink>) {
        let (machine, _) = machine_with(ScriptedBackend::default());
        let sink = Arc::new(RecordingSink::default());
        (AuthSession::new(Arc::new(machine), sink.clone()), sink)
    }

    #[tokio::test]
    async fn turns_are_pushed_to_sink() {
        let (session, sink) = session();
        session.greet().await;
        for utterance in ["sign up", "Alice Smith", "alicesmith"] {
            session.submit_utterance(utterance).await.unwrap();
        }

        assert_eq!(sink.prompts.lock().unwrap().len(), 4);
        let completed = sink.progress.lock().unwrap().last().unwrap().completed_fields();
        assert_eq!(completed, 2);
        assert_eq!(session.step().await, Step::CollectEmail);
    }

    #[tokio::test]
    async fn account_creation_reaches_sink() {
        let (session, sink) = session();
        for utterance in ["sign up", "Alice Smith", "alicesmith", "alice@example.com", "pw", "pw"] {
            session.submit_utterance(utterance).await.unwrap();
        }
        assert_eq!(*sink.created.lock().unwrap(), vec!["alicesmith".to_string()]);
        assert_eq!(session.snapshot().await.completed_fields(), 0);
    }

    #[tokio::test]
    async fn utterance_while_locked_is_dropped() {
        let (session, _) = session();
        let guard = session.state.lock().await;
        assert!(session.is_busy());
        let err = session.submit_utterance("sign up").await.unwrap_err();
        assert!(matches!(err, SessionError::Busy));
        drop(guard);

        assert!(!session.is_busy());
        assert_eq!(session.step().await, Step::Login);
    }

    #[tokio::test]
    async fn login_errors_are_presented() {
        let (session, sink) = session();
        assert!(session.submit_login(LoginForm::new("", "")).await.is_err());

        let prompts = sink.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(matches!(prompts[0].kind, PromptKind::Error(_)));
        drop(prompts);
        assert!(session.last_error().await.is_some());
    }
}
