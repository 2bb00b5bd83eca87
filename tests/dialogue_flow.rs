//! End-to-end dialogue tests against the in-memory backend.
//!
//! Each test drives a fresh session through the public API only.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use voice_auth::backend::{MemoryBackend, SessionEvent};
use voice_auth::config::DialogueConfig;
use voice_auth::dialogue::{
    DialogueMachine, DraftSnapshot, ErrorKind, LoginForm, OutgoingPrompt, PromptKind, Step,
    TurnOutcome,
};
use voice_auth::session::{AuthSession, PresentationSink};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Sink that keeps every prompt it was given.
#[derive(Default)]
struct Transcript {
    prompts: Mutex<Vec<OutgoingPrompt>>,
}

impl Transcript {
    fn texts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().iter().map(|p| p.text.clone()).collect()
    }

    fn last(&self) -> OutgoingPrompt {
        self.prompts.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl PresentationSink for Transcript {
    async fn present(&self, prompt: &OutgoingPrompt) {
        self.prompts.lock().unwrap().push(prompt.clone());
    }

    async fn progress(&self, _snapshot: &DraftSnapshot) {}
}

fn new_session(backend: Arc<MemoryBackend>) -> (AuthSession, Arc<Transcript>) {
    let machine = Arc::new(DialogueMachine::new(&DialogueConfig::default(), backend));
    let transcript = Arc::new(Transcript::default());
    (AuthSession::new(machine, transcript.clone()), transcript)
}

async fn say_all(session: &AuthSession, utterances: &[&str]) -> Option<TurnOutcome> {
    let mut last = None;
    for utterance in utterances {
        last = Some(session.submit_utterance(utterance).await.unwrap().outcome);
    }
    last
}

const SIGNUP: [&str; 6] = [
    "sign up",
    "Alice Smith",
    "alicesmith",
    "alice@example.com",
    "Secret123",
    "Secret123",
];

#[tokio::test]
async fn signup_then_login_with_new_account() {
    let backend = Arc::new(MemoryBackend::new());
    let mut events = backend.subscribe();
    let (session, _) = new_session(backend.clone());

    let outcome = say_all(&session, &SIGNUP).await;
    assert_eq!(
        outcome,
        Some(TurnOutcome::AccountCreated {
            username: "alicesmith".to_string()
        })
    );
    assert_eq!(backend.count().await, 1);

    let created = timeout(TEST_TIMEOUT, events.recv()).await.unwrap().unwrap();
    assert!(matches!(created, SessionEvent::SignedIn { ref username, .. } if username == "alicesmith"));

    // A second session can sign in with the new credentials.
    let (other, _) = new_session(backend.clone());
    other
        .submit_login(LoginForm::new("alice@example.com", "Secret123"))
        .await
        .unwrap();
    let signed_in = timeout(TEST_TIMEOUT, events.recv()).await.unwrap().unwrap();
    assert!(matches!(signed_in, SessionEvent::SignedIn { .. }));
}

#[tokio::test]
async fn second_signup_with_same_username_is_rejected_in_place() {
    let backend = Arc::new(MemoryBackend::new());
    let (first, _) = new_session(backend.clone());
    say_all(&first, &SIGNUP).await;

    let (second, transcript) = new_session(backend.clone());
    say_all(&second, &SIGNUP[..3]).await;

    assert_eq!(second.step().await, Step::CollectUsername);
    assert_eq!(transcript.last().kind, PromptKind::Error(ErrorKind::Rejection));

    // Another username moves on to the email step.
    say_all(&second, &["alice2"]).await;
    assert_eq!(second.step().await, Step::CollectEmail);
}

#[tokio::test]
async fn duplicate_email_falls_back_to_login() {
    let backend = Arc::new(MemoryBackend::new());
    let (first, _) = new_session(backend.clone());
    say_all(&first, &SIGNUP).await;

    let (second, transcript) = new_session(backend.clone());
    let outcome = say_all(
        &second,
        &["sign up", "Alice Two", "alice2", "ALICE@example.com", "pw", "pw"],
    )
    .await;

    assert_eq!(outcome, Some(TurnOutcome::Continue));
    assert_eq!(second.step().await, Step::Login);
    assert_eq!(second.snapshot().await, DraftSnapshot::default());
    assert_eq!(transcript.last().kind, PromptKind::Error(ErrorKind::Rejection));
    assert_eq!(backend.count().await, 1);
}

#[tokio::test]
async fn outage_during_username_check_keeps_progress() {
    let backend = Arc::new(MemoryBackend::new());
    let (session, transcript) = new_session(backend.clone());
    say_all(&session, &SIGNUP[..2]).await;

    backend.set_offline(true);
    say_all(&session, &["alicesmith"]).await;
    assert_eq!(session.step().await, Step::CollectUsername);
    assert_eq!(transcript.last().kind, PromptKind::Error(ErrorKind::Failure));
    assert!(session.last_error().await.is_some());

    backend.set_offline(false);
    say_all(&session, &["alicesmith"]).await;
    assert_eq!(session.step().await, Step::CollectEmail);
    assert!(session.last_error().await.is_none());
}

#[tokio::test]
async fn wrong_confirmation_then_retry() {
    let backend = Arc::new(MemoryBackend::new());
    let (session, transcript) = new_session(backend.clone());
    say_all(&session, &SIGNUP[..5]).await;

    say_all(&session, &["wrong"]).await;
    assert_eq!(session.step().await, Step::CollectPassword);
    assert!(session.snapshot().await.password.is_none());
    assert_eq!(backend.count().await, 0);

    let outcome = say_all(&session, &["Secret456", "Secret456"]).await;
    assert!(matches!(outcome, Some(TurnOutcome::AccountCreated { .. })));
    assert!(transcript.texts().iter().any(|t| t.contains("do not match")));
}

#[tokio::test]
async fn bad_login_surfaces_backend_message() {
    let backend = Arc::new(MemoryBackend::new());
    let (session, transcript) = new_session(backend);

    let err = session
        .submit_login(LoginForm::new("nobody", "nothing"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Login error: Invalid username or password.");
    assert_eq!(transcript.last().text, "Invalid username or password.");
    assert_eq!(session.step().await, Step::Login);
}
