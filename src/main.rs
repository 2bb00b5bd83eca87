use std::sync::Arc;

use futures::StreamExt;

use voice_auth::backend::{MemoryBackend, SessionEvent};
use voice_auth::channels::{CliChannel, CliInput};
use voice_auth::config::DialogueConfig;
use voice_auth::dialogue::{DialogueMachine, LoginForm};
use voice_auth::session::AuthSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = DialogueConfig::from_env()?;

    eprintln!("🔐 voice-auth v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Login phrases: {}", config.synonyms.login.join(", "));
    eprintln!("   Signup phrases: {}", config.synonyms.signup.join(", "));
    eprintln!("   /signin <user> <password> submits the login form. /quit to exit.\n");

    // ── Backend ──────────────────────────────────────────────────────────
    let backend = Arc::new(MemoryBackend::new());
    let mut events = backend.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::SignedIn { username, at, .. } => {
                    eprintln!("ℹ️  Session started for {} at {}", username, at.to_rfc3339());
                }
            }
        }
    });

    // ── Session ──────────────────────────────────────────────────────────
    let machine = Arc::new(DialogueMachine::new(&config, backend));
    let channel = Arc::new(CliChannel::new());
    let session = AuthSession::new(machine, channel.clone());
    session.greet().await;

    let mut input = channel.start();
    while let Some(line) = input.next().await {
        match line {
            CliInput::Quit => break,
            CliInput::Utterance(text) => {
                if let Err(e) = session.submit_utterance(&text).await {
                    tracing::debug!("Utterance dropped: {}", e);
                }
            }
            CliInput::SignIn { identifier, secret } => {
                // Errors were already presented to the user.
                let _ = session.submit_login(LoginForm::new(identifier, secret)).await;
            }
        }
    }

    Ok(())
}
