//! Auth backend capability consumed by the dialogue.
//!
//! The dialogue never stores credentials itself. Everything that needs the
//! account store goes through [`AuthBackend`], so a hosted identity service
//! and the in-memory [`MemoryBackend`] are interchangeable.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Serialize;
use uuid::Uuid;

use crate::dialogue::model::NewAccount;
use crate::error::BackendError;

pub use memory::MemoryBackend;

/// Remote account operations. Each call may succeed, report a negative
/// result, or fail with a [`BackendError`].
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Whether the normalized username is already registered.
    async fn is_identifier_taken(&self, username: &str) -> Result<bool, BackendError>;

    /// Create an account. `Ok(false)` is a logical refusal (e.g. duplicate email).
    async fn create_account(&self, account: &NewAccount) -> Result<bool, BackendError>;

    /// Start a session. Success is observed through a session-change
    /// notification, not through the return value.
    async fn sign_in(&self, identifier: &str, secret: &SecretString) -> Result<(), BackendError>;
}

/// Session-change notification published by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SignedIn {
        account_id: Uuid,
        username: String,
        at: DateTime<Utc>,
    },
}
