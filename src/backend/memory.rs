//! In-memory account store with argon2 password hashing.
//!
//! Backs the CLI and the integration tests. Accounts live for the lifetime
//! of the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use argon2::Argon2;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{RwLock, broadcast};
use tracing::{info, warn};
use uuid::Uuid;

use super::{AuthBackend, SessionEvent};
use crate::dialogue::model::NewAccount;
use crate::dialogue::validator::normalize_identifier;
use crate::error::BackendError;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const OFFLINE: &str = "The account service is unavailable. Please try again later.";

/// A registered account.
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Process-local [`AuthBackend`].
pub struct MemoryBackend {
    accounts: RwLock<HashMap<Uuid, StoredAccount>>,
    argon: Argon2<'static>,
    events: broadcast::Sender<SessionEvent>,
    offline: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            accounts: RwLock::new(HashMap::new()),
            argon: Argon2::default(),
            events,
            offline: AtomicBool::new(false),
        }
    }

    /// Subscribe to session-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Simulate a transport outage: every call fails while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of registered accounts.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Look up an account by username or email (case-insensitive).
    pub async fn find(&self, identifier: &str) -> Option<StoredAccount> {
        let key = normalize_identifier(identifier);
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.username == key || a.email == key)
            .cloned()
    }

    fn ensure_online(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable(OFFLINE.to_string()));
        }
        Ok(())
    }

    fn hash_password(&self, password: &SecretString) -> Result<String, BackendError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| BackendError::Hashing(e.to_string()))
    }

    fn publish(&self, account: &StoredAccount, at: DateTime<Utc>) {
        // No subscribers is fine.
        let _ = self.events.send(SessionEvent::SignedIn {
            account_id: account.id,
            username: account.username.clone(),
            at,
        });
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthBackend for MemoryBackend {
    async fn is_identifier_taken(&self, username: &str) -> Result<bool, BackendError> {
        self.ensure_online()?;
        let key = normalize_identifier(username);
        Ok(self.accounts.read().await.values().any(|a| a.username == key))
    }

    async fn create_account(&self, account: &NewAccount) -> Result<bool, BackendError> {
        self.ensure_online()?;
        let username = normalize_identifier(&account.username);
        let email = normalize_identifier(&account.email);
        let password_hash = self.hash_password(&account.password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == email || a.username == username) {
            warn!(username = %username, "Account creation refused: username or email in use");
            return Ok(false);
        }

        let now = Utc::now();
        let stored = StoredAccount {
            id: Uuid::new_v4(),
            username,
            email,
            full_name: account.full_name.clone(),
            password_hash,
            created_at: now,
            last_login: Some(now),
        };
        info!(account_id = %stored.id, username = %stored.username, "Account created");
        self.publish(&stored, now);
        accounts.insert(stored.id, stored);
        Ok(true)
    }

    async fn sign_in(&self, identifier: &str, secret: &SecretString) -> Result<(), BackendError> {
        self.ensure_online()?;
        let key = normalize_identifier(identifier);

        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts
            .values_mut()
            .find(|a| a.username == key || a.email == key)
        else {
            warn!(identifier = %key, "Sign-in failed: unknown account");
            return Err(BackendError::Rejected(INVALID_CREDENTIALS.to_string()));
        };

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| BackendError::Hashing(e.to_string()))?;
        if self
            .argon
            .verify_password(secret.expose_secret().as_bytes(), &parsed)
            .is_err()
        {
            warn!(identifier = %key, "Sign-in failed: invalid password");
            return Err(BackendError::Rejected(INVALID_CREDENTIALS.to_string()));
        }

        let now = Utc::now();
        account.last_login = Some(now);
        info!(account_id = %account.id, "Signed in");
        let account = account.clone();
        drop(accounts);
        self.publish(&account, now);
        Ok(())
    }
}
