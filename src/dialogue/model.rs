//! Signup draft, login form, and the read-only progress snapshot.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Fixed-length mask shown in place of a collected password.
pub const PASSWORD_MASK: &str = "••••••••";

/// The in-progress, not-yet-submitted signup fields.
///
/// Fields are populated strictly in step order: a field is set if and only
/// if its collecting step has been passed.
#[derive(Debug, Default)]
pub struct SignupDraft {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl SignupDraft {
    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether no field has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }

    /// Read-only view for progress display. The password is masked.
    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.as_ref().map(|_| PASSWORD_MASK.to_string()),
        }
    }

    /// Assemble the account-creation request once every field is present.
    pub fn to_new_account(&self) -> Option<NewAccount> {
        Some(NewAccount {
            email: self.email.clone()?,
            password: SecretString::from(self.password.as_ref()?.expose_secret().to_string()),
            full_name: self.full_name.clone()?,
            username: self.username.clone()?,
        })
    }
}

/// Serializable snapshot of a [`SignupDraft`] for progress display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Always [`PASSWORD_MASK`] when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl DraftSnapshot {
    /// Number of fields collected so far (0..=4).
    pub fn completed_fields(&self) -> usize {
        [
            self.full_name.is_some(),
            self.username.is_some(),
            self.email.is_some(),
            self.password.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Render as a short progress block for text output.
    pub fn to_progress_lines(&self) -> String {
        let mut parts = vec![format!("Signup progress: {}/4", self.completed_fields())];
        if let Some(ref name) = self.full_name {
            parts.push(format!("- Name: {name}"));
        }
        if let Some(ref username) = self.username {
            parts.push(format!("- Username: {username}"));
        }
        if let Some(ref email) = self.email {
            parts.push(format!("- Email: {email}"));
        }
        if let Some(ref mask) = self.password {
            parts.push(format!("- Password: {mask}"));
        }
        parts.join("\n")
    }
}

/// Fields passed to the backend when creating an account.
#[derive(Debug)]
pub struct NewAccount {
    pub email: String,
    pub password: SecretString,
    pub full_name: String,
    pub username: String,
}

/// Manual login form. Lives for a single submit attempt.
#[derive(Debug)]
pub struct LoginForm {
    pub identifier: String,
    pub secret: SecretString,
}

impl LoginForm {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: SecretString::from(secret.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> SignupDraft {
        SignupDraft {
            full_name: Some("Alice Smith".to_string()),
            username: Some("alicesmith".to_string()),
            email: Some("alice@example.com".to_string()),
            password: Some(SecretString::from("Secret123".to_string())),
        }
    }

    #[test]
    fn snapshot_masks_password() {
        let snapshot = full_draft().snapshot();
        assert_eq!(snapshot.password.as_deref(), Some(PASSWORD_MASK));
        assert_eq!(snapshot.completed_fields(), 4);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("Secret123"));
    }

    #[test]
    fn mask_length_does_not_depend_on_password() {
        let mut short = full_draft();
        short.password = Some(SecretString::from("x".to_string()));
        assert_eq!(short.snapshot().password, full_draft().snapshot().password);
    }

    #[test]
    fn debug_output_redacts_password() {
        let debug = format!("{:?}", full_draft());
        assert!(!debug.contains("Secret123"));
    }

    #[test]
    fn clear_resets_every_field() {
        let mut draft = full_draft();
        assert!(!draft.is_empty());
        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.snapshot(), DraftSnapshot::default());
    }

    #[test]
    fn new_account_requires_every_field() {
        let account = full_draft().to_new_account().unwrap();
        assert_eq!(account.email, "alice@example.com");
        assert_eq!(account.password.expose_secret(), "Secret123");

        let mut partial = full_draft();
        partial.password = None;
        assert!(partial.to_new_account().is_none());
    }

    #[test]
    fn progress_lines_list_collected_fields_only() {
        let draft = SignupDraft {
            full_name: Some("Bob".to_string()),
            ..Default::default()
        };
        let text = draft.snapshot().to_progress_lines();
        assert!(text.contains("1/4"));
        assert!(text.contains("Bob"));
        assert!(!text.contains("Email"));
        assert!(!text.contains("Password"));
    }
}
