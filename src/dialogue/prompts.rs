//! Prompt catalog and the prompts emitted by each dialogue turn.

use serde::{Deserialize, Serialize};

use super::state::Step;

/// Every user-facing string the dialogue emits.
///
/// Text arrives already localized; the catalog is injected configuration.
/// Missing keys in a loaded catalog fall back to the English defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptCatalog {
    pub login: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub account_created: String,
    pub username_taken: String,
    pub invalid_email: String,
    pub empty_field: String,
    pub password_mismatch: String,
    pub account_creation_failed: String,
    pub login_fields_required: String,
    pub generic_failure: String,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            login: "Please enter your username or email and password to log in, or say \"sign up\" to create an account.".to_string(),
            full_name: "Let's create your account. What is your full name?".to_string(),
            username: "Choose a username.".to_string(),
            email: "What is your email address?".to_string(),
            password: "Choose a password.".to_string(),
            confirm_password: "Please repeat your password to confirm it.".to_string(),
            account_created: "Your account has been created. Welcome!".to_string(),
            username_taken: "That username is not available. Please choose another one.".to_string(),
            invalid_email: "That does not look like a valid email address. Please try again.".to_string(),
            empty_field: "I didn't catch that. Please try again.".to_string(),
            password_mismatch: "The passwords do not match. Please choose your password again.".to_string(),
            account_creation_failed: "We could not create your account. Please log in or try again.".to_string(),
            login_fields_required: "Please enter both your username or email and your password.".to_string(),
            generic_failure: "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl PromptCatalog {
    /// The prompt asking for the input collected at `step`.
    pub fn for_step(&self, step: Step) -> &str {
        match step {
            Step::Login => &self.login,
            Step::CollectFullName => &self.full_name,
            Step::CollectUsername => &self.username,
            Step::CollectEmail => &self.email,
            Step::CollectPassword => &self.password,
            Step::ConfirmPassword => &self.confirm_password,
        }
    }

    /// `message` if it carries text, otherwise the generic failure text.
    pub fn failure_or_generic(&self, message: &str) -> String {
        if message.trim().is_empty() {
            self.generic_failure.clone()
        } else {
            message.to_string()
        }
    }
}

/// Which error category an error prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Shape or equality failure detected locally.
    Validation,
    /// The backend answered with a negative result.
    Rejection,
    /// The backend call itself failed.
    Failure,
}

/// What kind of text a prompt carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "error")]
pub enum PromptKind {
    /// Asks for the next input.
    Prompt,
    /// Reports an error; the same text is stored as `last_error`.
    Error(ErrorKind),
    /// Informational, e.g. account created.
    Info,
}

/// Text to display or speak after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingPrompt {
    pub text: String,
    pub kind: PromptKind,
}

impl OutgoingPrompt {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: PromptKind::Prompt,
        }
    }

    pub fn error(kind: ErrorKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: PromptKind::Error(kind),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: PromptKind::Info,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, PromptKind::Error(_))
    }
}
