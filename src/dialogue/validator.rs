//! Per-step input validation and normalization. Pure functions, no I/O.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ValidationError;

use super::model::LoginForm;

/// Trim, lowercase, and drop every whitespace character.
///
/// Used for usernames and email addresses, which are often dictated with
/// stray spaces ("alice smith at example dot com" transcribed loosely).
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Full name: trimmed, must not be empty.
pub fn validate_full_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyFullName);
    }
    Ok(name.to_string())
}

/// Username shape. Availability is checked against the backend separately.
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let username = normalize_identifier(raw);
    if username.is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    Ok(username)
}

/// Email: normalized, must contain both an `@` and a `.`.
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = normalize_identifier(raw);
    if !email.contains('@') || !email.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

/// Password is taken verbatim: case and whitespace are significant.
pub fn accept_password(raw: &str) -> SecretString {
    SecretString::from(raw.to_string())
}

/// Confirmation must equal the stored password exactly.
pub fn confirm_password(stored: Option<&SecretString>, confirmation: &str) -> Result<(), ValidationError> {
    match stored {
        Some(password) if password.expose_secret() == confirmation => Ok(()),
        _ => Err(ValidationError::PasswordMismatch),
    }
}

/// Both login fields must be non-empty.
pub fn validate_login_form(form: &LoginForm) -> Result<(), ValidationError> {
    if form.identifier.trim().is_empty() || form.secret.expose_secret().trim().is_empty() {
        return Err(ValidationError::MissingLoginFields);
    }
    Ok(())
}
