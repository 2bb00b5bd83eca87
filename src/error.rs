//! Error types for voice-auth.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Login error: {0}")]
    Login(#[from] LoginError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse prompt catalog {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport or availability failure reported by the auth backend.
///
/// The message is human-readable and may be shown to the user verbatim.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl BackendError {
    /// The human-readable message carried by this error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Shape or equality failure detected without contacting the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("full name is empty")]
    EmptyFullName,

    #[error("identifier is empty")]
    EmptyIdentifier,

    #[error("email address is malformed")]
    InvalidEmail,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("both identifier and password are required")]
    MissingLoginFields,
}

/// Failures of the manual login path.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    #[error("{0}")]
    MissingFields(#[from] ValidationError),

    #[error("{0}")]
    Backend(#[from] BackendError),
}

/// Session-level (caller side) errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a previous utterance is still being processed")]
    Busy,
}

/// Result type alias for voice-auth.
pub type Result<T> = std::result::Result<T, Error>;
