//! Domain error types and the error-kind taxonomy shared by every layer.

use thiserror::Error;


/// Coarse classification of a [`DomainError`]
///
/// Callers branch on the kind rather than on the concrete variant when they
/// only care about the category of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A code was sent for this key inside the resend cooldown window
    RateLimitedSend,
    /// The code entry has no attempts left
    RateLimitedVerify,
    /// The store holds state that correct operation never produces
    Integrity,
    /// Key or record absent
    NotFound,
    /// Uniqueness violation on create
    DuplicateKey,
    /// Network, store or delivery failure; retrying may succeed
    Transient,
    /// Credentials did not match
    Unauthorized,
    /// Caller supplied unusable input
    Invalid,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Verification code sent too frequently")]
    CodeSendTooMany,

    #[error("Too many verification attempts")]
    CodeVerifyTooMany,

    #[error("Store integrity violation: {message}")]
    Integrity { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Duplicate key: {message}")]
    DuplicateKey { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("SMS delivery failed: {message}")]
    Sms { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Invalid user or password")]
    InvalidCredentials,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::CodeSendTooMany => ErrorKind::RateLimitedSend,
            DomainError::CodeVerifyTooMany => ErrorKind::RateLimitedVerify,
            DomainError::Integrity { .. } => ErrorKind::Integrity,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            DomainError::Cache { .. }
            | DomainError::Database { .. }
            | DomainError::Sms { .. }
            | DomainError::Serialization { .. }
            | DomainError::Internal { .. } => ErrorKind::Transient,
            DomainError::InvalidCredentials => ErrorKind::Unauthorized,
            DomainError::Validation { .. } => ErrorKind::Invalid,
        }
    }

    /// Shorthand for a missing user record
    pub fn user_not_found() -> Self {
        DomainError::NotFound {
            resource: "user".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_duplicate_key(&self) -> bool {
        self.kind() == ErrorKind::DuplicateKey
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
