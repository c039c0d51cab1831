//! Failure payload carried by unsuccessful sign-in attempts.
//!
//! Every attempt that does not end in a session maps to one [`DomainError`].
//! The CLI prints it as JSON after the feedback line; a browser shell would
//! render the message as a banner and use the code to pick a retry affordance.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Failure category of a sign-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A form field is blank or the email is malformed.
    InvalidRequest,
    /// No single account matches the credentials.
    Unauthorized,
    /// The account exists but has not been verified.
    Forbidden,
    /// The account directory or the admin check could not be reached.
    ServiceUnavailable,
    /// The directory answered nonsense or the session could not be saved.
    InternalError,
}

impl ErrorCode {
    /// Wire name, as serialised.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }

    /// Whether repeating the same attempt unchanged may succeed.
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::ServiceUnavailable)
    }

    const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Sign-in request is invalid",
            Self::Unauthorized => "Sign-in was refused",
            Self::Forbidden => "Sign-in is not allowed for this account",
            Self::ServiceUnavailable => "Sign-in is temporarily unavailable",
            Self::InternalError => "Sign-in failed unexpectedly",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorised failure with a visitor-facing message.
///
/// The message is never blank: a blank input is replaced by a generic
/// message for the code.
///
/// # Examples
/// ```
/// use frontend::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::new(ErrorCode::Unauthorized, "  ");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// assert_eq!(err.message(), "Sign-in was refused");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl DomainError {
    /// Build an error for `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Blank field or malformed email.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Credentials match no single account.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Account awaiting verification.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Transient collaborator outage.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Anything else.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach structured diagnostics, e.g. `{"cause": "..."}`.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Text shown to the visitor.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostics attached with [`Self::with_details`].
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Shorthand for [`ErrorCode::is_retryable`].
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

#[cfg(test)]
mod tests;
