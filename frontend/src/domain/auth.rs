//! Authentication primitives such as login credentials.
//!
//! Validation happens in two phases so the login flow can give the
//! privileged authenticator a chance before email syntax is enforced:
//! [`LoginCredentials::try_from_parts`] rejects blank fields and
//! [`LoginCredentials::require_valid_email`] rejects malformed addresses.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
}

impl LoginValidationError {
    /// Whether the error stems from an unfilled form field.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::EmptyEmail | Self::EmptyPassword)
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

// A pattern that fails to compile rejects every address.
static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN));

/// Credentials entered on the login form.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use frontend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.org ", "pw").unwrap();
/// assert_eq!(creds.email(), "ada@example.org");
/// assert!(creds.require_valid_email().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Reject addresses that do not match `local@domain.tld`.
    pub fn require_valid_email(&self) -> Result<(), LoginValidationError> {
        match &*EMAIL_RE {
            Ok(pattern) if pattern.is_match(&self.email) => Ok(()),
            _ => Err(LoginValidationError::InvalidEmail),
        }
    }

    /// Email used for directory lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
