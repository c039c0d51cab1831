//! Driven port for the remote account directory.
//!
//! The directory keeps one table per portal role and answers equality
//! lookups on email and password. Adapters report transport faults as
//! distinct error kinds so the login flow can tell "no such account" apart
//! from "could not ask".

use async_trait::async_trait;

use crate::domain::{Account, LoginCredentials, PortalRole};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account directory adapters.
    pub enum AccountDirectoryError {
        /// The directory could not be reached.
        Connection { message: String } => "account directory connection failed: {message}",
        /// The directory did not answer in time.
        Timeout { message: String } => "account directory timed out: {message}",
        /// The directory rejected the query.
        Query { message: String } => "account directory query failed: {message}",
        /// The directory answered with an unreadable payload.
        Decode { message: String } => "account directory returned invalid data: {message}",
    }
}

impl AccountDirectoryError {
    /// Whether the failure is transient and worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }
}

/// Port for credential lookups against role-specific tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Return every account in `role`'s table whose email and password both
    /// equal the supplied credentials.
    ///
    /// At most one match is expected; callers treat more than one as a
    /// failed sign-in.
    async fn find_accounts(
        &self,
        role: PortalRole,
        credentials: &LoginCredentials,
    ) -> Result<Vec<Account>, AccountDirectoryError>;
}
