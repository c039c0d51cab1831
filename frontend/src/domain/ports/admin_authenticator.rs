//! Driven port for privileged (administrator) sign-in.
//!
//! Administrators never appear in the role-specific directory tables. A
//! separate authenticator decides whether credentials belong to an
//! administrator before the regular lookup runs.

use async_trait::async_trait;

use crate::domain::{DomainError, LoginCredentials};

/// Identity confirmed by the privileged authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: String,
}

/// Port that recognises administrator credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAuthenticator: Send + Sync {
    /// Return `Some` when the credentials identify an administrator.
    ///
    /// `Ok(None)` means "not an administrator" and the regular lookup should
    /// proceed.
    async fn authenticate_admin(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<AdminIdentity>, DomainError>;
}

/// Authenticator that recognises nobody.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAdminAuthenticator;

#[async_trait]
impl AdminAuthenticator for DisabledAdminAuthenticator {
    async fn authenticate_admin(
        &self,
        _credentials: &LoginCredentials,
    ) -> Result<Option<AdminIdentity>, DomainError> {
        Ok(None)
    }
}
