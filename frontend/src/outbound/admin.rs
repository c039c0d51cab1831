//! Sentinel administrator authenticator.
//!
//! Recognises a single email/password pair supplied at startup. Nothing is
//! compiled into the binary; without configuration the login flow uses
//! `DisabledAdminAuthenticator` instead.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{AdminAuthenticator, AdminIdentity};
use crate::domain::{DomainError, LoginCredentials};

/// Authenticator matching one configured credential pair.
pub struct SentinelAdminAuthenticator {
    email: String,
    password: Zeroizing<String>,
}

impl SentinelAdminAuthenticator {
    /// Build from optional configuration values.
    ///
    /// Returns `None` unless both values are present and non-blank.
    ///
    /// # Examples
    /// ```
    /// use frontend::outbound::admin::SentinelAdminAuthenticator;
    ///
    /// assert!(SentinelAdminAuthenticator::from_config(Some("admin"), None).is_none());
    /// assert!(SentinelAdminAuthenticator::from_config(Some("admin"), Some("pw")).is_some());
    /// ```
    pub fn from_config(email: Option<&str>, password: Option<&str>) -> Option<Self> {
        let email = email.map(str::trim).filter(|value| !value.is_empty())?;
        let password = password.filter(|value| !value.is_empty())?;
        Some(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }
}

impl std::fmt::Debug for SentinelAdminAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentinelAdminAuthenticator")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl AdminAuthenticator for SentinelAdminAuthenticator {
    async fn authenticate_admin(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<AdminIdentity>, DomainError> {
        if credentials.email() == self.email && credentials.password() == self.password.as_str() {
            Ok(Some(AdminIdentity {
                email: self.email.clone(),
            }))
        } else {
            Ok(None)
        }
    }
}
