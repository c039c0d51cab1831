//! Driven port for the client-local session store.
//!
//! Replaces ambient access to browser storage with an injected service. The
//! store keeps one session at a time; creating a session overwrites any
//! previous one.

use std::sync::{Mutex, PoisonError};

use crate::domain::{SessionRecord, SessionRole};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// The backing storage could not be read or written.
        Io { message: String } => "session storage failed: {message}",
        /// A stored session could not be decoded.
        Corrupt { message: String } => "stored session is unreadable: {message}",
    }
}

/// Session management service.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Persist `session`, replacing any existing one.
    fn create_session(&self, session: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Return the stored session, if any.
    fn current_session(&self) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Role tag stored next to the session.
    fn current_role(&self) -> Result<Option<SessionRole>, SessionStoreError> {
        Ok(self.current_session()?.map(|session| session.role))
    }

    /// Forget the stored session. Clearing an empty store succeeds.
    fn clear_session(&self) -> Result<(), SessionStoreError>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<SessionRecord>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn create_session(&self, session: &SessionRecord) -> Result<(), SessionStoreError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn current_session(&self) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.slot().clone())
    }

    fn clear_session(&self) -> Result<(), SessionStoreError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Account, AccountId, PortalRole, VerifyStatus};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn donor_session() -> SessionRecord {
        let account = Account::new(
            AccountId::new("1"),
            "d@example.org",
            "Donor",
            VerifyStatus::Verified,
        );
        SessionRecord::for_account(account, PortalRole::Donor, Utc::now())
    }

    #[rstest]
    fn create_then_read_returns_session(donor_session: SessionRecord) {
        let store = MemorySessionStore::new();
        store.create_session(&donor_session).expect("create");
        assert_eq!(
            store.current_session().expect("read"),
            Some(donor_session)
        );
        assert_eq!(store.current_role().expect("role"), Some(SessionRole::Donor));
    }

    #[rstest]
    fn create_overwrites_previous_session(donor_session: SessionRecord) {
        let store = MemorySessionStore::new();
        store.create_session(&donor_session).expect("create");
        let admin = SessionRecord::admin("root@maddad.pk", Utc::now());
        store.create_session(&admin).expect("overwrite");
        assert_eq!(store.current_role().expect("role"), Some(SessionRole::Admin));
    }

    #[rstest]
    fn clear_is_idempotent(donor_session: SessionRecord) {
        let store = MemorySessionStore::new();
        store.clear_session().expect("clear empty store");
        store.create_session(&donor_session).expect("create");
        store.clear_session().expect("clear");
        assert!(store.current_session().expect("read").is_none());
    }
}
