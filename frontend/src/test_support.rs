//! Test utilities for the frontend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests
//! or with the `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The crate avoids direct `std::fs` calls. These helpers cover the reads
    //! and writes test suites need while staying on `cap_std::fs::Dir`.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(&file_name))
    }

    /// Write bytes to a file through `cap_std`.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists, false when it does not.
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }

    /// Create a fresh temporary directory removed on drop.
    pub fn temp_dir() -> io::Result<tempfile::TempDir> {
        tempfile::Builder::new().prefix("maddad-").tempdir()
    }
}

pub mod login_flow {
    //! Shared test doubles for login flow tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, PoisonError};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    use crate::domain::ports::{AccountDirectory, AccountDirectoryError, FlowSleeper};
    use crate::domain::{Account, AccountId, LoginCredentials, PortalRole, VerifyStatus};

    /// Timestamp every fixture clock starts at.
    pub fn fixture_timestamp() -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).single() {
            Some(timestamp) => timestamp,
            None => panic!("valid fixture timestamp"),
        }
    }

    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance(&self, delta: Duration) {
            let delta = match TimeDelta::from_std(delta) {
                Ok(delta) => delta,
                Err(error) => {
                    panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
                }
            };
            *self.0.lock().unwrap_or_else(PoisonError::into_inner) += delta;
        }
    }

    impl Default for MutableClock {
        fn default() -> Self {
            Self::new(fixture_timestamp())
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct ImmediateSleeper;

    #[async_trait]
    impl FlowSleeper for ImmediateSleeper {
        async fn sleep(&self, _duration: Duration) {}
    }

    /// Sleeper that returns at once and remembers each requested delay.
    #[derive(Default)]
    pub struct RecordingSleeper(pub Mutex<Vec<Duration>>);

    impl RecordingSleeper {
        pub fn recorded(&self) -> Vec<Duration> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    #[async_trait]
    impl FlowSleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(duration);
        }
    }

    type RowKey = (PortalRole, String, String);

    /// In-memory directory keyed on role, email and password.
    #[derive(Default)]
    pub struct StubAccountDirectory {
        rows: Mutex<HashMap<RowKey, Vec<Account>>>,
        failure: Mutex<Option<AccountDirectoryError>>,
        lookups: AtomicUsize,
    }

    impl StubAccountDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register `account` under `role` with its password.
        pub fn insert(&self, role: PortalRole, password: &str, account: Account) {
            let key = (role, account.email().to_owned(), password.to_owned());
            self.rows
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key)
                .or_default()
                .push(account);
        }

        /// Make every subsequent lookup fail with `error`.
        pub fn fail_with(&self, error: AccountDirectoryError) {
            *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
        }

        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AccountDirectory for StubAccountDirectory {
        async fn find_accounts(
            &self,
            role: PortalRole,
            credentials: &LoginCredentials,
        ) -> Result<Vec<Account>, AccountDirectoryError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = self
                .failure
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
            {
                return Err(error);
            }
            let key = (
                role,
                credentials.email().to_owned(),
                credentials.password().to_owned(),
            );
            Ok(self
                .rows
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&key)
                .cloned()
                .unwrap_or_default())
        }
    }

    /// Verified directory account.
    pub fn verified_account(id: &str, email: &str, name: &str) -> Account {
        Account::new(AccountId::new(id), email, name, VerifyStatus::Verified)
    }

    /// Directory account still awaiting review.
    pub fn pending_account(id: &str, email: &str, name: &str) -> Account {
        Account::new(
            AccountId::new(id),
            email,
            name,
            VerifyStatus::Pending("pending".to_owned()),
        )
    }
}
