//! File-backed `SessionStore` adapter.
//!
//! The session lives in one JSON document shaped like the browser storage
//! it replaces:
//!
//! ```json
//! { "user": { "id": "7", "email": "...", ... }, "userType": "donor" }
//! ```
//!
//! Writes replace the document atomically.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionRecord, SessionRole};

use super::atomic_write::write_atomic;

/// Name of the session document inside the store directory.
pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    user: SessionRecord,
    user_type: SessionRole,
}

/// Session store persisting to `<dir>/session.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Store sessions under `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the session document.
    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE_NAME)
    }

    fn open_dir(&self) -> io::Result<Dir> {
        Dir::open_ambient_dir(&self.dir, ambient_authority())
    }

    fn read_document(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let dir = match self.open_dir() {
            Ok(dir) => dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(&error)),
        };
        let raw = match dir.read_to_string(SESSION_FILE_NAME) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(&error)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|error| SessionStoreError::corrupt(error.to_string()))
    }

    fn io_error(&self, error: &io::Error) -> SessionStoreError {
        SessionStoreError::io(format!("{}: {error}", self.session_path().display()))
    }
}

impl SessionStore for FileSessionStore {
    fn create_session(&self, session: &SessionRecord) -> Result<(), SessionStoreError> {
        Dir::create_ambient_dir_all(&self.dir, ambient_authority())
            .map_err(|error| self.io_error(&error))?;
        let dir = self.open_dir().map_err(|error| self.io_error(&error))?;

        let document = StoredSession {
            user: session.clone(),
            user_type: session.role,
        };
        let body = serde_json::to_vec_pretty(&document)
            .map_err(|error| SessionStoreError::io(format!("encode session: {error}")))?;
        write_atomic(&dir, SESSION_FILE_NAME, &body).map_err(|error| self.io_error(&error))?;

        debug!(path = %self.session_path().display(), "session written");
        Ok(())
    }

    fn current_session(&self) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.read_document()?.map(|document| document.user))
    }

    fn current_role(&self) -> Result<Option<SessionRole>, SessionStoreError> {
        Ok(self.read_document()?.map(|document| document.user_type))
    }

    fn clear_session(&self) -> Result<(), SessionStoreError> {
        let dir = match self.open_dir() {
            Ok(dir) => dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(self.io_error(&error)),
        };
        match dir.remove_file(SESSION_FILE_NAME) {
            Ok(()) => {
                debug!(path = %self.session_path().display(), "session cleared");
                Ok(())
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.io_error(&error)),
        }
    }
}
