//! Session store outbound adapters.

mod atomic_write;
mod file_store;

pub use file_store::{FileSessionStore, SESSION_FILE_NAME};
