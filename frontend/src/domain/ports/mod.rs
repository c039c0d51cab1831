//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_directory;
mod admin_authenticator;
mod flow_sleeper;
mod navigator;
mod session_store;

#[cfg(test)]
pub use account_directory::MockAccountDirectory;
pub use account_directory::{AccountDirectory, AccountDirectoryError};
#[cfg(test)]
pub use admin_authenticator::MockAdminAuthenticator;
pub use admin_authenticator::{AdminAuthenticator, AdminIdentity, DisabledAdminAuthenticator};
pub use flow_sleeper::{FlowSleeper, TokioSleeper};
pub use navigator::{Destination, NavigationRequest, Navigator, RecordingNavigator};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{MemorySessionStore, SessionStore, SessionStoreError};
