//! Composition root: turns settings into adapters and a ready login flow.

mod config;

use std::sync::Arc;

use reqwest::Url;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{AdminAuthenticator, DisabledAdminAuthenticator, SessionStore};
use crate::domain::{LoginFlow, LoginFlowPorts, LoginFlowRuntime};
use crate::outbound::admin::SentinelAdminAuthenticator;
use crate::outbound::directory::RestAccountDirectory;
use crate::outbound::navigation::TracingNavigator;
use crate::outbound::session::FileSessionStore;

pub use config::LoginSettings;

/// Errors raised while wiring the login flow.
#[derive(Debug, Error)]
pub enum WiringError {
    /// No directory base URL configured.
    #[error("MADDAD_DIRECTORY_URL must be set to sign in")]
    MissingDirectoryUrl,
    /// No directory API key configured.
    #[error("MADDAD_DIRECTORY_API_KEY must be set to sign in")]
    MissingApiKey,
    /// The configured base URL does not parse.
    #[error("invalid directory URL `{url}`: {source}")]
    InvalidDirectoryUrl {
        /// Value as configured.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build directory HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Session store selected by `settings`.
pub fn session_store(settings: &LoginSettings) -> Arc<dyn SessionStore> {
    Arc::new(FileSessionStore::new(settings.session_dir()))
}

/// Admin authenticator selected by `settings`.
pub fn admin_authenticator(settings: &LoginSettings) -> Arc<dyn AdminAuthenticator> {
    match SentinelAdminAuthenticator::from_config(
        settings.admin_email.as_deref(),
        settings.admin_password.as_deref(),
    ) {
        Some(sentinel) => {
            info!("sentinel administrator sign-in enabled");
            Arc::new(sentinel)
        }
        None => Arc::new(DisabledAdminAuthenticator),
    }
}

/// Build a login flow backed by the REST directory and the file store.
pub fn build_login_flow(
    settings: &LoginSettings,
    sessions: Arc<dyn SessionStore>,
) -> Result<LoginFlow, WiringError> {
    let raw_url = settings
        .directory_url
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or(WiringError::MissingDirectoryUrl)?;
    let base_url = Url::parse(raw_url).map_err(|source| WiringError::InvalidDirectoryUrl {
        url: raw_url.to_owned(),
        source,
    })?;
    let api_key = settings
        .directory_api_key
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(WiringError::MissingApiKey)?;

    let directory = RestAccountDirectory::new(base_url, api_key, settings.directory_timeout())?;
    let ports = LoginFlowPorts {
        directory: Arc::new(directory),
        admin: admin_authenticator(settings),
        sessions,
        navigator: Arc::new(TracingNavigator),
    };
    let runtime = LoginFlowRuntime {
        navigation_delay: settings.navigation_delay(),
        ..LoginFlowRuntime::default()
    };
    Ok(LoginFlow::new(ports, runtime))
}
