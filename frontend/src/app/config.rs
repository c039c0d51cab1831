//! Login settings loaded via OrthoConfig.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DIRECTORY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NAVIGATION_DELAY_MS: u64 = 500;
const DEFAULT_SESSION_DIR: &str = ".maddad";

/// Configuration values for the login binary (`MADDAD_*`).
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MADDAD")]
pub struct LoginSettings {
    /// Base URL of the account directory.
    pub directory_url: Option<String>,
    /// API key sent as `apikey` and bearer token.
    pub directory_api_key: Option<String>,
    /// Request timeout for directory lookups.
    pub directory_timeout_secs: Option<u64>,
    /// Directory holding the session document.
    pub session_dir: Option<PathBuf>,
    /// Delay between sign-in and navigation.
    pub navigation_delay_ms: Option<u64>,
    /// Sentinel administrator email; enables the bypass with `admin_password`.
    pub admin_email: Option<String>,
    /// Sentinel administrator password.
    pub admin_password: Option<String>,
}

impl LoginSettings {
    /// Return the configured directory timeout, falling back to the default.
    pub fn directory_timeout(&self) -> Duration {
        Duration::from_secs(
            self.directory_timeout_secs
                .unwrap_or(DEFAULT_DIRECTORY_TIMEOUT_SECS),
        )
    }

    /// Return the configured session directory, falling back to the default.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR))
    }

    /// Return the configured navigation delay, falling back to the default.
    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(
            self.navigation_delay_ms
                .unwrap_or(DEFAULT_NAVIGATION_DELAY_MS),
        )
    }
}

impl fmt::Debug for LoginSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("LoginSettings")
            .field("directory_url", &self.directory_url)
            .field("directory_api_key", &redacted(&self.directory_api_key))
            .field("directory_timeout_secs", &self.directory_timeout_secs)
            .field("session_dir", &self.session_dir)
            .field("navigation_delay_ms", &self.navigation_delay_ms)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &redacted(&self.admin_password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for login settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 7] = [
        "MADDAD_DIRECTORY_URL",
        "MADDAD_DIRECTORY_API_KEY",
        "MADDAD_DIRECTORY_TIMEOUT_SECS",
        "MADDAD_SESSION_DIR",
        "MADDAD_NAVIGATION_DELAY_MS",
        "MADDAD_ADMIN_EMAIL",
        "MADDAD_ADMIN_PASSWORD",
    ];

    fn load_from_empty_args() -> LoginSettings {
        LoginSettings::load_from_iter([OsString::from("maddad-login")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.directory_url.is_none());
        assert_eq!(settings.directory_timeout(), Duration::from_secs(10));
        assert_eq!(settings.session_dir(), PathBuf::from(".maddad"));
        assert_eq!(settings.navigation_delay(), Duration::from_millis(500));
        assert!(settings.admin_email.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let values = [
            Some("https://db.example.test".to_owned()),
            Some("anon-key".to_owned()),
            Some("3".to_owned()),
            Some("/tmp/maddad-sessions".to_owned()),
            Some("0".to_owned()),
            Some("root@maddad.pk".to_owned()),
            Some("hunter2".to_owned()),
        ];
        let _guard = lock_env(KEYS.into_iter().zip(values));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.directory_url.as_deref(),
            Some("https://db.example.test")
        );
        assert_eq!(settings.directory_timeout(), Duration::from_secs(3));
        assert_eq!(
            settings.session_dir(),
            PathBuf::from("/tmp/maddad-sessions")
        );
        assert_eq!(settings.navigation_delay(), Duration::ZERO);
        assert_eq!(settings.admin_email.as_deref(), Some("root@maddad.pk"));
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let _guard = lock_env([
            ("MADDAD_DIRECTORY_API_KEY", Some("anon-key".to_owned())),
            ("MADDAD_ADMIN_PASSWORD", Some("hunter2".to_owned())),
        ]);

        let rendered = format!("{:?}", load_from_empty_args());
        assert!(!rendered.contains("anon-key"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
