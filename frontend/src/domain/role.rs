//! Portal roles and the directory tables they resolve to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role a visitor may pick on the login form.
///
/// Administrators are deliberately absent: that role is only reachable
/// through the privileged authenticator, never selected directly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalRole {
    /// Someone requesting assistance.
    #[default]
    Receiver,
    /// Someone offering donations.
    Donor,
}

impl PortalRole {
    /// Directory table holding accounts for this role.
    pub const fn directory_table(self) -> &'static str {
        match self {
            Self::Receiver => "receivers",
            Self::Donor => "donors",
        }
    }

    /// Stable lowercase tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::Donor => "donor",
        }
    }

    /// The other selectable role.
    pub const fn other(self) -> Self {
        match self {
            Self::Receiver => Self::Donor,
            Self::Donor => Self::Receiver,
        }
    }
}

impl fmt::Display for PortalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`; expected receiver or donor")]
pub struct UnknownRoleError(pub String);

impl FromStr for PortalRole {
    type Err = UnknownRoleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "receiver" => Ok(Self::Receiver),
            "donor" => Ok(Self::Donor),
            _ => Err(UnknownRoleError(raw.to_owned())),
        }
    }
}

/// Role tag persisted alongside a session (`userType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Receiver,
    Donor,
    Admin,
}

impl SessionRole {
    /// Stable lowercase tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::Donor => "donor",
            Self::Admin => "admin",
        }
    }
}

impl From<PortalRole> for SessionRole {
    fn from(value: PortalRole) -> Self {
        match value {
            PortalRole::Receiver => Self::Receiver,
            PortalRole::Donor => Self::Donor,
        }
    }
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
