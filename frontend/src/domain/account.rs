//! Account records fetched read-only from the account directory.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Directory-assigned account identifier.
///
/// Directories hand out either numeric or textual keys; both are kept in
/// their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verification state recorded against an account.
///
/// Only the literal `verified` (case-insensitive, trimmed) counts as
/// verified; every other value is kept verbatim as pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerifyStatus {
    Verified,
    Pending(String),
}

impl VerifyStatus {
    const VERIFIED: &'static str = "verified";

    /// Interpret a raw directory value.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case(Self::VERIFIED) {
            Self::Verified
        } else {
            Self::Pending(raw.to_owned())
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl From<String> for VerifyStatus {
    fn from(value: String) -> Self {
        Self::from_raw(&value)
    }
}

impl From<VerifyStatus> for String {
    fn from(value: VerifyStatus) -> Self {
        match value {
            VerifyStatus::Verified => VerifyStatus::VERIFIED.to_owned(),
            VerifyStatus::Pending(raw) => raw,
        }
    }
}

/// Account fetched from a role-specific directory table.
///
/// ## Invariants
/// - Never carries the account password; adapters strip it before building
///   the record.
/// - `attributes` holds every remaining directory column not modelled
///   explicitly, so sessions can preserve them.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    email: String,
    name: String,
    verify: VerifyStatus,
    attributes: Map<String, Value>,
}

impl Account {
    /// Build an account from its parts.
    pub fn new(
        id: AccountId,
        email: impl Into<String>,
        name: impl Into<String>,
        verify: VerifyStatus,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            verify,
            attributes: Map::new(),
        }
    }

    /// Attach extra directory columns.
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn verify(&self) -> &VerifyStatus {
        &self.verify
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Break the record into owned parts.
    pub fn into_parts(self) -> (AccountId, String, String, VerifyStatus, Map<String, Value>) {
        (self.id, self.email, self.name, self.verify, self.attributes)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("verified", true)]
    #[case(" Verified ", true)]
    #[case("unverified", false)]
    #[case("pending", false)]
    #[case("", false)]
    fn only_verified_literal_counts(#[case] raw: &str, #[case] verified: bool) {
        assert_eq!(VerifyStatus::from_raw(raw).is_verified(), verified);
    }

    #[rstest]
    fn pending_status_keeps_raw_value() {
        let status: VerifyStatus =
            serde_json::from_value(serde_json::json!("awaiting_docs")).expect("string status");
        assert_eq!(status, VerifyStatus::Pending("awaiting_docs".to_owned()));
        assert_eq!(
            serde_json::to_value(&status).expect("serialise"),
            serde_json::json!("awaiting_docs")
        );
    }
}
