//! Session records persisted after a successful sign-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Account, AccountId, PortalRole, SessionRole, VerifyStatus};

/// Proof-of-login read by the rest of the application to gate access.
///
/// ## Invariants
/// - `role` matches the directory table the account was fetched from, or
///   [`SessionRole::Admin`] for privileged sign-ins.
/// - Sessions are only created for verified accounts.
///
/// Serialised camelCase; unmodelled directory columns are flattened back
/// into the top-level object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub role: SessionRole,
    pub verify: VerifyStatus,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Fixed identity given to privileged sign-ins.
pub const ADMIN_ACCOUNT_ID: &str = "admin";
/// Display name given to privileged sign-ins.
pub const ADMIN_DISPLAY_NAME: &str = "Admin";

impl SessionRecord {
    /// Build a session for an account fetched under `role`.
    pub fn for_account(account: Account, role: PortalRole, created_at: DateTime<Utc>) -> Self {
        let (id, email, name, verify, attributes) = account.into_parts();
        Self {
            id,
            email,
            name,
            role: role.into(),
            verify,
            created_at,
            attributes,
        }
    }

    /// Build the synthetic session used for privileged sign-ins.
    pub fn admin(email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::new(ADMIN_ACCOUNT_ID),
            email: email.into(),
            name: ADMIN_DISPLAY_NAME.to_owned(),
            role: SessionRole::Admin,
            verify: VerifyStatus::Verified,
            created_at,
            attributes: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
            .single()
            .expect("valid fixture timestamp")
    }

    #[rstest]
    fn account_session_keeps_extra_columns(created_at: DateTime<Utc>) {
        let mut extra = Map::new();
        extra.insert("city".to_owned(), json!("Lahore"));
        let account = Account::new(
            AccountId::new("42"),
            "ada@example.org",
            "Ada",
            VerifyStatus::Verified,
        )
        .with_attributes(extra);

        let session = SessionRecord::for_account(account, PortalRole::Donor, created_at);
        let value = serde_json::to_value(&session).expect("serialise session");
        assert_eq!(
            value,
            json!({
                "id": "42",
                "email": "ada@example.org",
                "name": "Ada",
                "role": "donor",
                "verify": "verified",
                "createdAt": "2026-01-02T03:04:05Z",
                "city": "Lahore"
            })
        );
    }

    #[rstest]
    fn admin_session_is_verified(created_at: DateTime<Utc>) {
        let session = SessionRecord::admin("root@maddad.pk", created_at);
        assert_eq!(session.role, SessionRole::Admin);
        assert!(session.verify.is_verified());
        assert_eq!(session.id.as_ref(), ADMIN_ACCOUNT_ID);
    }

    #[rstest]
    fn session_deserialises_from_stored_json(created_at: DateTime<Utc>) {
        let stored = json!({
            "id": "7",
            "email": "r@example.org",
            "name": "R",
            "role": "receiver",
            "verify": "verified",
            "createdAt": "2026-01-02T03:04:05Z",
            "phone": "0300"
        });
        let session: SessionRecord = serde_json::from_value(stored).expect("stored session");
        assert_eq!(session.created_at, created_at);
        assert_eq!(session.attributes.get("phone"), Some(&json!("0300")));
    }
}
