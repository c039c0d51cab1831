//! DTOs for decoding directory rows.
//!
//! Rows decode into these transport DTOs first, then map into domain
//! accounts in one pass. The password column never leaves this module.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Account, AccountId, VerifyStatus};

/// Columns dropped before a row becomes an [`Account`]. `role` and
/// `createdAt` are owned by the session record.
const STRIPPED_COLUMNS: [&str; 4] = ["password", "role", "createdAt", "userType"];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RowIdDto {
    Number(i64),
    Text(String),
}

impl RowIdDto {
    fn into_account_id(self) -> AccountId {
        match self {
            Self::Number(number) => AccountId::new(number.to_string()),
            Self::Text(text) => AccountId::new(text),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AccountRowDto {
    pub(super) id: RowIdDto,
    pub(super) email: String,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) verify: Option<String>,
    #[serde(flatten)]
    pub(super) columns: Map<String, Value>,
}

impl AccountRowDto {
    pub(super) fn into_domain_account(self) -> Account {
        let mut columns = self.columns;
        for column in STRIPPED_COLUMNS {
            columns.remove(column);
        }
        let name = self.name.unwrap_or_else(|| self.email.clone());
        let verify = VerifyStatus::from_raw(self.verify.as_deref().unwrap_or_default());
        Account::new(self.id.into_account_id(), self.email, name, verify).with_attributes(columns)
    }
}
