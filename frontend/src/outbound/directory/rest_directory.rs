//! Reqwest-backed account directory adapter.
//!
//! This adapter owns transport details only: URL construction, auth headers,
//! timeout and HTTP error mapping, and JSON decoding into domain accounts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::AccountRowDto;
use crate::domain::ports::{AccountDirectory, AccountDirectoryError};
use crate::domain::{Account, LoginCredentials, PortalRole};

const DEFAULT_USER_AGENT: &str = "maddad-login/0.1";
/// One more than the expected match count so ambiguity stays visible.
const LOOKUP_ROW_LIMIT: &str = "2";

/// Directory adapter that queries a PostgREST endpoint.
pub struct RestAccountDirectory {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl RestAccountDirectory {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl AccountDirectory for RestAccountDirectory {
    async fn find_accounts(
        &self,
        role: PortalRole,
        credentials: &LoginCredentials,
    ) -> Result<Vec<Account>, AccountDirectoryError> {
        let url = lookup_url(&self.base_url, role.directory_table(), credentials)?;
        debug!(table = role.directory_table(), "querying account directory");

        let response = self
            .client
            .get(url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_accounts(body.as_ref())
    }
}

fn lookup_url(
    base_url: &Url,
    table: &str,
    credentials: &LoginCredentials,
) -> Result<Url, AccountDirectoryError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| AccountDirectoryError::query(format!("base URL {base_url} has no path")))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    url.query_pairs_mut()
        .append_pair("select", "*")
        .append_pair("email", &format!("eq.{}", credentials.email()))
        .append_pair("password", &format!("eq.{}", credentials.password()))
        .append_pair("limit", LOOKUP_ROW_LIMIT);
    Ok(url)
}

fn parse_accounts(body: &[u8]) -> Result<Vec<Account>, AccountDirectoryError> {
    let rows: Vec<AccountRowDto> = serde_json::from_slice(body).map_err(|error| {
        AccountDirectoryError::decode(format!("invalid directory JSON payload: {error}"))
    })?;
    Ok(rows
        .into_iter()
        .map(AccountRowDto::into_domain_account)
        .collect())
}

// Request URLs carry credentials, so they are stripped before formatting.
fn map_transport_error(error: reqwest::Error) -> AccountDirectoryError {
    let error = error.without_url();
    if error.is_timeout() {
        AccountDirectoryError::timeout(error.to_string())
    } else {
        AccountDirectoryError::connection(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AccountDirectoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            AccountDirectoryError::timeout(message)
        }
        _ if status.is_client_error() => AccountDirectoryError::query(message),
        _ => AccountDirectoryError::connection(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
