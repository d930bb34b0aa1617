//! Roblox Users API Client
//!
//! Public username lookup. One POST per lookup, no retries, no timeout:
//! whatever the endpoint says is turned into a [`LookupResult`] for display.
//!
//! API: POST https://users.roblox.com/v1/usernames/users
//! Body: {"usernames": ["name"], "excludeBannedUsers": false}
//! Free, no API key required, rate limited and not CORS-enabled for browsers

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::LookupResult;
use crate::utils::constants::{
    lookup_status_message, MSG_EMPTY_USERNAME, MSG_LOOKUP_NOT_FOUND, MSG_PROXY_HINT,
    USERS_BY_NAME_URL, USER_AGENT as USER_AGENT_CONST,
};

/// Request body for the users-by-name endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernamesRequest<'a> {
    pub usernames: [&'a str; 1],
    pub exclude_banned_users: bool,
}

/// Response body; records are passed through untouched
#[derive(Debug, Deserialize)]
pub struct UsernamesResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl UsernamesResponse {
    /// First record of `data`. A `data` that is not an array, or a first
    /// element that is null, false, zero or an empty string, counts as no user.
    pub fn into_first_record(self) -> Option<serde_json::Value> {
        match self.data? {
            serde_json::Value::Array(records) => records.into_iter().next().filter(is_present),
            _ => None,
        }
    }
}

fn is_present(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Users API client
#[derive(Debug, Clone)]
pub struct RobloxUsersClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RobloxUsersClient {
    /// Client for the public endpoint
    pub fn new() -> AppResult<Self> {
        Self::with_endpoint(USERS_BY_NAME_URL)
    }

    /// Client for any compatible endpoint (proxy, mock)
    pub fn with_endpoint(endpoint: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client: Self::build_client()?,
            endpoint: endpoint.into(),
        })
    }

    fn build_client() -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up a username and describe the outcome for the user.
    /// Never fails: every error becomes [`LookupResult::Failure`].
    pub async fn lookup(&self, username: &str) -> LookupResult {
        match self.fetch_user(username).await {
            Ok(record) => LookupResult::Success { record },
            Err(err) => {
                let message = match err.code {
                    ErrorCode::LookupHttpStatus
                    | ErrorCode::LookupTransport
                    | ErrorCode::LookupInvalidResponse => {
                        format!("{} {}", err.message, MSG_PROXY_HINT)
                    }
                    _ => err.message,
                };
                LookupResult::Failure {
                    code: err.code,
                    message,
                }
            }
        }
    }

    /// Fetch the first record for a username
    pub async fn fetch_user(&self, username: &str) -> AppResult<serde_json::Value> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::empty_username(MSG_EMPTY_USERNAME));
        }

        info!(username = %username, "🔍 Looking up username");

        let body = UsernamesRequest {
            usernames: [username],
            exclude_banned_users: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Lookup request failed");
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Lookup endpoint returned error status");
            return Err(AppError::lookup_status(lookup_status_message(status.as_u16())));
        }

        let parsed: UsernamesResponse = response.json().await?;

        match parsed.into_first_record() {
            Some(record) => {
                debug!(record = %record, "Lookup matched");
                Ok(record)
            }
            None => {
                info!(username = %username, "📭 No user found");
                Err(AppError::lookup_not_found(MSG_LOOKUP_NOT_FOUND))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = UsernamesRequest {
            usernames: ["builderman"],
            exclude_banned_users: false,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"usernames": ["builderman"], "excludeBannedUsers": false})
        );
    }

    fn first_record(body: &str) -> Option<serde_json::Value> {
        serde_json::from_str::<UsernamesResponse>(body)
            .unwrap()
            .into_first_record()
    }

    #[test]
    fn test_response_without_data() {
        assert_eq!(first_record("{}"), None);
        assert_eq!(first_record(r#"{"data": null}"#), None);
        assert_eq!(first_record(r#"{"data": []}"#), None);
    }

    #[test]
    fn test_empty_first_element_is_no_user() {
        for body in [
            r#"{"data": [null]}"#,
            r#"{"data": [false]}"#,
            r#"{"data": [0]}"#,
            r#"{"data": [""]}"#,
            r#"{"data": [null, {"id": 2}]}"#,
        ] {
            assert_eq!(first_record(body), None, "{}", body);
        }
    }

    #[test]
    fn test_non_array_data_is_no_user() {
        assert_eq!(first_record(r#"{"data": {}}"#), None);
        assert_eq!(first_record(r#"{"data": {"id": 1}}"#), None);
        assert_eq!(first_record(r#"{"data": "builderman"}"#), None);
    }

    #[test]
    fn test_first_record_kept_verbatim() {
        assert_eq!(
            first_record(r#"{"data": [{"id": 1, "name": "validname"}, {"id": 2}]}"#),
            Some(serde_json::json!({"id": 1, "name": "validname"}))
        );
        assert_eq!(first_record(r#"{"data": [[]]}"#), Some(serde_json::json!([])));
    }

    #[tokio::test]
    async fn test_blank_username_never_hits_network() {
        // Nothing listens on port 9; a real request would fail with a transport error
        let client = RobloxUsersClient::with_endpoint("http://127.0.0.1:9/users").unwrap();
        let result = client.lookup("   ").await;
        assert_eq!(
            result,
            LookupResult::Failure {
                code: ErrorCode::ValidationEmptyUsername,
                message: MSG_EMPTY_USERNAME.to_string(),
            }
        );
    }
}
