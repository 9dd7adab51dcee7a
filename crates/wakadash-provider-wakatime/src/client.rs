//! WakaTime summaries client
//!
//! Issues a single authenticated GET against the summaries endpoint for a
//! date window and reduces the response to its `data` records.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use wakadash_core::error::{DashError, Result};
use wakadash_core::records::{DateWindow, SummaryRecord};
use wakadash_core::source::{ActivitySource, USER_AGENT, read_json};

/// Summaries endpoint for the authenticated user
pub const WAKATIME_SUMMARIES_URL: &str = "https://wakatime.com/api/v1/users/current/summaries";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "WAKATIME_API_KEY";

/// How the API key is placed in the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Basic <key>`
    Raw,
    /// `Basic base64("<key>:")`
    #[default]
    Base64,
}

impl AuthScheme {
    /// Header value for `credential`
    ///
    /// # Examples
    /// ```
    /// use wakadash_provider_wakatime::AuthScheme;
    ///
    /// assert_eq!(AuthScheme::Raw.header_value("waka_123"), "Basic waka_123");
    /// assert_eq!(AuthScheme::Base64.header_value("key"), "Basic a2V5Og==");
    /// ```
    pub fn header_value(&self, credential: &str) -> String {
        match self {
            Self::Raw => format!("Basic {credential}"),
            Self::Base64 => {
                let token = general_purpose::STANDARD.encode(format!("{credential}:"));
                format!("Basic {token}")
            }
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "base64" => Ok(Self::Base64),
            _ => Err(format!("Invalid auth scheme: {s}")),
        }
    }
}

/// Validate the credential taken from the environment
///
/// An unset or blank key is a configuration error, reported before any
/// request is attempted.
pub fn resolve_credential(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(DashError::missing_env(API_KEY_ENV)),
    }
}

/// Reduce a response body to its interval records
///
/// `data` may be the record array itself (summaries endpoint) or an object
/// with a `summaries` array (stats endpoint). Anything else yields no
/// records. Entries that do not deserialize are kept as empty records so
/// the aggregator counts them as skipped.
pub fn extract_records(body: &Value) -> Vec<SummaryRecord> {
    let items: &[Value] = match body.get("data") {
        Some(Value::Array(items)) => items,
        Some(Value::Object(obj)) => match obj.get("summaries") {
            Some(Value::Array(items)) => items,
            _ => &[],
        },
        _ => {
            debug!("Response has no usable data field, treating as empty");
            &[]
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item.clone()).unwrap_or_else(|e| {
                debug!("Record {} does not match the summary shape: {}", index, e);
                SummaryRecord::default()
            })
        })
        .collect()
}

/// Client for the WakaTime summaries API
pub struct WakaTimeClient {
    client: reqwest::Client,
    credential: String,
    auth: AuthScheme,
    base_url: String,
}

impl WakaTimeClient {
    /// Create a client for `base_url`
    pub fn new(
        credential: impl Into<String>,
        auth: AuthScheme,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            credential: credential.into(),
            auth,
            base_url: base_url.into(),
        })
    }

    /// Build the GET request for `window` without sending it
    pub fn request(&self, window: &DateWindow) -> Result<reqwest::Request> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            DashError::Config(format!("Invalid WakaTime URL '{}': {e}", self.base_url))
        })?;
        url.query_pairs_mut()
            .append_pair("start", &window.start.format("%Y-%m-%d").to_string())
            .append_pair("end", &window.end.format("%Y-%m-%d").to_string());

        let mut auth = HeaderValue::from_str(&self.auth.header_value(&self.credential))
            .map_err(|_| DashError::Config(format!("{API_KEY_ENV} contains invalid characters")))?;
        auth.set_sensitive(true);

        Ok(self.client.get(url).header(AUTHORIZATION, auth).build()?)
    }
}

#[async_trait]
impl ActivitySource for WakaTimeClient {
    type Record = SummaryRecord;

    fn name(&self) -> &'static str {
        "wakatime"
    }

    async fn fetch(&self, window: &DateWindow) -> Result<Vec<SummaryRecord>> {
        let request = self.request(window)?;
        info!(
            "Fetching WakaTime summaries {} to {} ({} auth)",
            window.start, window.end, self.auth
        );

        let response = self.client.execute(request).await?;
        let body = read_json(response).await?;
        let records = extract_records(&body);

        info!("Received {} summary records", records.len());
        Ok(records)
    }
}
