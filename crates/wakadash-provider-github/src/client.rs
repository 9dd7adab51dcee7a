//! GitHub public events client
//!
//! Reads a user's public event feed so push-event commits can be counted
//! per weekday. The feed has no date parameters; GitHub only serves recent
//! events, so the requested window is informational.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use wakadash_core::error::{DashError, Result};
use wakadash_core::records::{DateWindow, GitHubEvent};
use wakadash_core::source::{ActivitySource, USER_AGENT, read_json};

/// Public REST API root
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Optional environment variable with a token for higher rate limits
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

const EVENTS_PER_PAGE: &str = "100";

/// Parse the events array, dropping entries that are not event objects
pub fn parse_events(body: &Value) -> Vec<GitHubEvent> {
    let Some(items) = body.as_array() else {
        debug!("Events response is not an array, treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Dropping malformed event: {}", e);
                None
            }
        })
        .collect()
}

/// Client for a user's public GitHub events
pub struct GitHubClient {
    client: reqwest::Client,
    username: String,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(
        username: impl Into<String>,
        token: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DashError::InvalidArgument(
                "GitHub username must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            username,
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: base_url.into(),
        })
    }

    /// Build the events request without sending it
    pub fn request(&self) -> Result<reqwest::Request> {
        let root = self.base_url.trim_end_matches('/');
        let mut url = reqwest::Url::parse(&format!(
            "{root}/users/{}/events/public",
            self.username.trim()
        ))
        .map_err(|e| DashError::Config(format!("Invalid GitHub URL '{root}': {e}")))?;
        url.query_pairs_mut().append_pair("per_page", EVENTS_PER_PAGE);

        let mut builder = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| {
                    DashError::Config(format!("{TOKEN_ENV} contains invalid characters"))
                })?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl ActivitySource for GitHubClient {
    type Record = GitHubEvent;

    fn name(&self) -> &'static str {
        "github"
    }

    async fn fetch(&self, window: &DateWindow) -> Result<Vec<GitHubEvent>> {
        let request = self.request()?;
        info!(
            "Fetching public events for {} (window {} to {})",
            self.username, window.start, window.end
        );

        let response = self.client.execute(request).await?;
        let body = read_json(response).await?;
        let events = parse_events(&body);

        info!(
            "Received {} events, {} pushes",
            events.len(),
            events.iter().filter(|e| e.is_push()).count()
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(token: Option<&str>) -> GitHubClient {
        GitHubClient::new(
            "octocat",
            token.map(str::to_string),
            GITHUB_API_URL,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_request_url_and_headers() {
        let request = client(None).request().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.github.com/users/octocat/events/public?per_page=100"
        );
        assert_eq!(
            request.headers().get(ACCEPT).unwrap(),
            "application/vnd.github+json"
        );
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_adds_bearer_auth() {
        let request = client(Some("ghp_abc")).request().unwrap();
        let auth = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer ghp_abc");
        assert!(auth.is_sensitive());

        let request = client(Some("  ")).request().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_empty_username_rejected() {
        let result = GitHubClient::new(" ", None, GITHUB_API_URL, Duration::from_secs(5));
        assert!(matches!(result, Err(DashError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_events() {
        let body = json!([
            {"type": "PushEvent", "created_at": "2024-03-04T10:00:00Z", "payload": {"commits": [{}]}},
            "not an event",
            {"type": "WatchEvent", "created_at": "2024-03-04T10:00:00Z"}
        ]);
        let events = parse_events(&body);
        assert_eq!(events.len(), 2);
        assert!(events[0].is_push());

        assert!(parse_events(&json!({"message": "Not Found"})).is_empty());
    }
}
