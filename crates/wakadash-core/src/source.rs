//! Source trait for activity fetchers
//!
//! Each provider crate (WakaTime, GitHub) implements [`ActivitySource`] so
//! the binary can drive any of them through the same fetch step.

use crate::error::{DashError, Result};
use crate::records::DateWindow;
use async_trait::async_trait;
use tracing::debug;

/// Default per-request timeout applied by the provider clients
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("wakadash/", env!("CARGO_PKG_VERSION"));

/// Trait for remote activity sources
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Raw record type handed to the aggregator
    type Record: Send;

    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Perform the single request for `window` and return its records
    async fn fetch(&self, window: &DateWindow) -> Result<Vec<Self::Record>>;
}

/// Read a JSON body, turning any non-success status into [`DashError::Http`]
pub async fn read_json(response: reqwest::Response) -> Result<serde_json::Value> {
    let status = response.status();
    if !status.is_success() {
        let mut url = response.url().clone();
        url.set_query(None);
        return Err(DashError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    debug!("Received {} bytes", body.len());
    Ok(serde_json::from_str(&body)?)
}
