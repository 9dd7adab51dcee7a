//! Common test utilities and helpers for wakadash tests
//!
//! Record builders, an environment guard, and a one-shot HTTP server that
//! answers a single request with a canned response.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::env;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// RAII guard that restores environment variables when dropped
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        unsafe {
            env::set_var(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

/// Monday 2024-03-04 00:00 UTC
pub fn week_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
}

/// One summary record shaped like the API's
pub fn summary_json(start: DateTime<Utc>, seconds: f64) -> Value {
    json!({
        "range": {
            "start": start.to_rfc3339(),
            "end": (start + Duration::hours(1)).to_rfc3339()
        },
        "grand_total": {"total_seconds": seconds, "text": "ignored"}
    })
}

/// A week of records, one per day at 09:15 UTC, with `minutes[i]` on day `i`
pub fn week_body(minutes: [u64; 7]) -> Value {
    let data: Vec<Value> = minutes
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let start = week_start() + Duration::days(i as i64) + Duration::minutes(9 * 60 + 15);
            summary_json(start, (*m * 60) as f64)
        })
        .collect();
    json!({"data": data})
}

/// A public push event carrying `commits` commits
pub fn push_event(created_at: DateTime<Utc>, commits: usize) -> Value {
    let list: Vec<Value> = (0..commits)
        .map(|i| json!({"sha": format!("{i:040}"), "message": "change"}))
        .collect();
    json!({
        "type": "PushEvent",
        "created_at": created_at.to_rfc3339(),
        "payload": {"commits": list}
    })
}

/// Serve exactly one HTTP response
///
/// Returns the base URL and a handle that yields the raw request head.
pub async fn serve_once(status: &str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}"), handle)
}
