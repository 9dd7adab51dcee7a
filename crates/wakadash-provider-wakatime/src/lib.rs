//! WakaTime provider for wakadash
//!
//! Fetches per-day coding summaries from the WakaTime API.

pub mod client;

pub use client::{
    API_KEY_ENV, AuthScheme, WAKATIME_SUMMARIES_URL, WakaTimeClient, extract_records,
    resolve_credential,
};
