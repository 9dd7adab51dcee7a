//! GitHub provider for wakadash
//!
//! Counts commits from a user's public push events.

pub mod client;

pub use client::{GITHUB_API_URL, GitHubClient, TOKEN_ENV, parse_events};
