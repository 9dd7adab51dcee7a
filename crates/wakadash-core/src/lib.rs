//! Core types, traits, and utilities for wakadash
//!
//! This crate provides the error type, display timezone configuration,
//! closed bucket keys, the zero-initialized [`BucketSet`], wire records,
//! the [`Aggregator`], and the [`ActivitySource`] trait implemented by
//! the provider crates.

pub mod aggregation;
pub mod buckets;
pub mod error;
pub mod records;
pub mod source;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use aggregation::{ActivityBuckets, Aggregator};
pub use buckets::BucketSet;
pub use error::{DashError, Result};
pub use records::{DateWindow, GitHubEvent, SummaryRecord};
pub use source::ActivitySource;
pub use timezone::TimezoneConfig;
pub use types::{BucketKey, DayOfWeek, DayPhase};
