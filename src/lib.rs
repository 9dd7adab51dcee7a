//! wakadash - Render coding activity as SVG profile dashboards
//!
//! This library provides functionality to:
//! - Fetch per-day summaries from WakaTime, or public push events from GitHub
//! - Bucket activity by weekday and phase of day in a display timezone
//! - Render the buckets as a fixed-layout SVG bar dashboard
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use wakadash::report;
//! use wakadash_core::{Aggregator, SummaryRecord, TimezoneConfig};
//! use wakadash_svg::{LabelFormat, ScalePolicy};
//!
//! let tz = TimezoneConfig::default();
//! let records = vec![SummaryRecord::new("2024-03-04T09:15:00Z", 3600.0)];
//! let buckets = Aggregator::new(tz.clone()).aggregate(&records);
//!
//! let sections = report::activity_sections(&buckets, ScalePolicy::Share, LabelFormat::Percent);
//! let now = Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap();
//! let svg = report::render(&sections, &tz, now);
//! assert!(svg.contains("100.0%"));
//! ```

pub mod cli;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use wakadash_core::error::{DashError, Result};
pub use wakadash_core::timezone::TimezoneConfig;
