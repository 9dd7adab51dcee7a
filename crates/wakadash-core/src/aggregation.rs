//! Aggregation of interval records into weekday and phase-of-day buckets
//!
//! Each valid record contributes its whole minutes to exactly one weekday
//! bucket and exactly one phase bucket, chosen from the record's start time
//! converted into the display timezone. Both bucket sets therefore always
//! hold the same total.
//!
//! Malformed records are skipped and counted; they never abort a run.
//!
//! # Examples
//!
//! ```
//! use wakadash_core::aggregation::Aggregator;
//! use wakadash_core::records::SummaryRecord;
//! use wakadash_core::timezone::TimezoneConfig;
//! use wakadash_core::types::{DayOfWeek, DayPhase};
//!
//! let aggregator = Aggregator::new(TimezoneConfig::default());
//! let records = vec![SummaryRecord::new("2024-03-04T09:15:00Z", 3600.0)];
//!
//! let buckets = aggregator.aggregate(&records);
//! assert_eq!(buckets.weekdays.get(DayOfWeek::Monday), 60);
//! assert_eq!(buckets.phases.get(DayPhase::Daytime), 60);
//! ```

use crate::buckets::BucketSet;
use crate::records::{ActivitySummary, GitHubEvent, SummaryRecord};
use crate::timezone::TimezoneConfig;
use crate::types::{DayOfWeek, DayPhase};
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::Serialize;
use tracing::debug;

/// Minutes of activity bucketed two ways
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityBuckets {
    /// Minutes per local weekday
    pub weekdays: BucketSet<DayOfWeek>,
    /// Minutes per local phase of day
    pub phases: BucketSet<DayPhase>,
    /// Records that contributed to the buckets
    pub records_used: usize,
    /// Records skipped for missing or malformed fields
    pub records_skipped: usize,
}

impl ActivityBuckets {
    /// Total minutes across all valid records
    pub fn total_minutes(&self) -> u64 {
        self.weekdays.total()
    }
}

/// Buckets interval records in a configured display timezone
pub struct Aggregator {
    tz_config: TimezoneConfig,
}

impl Aggregator {
    pub fn new(tz_config: TimezoneConfig) -> Self {
        Self { tz_config }
    }

    /// Local weekday and phase for an instant
    pub fn classify<Z: TimeZone>(&self, at: &DateTime<Z>) -> (DayOfWeek, DayPhase) {
        let local = self.tz_config.to_local(at);
        (
            DayOfWeek::from(local.weekday()),
            DayPhase::from_hour(local.hour()),
        )
    }

    /// Aggregate a sequence of raw summary records
    pub fn aggregate<'a, I>(&self, records: I) -> ActivityBuckets
    where
        I: IntoIterator<Item = &'a SummaryRecord>,
    {
        let mut buckets = ActivityBuckets::default();

        for (index, record) in records.into_iter().enumerate() {
            match ActivitySummary::try_from(record) {
                Ok(summary) => self.add_summary(&mut buckets, &summary),
                Err(defect) => {
                    debug!("Skipping record {}: {}", index, defect);
                    buckets.records_skipped += 1;
                }
            }
        }

        debug!(
            "Aggregated {} records ({} skipped), {} minutes total",
            buckets.records_used,
            buckets.records_skipped,
            buckets.total_minutes()
        );
        buckets
    }

    /// Add one validated interval to both bucket sets
    pub fn add_summary(&self, buckets: &mut ActivityBuckets, summary: &ActivitySummary) {
        let (day, phase) = self.classify(&summary.start);
        let minutes = summary.minutes();
        buckets.weekdays.add(day, minutes);
        buckets.phases.add(phase, minutes);
        buckets.records_used += 1;
    }

    /// Count push-event commits per local weekday
    ///
    /// Events of any other type are ignored, as are push events whose
    /// timestamp cannot be parsed.
    pub fn aggregate_commits<'a, I>(&self, events: I) -> BucketSet<DayOfWeek>
    where
        I: IntoIterator<Item = &'a GitHubEvent>,
    {
        let mut weekdays = BucketSet::new();

        for event in events.into_iter().filter(|e| e.is_push()) {
            let Some(created) = event.created_at() else {
                debug!("Skipping push event without a valid created_at");
                continue;
            };
            let (day, _) = self.classify(&created);
            weekdays.add(day, event.commit_count());
        }

        weekdays
    }
}
