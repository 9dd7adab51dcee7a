//! Wire records returned by the activity sources
//!
//! Remote payloads are deserialized leniently: every field is optional so
//! that one bad interval never fails the whole response. Validation into
//! the strict [`ActivitySummary`] happens during aggregation, where a
//! defective record is skipped rather than treated as an error.

use crate::error::{DashError, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One per-interval entry as returned by the summaries endpoint
///
/// ```json
/// {"range": {"start": "2024-03-04T00:00:00Z"}, "grand_total": {"total_seconds": 3600.0}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(default)]
    pub range: Option<SummaryRange>,
    #[serde(default)]
    pub grand_total: Option<GrandTotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRange {
    /// Interval start, RFC 3339 with offset
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrandTotal {
    #[serde(default)]
    pub total_seconds: Option<f64>,
}

impl SummaryRecord {
    /// Build a well-formed record
    pub fn new(start: impl Into<String>, total_seconds: f64) -> Self {
        Self {
            range: Some(SummaryRange {
                start: Some(start.into()),
            }),
            grand_total: Some(GrandTotal {
                total_seconds: Some(total_seconds),
            }),
        }
    }
}

/// A validated interval of tracked activity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivitySummary {
    /// Interval start in the offset the service reported
    pub start: DateTime<FixedOffset>,
    /// Active seconds within the interval
    pub total_seconds: f64,
}

impl ActivitySummary {
    /// Whole minutes of activity, rounded down
    pub fn minutes(&self) -> u64 {
        (self.total_seconds / 60.0).floor() as u64
    }
}

/// Why a [`SummaryRecord`] could not be used
#[derive(Debug, Clone, PartialEq)]
pub enum RecordDefect {
    MissingStart,
    BadTimestamp(String),
    MissingDuration,
    InvalidDuration(f64),
}

impl fmt::Display for RecordDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "missing range.start"),
            Self::BadTimestamp(raw) => write!(f, "unparseable timestamp '{raw}'"),
            Self::MissingDuration => write!(f, "missing grand_total.total_seconds"),
            Self::InvalidDuration(secs) => write!(f, "invalid duration {secs}"),
        }
    }
}

impl TryFrom<&SummaryRecord> for ActivitySummary {
    type Error = RecordDefect;

    fn try_from(record: &SummaryRecord) -> std::result::Result<Self, Self::Error> {
        let raw_start = record
            .range
            .as_ref()
            .and_then(|r| r.start.as_deref())
            .ok_or(RecordDefect::MissingStart)?;
        let start = DateTime::parse_from_rfc3339(raw_start)
            .map_err(|_| RecordDefect::BadTimestamp(raw_start.to_string()))?;

        let total_seconds = record
            .grand_total
            .as_ref()
            .and_then(|g| g.total_seconds)
            .ok_or(RecordDefect::MissingDuration)?;
        if !total_seconds.is_finite() || total_seconds < 0.0 {
            return Err(RecordDefect::InvalidDuration(total_seconds));
        }

        Ok(Self {
            start,
            total_seconds,
        })
    }
}

/// One entry from the GitHub public events feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubEvent {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub payload: Option<PushPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub commits: Option<Vec<serde_json::Value>>,
}

impl GitHubEvent {
    pub fn is_push(&self) -> bool {
        self.kind.as_deref() == Some("PushEvent")
    }

    /// Number of commits carried by a push event
    pub fn commit_count(&self) -> u64 {
        self.payload
            .as_ref()
            .and_then(|p| p.commits.as_ref())
            .map_or(0, |c| c.len() as u64)
    }

    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

/// Inclusive range of calendar days requested from a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The `days` calendar days ending on `end`, inclusive
    ///
    /// Fails for an empty window or one that starts before the earliest
    /// representable date.
    ///
    /// # Examples
    /// ```
    /// use wakadash_core::records::DateWindow;
    /// use chrono::NaiveDate;
    ///
    /// let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    /// let window = DateWindow::trailing(end, 7).unwrap();
    /// assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    /// assert_eq!(window.days(), 7);
    /// ```
    pub fn trailing(end: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(DashError::InvalidArgument(
                "window must cover at least one day".to_string(),
            ));
        }
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| {
                DashError::InvalidArgument(format!(
                    "a {days}-day window ending {end} is out of range"
                ))
            })?;
        Ok(Self { start, end })
    }

    /// Number of calendar days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_record_converts() {
        let record = SummaryRecord::new("2024-03-04T09:15:00Z", 3659.9);
        let summary = ActivitySummary::try_from(&record).unwrap();
        assert_eq!(summary.minutes(), 60);
        assert_eq!(summary.start.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_record_defects() {
        let missing_total: SummaryRecord =
            serde_json::from_value(json!({"range": {"start": "2024-03-04T00:00:00Z"}})).unwrap();
        assert_eq!(
            ActivitySummary::try_from(&missing_total),
            Err(RecordDefect::MissingDuration)
        );

        let missing_start: SummaryRecord =
            serde_json::from_value(json!({"grand_total": {"total_seconds": 60}})).unwrap();
        assert_eq!(
            ActivitySummary::try_from(&missing_start),
            Err(RecordDefect::MissingStart)
        );

        let bad_ts = SummaryRecord::new("yesterday", 60.0);
        assert!(matches!(
            ActivitySummary::try_from(&bad_ts),
            Err(RecordDefect::BadTimestamp(_))
        ));

        let negative = SummaryRecord::new("2024-03-04T00:00:00Z", -5.0);
        assert_eq!(
            ActivitySummary::try_from(&negative),
            Err(RecordDefect::InvalidDuration(-5.0))
        );
    }

    #[test]
    fn test_record_ignores_unknown_fields() {
        let record: SummaryRecord = serde_json::from_value(json!({
            "range": {"start": "2024-03-04T00:00:00+05:30", "end": "2024-03-04T23:59:59+05:30", "timezone": "Asia/Kolkata"},
            "grand_total": {"total_seconds": 120.5, "text": "2 mins"},
            "languages": []
        }))
        .unwrap();
        let summary = ActivitySummary::try_from(&record).unwrap();
        assert_eq!(summary.minutes(), 2);
        assert_eq!(summary.start.offset().local_minus_utc(), 19800);
    }

    #[test]
    fn test_github_event_commit_count() {
        let event: GitHubEvent = serde_json::from_value(json!({
            "type": "PushEvent",
            "created_at": "2024-03-04T10:00:00Z",
            "payload": {"commits": [{"sha": "a"}, {"sha": "b"}]}
        }))
        .unwrap();
        assert!(event.is_push());
        assert_eq!(event.commit_count(), 2);
        assert!(event.created_at().is_some());

        let watch: GitHubEvent =
            serde_json::from_value(json!({"type": "WatchEvent", "payload": {"action": "started"}}))
                .unwrap();
        assert!(!watch.is_push());
        assert_eq!(watch.commit_count(), 0);
    }

    #[test]
    fn test_window_single_day() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let window = DateWindow::trailing(end, 1).unwrap();
        assert_eq!(window.start, end);
        assert_eq!(window.days(), 1);
    }

    #[test]
    fn test_window_rejects_zero_days() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(matches!(
            DateWindow::trailing(end, 0),
            Err(DashError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_window_out_of_date_range_is_error() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(matches!(
            DateWindow::trailing(end, 100_000_000),
            Err(DashError::InvalidArgument(_))
        ));
        assert!(matches!(
            DateWindow::trailing(NaiveDate::MIN, 2),
            Err(DashError::InvalidArgument(_))
        ));
    }
}
