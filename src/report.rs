//! Dashboard sections for each command
//!
//! Turns aggregated buckets into titled bar sections and renders them with a
//! footer timestamp in the display timezone.

use chrono::{DateTime, Utc};
use wakadash_core::aggregation::ActivityBuckets;
use wakadash_core::buckets::BucketSet;
use wakadash_core::timezone::TimezoneConfig;
use wakadash_core::types::DayOfWeek;
use wakadash_svg::dashboard::TRACK_WIDTH;
use wakadash_svg::{
    Dashboard, LabelFormat, ScaleKind, ScalePolicy, Section, build_bars, footer_timestamp,
};

pub const PHASES_TITLE: &str = "TIME OF DAY";
pub const WEEKDAYS_TITLE: &str = "WEEKDAYS";
pub const COMMITS_TITLE: &str = "COMMITS BY WEEKDAY";

/// Concrete scale policy for a CLI scale choice
///
/// `divisor` and `min_width` only matter for the fixed scale.
pub fn scale_policy(kind: ScaleKind, divisor: f64, min_width: f64) -> ScalePolicy {
    match kind {
        ScaleKind::Fixed => ScalePolicy::Fixed { divisor, min_width },
        ScaleKind::Relative => ScalePolicy::Relative,
        ScaleKind::Share => ScalePolicy::Share,
    }
}

/// Phase-of-day section followed by the weekday section
pub fn activity_sections(
    buckets: &ActivityBuckets,
    policy: ScalePolicy,
    label: LabelFormat,
) -> Vec<Section> {
    vec![
        Section::new(
            PHASES_TITLE,
            build_bars(&buckets.phases, policy, label, TRACK_WIDTH),
        ),
        Section::new(
            WEEKDAYS_TITLE,
            build_bars(&buckets.weekdays, policy, label, TRACK_WIDTH),
        ),
    ]
}

pub fn commit_sections(
    weekdays: &BucketSet<DayOfWeek>,
    policy: ScalePolicy,
    label: LabelFormat,
) -> Vec<Section> {
    vec![Section::new(
        COMMITS_TITLE,
        build_bars(weekdays, policy, label, TRACK_WIDTH),
    )]
}

/// Render sections with a footer for `now` in the display timezone
///
/// The clock is passed in so identical inputs produce identical documents.
pub fn render(sections: &[Section], tz_config: &TimezoneConfig, now: DateTime<Utc>) -> String {
    let generated_at = footer_timestamp(tz_config.to_local(&now), &tz_config.display_name());
    Dashboard.render(sections, &generated_at)
}
