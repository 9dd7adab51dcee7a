//! Property-based tests for wakadash using proptest

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use proptest::prelude::*;
use wakadash_core::aggregation::Aggregator;
use wakadash_core::buckets::BucketSet;
use wakadash_core::records::{GrandTotal, SummaryRange, SummaryRecord};
use wakadash_core::timezone::TimezoneConfig;
use wakadash_core::types::{BucketKey, DayOfWeek, DayPhase};
use wakadash_svg::dashboard::TRACK_WIDTH;
use wakadash_svg::{LabelFormat, ScalePolicy, build_bars};

// Strategies for generating test data

prop_compose! {
    fn arb_start()(
        secs in 1577836800i64..1767225600i64, // 2020-01-01 to 2026-01-01
        offset_quarters in -48i32..=56,
    ) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(offset_quarters * 15 * 60).unwrap();
        Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset)
    }
}

prop_compose! {
    fn arb_record()(start in arb_start(), seconds in 0.0f64..86_400.0) -> SummaryRecord {
        SummaryRecord::new(start.to_rfc3339(), seconds)
    }
}

prop_compose! {
    fn arb_partial_record()(
        start in prop::option::of(prop::option::of(arb_start())),
        seconds in prop::option::of(prop::option::of(-100.0f64..86_400.0)),
    ) -> SummaryRecord {
        SummaryRecord {
            range: start.map(|s| SummaryRange { start: s.map(|d| d.to_rfc3339()) }),
            grand_total: seconds.map(|t| GrandTotal { total_seconds: t }),
        }
    }
}

fn arb_timezone() -> impl Strategy<Value = TimezoneConfig> {
    prop::sample::select(vec![
        "+05:30",
        "UTC",
        "-08:00",
        "Asia/Tokyo",
        "America/New_York",
        "Australia/Adelaide",
    ])
    .prop_map(|name| TimezoneConfig::from_cli(Some(name), false).unwrap())
}

fn arb_weekdays() -> impl Strategy<Value = BucketSet<DayOfWeek>> {
    prop::collection::vec(0u64..100_000, 7).prop_map(|values| {
        let mut set = BucketSet::new();
        for (day, value) in DayOfWeek::ALL.iter().zip(values) {
            set.add(*day, value);
        }
        set
    })
}

proptest! {
    #[test]
    fn prop_phase_partition_is_total(hour in 0u32..24) {
        let phase = DayPhase::from_hour(hour);
        let expected = match hour {
            5..=11 => DayPhase::Morning,
            12..=16 => DayPhase::Daytime,
            17..=20 => DayPhase::Evening,
            _ => DayPhase::Night,
        };
        prop_assert_eq!(phase, expected);
    }

    #[test]
    fn prop_minutes_conserved_across_bucket_sets(
        records in prop::collection::vec(arb_record(), 0..40),
        tz in arb_timezone(),
    ) {
        let buckets = Aggregator::new(tz).aggregate(&records);
        let expected: u64 = records
            .iter()
            .map(|r| (r.grand_total.as_ref().unwrap().total_seconds.unwrap() / 60.0).floor() as u64)
            .sum();

        prop_assert_eq!(buckets.weekdays.total(), expected);
        prop_assert_eq!(buckets.phases.total(), expected);
        prop_assert_eq!(buckets.records_used, records.len());
        prop_assert_eq!(buckets.records_skipped, 0);
    }

    #[test]
    fn prop_missing_fields_never_abort(
        records in prop::collection::vec(arb_partial_record(), 0..40),
    ) {
        let buckets = Aggregator::new(TimezoneConfig::default()).aggregate(&records);
        prop_assert_eq!(buckets.records_used + buckets.records_skipped, records.len());
        prop_assert_eq!(buckets.weekdays.total(), buckets.phases.total());
        prop_assert_eq!(buckets.weekdays.len(), 7);
        prop_assert_eq!(buckets.phases.len(), 4);
    }

    #[test]
    fn prop_record_without_duration_counts_as_absent(
        records in prop::collection::vec(arb_record(), 1..40),
        index in any::<prop::sample::Index>(),
        tz in arb_timezone(),
    ) {
        let i = index.index(records.len());
        let mut blanked = records.clone();
        blanked[i].grand_total = None;
        let mut removed = records.clone();
        removed.remove(i);

        let aggregator = Aggregator::new(tz);
        let with_blank = aggregator.aggregate(&blanked);
        let without = aggregator.aggregate(&removed);

        prop_assert_eq!(&with_blank.weekdays, &without.weekdays);
        prop_assert_eq!(&with_blank.phases, &without.phases);
        prop_assert_eq!(with_blank.records_used, without.records_used);
        prop_assert_eq!(with_blank.records_skipped, 1);
        prop_assert_eq!(without.records_skipped, 0);
    }

    #[test]
    fn prop_percentages_sum_to_hundred_or_zero(set in arb_weekdays()) {
        let percentages = set.percentages();
        let sum: f64 = percentages.iter().map(|(_, p)| p).sum();
        if set.total() == 0 {
            prop_assert!(percentages.iter().all(|(_, p)| *p == 0.0));
        } else {
            prop_assert!((sum - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_bar_widths_stay_on_track(
        set in arb_weekdays(),
        divisor in 0.01f64..1000.0,
        min_width in 0.0f64..10.0,
    ) {
        let policies = [
            ScalePolicy::Fixed { divisor, min_width },
            ScalePolicy::Relative,
            ScalePolicy::Share,
        ];
        for policy in policies {
            for bar in build_bars(&set, policy, LabelFormat::Raw, TRACK_WIDTH) {
                prop_assert!(bar.width >= 0.0 && bar.width <= TRACK_WIDTH);
            }
        }
    }

    #[test]
    fn prop_relative_scale_fills_largest_bucket(set in arb_weekdays()) {
        prop_assume!(set.max() > 0);
        let bars = build_bars(&set, ScalePolicy::Relative, LabelFormat::Raw, TRACK_WIDTH);
        let widest = bars.iter().map(|b| b.width).fold(0.0, f64::max);
        prop_assert!((widest - TRACK_WIDTH).abs() < 1e-9);
    }
}
