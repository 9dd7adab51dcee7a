//! Bar normalization and value labels
//!
//! A [`ScalePolicy`] turns a bucket value into a bar width, and a
//! [`LabelFormat`] turns it into the text printed beside the bar. Both are
//! picked once per dashboard and applied to every bucket in a set.

use std::fmt;
use std::str::FromStr;
use wakadash_core::buckets::{BucketSet, percentage};
use wakadash_core::types::BucketKey;

/// How bucket values map onto bar widths
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalePolicy {
    /// width = clamp(value / divisor, min_width, max_width)
    Fixed { divisor: f64, min_width: f64 },
    /// The largest bucket fills the track
    Relative,
    /// Width proportional to the bucket's share of the set total
    Share,
}

impl ScalePolicy {
    /// Width in pixels for `value`, given the set's max and total
    ///
    /// The result always lies in `0..=max_width`. Empty sets produce zero
    /// widths under the relative and share policies.
    pub fn width(&self, value: u64, max: u64, total: u64, max_width: f64) -> f64 {
        let raw = match *self {
            Self::Fixed { divisor, min_width } => {
                let scaled = if divisor > 0.0 {
                    value as f64 / divisor
                } else {
                    0.0
                };
                scaled.max(min_width)
            }
            Self::Relative => {
                if max == 0 {
                    0.0
                } else {
                    value as f64 / max as f64 * max_width
                }
            }
            Self::Share => percentage(value, total) / 100.0 * max_width,
        };
        raw.max(0.0).min(max_width)
    }
}

/// Name of a scale policy without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleKind {
    Fixed,
    Relative,
    #[default]
    Share,
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Relative => write!(f, "relative"),
            Self::Share => write!(f, "share"),
        }
    }
}

impl FromStr for ScaleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "relative" => Ok(Self::Relative),
            "share" => Ok(Self::Share),
            _ => Err(format!("Invalid scale policy: {s}")),
        }
    }
}

/// Text shown next to each bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// The bucket value as a plain number
    Raw,
    /// Share of the set total, one decimal place
    #[default]
    Percent,
    /// Minutes as `"Hh Mm"`
    Duration,
}

impl LabelFormat {
    pub fn display(&self, value: u64, total: u64) -> String {
        match self {
            Self::Raw => value.to_string(),
            Self::Percent => format!("{:.1}%", percentage(value, total)),
            Self::Duration => format_duration(value),
        }
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Percent => write!(f, "percent"),
            Self::Duration => write!(f, "duration"),
        }
    }
}

impl FromStr for LabelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "percent" | "percentage" => Ok(Self::Percent),
            "duration" => Ok(Self::Duration),
            _ => Err(format!("Invalid label format: {s}")),
        }
    }
}

/// Format minutes as hours and minutes
///
/// # Examples
/// ```
/// use wakadash_svg::scale::format_duration;
///
/// assert_eq!(format_duration(0), "0h 0m");
/// assert_eq!(format_duration(125), "2h 5m");
/// ```
pub fn format_duration(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: u64,
    pub width: f64,
    pub display: String,
}

/// Bars for every bucket of a set, in canonical order
pub fn build_bars<K: BucketKey>(
    set: &BucketSet<K>,
    policy: ScalePolicy,
    format: LabelFormat,
    max_width: f64,
) -> Vec<Bar> {
    let max = set.max();
    let total = set.total();
    set.iter()
        .map(|(key, value)| Bar {
            label: key.label(),
            value,
            width: policy.width(value, max, total, max_width),
            display: format.display(value, total),
        })
        .collect()
}
