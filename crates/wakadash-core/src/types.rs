//! Bucket key types for wakadash
//!
//! Every bucket set is keyed by a closed enumeration. The declaration
//! order of each enum is its canonical rendering order, and `Ord` is
//! derived from it so ordered maps iterate canonically.

use std::fmt;

/// A closed set of bucket labels with a canonical order
///
/// # Examples
/// ```
/// use wakadash_core::types::{BucketKey, DayPhase};
///
/// let labels: Vec<_> = DayPhase::ALL.iter().map(|p| p.label()).collect();
/// assert_eq!(labels, ["Morning", "Daytime", "Evening", "Night"]);
/// ```
pub trait BucketKey: Copy + Ord + fmt::Debug + 'static {
    /// Every key, in canonical order
    const ALL: &'static [Self];

    /// Human-readable label used in rendered output
    fn label(&self) -> &'static str;
}

/// Day of the week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl BucketKey for DayOfWeek {
    const ALL: &'static [Self] = &[
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase of the day a local hour falls into
///
/// The four phases partition the 24-hour clock:
///
/// | phase   | hours        |
/// |---------|--------------|
/// | Morning | 05:00–11:59  |
/// | Daytime | 12:00–16:59  |
/// | Evening | 17:00–20:59  |
/// | Night   | 21:00–04:59  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayPhase {
    Morning,
    Daytime,
    Evening,
    Night,
}

impl DayPhase {
    /// Classify an hour of the day (0–23)
    ///
    /// Hours outside 0–23 fall into `Night` along with the small hours,
    /// which keeps the function total.
    ///
    /// # Examples
    /// ```
    /// use wakadash_core::types::DayPhase;
    ///
    /// assert_eq!(DayPhase::from_hour(4), DayPhase::Night);
    /// assert_eq!(DayPhase::from_hour(5), DayPhase::Morning);
    /// assert_eq!(DayPhase::from_hour(12), DayPhase::Daytime);
    /// assert_eq!(DayPhase::from_hour(17), DayPhase::Evening);
    /// assert_eq!(DayPhase::from_hour(21), DayPhase::Night);
    /// ```
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Daytime,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }
}

impl BucketKey for DayPhase {
    const ALL: &'static [Self] = &[Self::Morning, Self::Daytime, Self::Evening, Self::Night];

    fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Daytime => "Daytime",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

impl fmt::Display for DayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
