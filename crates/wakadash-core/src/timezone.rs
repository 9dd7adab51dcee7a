//! Display timezone handling
//!
//! Interval timestamps arrive with whatever offset the remote service
//! reported. Bucketing happens on the civil date and hour in a single
//! configured display timezone, which is either an IANA zone or a fixed
//! UTC offset such as `+05:30`.

use crate::error::{DashError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Offset used when no timezone is configured (UTC+05:30)
pub const DEFAULT_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// A timezone the dashboard is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// IANA timezone from the tz database
    Named(Tz),
    /// Fixed offset east of UTC
    Fixed(FixedOffset),
}

/// Configuration for timezone handling
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The zone local dates and hours are computed in
    pub zone: DisplayZone,
    /// Whether the zone is equivalent to UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(DEFAULT_OFFSET_SECONDS).unwrap_or(Utc.fix());
        Self::fixed(offset)
    }
}

impl TimezoneConfig {
    /// Create a configuration for a fixed UTC offset
    pub fn fixed(offset: FixedOffset) -> Self {
        Self {
            zone: DisplayZone::Fixed(offset),
            is_utc: offset.local_minus_utc() == 0,
        }
    }

    /// Create a configuration for an IANA timezone
    pub fn named(tz: Tz) -> Self {
        Self {
            zone: DisplayZone::Named(tz),
            is_utc: tz == Tz::UTC,
        }
    }

    /// Create a new timezone configuration from CLI arguments
    ///
    /// `timezone_str` accepts an IANA name (`Asia/Kolkata`), the word
    /// `local`, or a fixed offset (`+05:30`, `UTC-3`, `+0530`).
    pub fn from_cli(timezone_str: Option<&str>, use_utc: bool) -> Result<Self> {
        if use_utc {
            return Ok(Self::named(Tz::UTC));
        }

        match timezone_str {
            None => Ok(Self::default()),
            Some(s) if s.eq_ignore_ascii_case("local") => Ok(Self::named(get_local_timezone())),
            Some(s) => {
                if let Some(offset) = parse_fixed_offset(s) {
                    return Ok(Self::fixed(offset));
                }
                let tz = Tz::from_str(s).map_err(|_| {
                    DashError::InvalidTimezone(format!(
                        "'{s}'. Use a name like 'Asia/Kolkata', 'UTC', or an offset like '+05:30'"
                    ))
                })?;
                Ok(Self::named(tz))
            }
        }
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> String {
        if self.is_utc {
            return "UTC".to_string();
        }
        match self.zone {
            DisplayZone::Named(tz) => tz.name().to_string(),
            DisplayZone::Fixed(offset) => {
                let secs = offset.local_minus_utc();
                let sign = if secs < 0 { '-' } else { '+' };
                let abs = secs.abs();
                format!("UTC{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
            }
        }
    }

    /// Convert an instant into the civil date and time of the display zone
    pub fn to_local<Z: TimeZone>(&self, dt: &DateTime<Z>) -> NaiveDateTime {
        match self.zone {
            DisplayZone::Named(tz) => dt.with_timezone(&tz).naive_local(),
            DisplayZone::Fixed(offset) => dt.with_timezone(&offset).naive_local(),
        }
    }
}

/// Parse a fixed UTC offset such as `+05:30`, `-0800`, `UTC+5:30` or `GMT-3`
///
/// Returns `None` for anything that is not an explicit signed offset, so
/// `UTC` on its own falls through to the IANA lookup.
pub fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let upper = s.trim().to_ascii_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);

    let sign = match rest.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let body = &rest[1..];
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None if body.len() == 4 => (body[..2].parse().ok()?, body[2..].parse().ok()?),
        None => (body.parse::<i32>().ok()?, 0),
    };

    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Detect the system's local timezone
///
/// Checks `TZ` first, then asks the OS through `iana-time-zone`.
/// Falls back to UTC when neither yields a known zone.
pub fn get_local_timezone() -> Tz {
    #[allow(clippy::collapsible_if)]
    if let Ok(tz_str) = std::env::var("TZ") {
        if let Ok(tz) = Tz::from_str(&tz_str) {
            debug!("Using timezone from TZ environment variable: {}", tz_str);
            return tz;
        }
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone from iana-time-zone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!(
                    "Could not parse timezone from iana-time-zone: '{}', falling back to UTC",
                    tz_str
                );
                Tz::UTC
            }
        },
        Err(e) => {
            debug!(
                "Could not detect local timezone via iana-time-zone: {:?}, falling back to UTC",
                e
            );
            Tz::UTC
        }
    }
}
