use crate::error::{Error, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use num::Integer;
use std::fmt::Display;

/// Slot spacing used by when2meet polls
pub const DEFAULT_SLOT_MINUTES: u32 = 15;

/// Uniform spacing between two consecutive slots of a poll.
/// Always a positive number of whole minutes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SlotLength(Duration);

impl SlotLength {
    /// Construct a slot length of `minutes`.
    /// Returns `None` for zero, since a window could never advance past its anchor.
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::time::SlotLength;
    ///
    /// assert_eq!(SlotLength::from_minutes(30).unwrap().seconds(), 1800);
    /// assert!(SlotLength::from_minutes(0).is_none());
    /// ```
    pub fn from_minutes(minutes: u32) -> Option<SlotLength> {
        if minutes == 0 {
            None
        } else {
            Some(SlotLength(Duration::minutes(minutes.into())))
        }
    }

    /// Number of seconds between two slots.
    /// This is the step used to find the next contiguous timestamp.
    pub fn seconds(self) -> i64 {
        self.0.num_seconds()
    }

    pub fn duration(self) -> Duration {
        self.0
    }

    /// The total duration of `count` consecutive slots
    pub fn times(self, count: i32) -> Duration {
        self.0 * count
    }
}

impl Default for SlotLength {
    fn default() -> Self {
        SlotLength(Duration::minutes(DEFAULT_SLOT_MINUTES.into()))
    }
}

/// Parses a `H:MM` duration.
/// Minutes are not limited to 59, `0:90` is an hour and a half.
///
/// # Examples
/// ```
/// use chrono::Duration;
/// use zeitfenster::time::parse_duration;
///
/// assert_eq!(parse_duration("1:30").unwrap(), Duration::minutes(90));
/// assert_eq!(parse_duration("0:90").unwrap(), Duration::minutes(90));
/// assert!(parse_duration("90").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = || Error::InvalidDuration(input.to_string());

    let (hours, minutes) = input.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    Ok(Duration::hours(hours.into()) + Duration::minutes(minutes.into()))
}

/// Formats a duration as `H:MM`, dropping any leftover seconds.
///
/// # Examples
/// ```
/// use chrono::Duration;
/// use zeitfenster::time::format_duration;
///
/// assert_eq!(format_duration(Duration::minutes(45)), "0:45");
/// assert_eq!(format_duration(Duration::minutes(135)), "2:15");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let (hours, minutes) = duration.num_minutes().div_rem(&60);
    format!("{}:{:02}", hours, minutes)
}

/// Converts a poll timestamp (seconds since the epoch) into an instant
pub fn instant(timestamp: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0).ok_or(Error::InvalidTimestamp(timestamp))
}

/// `ctime(3)` style rendering, e.g. `Mon Jun  2 09:00:00 2025`
pub fn ctime<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Discord timestamp markup which every reader sees in their own time zone
pub fn timestamp_marker<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    format!("<t:{}:F>", time.timestamp())
}
