use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid time value: {0}")]
    InvalidTime(String),

    #[error("invalid time range: {0} (expected \"HH:MM-HH:MM\")")]
    InvalidRange(String),

    #[error("end time must be after start time")]
    EmptyInterval,

    #[error("unknown day: {0}")]
    UnknownDay(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(ScheduleError::UnknownDay(other.to_string())),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock time normalized to seconds since midnight. All comparisons
/// in the engine happen on this canonical form, never on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Accepts "HH:MM" (the wire format) or "HH:MM:SS" (the stored format).
    pub fn parse(s: &str) -> Result<Self, ScheduleError> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(|t| TimeOfDay(t.num_seconds_from_midnight()))
            .map_err(|_| ScheduleError::InvalidTime(s.to_string()))
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Renders as "HH:MM:SS", the canonical storage form.
    pub fn to_hms(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        format!("{h:02}:{m:02}:{s:02}")
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hms())
    }
}

/// Parses the request wire format "HH:MM-HH:MM" into a (start, end) pair.
/// Range validity (start < end) is checked by `Interval::new`, not here.
pub fn parse_time_range(s: &str) -> Result<(TimeOfDay, TimeOfDay), ScheduleError> {
    let mut parts = s.splitn(2, '-');
    let (start, end) = match (parts.next(), parts.next()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(ScheduleError::InvalidRange(s.to_string())),
    };
    Ok((TimeOfDay::parse(start)?, TimeOfDay::parse(end)?))
}

/// A half-open time interval on a given weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub day: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::EmptyInterval);
        }
        Ok(Interval { day, start, end })
    }

    /// Half-open overlap: touching endpoints do not conflict, and intervals
    /// on different weekdays never conflict.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.day == other.day && self.start < other.end && self.end > other.start
    }

    /// True when `self` lies entirely within `window` on the same weekday.
    pub fn contained_in(&self, window: &Interval) -> bool {
        self.day == window.day && self.start >= window.start && self.end <= window.end
    }
}
