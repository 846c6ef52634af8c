//! Wall-clock time of day (`HH:MM`) as used by weekly availability rules.
//!
//! Rules carry their window bounds as text. Parsing goes through this type so
//! that a malformed value surfaces as [`SchedulerError::InvalidTimeFormat`]
//! instead of being split apart ad hoc.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SchedulerError};

/// A naive local time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Build a time of day, rejecting hours outside `0..=23` and minutes outside `0..=59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SchedulerError::InvalidTimeFormat(format!(
                "{:02}:{:02} is out of range",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse a strict `HH:MM` string. Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    /// Returns `SchedulerError::InvalidTimeFormat` carrying the offending input
    /// for anything that is not two digits, a colon, and two digits in range.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || SchedulerError::InvalidTimeFormat(format!("'{}' is not HH:MM", input));

        let bytes = input.trim().as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digit = |b: u8| -> Result<u8> {
            if b.is_ascii_digit() {
                Ok(b - b'0')
            } else {
                Err(invalid())
            }
        };
        let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
        let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;

        Self::new(hour, minute).map_err(|_| invalid())
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// Combine with a calendar date into a naive local datetime.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::from(*self))
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(t: TimeOfDay) -> Self {
        // Fields are range-checked on construction, so this always yields a time.
        NaiveTime::from_hms_opt(u32::from(t.hour), u32::from(t.minute), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for TimeOfDay {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
