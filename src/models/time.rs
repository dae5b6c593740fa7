use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Wall-clock time of day with minute granularity, `00:00..=23:59`.
///
/// Serialized as `"HH:MM"`. There is no `24:00`; the day boundary is a hard
/// wall and arithmetic that reaches it fails instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay((MINUTES_PER_DAY - 1) as u16);

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        if (0..MINUTES_PER_DAY).contains(&minutes) {
            Some(TimeOfDay(minutes as u16))
        } else {
            None
        }
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self::from_naive)
    }

    /// Parses `"HH:MM"`. `"HH:MM:SS"` is accepted only with zero seconds,
    /// which is how `time` columns come back from the database.
    pub fn parse(raw: &str) -> AppResult<Self> {
        if !raw.contains(':') {
            return Err(AppError::invalid_time_format(raw, "missing ':' separator"));
        }
        if !has_clock_shape(raw) {
            return Err(AppError::invalid_time_format(
                raw,
                "expected two-digit hour and minute",
            ));
        }

        let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|err| AppError::invalid_time_format(raw, err.to_string()))?;

        if parsed.second() != 0 || parsed.nanosecond() != 0 {
            return Err(AppError::invalid_time_format(
                raw,
                "seconds are not supported",
            ));
        }

        Ok(Self::from_naive(parsed))
    }

    pub fn minutes(self) -> i64 {
        i64::from(self.0)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }

    fn from_naive(time: NaiveTime) -> Self {
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }
}

// `DD:DD` or `DD:DD:DD`; chrono alone also takes single-digit fields.
fn has_clock_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 5 && bytes.len() != 8 {
        return false;
    }
    bytes.iter().enumerate().all(|(index, byte)| {
        if index % 3 == 2 {
            *byte == b':'
        } else {
            byte.is_ascii_digit()
        }
    })
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(value)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
