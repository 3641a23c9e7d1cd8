//! Conversions between 24-hour "HH:MM" strings, 12-hour clock triples and
//! minute-of-day offsets.
//!
//! Malformed input is rejected with [`SlotError::InvalidTime`] rather than
//! producing a best-effort value: a time that does not parse never reaches
//! the slot arithmetic.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};

/// Minute choices offered by the time slider.
pub const QUARTER_HOURS: [u32; 4] = [0, 15, 30, 45];

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    AM,
    PM,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::AM => write!(f, "AM"),
            Period::PM => write!(f, "PM"),
        }
    }
}

/// A wall-clock time on the 12-hour dial, `hour` in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwelveHourTime {
    pub hour: u32,
    pub minute: u32,
    pub period: Period,
}

impl TwelveHourTime {
    /// Two-digit minute as the time picker displays it ("00", "30").
    pub fn minute_label(&self) -> String {
        format!("{:02}", self.minute)
    }
}

impl fmt::Display for TwelveHourTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.period)
    }
}

/// Parses a zero-padded 24-hour "HH:MM" string.
pub fn parse_time(time: &str) -> SlotResult<NaiveTime> {
    let invalid = || SlotError::InvalidTime(format!("expected HH:MM, got {:?}", time));

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

pub fn minutes_since_midnight(time: &str) -> SlotResult<u32> {
    let parsed = parse_time(time)?;
    Ok(parsed.hour() * 60 + parsed.minute())
}

/// Formats a minute-of-day offset as "HH:MM".
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Converts a 12-hour clock reading to a zero-padded 24-hour "HH:MM" string.
///
/// 12 AM is midnight ("00:MM") and 12 PM is noon ("12:MM").
pub fn to_24_hour(hour: u32, minute: u32, period: Period) -> SlotResult<String> {
    if !(1..=12).contains(&hour) {
        return Err(SlotError::InvalidTime(format!(
            "12-hour clock hour must be between 1 and 12, got {}",
            hour
        )));
    }
    if minute > 59 {
        return Err(SlotError::InvalidTime(format!(
            "minute must be between 0 and 59, got {}",
            minute
        )));
    }

    let hour24 = match (period, hour) {
        (Period::AM, 12) => 0,
        (Period::AM, h) => h,
        (Period::PM, 12) => 12,
        (Period::PM, h) => h + 12,
    };

    Ok(format!("{:02}:{:02}", hour24, minute))
}

/// Converts a 24-hour "HH:MM" string to the 12-hour dial.
pub fn to_12_hour(time: &str) -> SlotResult<TwelveHourTime> {
    let parsed = parse_time(time)?;
    let (hour, period) = match parsed.hour() {
        0 => (12, Period::AM),
        12 => (12, Period::PM),
        h if h > 12 => (h - 12, Period::PM),
        h => (h, Period::AM),
    };

    Ok(TwelveHourTime {
        hour,
        minute: parsed.minute(),
        period,
    })
}

/// "13:30" -> "1:30 PM"
pub fn format_time_12h(time: &str) -> SlotResult<String> {
    Ok(to_12_hour(time)?.to_string())
}

/// Display label for a slot: "9:00 AM - 9:30 AM".
pub fn format_time_range(start_time: &str, end_time: &str) -> SlotResult<String> {
    Ok(format!(
        "{} - {}",
        format_time_12h(start_time)?,
        format_time_12h(end_time)?
    ))
}

/// Every "HH:MM" value of a day at `step_minutes` spacing, starting at midnight.
pub fn time_options(step_minutes: u32) -> Vec<String> {
    if step_minutes == 0 {
        return Vec::new();
    }

    (0..MINUTES_PER_DAY)
        .step_by(step_minutes as usize)
        .map(format_minutes)
        .collect()
}
