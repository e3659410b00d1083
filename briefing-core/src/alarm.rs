//! Alarm time parsing and crossing detection.

use chrono::NaiveTime;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn max(self) -> u32 {
        match self {
            TimeUnit::Hours => 23,
            TimeUnit::Minutes | TimeUnit::Seconds => 59,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AlarmError {
    #[error("{unit} value '{value}' is not an int")]
    NotAnInt { unit: TimeUnit, value: String },
    #[error("{unit} value {value} is negative")]
    Negative { unit: TimeUnit, value: i64 },
    #[error("{unit} value {value} exceeded {max}")]
    OutOfRange { unit: TimeUnit, value: i64, max: u32 },
    #[error("expected at least hours and minutes, e.g. `7:30` or `7 30`")]
    Incomplete,
}

fn to_time_int(raw: &str, unit: TimeUnit) -> Result<u32, AlarmError> {
    let value: i64 = raw
        .parse()
        .map_err(|_| AlarmError::NotAnInt { unit, value: raw.to_string() })?;

    if value < 0 {
        return Err(AlarmError::Negative { unit, value });
    }
    if value > i64::from(unit.max()) {
        return Err(AlarmError::OutOfRange { unit, value, max: unit.max() });
    }

    Ok(value as u32)
}

/// Parse a 24-hour alarm time from command-line words.
///
/// Colons and whitespace both separate components, so `["11", "22:33"]`,
/// `["11:22:33"]` and `["11 22 33"]` are the same time. Seconds default to 0.
pub fn parse_alarm_time<S: AsRef<str>>(args: &[S]) -> Result<NaiveTime, AlarmError> {
    let parts: Vec<&str> = args
        .iter()
        .flat_map(|arg| arg.as_ref().split(|c: char| c == ':' || c.is_whitespace()))
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() < 2 {
        return Err(AlarmError::Incomplete);
    }

    let hours = to_time_int(parts[0], TimeUnit::Hours)?;
    let minutes = to_time_int(parts[1], TimeUnit::Minutes)?;
    let seconds = match parts.get(2) {
        Some(raw) => to_time_int(raw, TimeUnit::Seconds)?,
        None => 0,
    };

    NaiveTime::from_hms_opt(hours, minutes, seconds).ok_or(AlarmError::Incomplete)
}

/// Fires once each time the wall clock passes the alarm time, including across midnight.
///
/// The first observation never fires, so starting the watch after the alarm
/// time waits for the next day's crossing.
#[derive(Debug, Clone)]
pub struct AlarmWatch {
    alarm: NaiveTime,
    last: Option<NaiveTime>,
}

impl AlarmWatch {
    pub fn new(alarm: NaiveTime) -> Self {
        Self { alarm, last: None }
    }

    pub fn alarm(&self) -> NaiveTime {
        self.alarm
    }

    pub fn observe(&mut self, now: NaiveTime) -> bool {
        let crossed = match self.last {
            None => false,
            Some(prev) if prev <= now => prev < self.alarm && self.alarm <= now,
            // Day rollover: (prev, 24:00) then [00:00, now].
            Some(prev) => self.alarm > prev || self.alarm <= now,
        };
        self.last = Some(now);
        crossed
    }
}
