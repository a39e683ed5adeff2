//! Clock times and travel durations for synthesized schedules.
//!
//! Offers carry times as "HH:MM" strings. Arrivals are computed by adding
//! a travel duration to a departure, which may roll past midnight; the
//! number of days rolled is reported separately rather than folded into
//! the clock time.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A time of day with minute resolution.
///
/// # Examples
///
/// ```
/// use trip_server::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("23:30").unwrap();
/// let (later, days) = t.add_minutes(90);
/// assert_eq!(later.to_string(), "01:00");
/// assert_eq!(days, 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    time: NaiveTime,
}

impl Default for ClockTime {
    /// Midnight.
    fn default() -> Self {
        Self {
            time: NaiveTime::MIN,
        }
    }
}

impl ClockTime {
    /// Create a clock time. Returns `None` if out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { time })
    }

    /// Parse "HH:MM".
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self { time })
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.time.num_seconds_from_midnight() / 60
    }

    /// Whole minutes from `self` to a later time on the same day; zero if
    /// `later` is earlier.
    pub fn minutes_until(&self, later: ClockTime) -> u32 {
        let minutes = later.time.signed_duration_since(self.time).num_minutes();
        u32::try_from(minutes).unwrap_or(0)
    }

    /// Add minutes, returning the new time and how many midnights were crossed.
    pub fn add_minutes(&self, minutes: u32) -> (Self, u32) {
        let (time, rolled) = self
            .time
            .overflowing_add_signed(Duration::minutes(i64::from(minutes)));
        let days = u32::try_from(rolled / SECONDS_PER_DAY).unwrap_or(0);
        (Self { time }, days)
    }

    /// Round to the nearest multiple of `step` minutes (ties round up).
    ///
    /// Rounding up past 23:59 wraps to the next day; the crossed day count
    /// is returned alongside.
    pub fn round_to(&self, step: u32) -> (Self, u32) {
        if step == 0 {
            return (*self, 0);
        }
        let m = self.minutes_since_midnight();
        let rounded = (m + step / 2) / step * step;
        Self::default().add_minutes(rounded)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A travel duration with minute resolution.
///
/// Displays as `"{h}h {m}m"`, e.g. `"5h 5m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TravelDuration {
    minutes: u32,
}

impl TravelDuration {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn from_hours_minutes(hours: u32, minutes: u32) -> Self {
        Self {
            minutes: hours * 60 + minutes,
        }
    }

    /// Time to cover `distance_km` at `speed_kmh`, truncated to whole minutes.
    pub fn at_speed(distance_km: u32, speed_kmh: u32) -> Self {
        if speed_kmh == 0 {
            return Self::default();
        }
        let hours = f64::from(distance_km) / f64::from(speed_kmh);
        Self {
            minutes: (hours * 60.0) as u32,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn hours_part(&self) -> u32 {
        self.minutes / 60
    }

    pub fn minutes_part(&self) -> u32 {
        self.minutes % 60
    }

    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self {
            minutes: self.minutes + minutes,
        }
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours_part(), self.minutes_part())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
