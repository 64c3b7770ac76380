//! Date and time values, based on RFC 3339.

use std::fmt::{self, Write as _};

#[cfg(test)]
#[path = "./time_tests.rs"]
mod tests;

/// A calendar date: `YYYY-MM-DD`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// A wall-clock time: `HH:MM:SS[.fraction]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    precision: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeOffset {
    /// A suffix which, when applied to a time, denotes a UTC offset of 00:00;
    /// often spoken “Zulu” from the ICAO phonetic alphabet representation of the letter “Z”.
    /// RFC 3339 section 2
    Z,
    /// Offset between local time and UTC
    Custom { minutes: i16 },
}

/// A date and time without an offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalDateTime {
    pub date: Date,
    pub time: Time,
}

/// A date and time anchored to UTC by an offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    pub date: Date,
    pub time: Time,
    pub offset: TimeOffset,
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

/// Reads exactly `N` ASCII digits.
fn digits<const N: usize>(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != N {
        return None;
    }
    let mut value = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (b - b'0') as u32;
    }
    Some(value)
}

impl Date {
    /// Parses and validates `YYYY-MM-DD`.
    pub fn parse(text: &str) -> Option<Date> {
        let bytes = text.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year = digits::<4>(&bytes[..4])? as u16;
        let month = digits::<2>(&bytes[5..7])? as u8;
        let day = digits::<2>(&bytes[8..])? as u8;
        if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        Some(Date { year, month, day })
    }
}

impl Time {
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Option<Time> {
        if hour > 23 || minute > 59 || second > 59 || nanosecond > 999_999_999 {
            return None;
        }
        let precision = if nanosecond == 0 { 0 } else { 9 };
        Some(Time {
            hour,
            minute,
            second,
            nanosecond,
            precision,
        })
    }

    /// Parses and validates `HH:MM:SS` with an optional fraction.
    ///
    /// Fractions beyond nanosecond precision are truncated.
    pub fn parse(text: &str) -> Option<Time> {
        let bytes = text.as_bytes();
        if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
            return None;
        }
        let hour = digits::<2>(&bytes[..2])? as u8;
        let minute = digits::<2>(&bytes[3..5])? as u8;
        let second = digits::<2>(&bytes[6..8])? as u8;
        let mut time = Time::new(hour, minute, second, 0)?;
        match &bytes[8..] {
            [] => {}
            [b'.', fraction @ ..] => {
                if fraction.is_empty() || !fraction.iter().all(u8::is_ascii_digit) {
                    return None;
                }
                let mut nanos = 0u32;
                for i in 0..9 {
                    let digit = fraction.get(i).map_or(0, |b| (b - b'0') as u32);
                    nanos = nanos * 10 + digit;
                }
                time.nanosecond = nanos;
                time.precision = fraction.len().min(9) as u8;
            }
            _ => return None,
        }
        Some(time)
    }

    /// Number of digits in the original fractional seconds, 0 if there were none.
    pub fn subsecond_precision(&self) -> u8 {
        self.precision
    }
}

impl TimeOffset {
    /// Parses `Z`, `z` or `±HH:MM`.
    pub fn parse(text: &str) -> Option<TimeOffset> {
        let bytes = text.as_bytes();
        let sign = match bytes {
            [b'Z' | b'z'] => return Some(TimeOffset::Z),
            [b'+', _, _, b':', _, _] => 1,
            [b'-', _, _, b':', _, _] => -1,
            _ => return None,
        };
        let hour = digits::<2>(&bytes[1..3])? as i16;
        let minute = digits::<2>(&bytes[4..])? as i16;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimeOffset::Custom {
            minutes: sign * (hour * 60 + minute),
        })
    }
}

fn split_date_time(text: &str) -> Option<(Date, &str)> {
    if text.len() < 11 || !text.is_char_boundary(10) {
        return None;
    }
    let (date, rest) = text.split_at(10);
    if !matches!(rest.as_bytes()[0], b'T' | b't' | b' ') {
        return None;
    }
    Some((Date::parse(date)?, &rest[1..]))
}

impl LocalDateTime {
    /// Parses `YYYY-MM-DD` followed by `T`, `t` or a space and a time.
    pub fn parse(text: &str) -> Option<LocalDateTime> {
        let (date, rest) = split_date_time(text)?;
        Some(LocalDateTime {
            date,
            time: Time::parse(rest)?,
        })
    }
}

impl OffsetDateTime {
    /// Parses a local date-time immediately followed by an offset.
    pub fn parse(text: &str) -> Option<OffsetDateTime> {
        let (date, rest) = split_date_time(text)?;
        let split = rest.find(['Z', 'z', '+', '-'])?;
        let (time, offset) = rest.split_at(split);
        Some(OffsetDateTime {
            date,
            time: Time::parse(time)?,
            offset: TimeOffset::parse(offset)?,
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.precision > 0 {
            let fraction = format!("{:09}", self.nanosecond);
            f.write_char('.')?;
            f.write_str(&fraction[..self.precision as usize])?;
        }
        Ok(())
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeOffset::Z => f.write_char('Z'),
            TimeOffset::Custom { minutes } => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let minutes = minutes.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
            }
        }
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}{}", self.date, self.time, self.offset)
    }
}

macro_rules! debug_as_display {
    ($($ty:ty),*) => {$(
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }
    )*};
}

debug_as_display!(Date, Time, LocalDateTime, OffsetDateTime);
