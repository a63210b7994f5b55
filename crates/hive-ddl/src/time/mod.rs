//! Time-of-day values with nanosecond resolution that remember how many
//! fractional digits they were written with.
//!
//! A plain time type normalizes `12:13:14.1000` to `12:13:14.1`, which breaks
//! exports that must reproduce the original text. [`TimeValue`] keeps an
//! explicit `fraction_digits` width next to the nanosecond count, and
//! formatting pads the fraction back out to that width.
//!
//! There are two ways to obtain a width:
//!
//! - Parsing text records the number of fractional characters as written.
//! - [`TimeValue::new`] infers it from the decimal length of the nanosecond
//!   integer. Formatting only ever pads, so `new(12, 13, 14, 1234)` renders
//!   all nine digits `12:13:14.000001234`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};

const MAX_FRACTION_DIGITS: usize = 9;
const MAX_NANOS: u32 = 999_999_999;

/// A time of day `hh:mm:ss[.fffffffff]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeValue {
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
    fraction_digits: u8,
}

impl TimeValue {
    /// Build a time from its fields, inferring the fraction width from the
    /// number of decimal digits in `nanos`.
    pub fn new(hour: u32, minute: u32, second: u32, nanos: u32) -> Result<Self> {
        let digits = if nanos == 0 {
            0
        } else {
            nanos.to_string().len() as u32
        };
        Self::with_fraction_digits(hour, minute, second, nanos, digits)
    }

    /// Build a time with an explicit fraction width (0-9).
    ///
    /// A zero `nanos` always renders without a fraction, so its width is
    /// normalized to 0. A non-zero `nanos` needs a width of at least 1.
    pub fn with_fraction_digits(
        hour: u32,
        minute: u32,
        second: u32,
        nanos: u32,
        fraction_digits: u32,
    ) -> Result<Self> {
        let describe = || format!("{}:{}:{}.{}", hour, minute, second, nanos);
        if hour > 23 {
            return Err(DdlError::malformed_time(describe(), "hour must be 0-23"));
        }
        if minute > 59 {
            return Err(DdlError::malformed_time(describe(), "minute must be 0-59"));
        }
        if second > 59 {
            return Err(DdlError::malformed_time(describe(), "second must be 0-59"));
        }
        if nanos > MAX_NANOS {
            return Err(DdlError::malformed_time(
                describe(),
                "nanos must be 0-999999999",
            ));
        }
        if fraction_digits as usize > MAX_FRACTION_DIGITS {
            return Err(DdlError::malformed_time(
                describe(),
                "fraction digits must be 0-9",
            ));
        }
        if nanos != 0 && fraction_digits == 0 {
            return Err(DdlError::malformed_time(
                describe(),
                "a non-zero fraction needs at least one digit",
            ));
        }

        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            nanos,
            fraction_digits: if nanos == 0 { 0 } else { fraction_digits as u8 },
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    pub fn second(&self) -> u32 {
        self.second as u32
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Number of fractional digits the value renders with (at least).
    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits as u32
    }
}

/// Parse `hh:mm:ss[.fraction]`.
///
/// - A fraction of exactly zero (`.0`, `.000`) is treated as absent.
/// - Fractions longer than nine digits are truncated to nine.
/// - Otherwise the width is the fraction length as written, so
///   `12:13:14.123400` keeps six digits.
impl FromStr for TimeValue {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self> {
        let (base, fraction) = match s.split_once('.') {
            Some((base, fraction)) => (base, Some(fraction)),
            None => (s, None),
        };

        let mut fields = base.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(DdlError::malformed_time(s, "expected hh:mm:ss"));
        };
        let hour = parse_field(s, h, "hour", 23)?;
        let minute = parse_field(s, m, "minute", 59)?;
        let second = parse_field(s, sec, "second", 59)?;

        let (nanos, digits) = match fraction {
            None => (0, 0),
            Some(fraction) => parse_fraction(s, fraction)?,
        };

        Ok(Self {
            hour,
            minute,
            second,
            nanos,
            fraction_digits: digits,
        })
    }
}

fn parse_field(input: &str, field: &str, name: &str, max: u8) -> Result<u8> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DdlError::malformed_time(
            input,
            format!("{} must be one or two digits", name),
        ));
    }
    let value = field.bytes().fold(0u8, |acc, b| acc * 10 + (b - b'0'));
    if value > max {
        return Err(DdlError::malformed_time(
            input,
            format!("{} must be 0-{}", name, max),
        ));
    }
    Ok(value)
}

fn parse_fraction(input: &str, fraction: &str) -> Result<(u32, u8)> {
    if fraction.is_empty() {
        return Err(DdlError::malformed_time(input, "empty fractional part"));
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DdlError::malformed_time(
            input,
            "fractional part must be digits",
        ));
    }

    // All ASCII digits, so byte slicing is safe.
    let kept = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    let value = kept
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    let nanos = value * 10u32.pow((MAX_FRACTION_DIGITS - kept.len()) as u32);

    if nanos == 0 {
        Ok((0, 0))
    } else {
        Ok((nanos, kept.len() as u8))
    }
}

/// Format as `hh:mm:ss[.fraction]`.
///
/// The fraction is the nine-digit nanosecond string with trailing zeros
/// stripped, right-padded with zeros up to `fraction_digits`. It is never
/// cut below its trimmed length.
impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanos == 0 {
            return Ok(());
        }

        let nine = format!("{:09}", self.nanos);
        let trimmed = nine.trim_end_matches('0');
        let width = self.fraction_digits as usize;
        if trimmed.len() < width {
            write!(f, ".{:0<width$}", trimmed, width = width)
        } else {
            write!(f, ".{}", trimmed)
        }
    }
}

impl TryFrom<String> for TimeValue {
    type Error = DdlError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimeValue> for String {
    fn from(t: TimeValue) -> Self {
        t.to_string()
    }
}

impl TryFrom<TimeValue> for NaiveTime {
    type Error = DdlError;

    fn try_from(t: TimeValue) -> Result<Self> {
        NaiveTime::from_hms_nano_opt(t.hour(), t.minute(), t.second(), t.nanos)
            .ok_or_else(|| DdlError::malformed_time(t.to_string(), "not a valid time of day"))
    }
}

/// Converts with full nine-digit width. A leap-second nanosecond value is
/// clamped to the last representable nanosecond.
impl From<NaiveTime> for TimeValue {
    fn from(t: NaiveTime) -> Self {
        let nanos = t.nanosecond().min(MAX_NANOS);
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
            second: t.second() as u8,
            nanos,
            fraction_digits: if nanos == 0 { 0 } else { MAX_FRACTION_DIGITS as u8 },
        }
    }
}
