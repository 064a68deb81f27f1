// Date format mini-language
// Every ASCII letter in a pattern is a field code, everything else is copied through.
// All fields are read in UTC.

use std::time::SystemTime;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormatError;

/// Width used when rendering the `r` (milliseconds) code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MillisPadding {
    /// Two digits, matching what stored dashboards already display.
    /// 5ms and 50ms both come out as two characters, 500ms as three.
    #[default]
    Legacy,
    /// Three digits, unambiguous
    Full,
}

impl MillisPadding {
    pub fn width(self) -> usize {
        match self {
            MillisPadding::Legacy => 2,
            MillisPadding::Full => 3,
        }
    }
}

/// Anything that can be resolved to an absolute instant
pub trait IntoInstant {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError>;
}

/// Epoch milliseconds
impl IntoInstant for i64 {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError> {
        DateTime::from_timestamp_millis(self)
            .ok_or_else(|| FormatError::InvalidTimestamp(self.to_string()))
    }
}

impl<Tz: TimeZone> IntoInstant for DateTime<Tz> {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError> {
        Ok(self.with_timezone(&Utc))
    }
}

impl<Tz: TimeZone> IntoInstant for &DateTime<Tz> {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError> {
        Ok(self.with_timezone(&Utc))
    }
}

impl IntoInstant for SystemTime {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError> {
        Ok(DateTime::<Utc>::from(self))
    }
}

impl IntoInstant for &str {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError> {
        parse_timestamp(self)
    }
}

impl IntoInstant for &String {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError> {
        parse_timestamp(self)
    }
}

impl IntoInstant for String {
    fn into_instant(self) -> Result<DateTime<Utc>, FormatError> {
        parse_timestamp(&self)
    }
}

/// Parse a textual timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD[T| ]HH:MM:SS[.fff]` (read as UTC), `YYYY-MM-DD`,
/// `YYYY-MM` and `YYYY` (start of that day, month or year in UTC), and epoch
/// milliseconds. A string of exactly four digits is always a year, never
/// milliseconds.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, FormatError> {
    let trimmed = raw.trim();
    let invalid = || FormatError::InvalidTimestamp(raw.to_string());

    if let Some(date) = parse_partial_date(trimmed) {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(invalid);
    }
    if let Ok(millis) = trimmed.parse::<i64>() {
        return millis.into_instant();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // The ledger writes check dates as "2006-01-02 15:04:05".
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(naive.and_utc());
        }
    }

    Err(invalid())
}

// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
fn parse_partial_date(text: &str) -> Option<NaiveDate> {
    fn is_year(part: &str) -> bool {
        part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit())
    }

    match text.split('-').collect::<Vec<_>>().as_slice() {
        [year] if is_year(year) => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        [year, _] if is_year(year) => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok(),
        [year, _, _] if is_year(year) => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// Renders instants through the single-letter format codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFormatter {
    millis_padding: MillisPadding,
}

impl DateFormatter {
    pub fn new(millis_padding: MillisPadding) -> Self {
        Self { millis_padding }
    }

    pub fn millis_padding(&self) -> MillisPadding {
        self.millis_padding
    }

    /// Format `timestamp` according to `pattern`.
    ///
    /// Fails on the first letter without a meaning; no partial output is
    /// returned.
    pub fn format<T: IntoInstant>(&self, timestamp: T, pattern: &str) -> Result<String, FormatError> {
        let instant = timestamp.into_instant()?;
        let mut out = String::with_capacity(pattern.len() * 2);

        for ch in pattern.chars() {
            if ch.is_ascii_alphabetic() {
                out.push_str(&self.field(&instant, ch)?);
            } else {
                out.push(ch);
            }
        }

        Ok(out)
    }

    fn field(&self, instant: &DateTime<Utc>, code: char) -> Result<String, FormatError> {
        let hour = instant.hour();
        let value = match code {
            'Y' => instant.year().to_string(),
            'M' => pad(instant.month(), 2),
            'd' => pad(instant.day(), 2),
            'H' => pad(hour, 2),
            'I' => pad(twelve_hour(hour), 2),
            'p' => meridiem(hour).to_string(),
            'P' => meridiem(hour).to_uppercase(),
            'm' => pad(instant.minute(), 2),
            's' => pad(instant.second(), 2),
            'r' => pad(
                instant.timestamp_subsec_millis() % 1000,
                self.millis_padding.width(),
            ),
            'q' => instant.timestamp_millis().to_string(),
            other => {
                debug!(code = %other, "rejecting date pattern");
                return Err(FormatError::UnsupportedFormatCode(other));
            }
        };
        Ok(value)
    }
}

/// Format with the default (legacy millisecond) formatter
pub fn format_date<T: IntoInstant>(timestamp: T, pattern: &str) -> Result<String, FormatError> {
    DateFormatter::default().format(timestamp, pattern)
}

fn twelve_hour(hour: u32) -> u32 {
    match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 {
        "am"
    } else {
        "pm"
    }
}

// Prefixes zeros up to `width`; longer values are left alone.
fn pad(value: u32, width: usize) -> String {
    format!("{value:0>width$}")
}
