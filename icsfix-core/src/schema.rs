//! Fixed-width layout of the calendar export.
//!
//! The export this crate targets is not general iCalendar: every event is
//! exactly [`FIELD_COUNT`] property lines in a fixed order, and the date-time
//! values the converter rewrites sit at known byte columns. All of those
//! positions are named here so the parser and converter never carry bare
//! offsets.

use std::fmt;
use std::ops::Range;

use chrono::{Duration, NaiveDateTime, Timelike};
use chrono_tz::Tz;

/// Number of property lines in every event record.
pub const FIELD_COUNT: usize = 8;

pub const BEGIN_EVENT: &str = "BEGIN:VEVENT";
pub const END_EVENT: &str = "END:VEVENT";
pub const END_CALENDAR: &str = "END:VCALENDAR";

/// Every emitted line ends with CRLF regardless of platform.
pub const LINE_ENDING: &str = "\r\n";

/// Byte column of the date-time token inside the `DTSTART:` line.
pub const START_TOKEN_COLUMN: usize = 8;

/// Byte range of the two-digit month inside the `DTSTAMP:` line.
pub const STAMP_MONTH: Range<usize> = 12..14;

/// Marker that precedes the end date-time inside the recurrence rule.
pub const UNTIL_MARKER: &str = "UNTIL=";

/// Width of a `YYYYMMDDTHHMMSS` token.
pub const TOKEN_LEN: usize = 15;

const TOKEN_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A validated `YYYYMMDDTHHMMSS` date-time token.
///
/// Rendering always produces exactly [`TOKEN_LEN`] bytes, so a token can be
/// spliced back over the window it was read from without shifting anything
/// around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeToken(NaiveDateTime);

impl DateTimeToken {
    /// Parse a token that must be exactly [`TOKEN_LEN`] bytes.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let bytes = raw.as_bytes();
        let well_shaped = bytes.len() == TOKEN_LEN
            && bytes[..8].iter().all(u8::is_ascii_digit)
            && bytes[8] == b'T'
            && bytes[9..].iter().all(u8::is_ascii_digit);
        if !well_shaped {
            return Err(format!("'{raw}' is not a YYYYMMDDTHHMMSS value"));
        }

        let parsed = NaiveDateTime::parse_from_str(raw, TOKEN_FORMAT)
            .map_err(|e| format!("'{raw}' is not a valid date-time: {e}"))?;

        // chrono reads second 60 as a leap second, which any shift would
        // normalize into the next minute.
        if parsed.nanosecond() >= 1_000_000_000 {
            return Err(format!("'{raw}' has a leap second"));
        }

        Ok(Self(parsed))
    }

    /// Read the token that starts at byte `column` of `line`.
    pub fn at(line: &[u8], column: usize) -> Result<Self, String> {
        let window = line
            .get(column..column + TOKEN_LEN)
            .ok_or_else(|| format!("no {TOKEN_LEN}-byte date-time at column {column}"))?;
        let raw = std::str::from_utf8(window)
            .map_err(|_| format!("non-ASCII bytes in the date-time at column {column}"))?;
        Self::parse(raw)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Move the clock back by `hours`, wrapping within the same day.
    ///
    /// The date part never changes: 02:00 minus five hours is 21:00 on the
    /// same calendar date.
    pub fn wrap_back(self, hours: i64) -> Self {
        let shifted = self.0 - Duration::hours(hours);
        Self(NaiveDateTime::new(self.0.date(), shifted.time()))
    }

    /// Treat the token as UTC and express it as wall-clock time in `tz`.
    pub fn to_local(self, tz: Tz) -> Self {
        Self(self.0.and_utc().with_timezone(&tz).naive_local())
    }
}

impl fmt::Display for DateTimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TOKEN_FORMAT))
    }
}
