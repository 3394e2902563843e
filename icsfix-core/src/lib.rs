//! Core of icsfix.
//!
//! Reads a calendar export whose events are fixed eight-line records,
//! rewrites each event's UTC start time and `UNTIL=` value as local time in a
//! timezone profile, and writes the result back out in the same format:
//!
//! - [`ics::read_calendar`] parses the header and event records
//! - [`convert::convert_all`] rewrites the date-time fields in place
//! - [`ics::write_calendar`] serializes header, `VTIMEZONE` block and events
//!
//! [`fix_calendar`] runs all three over a pair of streams.

pub mod config;
pub mod convert;
pub mod error;
pub mod event;
pub mod ics;
pub mod schema;
pub mod zone;

use std::io::{BufRead, Write};

use tracing::info;

pub use crate::config::FixerConfig;
pub use crate::convert::ConvertMode;
pub use crate::error::{FixError, FixResult};
pub use crate::event::{Calendar, Event, Header};
pub use crate::zone::ZoneProfile;

/// Read, convert and write a whole calendar. Returns the number of events.
///
/// Nothing is written to `output` unless every event converted.
pub fn fix_calendar<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    zone: &ZoneProfile,
    mode: ConvertMode,
) -> FixResult<usize> {
    let Calendar { header, mut events } = ics::read_calendar(input)?;
    convert::convert_all(&mut events, zone, mode)?;
    ics::write_calendar(output, &header, zone, &events)?;
    output.flush()?;

    info!(events = events.len(), tzid = zone.tzid, ?mode, "Calendar converted");
    Ok(events.len())
}
