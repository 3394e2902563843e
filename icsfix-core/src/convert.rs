//! UTC to local time conversion of event start and recurrence end.
//!
//! Two modes are supported:
//!
//! - [`ConvertMode::Compatible`] picks the start offset from the month the
//!   record was stamped (not the event date), always uses the zone's fixed
//!   offset for `UNTIL=`, and wraps the hour at midnight without touching the
//!   date. Calendars already produced this way stay comparable line for line.
//! - [`ConvertMode::Exact`] converts the UTC instant into the profile's IANA
//!   zone, so dates roll back across midnight and the real DST rule applies.
//!
//! Both modes rewrite only the 15-byte date-time window and leave every other
//! byte of the record alone.

use serde::Deserialize;
use tracing::debug;

use crate::error::{FixError, FixResult};
use crate::event::Event;
use crate::schema::{DateTimeToken, STAMP_MONTH, START_TOKEN_COLUMN, TOKEN_LEN, UNTIL_MARKER};
use crate::zone::ZoneProfile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvertMode {
    #[default]
    Compatible,
    Exact,
}

/// Two-digit month of the record's `DTSTAMP` line.
pub fn stamp_month(timestamp: &[u8]) -> Result<u32, String> {
    match timestamp.get(STAMP_MONTH) {
        Some(&[tens, ones]) if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Ok(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
        }
        _ => Err(format!("no two-digit month at bytes {STAMP_MONTH:?}")),
    }
}

/// New `start` line: the zone's `DTSTART;TZID=...:` prefix plus the
/// converted token. Anything that followed the token (such as `Z`) is dropped.
fn convert_start(
    start: &[u8],
    timestamp: &[u8],
    zone: &ZoneProfile,
    mode: ConvertMode,
) -> Result<Vec<u8>, (&'static str, String)> {
    let token = DateTimeToken::at(start, START_TOKEN_COLUMN).map_err(|e| ("start", e))?;

    let local = match mode {
        ConvertMode::Compatible => {
            let month = stamp_month(timestamp).map_err(|e| ("timestamp", e))?;
            token.wrap_back(zone.seasonal_offset(month))
        }
        ConvertMode::Exact => token.to_local(zone.tz),
    };

    Ok(format!("{}{local}", zone.start_prefix()).into_bytes())
}

/// Rewrite the value after the first `UNTIL=` in place.
fn convert_rule(rule: &mut [u8], zone: &ZoneProfile, mode: ConvertMode) -> Result<(), String> {
    let at = rule
        .windows(UNTIL_MARKER.len())
        .position(|w| w == UNTIL_MARKER.as_bytes())
        .map(|i| i + UNTIL_MARKER.len())
        .ok_or_else(|| format!("no {UNTIL_MARKER} in recurrence rule"))?;
    let token = DateTimeToken::at(rule, at)?;

    let local = match mode {
        ConvertMode::Compatible => token.wrap_back(zone.until_offset),
        ConvertMode::Exact => token.to_local(zone.tz),
    };

    rule[at..at + TOKEN_LEN].copy_from_slice(local.to_string().as_bytes());
    Ok(())
}

/// Convert one event. `index` is 1-based and only used in errors.
///
/// The event is left untouched if either field fails.
pub fn convert_event(
    index: usize,
    event: &mut Event,
    zone: &ZoneProfile,
    mode: ConvertMode,
) -> FixResult<()> {
    let invalid = |field: &'static str, reason: String| FixError::InvalidField {
        event: index,
        field,
        reason,
    };

    let start = convert_start(&event.start, &event.timestamp, zone, mode)
        .map_err(|(field, reason)| invalid(field, reason))?;
    let mut rule = event.rule.clone();
    convert_rule(&mut rule, zone, mode).map_err(|reason| invalid("rule", reason))?;

    debug!(
        event = index,
        from = %String::from_utf8_lossy(&event.start),
        to = %String::from_utf8_lossy(&start),
        "Converted start"
    );
    event.start = start;
    event.rule = rule;
    Ok(())
}

/// Convert every event in order, stopping at the first failure.
pub fn convert_all(events: &mut [Event], zone: &ZoneProfile, mode: ConvertMode) -> FixResult<()> {
    for (i, event) in events.iter_mut().enumerate() {
        convert_event(i + 1, event, zone, mode)?;
    }
    Ok(())
}
