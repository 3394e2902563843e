//! Timezone profiles.
//!
//! A profile bundles everything the converter and writer need to know about
//! one target region: the TZID written into `DTSTART`, the month-keyed
//! offset rule used in compatible mode, the IANA zone used in exact mode and
//! the literal `VTIMEZONE` block emitted into every output file.

use std::ops::RangeInclusive;

use chrono_tz::Tz;

use crate::error::{FixError, FixResult};

pub const DEFAULT_ZONE: &str = "America/New_York";

#[derive(Debug)]
pub struct ZoneProfile {
    pub tzid: &'static str,

    /// IANA zone used for exact conversion.
    pub tz: Tz,

    /// Months (by the `DTSTAMP` month) that take the standard-time offset.
    pub standard_months: RangeInclusive<u32>,

    /// Hours behind UTC during standard time.
    pub standard_offset: i64,

    /// Hours behind UTC during daylight time.
    pub daylight_offset: i64,

    /// Hours behind UTC applied to every `UNTIL=` value.
    pub until_offset: i64,

    /// Emitted verbatim, one CRLF-terminated line per entry.
    pub vtimezone: &'static [&'static str],
}

static PROFILES: &[ZoneProfile] = &[ZoneProfile {
    tzid: "America/New_York",
    tz: chrono_tz::America::New_York,
    standard_months: 1..=5,
    standard_offset: 5,
    daylight_offset: 4,
    until_offset: 4,
    vtimezone: &[
        "BEGIN:VTIMEZONE",
        "TZID:America/New_York",
        "X-LIC-LOCATION:America/New_York",
        "BEGIN:DAYLIGHT",
        "TZOFFSETFROM:-0500",
        "TZOFFSETTO:-0400",
        "TZNAME:EDT",
        "DTSTART:19700308T020000",
        "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU",
        "END:DAYLIGHT",
        "BEGIN:STANDARD",
        "TZOFFSETFROM:-0400",
        "TZOFFSETTO:-0500",
        "TZNAME:EST",
        "DTSTART:19701101T020000",
        "RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU",
        "END:STANDARD",
        "END:VTIMEZONE",
    ],
}];

impl ZoneProfile {
    /// Find the compiled-in profile for `tzid`.
    pub fn lookup(tzid: &str) -> FixResult<&'static ZoneProfile> {
        PROFILES
            .iter()
            .find(|p| p.tzid == tzid)
            .ok_or_else(|| FixError::UnknownZone(tzid.to_string()))
    }

    pub fn all() -> &'static [ZoneProfile] {
        PROFILES
    }

    /// Offset for an event whose stamp falls in `month`.
    ///
    /// This keys off the month the record was stamped, not the event date
    /// and not the real transition Sunday. Month 0 counts as daylight time.
    pub fn seasonal_offset(&self, month: u32) -> i64 {
        if self.standard_months.contains(&month) {
            self.standard_offset
        } else {
            self.daylight_offset
        }
    }

    /// Property name and parameter that replace the original `DTSTART:`.
    pub fn start_prefix(&self) -> String {
        format!("DTSTART;TZID={}:", self.tzid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_default_zone() {
        let zone = ZoneProfile::lookup(DEFAULT_ZONE).unwrap();
        assert_eq!(zone.tzid, "America/New_York");
        assert_eq!(zone.start_prefix(), "DTSTART;TZID=America/New_York:");
    }

    #[test]
    fn test_lookup_unknown_zone() {
        let err = ZoneProfile::lookup("Europe/Paris").unwrap_err();
        assert!(matches!(err, FixError::UnknownZone(ref z) if z == "Europe/Paris"));
    }

    #[test]
    fn test_seasonal_offset_by_month() {
        let zone = ZoneProfile::lookup(DEFAULT_ZONE).unwrap();
        for month in 1..=5 {
            assert_eq!(zone.seasonal_offset(month), 5, "month {month}");
        }
        for month in [0, 6, 7, 8, 9, 10, 11, 12] {
            assert_eq!(zone.seasonal_offset(month), 4, "month {month}");
        }
    }

    #[test]
    fn test_vtimezone_block_framing() {
        let zone = ZoneProfile::lookup(DEFAULT_ZONE).unwrap();
        assert_eq!(zone.vtimezone.len(), 18);
        assert_eq!(zone.vtimezone.first(), Some(&"BEGIN:VTIMEZONE"));
        assert_eq!(zone.vtimezone.last(), Some(&"END:VTIMEZONE"));
        assert!(zone.vtimezone.contains(&"TZID:America/New_York"));
    }

    #[test]
    fn test_every_profile_names_its_own_tzid() {
        for zone in ZoneProfile::all() {
            assert_eq!(zone.tz.name(), zone.tzid);
            let tzid_line = format!("TZID:{}", zone.tzid);
            assert!(zone.vtimezone.contains(&tzid_line.as_str()));
        }
    }
}
