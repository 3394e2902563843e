//! Writing the converted calendar.

use std::io::{self, Write};

use tracing::debug;

use crate::error::FixResult;
use crate::event::{Event, Header};
use crate::schema::{BEGIN_EVENT, END_CALENDAR, END_EVENT, LINE_ENDING};
use crate::zone::ZoneProfile;

/// Serialize a calendar: header, the zone's VTIMEZONE block, each event,
/// then `END:VCALENDAR`. Every line is CRLF-terminated.
pub fn write_calendar<W: Write>(
    out: &mut W,
    header: &Header,
    zone: &ZoneProfile,
    events: &[Event],
) -> FixResult<()> {
    for token in header.tokens() {
        write_line(out, token)?;
    }

    for line in zone.vtimezone {
        write_line(out, line.as_bytes())?;
    }

    for event in events {
        write_line(out, BEGIN_EVENT.as_bytes())?;
        for field in event.fields() {
            write_line(out, field)?;
        }
        write_line(out, END_EVENT.as_bytes())?;
    }

    write_line(out, END_CALENDAR.as_bytes())?;
    debug!(events = events.len(), tzid = zone.tzid, "Calendar written");
    Ok(())
}

fn write_line<W: Write>(out: &mut W, line: &[u8]) -> io::Result<()> {
    out.write_all(line)?;
    out.write_all(LINE_ENDING.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FIELD_NAMES;
    use crate::zone::DEFAULT_ZONE;

    fn make_test_event(n: usize) -> Event {
        Event::from_fields(
            FIELD_NAMES.map(|name| format!("{}:{name}-{n}", name.to_uppercase()).into_bytes()),
        )
    }

    fn generate(header: &Header, events: &[Event]) -> String {
        let zone = ZoneProfile::lookup(DEFAULT_ZONE).unwrap();
        let mut out = Vec::new();
        write_calendar(&mut out, header, zone, events).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_calendar_layout() {
        let header = Header::new(vec![b"BEGIN:VCALENDAR".to_vec(), b"VERSION:2.0".to_vec()]);
        let ics = generate(&header, &[make_test_event(1)]);
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines[0], "BEGIN:VCALENDAR");
        assert_eq!(lines[1], "VERSION:2.0");
        assert_eq!(lines[2], "BEGIN:VTIMEZONE");
        assert_eq!(lines[19], "END:VTIMEZONE");
        assert_eq!(lines[20], "BEGIN:VEVENT");
        assert_eq!(lines[21], "ID:id-1");
        assert_eq!(lines[28], "DURATION:duration-1");
        assert_eq!(lines[29], "END:VEVENT");
        assert_eq!(lines[30], "END:VCALENDAR");
        // Trailing CRLF leaves one empty piece after the split.
        assert_eq!(lines.len(), 32);
        assert_eq!(lines[31], "");
    }

    #[test]
    fn test_every_line_is_crlf_terminated() {
        let ics = generate(&Header::default(), &[make_test_event(1), make_test_event(2)]);

        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        let bare_lf = ics
            .match_indices('\n')
            .filter(|(i, _)| *i == 0 || ics.as_bytes()[i - 1] != b'\r')
            .count();
        assert_eq!(bare_lf, 0, "Found bare LF line endings. ICS:\n{ics}");
    }

    #[test]
    fn test_events_are_written_in_order() {
        let events: Vec<Event> = (1..=3).map(make_test_event).collect();
        let ics = generate(&Header::default(), &events);

        let ids: Vec<&str> = ics.lines().filter(|l| l.starts_with("ID:")).collect();
        assert_eq!(ids, ["ID:id-1", "ID:id-2", "ID:id-3"]);
        assert_eq!(ics.matches("BEGIN:VEVENT\r\n").count(), 3);
        assert_eq!(ics.matches("END:VEVENT\r\n").count(), 3);
    }

    #[test]
    fn test_vtimezone_block_is_byte_exact() {
        let ics = generate(&Header::default(), &[]);
        let expected = "BEGIN:VTIMEZONE\r\n\
            TZID:America/New_York\r\n\
            X-LIC-LOCATION:America/New_York\r\n\
            BEGIN:DAYLIGHT\r\n\
            TZOFFSETFROM:-0500\r\n\
            TZOFFSETTO:-0400\r\n\
            TZNAME:EDT\r\n\
            DTSTART:19700308T020000\r\n\
            RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r\n\
            END:DAYLIGHT\r\n\
            BEGIN:STANDARD\r\n\
            TZOFFSETFROM:-0400\r\n\
            TZOFFSETTO:-0500\r\n\
            TZNAME:EST\r\n\
            DTSTART:19701101T020000\r\n\
            RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r\n\
            END:STANDARD\r\n\
            END:VTIMEZONE\r\n\
            END:VCALENDAR\r\n";

        assert_eq!(ics, expected);
    }

    #[test]
    fn test_non_utf8_fields_are_written_unchanged() {
        let mut event = make_test_event(1);
        event.summary = b"SUMMARY:Caf\xe9".to_vec();
        let zone = ZoneProfile::lookup(DEFAULT_ZONE).unwrap();
        let mut out = Vec::new();
        write_calendar(&mut out, &Header::default(), zone, &[event]).unwrap();

        let needle = b"\r\nSUMMARY:Caf\xe9\r\n";
        assert!(out.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn test_no_events() {
        let ics = generate(&Header::default(), &[]);
        assert!(ics.starts_with("BEGIN:VTIMEZONE\r\n"));
        assert!(ics.ends_with("END:VTIMEZONE\r\nEND:VCALENDAR\r\n"));
    }
}
