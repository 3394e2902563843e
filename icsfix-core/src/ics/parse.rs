//! Reading the fixed-schema calendar export.
//!
//! The reader works line by line rather than through a general iCalendar
//! parser: each event is exactly eight property lines, and every byte of
//! those lines has to come back out unchanged except for the values the
//! converter rewrites. Lines are read as raw bytes, so text in a legacy
//! encoding passes through as-is.

use std::io::BufRead;

use tracing::{debug, warn};

use crate::error::{FixError, FixResult};
use crate::event::{Calendar, Event, FIELD_NAMES, Header};
use crate::schema::{BEGIN_EVENT, END_CALENDAR, END_EVENT, FIELD_COUNT};

/// Parse a whole calendar: header, then every event.
pub fn read_calendar<R: BufRead>(input: R) -> FixResult<Calendar> {
    let mut reader = EventReader::new(input);
    let header = reader.read_header()?;
    let events = reader.read_events()?;
    Ok(Calendar { header, events })
}

/// Line reader that tracks its position for error messages.
pub struct EventReader<R> {
    input: R,
    line: usize,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(input: R) -> Self {
        EventReader { input, line: 0 }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Collect header tokens up to and including the first `BEGIN:VEVENT`.
    ///
    /// Tokens are split on any whitespace, so a header line containing
    /// spaces comes back as several tokens. Anything after the marker on
    /// its own line is dropped.
    pub fn read_header(&mut self) -> FixResult<Header> {
        let mut tokens = Vec::new();

        while let Some(line) = self.next_line()? {
            let words = line
                .split(u8::is_ascii_whitespace)
                .filter(|word| !word.is_empty());
            for token in words {
                if token == BEGIN_EVENT.as_bytes() {
                    debug!(tokens = tokens.len(), line = self.line, "Header read");
                    return Ok(Header::new(tokens));
                }
                tokens.push(token.to_vec());
            }
        }

        Err(FixError::MissingMarker {
            expected: BEGIN_EVENT,
            line: self.line,
        })
    }

    /// Read events until `END:VCALENDAR` or end of input.
    ///
    /// Expects to be positioned just after a `BEGIN:VEVENT` line.
    pub fn read_events(&mut self) -> FixResult<Vec<Event>> {
        let mut events = Vec::new();

        loop {
            events.push(self.read_record()?);

            match self.next_marker()? {
                Some(marker) if marker == END_EVENT.as_bytes() => {}
                _ => {
                    return Err(FixError::MissingMarker {
                        expected: END_EVENT,
                        line: self.line,
                    });
                }
            }

            match self.next_marker()? {
                Some(marker) if marker == BEGIN_EVENT.as_bytes() => continue,
                Some(marker) if marker == END_CALENDAR.as_bytes() => break,
                None => break,
                Some(_) => {
                    return Err(FixError::MissingMarker {
                        expected: BEGIN_EVENT,
                        line: self.line,
                    });
                }
            }
        }

        debug!(events = events.len(), "Events read");
        Ok(events)
    }

    fn read_record(&mut self) -> FixResult<Event> {
        let first_line = self.line + 1;
        let mut fields: [Vec<u8>; FIELD_COUNT] = Default::default();

        for (index, (slot, name)) in fields.iter_mut().zip(FIELD_NAMES).enumerate() {
            let Some(mut line) = self.next_line()? else {
                return Err(FixError::MalformedRecord(format!(
                    "input ends after {index} of {FIELD_COUNT} fields of the event \
                     starting at line {first_line} (missing {name})"
                )));
            };

            // Record lines end in CRLF; only the LF is gone at this point.
            if line.last() == Some(&b'\r') {
                line.pop();
            } else {
                warn!(line = self.line, field = name, "Record line without CR terminator");
            }
            *slot = line;
        }

        Ok(Event::from_fields(fields))
    }

    /// Next non-blank line, trimmed.
    fn next_marker(&mut self) -> FixResult<Option<Vec<u8>>> {
        while let Some(line) = self.next_line()? {
            let trimmed = line.trim_ascii();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_vec()));
            }
        }
        Ok(None)
    }

    /// Next line with its `\n` removed but any `\r` kept.
    fn next_line(&mut self) -> FixResult<Option<Vec<u8>>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        Ok(Some(line))
    }
}
