//! Calendar data model.

use crate::schema::FIELD_COUNT;

/// Field names in record order, used in error messages and logs.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "id",
    "summary",
    "timestamp",
    "start",
    "description",
    "location",
    "rule",
    "duration",
];

/// One event record: eight property lines without their line endings.
///
/// Lines are kept as raw bytes, since exports are not always valid UTF-8.
/// Only `start` and `rule` are ever rewritten. `timestamp` is read for its
/// month; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Vec<u8>,
    pub summary: Vec<u8>,
    pub timestamp: Vec<u8>,
    pub start: Vec<u8>,
    pub description: Vec<u8>,
    pub location: Vec<u8>,
    pub rule: Vec<u8>,
    pub duration: Vec<u8>,
}

impl Event {
    /// Build an event from its lines in record order.
    pub fn from_fields(fields: [Vec<u8>; FIELD_COUNT]) -> Self {
        let [
            id,
            summary,
            timestamp,
            start,
            description,
            location,
            rule,
            duration,
        ] = fields;
        Event {
            id,
            summary,
            timestamp,
            start,
            description,
            location,
            rule,
            duration,
        }
    }

    /// The eight lines in record order.
    pub fn fields(&self) -> [&[u8]; FIELD_COUNT] {
        [
            self.id.as_slice(),
            self.summary.as_slice(),
            self.timestamp.as_slice(),
            self.start.as_slice(),
            self.description.as_slice(),
            self.location.as_slice(),
            self.rule.as_slice(),
            self.duration.as_slice(),
        ]
    }
}

/// Whitespace-delimited tokens that precede the first event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    tokens: Vec<Vec<u8>>,
}

impl Header {
    pub fn new(tokens: Vec<Vec<u8>>) -> Self {
        Header { tokens }
    }

    pub fn tokens(&self) -> &[Vec<u8>] {
        &self.tokens
    }
}

/// A parsed calendar: its header plus events in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    pub header: Header,
    pub events: Vec<Event>,
}
