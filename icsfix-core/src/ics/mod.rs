//! Reading and writing the fixed-schema calendar text format.

mod generate;
mod parse;

pub use generate::write_calendar;
pub use parse::{EventReader, read_calendar};
