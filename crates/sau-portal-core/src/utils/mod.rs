//! Formatting helpers and serial-number allocation.

pub mod format;
pub mod serial;

pub use format::{financial_year, format_date, truncate_string};
pub use serial::next_serial;
