//! Column-level detectors: semantic type rules and datetime formats.
//!
//! Both detectors are pure functions of a column's cells, so callers may run
//! them on independent columns concurrently.

pub mod datetime;
pub mod regexes;
pub mod rules;

pub use datetime::{DATE_FORMAT, DATETIME_FORMAT, detect_datetime_format, parse_datetime};
pub use rules::detect_sdtype;
