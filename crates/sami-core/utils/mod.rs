//! Utility functions and shared types for SAMI core
//!
//! Contains the crate-wide error type and the millisecond time codec used by
//! both the parser and the write path.

pub mod errors;
pub mod time;

pub use errors::{CoreError, Result};
pub use time::{compose_duration, duration_to_millis, format_sami_time, parse_millis};
