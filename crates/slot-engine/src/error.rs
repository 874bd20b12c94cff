//! Error types for slot-engine operations.
//!
//! Only invalid *input* is an error. "No slot found today" is a routine
//! outcome and is modeled as a value ([`crate::SlotResult`]), not an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid duration: {0} hours (must be positive)")]
    InvalidDuration(f64),

    #[error("Invalid time of day: {0} (expected 24-hour HH:MM)")]
    InvalidTimeOfDay(String),

    #[error("Invalid {name} window: start {start} is not before end {end}")]
    InvalidWindow {
        name: &'static str,
        start: String,
        end: String,
    },
}

pub type Result<T> = std::result::Result<T, SlotError>;
