//! Raw calendar event input.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A busy period on the source calendar.
///
/// Endpoints carry their original UTC offset (RFC 3339 in serialized form);
/// the normalizer converts them to the requested timezone before any
/// arithmetic. `name` is informational only and never influences scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub name: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl CalendarEvent {
    pub fn new(
        name: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }
}
