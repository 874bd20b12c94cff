//! Interval normalization — raw events to a single-day busy timeline.
//!
//! Converts events from their source offsets to the target timezone, picks
//! the reference day, clips every event to that day, and returns the busy
//! intervals sorted by start time in local wall-clock terms.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::event::CalendarEvent;

/// A busy time range in local wall-clock time, invariant `start < end`.
pub type Interval = (NaiveDateTime, NaiveDateTime);

/// The normalized busy timeline for one reference day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    /// The reference day the search is anchored to.
    pub date: NaiveDate,
    /// Busy intervals on that day, sorted by (start, end), all clipped to
    /// the day's bounds. May still overlap; merging happens in the finder.
    pub busy: Vec<Interval>,
}

/// Normalize raw events onto a single reference day in the target timezone.
///
/// The reference day is the local calendar date of the earliest event start
/// after conversion; when the event list is empty it is `fallback_date`
/// (typically "today" in the target zone — passed explicitly so callers can
/// pin it for deterministic replay).
///
/// Events that do not intersect the reference day are dropped; events
/// straddling midnight are clipped to the day. Zero and negative length
/// intervals are discarded.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier.
pub fn normalize(
    events: &[CalendarEvent],
    timezone: &str,
    fallback_date: NaiveDate,
) -> Result<DaySchedule> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))?;

    // Convert every endpoint to the target zone's wall clock. Standard
    // timezone-aware conversion only — no manual offset arithmetic.
    let converted: Vec<Interval> = events
        .iter()
        .map(|e| {
            (
                e.start.with_timezone(&tz).naive_local(),
                e.end.with_timezone(&tz).naive_local(),
            )
        })
        .collect();

    let date = converted
        .iter()
        .map(|&(start, _)| start)
        .min()
        .map(|earliest| earliest.date())
        .unwrap_or(fallback_date);

    let day_start = NaiveDateTime::new(date, NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);

    // Clip to the reference day; dropping everything that does not intersect
    // it also discards zero-length and inverted intervals.
    let mut busy: Vec<Interval> = converted
        .into_iter()
        .map(|(start, end)| (start.max(day_start), end.min(day_end)))
        .filter(|&(start, end)| start < end)
        .collect();

    // Stable sort for deterministic output on ties.
    busy.sort_by_key(|&(start, end)| (start, end));

    Ok(DaySchedule { date, busy })
}
