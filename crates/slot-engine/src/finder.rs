//! Earliest-fit slot search over a normalized day schedule.
//!
//! Pads every busy interval by the buffer, clamps to working hours, adds the
//! lunch blackout, merges overlapping or touching blocks, then sweeps left to
//! right and returns the first gap that fits the requested duration.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constraints::Constraints;
use crate::error::Result;
use crate::normalizer::{DaySchedule, Interval};

/// The canonical failure message, fixed so callers can match on it.
pub const NO_SLOT_MESSAGE: &str = "No available slot found";

/// A successfully found appointment slot.
///
/// Serializes as `{"date":"YYYY-MM-DD","start_time":"HH:MM","end_time":"HH:MM"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedSlot {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// Outcome of a slot search. Strictly binary — there are no partial results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotResult {
    Found(ProposedSlot),
    /// Serializes as `{"error":"No available slot found"}`.
    NotFound { error: String },
}

impl SlotResult {
    /// The failure marker with the canonical message.
    pub fn not_found() -> Self {
        SlotResult::NotFound {
            error: NO_SLOT_MESSAGE.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SlotResult::Found(_))
    }

    pub fn slot(&self) -> Option<&ProposedSlot> {
        match self {
            SlotResult::Found(slot) => Some(slot),
            SlotResult::NotFound { .. } => None,
        }
    }
}

/// Compute the merged blocked intervals the sweep runs against.
///
/// Each busy interval is expanded by the buffer on both sides, then clamped
/// to the working-day bounds (padding never extends a block past them);
/// clamped-away blocks are dropped. The lunch blackout is added as given —
/// never padded, never clamped. The union is sorted and merged: blocks that
/// overlap or touch (`s2 <= e1`) collapse into one.
pub fn blocked_intervals(
    schedule: &DaySchedule,
    constraints: &Constraints,
) -> Result<Vec<Interval>> {
    let buffer = constraints.buffer();
    let (work_start_t, work_end_t) = constraints.work_window()?;
    let (lunch_start_t, lunch_end_t) = constraints.lunch_window()?;

    let work_start = NaiveDateTime::new(schedule.date, work_start_t);
    let work_end = NaiveDateTime::new(schedule.date, work_end_t);

    let mut blocked: Vec<Interval> = schedule
        .busy
        .iter()
        .map(|&(start, end)| (start - buffer, end + buffer))
        .map(|(start, end)| (start.max(work_start), end.min(work_end)))
        .filter(|&(start, end)| start < end)
        .collect();

    // Lunch is an absolute exclusion, independent of the calendar.
    blocked.push((
        NaiveDateTime::new(schedule.date, lunch_start_t),
        NaiveDateTime::new(schedule.date, lunch_end_t),
    ));

    blocked.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<Interval> = Vec::new();
    for (start, end) in blocked {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    Ok(merged)
}

/// Find the earliest slot of the requested duration on the schedule's day.
///
/// Earliest-fit, first-match: the sweep returns the first gap that fits, not
/// the tightest one. Acceptance is closed-open — a slot ending exactly at a
/// block start or at the end of the working day is valid.
///
/// # Errors
/// Returns `SlotError` for invalid constraints (non-positive duration,
/// inverted windows, unparsable times). An exhausted day is NOT an error;
/// it yields `SlotResult::not_found()`.
pub fn find_slot(schedule: &DaySchedule, constraints: &Constraints) -> Result<SlotResult> {
    let duration = constraints.duration()?;
    let (work_start_t, work_end_t) = constraints.work_window()?;
    let work_start = NaiveDateTime::new(schedule.date, work_start_t);
    let work_end = NaiveDateTime::new(schedule.date, work_end_t);

    let merged = blocked_intervals(schedule, constraints)?;

    let mut cursor = work_start;
    for &(block_start, block_end) in &merged {
        // Blocks at or past the end of the working day cannot bound a valid
        // gap; the trailing check below owns that region.
        if block_start >= work_end {
            break;
        }
        if cursor + duration <= block_start {
            return Ok(found(schedule.date, cursor, cursor + duration));
        }
        cursor = cursor.max(block_end);
    }

    if cursor + duration <= work_end {
        return Ok(found(schedule.date, cursor, cursor + duration));
    }

    Ok(SlotResult::not_found())
}

fn found(date: NaiveDate, start: NaiveDateTime, end: NaiveDateTime) -> SlotResult {
    SlotResult::Found(ProposedSlot {
        date,
        start_time: start.format("%H:%M").to_string(),
        end_time: end.format("%H:%M").to_string(),
    })
}
