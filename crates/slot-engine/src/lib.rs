//! # slot-engine
//!
//! Deterministic earliest-fit appointment slot finding for calendar agents.
//!
//! Given a calendar of busy events (any timezone), a requested duration,
//! working-hour bounds, a lunch blackout window, and a minimum inter-event
//! buffer, find the earliest valid slot on a single reference day. The
//! computation is pure: identical inputs produce bit-identical output, which
//! lets it serve as the reliable fallback when a non-deterministic reasoning
//! service fails.
//!
//! ## Modules
//!
//! - [`event`] — raw calendar event input
//! - [`constraints`] — the scheduling configuration value object
//! - [`normalizer`] — timezone conversion onto one reference day
//! - [`finder`] — pad, clamp, merge, sweep: the earliest-fit search
//! - [`error`] — error types

pub mod constraints;
pub mod error;
pub mod event;
pub mod finder;
pub mod normalizer;

use chrono::{NaiveDate, Utc};

pub use constraints::Constraints;
pub use error::{Result, SlotError};
pub use event::CalendarEvent;
pub use finder::{blocked_intervals, find_slot, ProposedSlot, SlotResult, NO_SLOT_MESSAGE};
pub use normalizer::{normalize, DaySchedule, Interval};

/// Find the earliest slot for `constraints` among `events`.
///
/// The reference day is the day of the earliest event in the target
/// timezone; with an empty calendar it is today in that timezone. Callers
/// that need a pinned date (tests, replay) should use
/// [`find_earliest_slot_on`].
pub fn find_earliest_slot(events: &[CalendarEvent], constraints: &Constraints) -> Result<SlotResult> {
    let tz = constraints.tz()?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    find_earliest_slot_on(events, constraints, today)
}

/// Like [`find_earliest_slot`], but with an explicit fallback date used when
/// the event list is empty. Fully deterministic.
pub fn find_earliest_slot_on(
    events: &[CalendarEvent],
    constraints: &Constraints,
    fallback_date: NaiveDate,
) -> Result<SlotResult> {
    let schedule = normalizer::normalize(events, &constraints.timezone, fallback_date)?;
    finder::find_slot(&schedule, constraints)
}
