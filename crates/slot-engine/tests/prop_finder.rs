//! Property-based tests for the slot finder using proptest.
//!
//! Verifies the invariants that must hold for *any* calendar and constraint
//! combination — determinism, no overlap with padded busy time or lunch, and
//! earliest-fit — against a brute-force minute-grid oracle that knows nothing
//! about the sweep implementation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use proptest::prelude::*;
use slot_engine::{find_earliest_slot_on, CalendarEvent, Constraints, SlotResult};

const DAY: &str = "2026-03-16";

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// An event as (start minute of day, length in minutes).
fn arb_event() -> impl Strategy<Value = (i64, i64)> {
    (0i64..1410, 1i64..=240)
}

fn arb_events() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec(arb_event(), 0..6)
}

/// Duration in quarter-hour steps, 15 minutes to 5 hours.
fn arb_duration_hours() -> impl Strategy<Value = f64> {
    (1u32..=20).prop_map(|q| f64::from(q) * 0.25)
}

fn arb_buffer() -> impl Strategy<Value = u32> {
    0u32..=30
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day() -> NaiveDate {
    DAY.parse().unwrap()
}

fn at(minute_of_day: i64) -> NaiveDateTime {
    NaiveDateTime::new(day(), NaiveTime::MIN) + Duration::minutes(minute_of_day)
}

fn build_events(raw: &[(i64, i64)]) -> Vec<CalendarEvent> {
    raw.iter()
        .map(|&(start, len)| {
            let start_utc = Utc.from_utc_datetime(&at(start));
            let end_utc = Utc.from_utc_datetime(&at(start + len));
            CalendarEvent::new("busy", start_utc.fixed_offset(), end_utc.fixed_offset())
        })
        .collect()
}

fn constraints(duration_hours: f64, buffer_minutes: u32) -> Constraints {
    Constraints {
        timezone: "UTC".to_string(),
        duration_hours,
        buffer_minutes,
        ..Constraints::default()
    }
}

/// Independent oracle: the blocked regions a valid slot must avoid, built
/// directly from the rules (pad events, clamp to work hours, lunch as-is)
/// without going through the finder's merge/sweep.
fn oracle_blocks(raw: &[(i64, i64)], buffer_minutes: u32) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let work_start = at(8 * 60);
    let work_end = at(17 * 60);
    let day_end = at(24 * 60);
    let buffer = Duration::minutes(i64::from(buffer_minutes));

    let mut blocks: Vec<(NaiveDateTime, NaiveDateTime)> = raw
        .iter()
        .map(|&(start, len)| (at(start), at(start + len).min(day_end)))
        .map(|(s, e)| (s - buffer, e + buffer))
        .map(|(s, e)| (s.max(work_start), e.min(work_end)))
        .filter(|&(s, e)| s < e)
        .collect();
    blocks.push((at(12 * 60), at(13 * 60)));
    blocks
}

/// Would a slot starting at `start` with `duration` be valid?
fn fits(
    start: NaiveDateTime,
    duration: Duration,
    blocks: &[(NaiveDateTime, NaiveDateTime)],
) -> bool {
    let end = start + duration;
    if start < at(8 * 60) || end > at(17 * 60) {
        return false;
    }
    !blocks.iter().any(|&(bs, be)| start < be && bs < end)
}

fn parse_slot_start(result: &SlotResult) -> Option<NaiveDateTime> {
    result.slot().map(|slot| {
        let time = NaiveTime::parse_from_str(&slot.start_time, "%H:%M").unwrap();
        NaiveDateTime::new(slot.date, time)
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Identical inputs yield bit-identical output.
    #[test]
    fn finder_is_deterministic(
        raw in arb_events(),
        duration_hours in arb_duration_hours(),
        buffer in arb_buffer(),
    ) {
        let events = build_events(&raw);
        let c = constraints(duration_hours, buffer);

        let first = find_earliest_slot_on(&events, &c, day()).unwrap();
        let second = find_earliest_slot_on(&events, &c, day()).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// A returned slot never intersects padded busy time or lunch, and lies
    /// within working hours.
    #[test]
    fn found_slot_is_conflict_free(
        raw in arb_events(),
        duration_hours in arb_duration_hours(),
        buffer in arb_buffer(),
    ) {
        let events = build_events(&raw);
        let c = constraints(duration_hours, buffer);
        let duration = c.duration().unwrap();
        let blocks = oracle_blocks(&raw, buffer);

        let result = find_earliest_slot_on(&events, &c, day()).unwrap();
        if let Some(start) = parse_slot_start(&result) {
            prop_assert!(
                fits(start, duration, &blocks),
                "returned slot at {} conflicts with a blocked interval",
                start
            );
        }
    }

    /// Earliest-fit: no valid start exists on the minute grid strictly
    /// before the returned one; and when the finder reports failure, no
    /// minute of the working day fits at all.
    #[test]
    fn no_earlier_valid_start_exists(
        raw in arb_events(),
        duration_hours in arb_duration_hours(),
        buffer in arb_buffer(),
    ) {
        let events = build_events(&raw);
        let c = constraints(duration_hours, buffer);
        let duration = c.duration().unwrap();
        let blocks = oracle_blocks(&raw, buffer);

        let result = find_earliest_slot_on(&events, &c, day()).unwrap();
        let scan_end = match parse_slot_start(&result) {
            Some(start) => start,
            None => at(17 * 60),
        };

        let mut cursor = at(8 * 60);
        while cursor < scan_end {
            prop_assert!(
                !fits(cursor, duration, &blocks),
                "start {} fits but the finder chose {:?}",
                cursor,
                result
            );
            cursor += Duration::minutes(1);
        }
    }
}
