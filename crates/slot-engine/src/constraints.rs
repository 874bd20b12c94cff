//! Scheduling constraints — the configuration value object passed into the
//! slot finder.
//!
//! All knobs are explicit fields rather than process-wide state so that every
//! invocation is a pure function of (events, constraints). Defaults mirror
//! the reference deployment: America/New_York, 1.5 hour appointments, lunch
//! 12:00–13:00, working day 08:00–17:00, 15 minutes between events.

use chrono::{Duration, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Scheduling constraints for a single slot search.
///
/// Deserializes with per-field defaults, so a partial JSON object (or an
/// empty one) resolves to the reference defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// IANA timezone identifier the search runs in (e.g., "America/New_York").
    pub timezone: String,
    /// Requested appointment length in hours. May be fractional.
    pub duration_hours: f64,
    /// Start of the lunch blackout window, 24-hour "HH:MM".
    pub lunch_start: String,
    /// End of the lunch blackout window, 24-hour "HH:MM".
    pub lunch_end: String,
    /// First hour of the working day (0-23).
    pub work_start_hour: u32,
    /// Hour the working day ends (0-23). No slot may extend past it.
    pub work_end_hour: u32,
    /// Minimum gap required on both sides of every existing event, in minutes.
    pub buffer_minutes: u32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            timezone: "America/New_York".to_string(),
            duration_hours: 1.5,
            lunch_start: "12:00".to_string(),
            lunch_end: "13:00".to_string(),
            work_start_hour: 8,
            work_end_hour: 17,
            buffer_minutes: 15,
        }
    }
}

impl Constraints {
    /// Parse the timezone field as a chrono-tz [`Tz`].
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(self.timezone.clone()))
    }

    /// Requested duration as a whole-minute [`Duration`].
    ///
    /// Fractional hours are rounded to the nearest minute once, here, so all
    /// downstream arithmetic stays on whole minutes and HH:MM output is exact.
    /// The search never spans more than one day, so anything over 24 hours is
    /// rejected up front rather than left to overflow datetime arithmetic.
    pub fn duration(&self) -> Result<Duration> {
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err(SlotError::InvalidDuration(self.duration_hours));
        }
        let minutes = (self.duration_hours * 60.0).round() as i64;
        if minutes == 0 || minutes > 24 * 60 {
            return Err(SlotError::InvalidDuration(self.duration_hours));
        }
        Ok(Duration::minutes(minutes))
    }

    /// The lunch blackout window as local times. Start must precede end.
    pub fn lunch_window(&self) -> Result<(NaiveTime, NaiveTime)> {
        let start = parse_hhmm(&self.lunch_start)?;
        let end = parse_hhmm(&self.lunch_end)?;
        if start >= end {
            return Err(SlotError::InvalidWindow {
                name: "lunch",
                start: self.lunch_start.clone(),
                end: self.lunch_end.clone(),
            });
        }
        Ok((start, end))
    }

    /// The working-day bounds as local times. Start must precede end.
    pub fn work_window(&self) -> Result<(NaiveTime, NaiveTime)> {
        let start = hour_to_time(self.work_start_hour)?;
        let end = hour_to_time(self.work_end_hour)?;
        if start >= end {
            return Err(SlotError::InvalidWindow {
                name: "working hours",
                start: format!("{:02}:00", self.work_start_hour),
                end: format!("{:02}:00", self.work_end_hour),
            });
        }
        Ok((start, end))
    }

    /// The inter-event buffer as a [`Duration`].
    pub fn buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_minutes))
    }

    /// Check every field, failing fast on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        self.duration()?;
        self.lunch_window()?;
        self.work_window()?;
        Ok(())
    }
}

/// Parse a 24-hour "HH:MM" string into a [`NaiveTime`].
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| SlotError::InvalidTimeOfDay(s.to_string()))
}

fn hour_to_time(hour: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, 0, 0)
        .ok_or_else(|| SlotError::InvalidTimeOfDay(format!("{:02}:00", hour)))
}
