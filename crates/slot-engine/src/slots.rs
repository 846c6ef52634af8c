//! Bookable slot generation for a single provider and day.
//!
//! The pipeline is: pick the governing weekly rule, turn it into a window on the
//! target date, collect that day's bookings and clipped time-off, then walk the
//! window left to right in fixed steps and keep every candidate that overlaps
//! nothing.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::interval::{self, AppointmentInterval, Span, TimeOffInterval};
use crate::rule::{self, AvailabilityRule};

/// A bookable interval, always exactly the requested slot length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl Slot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    fn span(&self) -> Span {
        (self.start_time, self.end_time)
    }
}

/// Compute the bookable slots for `provider_id` on `target_date`.
///
/// `rules`, `appointments`, and `time_offs` may hold data for any number of
/// providers; filtering is done here. An empty result is a normal outcome and
/// means either no rule covers the day or every candidate is taken.
///
/// A rule with a malformed start or end time is logged and treated as no
/// availability. Use [`try_compute_available_slots`] to observe that failure.
///
/// # Errors
/// Returns `SchedulerError::InvalidArgument` if `slot_duration_minutes` is not positive.
pub fn compute_available_slots(
    provider_id: &str,
    target_date: NaiveDate,
    rules: &[AvailabilityRule],
    appointments: &[AppointmentInterval],
    time_offs: &[TimeOffInterval],
    slot_duration_minutes: i64,
) -> Result<Vec<Slot>> {
    match try_compute_available_slots(
        provider_id,
        target_date,
        rules,
        appointments,
        time_offs,
        slot_duration_minutes,
    ) {
        Err(SchedulerError::InvalidTimeFormat(detail)) => {
            tracing::error!(
                provider_id,
                %target_date,
                "invalid time format in availability rule: {}",
                detail
            );
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Like [`compute_available_slots`], but a malformed rule time is returned as
/// `SchedulerError::InvalidTimeFormat` instead of being swallowed.
pub fn try_compute_available_slots(
    provider_id: &str,
    target_date: NaiveDate,
    rules: &[AvailabilityRule],
    appointments: &[AppointmentInterval],
    time_offs: &[TimeOffInterval],
    slot_duration_minutes: i64,
) -> Result<Vec<Slot>> {
    let step = slot_step(slot_duration_minutes)?;

    let Some(rule) = rule::select_rule(provider_id, target_date, rules) else {
        tracing::debug!(provider_id, %target_date, "no availability rule for this day");
        return Ok(Vec::new());
    };

    let (day_start, day_end) = rule.window_on(target_date)?;
    let booked = interval::appointments_on(provider_id, target_date, appointments);
    let off = interval::time_offs_on(provider_id, target_date, time_offs);

    let slots = generate_slots(day_start, day_end, step, &booked, &off);
    tracing::debug!(
        provider_id,
        %target_date,
        rule_start = %rule.start_time,
        rule_end = %rule.end_time,
        booked = booked.len(),
        time_off = off.len(),
        slots = slots.len(),
        "computed available slots"
    );

    Ok(slots)
}

fn slot_step(slot_duration_minutes: i64) -> Result<TimeDelta> {
    if slot_duration_minutes <= 0 {
        return Err(SchedulerError::InvalidArgument(format!(
            "slot duration must be positive, got {} minutes",
            slot_duration_minutes
        )));
    }
    TimeDelta::try_minutes(slot_duration_minutes).ok_or_else(|| {
        SchedulerError::InvalidArgument(format!(
            "slot duration of {} minutes is too large",
            slot_duration_minutes
        ))
    })
}

/// Walk `[day_start, day_end)` in `step` increments. A candidate that would run
/// past `day_end` ends generation; no partial slot is emitted.
fn generate_slots(
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
    step: TimeDelta,
    booked: &[Span],
    off: &[Span],
) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut cursor = day_start;

    while cursor < day_end {
        let Some(end) = cursor.checked_add_signed(step) else {
            break;
        };
        if end > day_end {
            break;
        }

        let candidate = Slot {
            start_time: cursor,
            end_time: end,
        };
        if !interval::overlaps_any(candidate.span(), booked)
            && !interval::overlaps_any(candidate.span(), off)
        {
            slots.push(candidate);
        }

        cursor = end;
    }

    slots
}
