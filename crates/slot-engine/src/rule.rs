//! Recurring weekly availability rules and first-match rule selection.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time_of_day::TimeOfDay;

/// One recurring weekly window during which a provider is generally bookable.
///
/// `start_time` and `end_time` stay as the raw `HH:MM` text they were stored
/// with; they are parsed only when the rule is actually selected for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub provider_id: String,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Inclusive lower bound; `None` means unbounded.
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    /// Inclusive upper bound; `None` means unbounded.
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl AvailabilityRule {
    /// Whether this rule grants availability to `provider_id` on `date`.
    ///
    /// Matches on provider, weekday (Monday = 0), the active flag, and the
    /// optional inclusive validity bounds.
    pub fn applies_on(&self, provider_id: &str, date: NaiveDate) -> bool {
        self.provider_id == provider_id
            && u32::from(self.day_of_week) == date.weekday().num_days_from_monday()
            && self.is_active
            && self.valid_from.is_none_or(|from| from <= date)
            && self.valid_until.is_none_or(|until| date <= until)
    }

    /// Parse the rule's start and end times.
    ///
    /// # Errors
    /// Returns `SchedulerError::InvalidTimeFormat` if either bound is not `HH:MM`.
    pub fn times(&self) -> Result<(TimeOfDay, TimeOfDay)> {
        Ok((
            TimeOfDay::parse(&self.start_time)?,
            TimeOfDay::parse(&self.end_time)?,
        ))
    }

    /// The rule's availability window `[day_start, day_end)` on `date`.
    pub fn window_on(&self, date: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let (start, end) = self.times()?;
        Ok((start.on(date), end.on(date)))
    }
}

/// Select the rule that governs `provider_id` on `date`.
///
/// Only the first applicable rule in input order is honored. Further rules for
/// the same provider and day are ignored rather than merged.
pub fn select_rule<'a>(
    provider_id: &str,
    date: NaiveDate,
    rules: &'a [AvailabilityRule],
) -> Option<&'a AvailabilityRule> {
    let mut matching = rules.iter().filter(|r| r.applies_on(provider_id, date));
    let first = matching.next()?;

    let ignored = matching.count();
    if ignored > 0 {
        tracing::warn!(
            provider_id,
            %date,
            ignored,
            "multiple availability rules match; using the first ({}-{})",
            first.start_time,
            first.end_time
        );
    }

    Some(first)
}

/// Whether the provider has any rule on file at all, regardless of day or status.
pub fn has_any_rule(provider_id: &str, rules: &[AvailabilityRule]) -> bool {
    rules.iter().any(|r| r.provider_id == provider_id)
}
