//! Slot length resolution.
//!
//! The slot length for an availability lookup comes from a suggestion source
//! keyed by user and service type. Without a user, a fixed service-type table
//! applies, and everything else falls back to [`DEFAULT_SLOT_MINUTES`].

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Slot length used when nothing more specific is known.
pub const DEFAULT_SLOT_MINUTES: i64 = 60;

/// Slot lengths for well-known service types, used when no user is given.
pub fn service_type_minutes(service_type: &str) -> Option<i64> {
    match service_type {
        "quick_checkup" => Some(15),
        "standard_consultation" => Some(45),
        _ => None,
    }
}

/// Source of per-user slot length suggestions.
pub trait DurationSuggester {
    fn suggest_minutes(&self, user_id: &str, service_type: Option<&str>) -> i64;
}

/// Suggester that always answers [`DEFAULT_SLOT_MINUTES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDefault;

impl DurationSuggester for FixedDefault {
    fn suggest_minutes(&self, _user_id: &str, _service_type: Option<&str>) -> i64 {
        DEFAULT_SLOT_MINUTES
    }
}

/// A past booking used to learn a user's typical appointment length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastBooking {
    pub service_type: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl PastBooking {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// What is known about a user for slot length purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub default_duration_minutes: Option<i64>,
    #[serde(default)]
    pub history: Vec<PastBooking>,
}

/// In-memory suggester backed by user profiles.
///
/// For a service type the user has booked before, the most common past length
/// wins (ties go to the length seen first). Otherwise the user's own default is
/// used, then [`DEFAULT_SLOT_MINUTES`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySuggester {
    #[serde(default)]
    pub profiles: HashMap<String, UserProfile>,
}

impl HistorySuggester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, user_id: impl Into<String>, profile: UserProfile) -> Self {
        self.profiles.insert(user_id.into(), profile);
        self
    }
}

impl DurationSuggester for HistorySuggester {
    fn suggest_minutes(&self, user_id: &str, service_type: Option<&str>) -> i64 {
        let Some(profile) = self.profiles.get(user_id) else {
            return DEFAULT_SLOT_MINUTES;
        };

        if let Some(service) = service_type {
            let durations = profile
                .history
                .iter()
                .filter(|b| b.service_type == service)
                .map(PastBooking::duration_minutes);
            if let Some(common) = most_common(durations) {
                return common;
            }
        }

        profile
            .default_duration_minutes
            .unwrap_or(DEFAULT_SLOT_MINUTES)
    }
}

/// Most frequent value; on a tie the value that appeared first wins.
fn most_common(values: impl Iterator<Item = i64>) -> Option<i64> {
    // (value, count) in first-seen order
    let mut counts: Vec<(i64, usize)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }

    let mut best: Option<(i64, usize)> = None;
    for (v, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((v, n));
        }
    }
    best.map(|(v, _)| v)
}

/// Resolve the slot length for a lookup.
///
/// - With a `user_id`, the suggester decides.
/// - Without one, known service types map through [`service_type_minutes`].
/// - Anything else gets [`DEFAULT_SLOT_MINUTES`].
pub fn resolve_slot_minutes(
    user_id: Option<&str>,
    service_type: Option<&str>,
    suggester: &dyn DurationSuggester,
) -> i64 {
    match (user_id, service_type) {
        (Some(user), service) => suggester.suggest_minutes(user, service),
        (None, Some(service)) => service_type_minutes(service).unwrap_or(DEFAULT_SLOT_MINUTES),
        (None, None) => DEFAULT_SLOT_MINUTES,
    }
}
