//! Provider availability lookup: the request/response envelope around the slot
//! calculator, as served to a provider-facing endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::duration::{self, DurationSuggester};
use crate::error::{Result, SchedulerError};
use crate::interval::{AppointmentInterval, TimeOffInterval};
use crate::rule::{self, AvailabilityRule};
use crate::slots::{self, Slot};

/// Every rule, booking, and time-off entry known to the system, across all providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleData {
    #[serde(default)]
    pub rules: Vec<AvailabilityRule>,
    #[serde(default)]
    pub appointments: Vec<AppointmentInterval>,
    #[serde(default)]
    pub time_offs: Vec<TimeOffInterval>,
}

impl ScheduleData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An availability lookup for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub target_date: NaiveDate,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Slots offered for one provider on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub provider_id: String,
    pub date: NaiveDate,
    pub slot_duration_minutes: i64,
    pub available_slots: Vec<Slot>,
}

/// Answer an availability lookup.
///
/// The slot length is resolved from the query via `suggester` (see
/// [`duration::resolve_slot_minutes`]).
///
/// # Errors
/// Returns `SchedulerError::ProviderNotFound` if `provider_id` has no rules on
/// file at all. A provider that is known but simply not available on the date
/// gets an empty `available_slots`.
pub fn provider_availability(
    provider_id: &str,
    query: &AvailabilityQuery,
    data: &ScheduleData,
    suggester: &dyn DurationSuggester,
) -> Result<AvailabilityResponse> {
    let minutes = duration::resolve_slot_minutes(
        query.user_id.as_deref(),
        query.service_type.as_deref(),
        suggester,
    );
    provider_availability_with_duration(provider_id, query.target_date, data, minutes)
}

/// Answer an availability lookup with an explicit slot length.
pub fn provider_availability_with_duration(
    provider_id: &str,
    target_date: NaiveDate,
    data: &ScheduleData,
    slot_duration_minutes: i64,
) -> Result<AvailabilityResponse> {
    if !rule::has_any_rule(provider_id, &data.rules) {
        return Err(SchedulerError::ProviderNotFound(provider_id.to_string()));
    }

    let available_slots = slots::compute_available_slots(
        provider_id,
        target_date,
        &data.rules,
        &data.appointments,
        &data.time_offs,
        slot_duration_minutes,
    )?;

    Ok(AvailabilityResponse {
        provider_id: provider_id.to_string(),
        date: target_date,
        slot_duration_minutes,
        available_slots,
    })
}
