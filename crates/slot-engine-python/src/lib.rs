//! # slot-engine-python
//!
//! Python bindings for the slot calculator, built with PyO3.
//!
//! Exposes the following functions to Python as the `appointment_slots` module:
//!
//! - `compute_available_slots(...)` -- schedule dataset -> JSON array of slots
//! - `provider_availability(...)` -- availability query -> JSON response envelope

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use slot_engine::duration::FixedDefault;
use slot_engine::{AvailabilityQuery, HistorySuggester, ScheduleData};

fn value_error(e: impl ToString) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_date(s: &str) -> PyResult<NaiveDate> {
    s.parse::<NaiveDate>()
        .map_err(|e| PyValueError::new_err(format!("Invalid date '{}': {}", s, e)))
}

/// Compute the bookable slots for one provider on one date.
///
/// Args:
///     provider_id: The provider to compute slots for.
///     target_date: ISO date string (e.g., "2024-08-05").
///     data_json: JSON object with `rules`, `appointments`, and `time_offs` arrays
///         covering any number of providers.
///     slot_duration_minutes: Length of each slot in minutes (default 60).
///
/// Returns:
///     A JSON string containing an array of `{start_time, end_time}` objects.
///
/// Raises:
///     ValueError: If the inputs do not parse or the slot length is not positive.
#[pyfunction]
#[pyo3(signature = (provider_id, target_date, data_json, slot_duration_minutes=60))]
fn compute_available_slots(
    provider_id: &str,
    target_date: &str,
    data_json: &str,
    slot_duration_minutes: i64,
) -> PyResult<String> {
    let date = parse_date(target_date)?;
    let data = ScheduleData::from_json(data_json).map_err(value_error)?;

    let slots = slot_engine::compute_available_slots(
        provider_id,
        date,
        &data.rules,
        &data.appointments,
        &data.time_offs,
        slot_duration_minutes,
    )
    .map_err(value_error)?;

    serde_json::to_string(&slots).map_err(value_error)
}

/// Answer an availability lookup for one provider.
///
/// Args:
///     provider_id: The provider to look up.
///     query_json: JSON object with `target_date` and optional `service_type`
///         and `user_id`.
///     data_json: Schedule dataset, as for `compute_available_slots`.
///     profiles_json: Optional JSON object `{"profiles": {...}}` with per-user
///         booking history used to pick the slot length.
///
/// Returns:
///     A JSON string with `provider_id`, `date`, `slot_duration_minutes`, and
///     `available_slots`.
///
/// Raises:
///     ValueError: If the provider has no rules on file or any input is invalid.
#[pyfunction]
#[pyo3(signature = (provider_id, query_json, data_json, profiles_json=None))]
fn provider_availability(
    provider_id: &str,
    query_json: &str,
    data_json: &str,
    profiles_json: Option<&str>,
) -> PyResult<String> {
    let query: AvailabilityQuery = serde_json::from_str(query_json).map_err(value_error)?;
    let data = ScheduleData::from_json(data_json).map_err(value_error)?;

    let response = match profiles_json {
        Some(json) => {
            let suggester: HistorySuggester = serde_json::from_str(json).map_err(value_error)?;
            slot_engine::provider_availability(provider_id, &query, &data, &suggester)
        }
        None => slot_engine::provider_availability(provider_id, &query, &data, &FixedDefault),
    }
    .map_err(value_error)?;

    serde_json::to_string(&response).map_err(value_error)
}

/// The `appointment_slots` Python module, implemented in Rust via PyO3.
#[pymodule]
fn appointment_slots(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_available_slots, m)?)?;
    m.add_function(wrap_pyfunction!(provider_availability, m)?)?;
    Ok(())
}
