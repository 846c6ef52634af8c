//! WASM bindings for slot-engine.
//!
//! Exposes slot computation and the provider availability lookup to JavaScript
//! via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::duration::FixedDefault;
use slot_engine::{AvailabilityQuery, HistorySuggester, ScheduleData, Slot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start_time: String,
    end_time: String,
    duration_minutes: i64,
}

impl From<&Slot> for SlotDto {
    fn from(s: &Slot) -> Self {
        Self {
            start_time: s.start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end_time: s.end_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            duration_minutes: s.duration_minutes(),
        }
    }
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse::<NaiveDate>()
        .map_err(|e| js_error(&format!("Invalid date '{}'", s), e))
}

fn parse_schedule(json: &str) -> Result<ScheduleData, JsValue> {
    ScheduleData::from_json(json).map_err(|e| js_error("Invalid schedule JSON", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the bookable slots for one provider on one date.
///
/// `data_json` must be a JSON object with `rules`, `appointments`, and
/// `time_offs` arrays. Returns a JSON string containing an array of
/// `{start_time, end_time, duration_minutes}` objects.
///
/// # Arguments
/// - `provider_id` -- Provider to compute slots for
/// - `target_date` -- ISO date (e.g., "2024-08-05")
/// - `data_json` -- Schedule dataset covering any number of providers
/// - `slot_duration_minutes` -- Length of each slot; must be positive
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(
    provider_id: &str,
    target_date: &str,
    data_json: &str,
    slot_duration_minutes: i32,
) -> Result<String, JsValue> {
    let date = parse_date(target_date)?;
    let data = parse_schedule(data_json)?;

    let slots = slot_engine::compute_available_slots(
        provider_id,
        date,
        &data.rules,
        &data.appointments,
        &data.time_offs,
        i64::from(slot_duration_minutes),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| js_error("Serialization error", e))
}

/// Answer an availability lookup for one provider.
///
/// `query_json` is `{target_date, service_type?, user_id?}`. `profiles_json`,
/// when given, is `{"profiles": {...}}` with per-user booking history used to
/// pick the slot length. Returns the response envelope as a JSON string.
#[wasm_bindgen(js_name = "providerAvailability")]
pub fn provider_availability(
    provider_id: &str,
    query_json: &str,
    data_json: &str,
    profiles_json: Option<String>,
) -> Result<String, JsValue> {
    let query: AvailabilityQuery =
        serde_json::from_str(query_json).map_err(|e| js_error("Invalid query JSON", e))?;
    let data = parse_schedule(data_json)?;

    let response = match profiles_json.as_deref() {
        Some(json) => {
            let suggester: HistorySuggester =
                serde_json::from_str(json).map_err(|e| js_error("Invalid profiles JSON", e))?;
            slot_engine::provider_availability(provider_id, &query, &data, &suggester)
        }
        None => slot_engine::provider_availability(provider_id, &query, &data, &FixedDefault),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&response).map_err(|e| js_error("Serialization error", e))
}
