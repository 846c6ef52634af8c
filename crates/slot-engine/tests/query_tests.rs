//! Tests for the provider availability lookup envelope.

use chrono::NaiveDate;
use slot_engine::duration::{FixedDefault, PastBooking, UserProfile};
use slot_engine::query::provider_availability_with_duration;
use slot_engine::{
    provider_availability, AvailabilityQuery, HistorySuggester, SchedulerError, ScheduleData,
};

const DATA: &str = r#"{
    "rules": [
        {"provider_id": "prov1", "day_of_week": 0, "start_time": "09:00", "end_time": "17:00",
         "is_active": true, "valid_from": null, "valid_until": null},
        {"provider_id": "prov1", "day_of_week": 2, "start_time": "10:00", "end_time": "16:00"},
        {"provider_id": "prov_dr_smith", "day_of_week": 0, "start_time": "09:00", "end_time": "12:00"},
        {"provider_id": "prov_dr_smith", "day_of_week": 0, "start_time": "13:00", "end_time": "17:00"},
        {"provider_id": "prov2", "day_of_week": 0, "start_time": "10:00", "end_time": "18:00"}
    ],
    "appointments": [
        {"provider_id": "prov1", "start_time": "2024-08-05T10:00:00", "end_time": "2024-08-05T11:00:00"},
        {"provider_id": "prov1", "start_time": "2024-08-07T14:00:00", "end_time": "2024-08-07T14:30:00"}
    ],
    "time_offs": [
        {"provider_id": "prov1", "start_time": "2024-08-05T12:00:00", "end_time": "2024-08-05T13:00:00"}
    ]
}"#;

fn data() -> ScheduleData {
    ScheduleData::from_json(DATA).unwrap()
}

fn query(date: &str, service_type: Option<&str>, user_id: Option<&str>) -> AvailabilityQuery {
    AvailabilityQuery {
        target_date: date.parse().unwrap(),
        service_type: service_type.map(str::to_string),
        user_id: user_id.map(str::to_string),
    }
}

#[test]
fn default_lookup_uses_hour_long_slots() {
    let resp = provider_availability("prov1", &query("2024-08-05", None, None), &data(), &FixedDefault)
        .unwrap();

    assert_eq!(resp.provider_id, "prov1");
    assert_eq!(resp.date, NaiveDate::from_ymd_opt(2024, 8, 5).unwrap());
    assert_eq!(resp.slot_duration_minutes, 60);
    assert_eq!(resp.available_slots.len(), 6);
    assert!(resp.available_slots.iter().all(|s| s.duration_minutes() == 60));
}

#[test]
fn service_type_without_user_maps_to_fixed_length() {
    let resp = provider_availability(
        "prov1",
        &query("2024-08-07", Some("quick_checkup"), None),
        &data(),
        &FixedDefault,
    )
    .unwrap();

    // Wednesday 10:00-16:00 in 15-minute steps, minus 14:00-14:30.
    assert_eq!(resp.slot_duration_minutes, 15);
    assert_eq!(resp.available_slots.len(), 24 - 2);
}

#[test]
fn user_history_drives_slot_length() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 10)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let suggester = HistorySuggester::new().with_profile(
        "user123",
        UserProfile {
            default_duration_minutes: Some(45),
            history: vec![PastBooking {
                service_type: "check-up".into(),
                start_time: start,
                end_time: start + chrono::TimeDelta::minutes(30),
            }],
        },
    );

    let resp = provider_availability(
        "prov_dr_smith",
        &query("2024-08-05", Some("check-up"), Some("user123")),
        &data(),
        &suggester,
    )
    .unwrap();

    assert_eq!(resp.slot_duration_minutes, 30);
    // Only the first Monday rule (09:00-12:00) is honored.
    assert_eq!(resp.available_slots.len(), 6);
}

#[test]
fn unknown_provider_is_not_found() {
    let err = provider_availability(
        "prov_missing",
        &query("2024-08-05", None, None),
        &data(),
        &FixedDefault,
    )
    .unwrap_err();
    assert!(matches!(err, SchedulerError::ProviderNotFound(ref id) if id == "prov_missing"));
}

#[test]
fn known_provider_without_rule_that_day_gets_empty_slots() {
    let resp = provider_availability("prov2", &query("2024-08-06", None, None), &data(), &FixedDefault)
        .unwrap();
    assert!(resp.available_slots.is_empty());
}

#[test]
fn explicit_zero_duration_is_rejected() {
    let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
    let err = provider_availability_with_duration("prov1", date, &data(), 0).unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidArgument(_)));
}

#[test]
fn response_serializes_slots_as_start_end_pairs() {
    let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
    let resp = provider_availability_with_duration("prov2", date, &data(), 240).unwrap();
    let json: serde_json::Value = serde_json::to_value(&resp).unwrap();

    assert_eq!(json["provider_id"], "prov2");
    assert_eq!(json["date"], "2024-08-05");
    assert_eq!(json["available_slots"][0]["start_time"], "2024-08-05T10:00:00");
    assert_eq!(json["available_slots"][0]["end_time"], "2024-08-05T14:00:00");
    assert_eq!(json["available_slots"][1]["start_time"], "2024-08-05T14:00:00");
    assert_eq!(json["available_slots"].as_array().unwrap().len(), 2);
}

#[test]
fn malformed_dataset_is_a_json_error() {
    let err = ScheduleData::from_json(r#"{"rules": [{"provider_id": 7}]}"#).unwrap_err();
    assert!(matches!(err, SchedulerError::Json(_)));
}

#[test]
fn missing_sections_default_to_empty() {
    let data = ScheduleData::from_json("{}").unwrap();
    assert!(data.rules.is_empty() && data.appointments.is_empty() && data.time_offs.is_empty());
}
