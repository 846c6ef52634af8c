//! # slot-engine
//!
//! Bookable appointment slot generation for a single provider and day.
//!
//! Given a provider's recurring weekly availability rules, its existing bookings,
//! and its time-off, the engine cuts the day's availability window into
//! fixed-length slots and drops every slot that collides with something. The
//! computation is pure: all data comes in as arguments and nothing is cached.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_engine::{compute_available_slots, AvailabilityRule};
//!
//! let rules = vec![AvailabilityRule {
//!     provider_id: "prov1".into(),
//!     day_of_week: 0, // Monday
//!     start_time: "09:00".into(),
//!     end_time: "12:00".into(),
//!     is_active: true,
//!     valid_from: None,
//!     valid_until: None,
//! }];
//! let monday = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
//!
//! let slots = compute_available_slots("prov1", monday, &rules, &[], &[], 60).unwrap();
//! assert_eq!(slots.len(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`slots`] — the slot calculator
//! - [`rule`] — weekly availability rules and first-match selection
//! - [`interval`] — bookings, time-off, and the overlap test
//! - [`time_of_day`] — `HH:MM` value type
//! - [`duration`] — slot length resolution from service type and user history
//! - [`query`] — provider lookup envelope (request, response, unknown provider)
//! - [`error`] — Error types

pub mod duration;
pub mod error;
pub mod interval;
pub mod query;
pub mod rule;
pub mod slots;
pub mod time_of_day;

pub use duration::{resolve_slot_minutes, DurationSuggester, HistorySuggester, DEFAULT_SLOT_MINUTES};
pub use error::SchedulerError;
pub use interval::{AppointmentInterval, TimeOffInterval};
pub use query::{provider_availability, AvailabilityQuery, AvailabilityResponse, ScheduleData};
pub use rule::AvailabilityRule;
pub use slots::{compute_available_slots, try_compute_available_slots, Slot};
pub use time_of_day::TimeOfDay;
