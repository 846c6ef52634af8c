//! Busy intervals (bookings and time-off) and the overlap test used against them.
//!
//! All intervals are half-open `[start, end)`. Adjacent intervals, where one
//! ends exactly when the other starts, do NOT overlap.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A committed booking. Only its provider and interval matter here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInterval {
    pub provider_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// An explicit exception during which the provider is unavailable.
/// May span several calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffInterval {
    pub provider_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// A plain `(start, end)` pair.
pub type Span = (NaiveDateTime, NaiveDateTime);

/// Two intervals overlap iff `max(a0, b0) < min(a1, b1)`.
pub fn overlaps(a: Span, b: Span) -> bool {
    a.0.max(b.0) < a.1.min(b.1)
}

/// Whether `span` overlaps any interval in `busy`.
pub fn overlaps_any(span: Span, busy: &[Span]) -> bool {
    busy.iter().any(|&b| overlaps(span, b))
}

/// Bookings for `provider_id` that start on `date`, as spans.
///
/// A booking is attributed to the day its start falls on; one that begins the
/// previous evening is not considered.
pub fn appointments_on(
    provider_id: &str,
    date: NaiveDate,
    appointments: &[AppointmentInterval],
) -> Vec<Span> {
    appointments
        .iter()
        .filter(|a| a.provider_id == provider_id && a.start_time.date() == date)
        .map(|a| (a.start_time, a.end_time))
        .collect()
}

/// Time-off for `provider_id` touching `date`, clipped to that day.
///
/// An entry qualifies when `start.date() <= date <= end.date()`. A start before
/// the day is clamped to 00:00 and an end after it to 23:59:59.999.
pub fn time_offs_on(provider_id: &str, date: NaiveDate, time_offs: &[TimeOffInterval]) -> Vec<Span> {
    let day_start = date.and_time(NaiveTime::MIN);
    let day_last = date.and_time(last_instant());

    time_offs
        .iter()
        .filter(|t| {
            t.provider_id == provider_id
                && t.start_time.date() <= date
                && date <= t.end_time.date()
        })
        .map(|t| {
            let start = if t.start_time.date() < date {
                day_start
            } else {
                t.start_time
            };
            let end = if t.end_time.date() > date {
                day_last
            } else {
                t.end_time
            };
            (start, end)
        })
        .collect()
}

fn last_instant() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        assert!(!overlaps((at(5, 9, 0), at(5, 10, 0)), (at(5, 10, 0), at(5, 11, 0))));
        assert!(!overlaps((at(5, 10, 0), at(5, 11, 0)), (at(5, 9, 0), at(5, 10, 0))));
    }

    #[test]
    fn partial_and_containing_spans_overlap() {
        let slot = (at(5, 9, 0), at(5, 10, 0));
        assert!(overlaps(slot, (at(5, 9, 30), at(5, 10, 30))));
        assert!(overlaps(slot, (at(5, 8, 0), at(5, 17, 0))));
        assert!(overlaps(slot, (at(5, 9, 15), at(5, 9, 45))));
        assert!(overlaps_any(slot, &[(at(5, 12, 0), at(5, 13, 0)), (at(5, 9, 59), at(5, 11, 0))]));
        assert!(!overlaps_any(slot, &[]));
    }

    #[test]
    fn multi_day_time_off_is_clipped_to_the_day() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
        let offs = vec![TimeOffInterval {
            provider_id: "prov1".into(),
            start_time: at(3, 12, 0),
            end_time: at(7, 9, 0),
        }];

        let clipped = time_offs_on("prov1", date, &offs);
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].0, at(5, 0, 0));
        assert_eq!(
            clipped[0].1,
            date.and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn time_off_ending_on_the_day_keeps_its_end() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
        let offs = vec![TimeOffInterval {
            provider_id: "prov1".into(),
            start_time: at(4, 18, 0),
            end_time: at(5, 10, 0),
        }];
        assert_eq!(time_offs_on("prov1", date, &offs), vec![(at(5, 0, 0), at(5, 10, 0))]);
        assert!(time_offs_on("prov2", date, &offs).is_empty());
    }

    #[test]
    fn appointments_filter_by_start_date() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
        let appts = vec![
            AppointmentInterval {
                provider_id: "prov1".into(),
                start_time: at(5, 10, 0),
                end_time: at(5, 11, 0),
            },
            AppointmentInterval {
                provider_id: "prov1".into(),
                start_time: at(4, 23, 0),
                end_time: at(5, 9, 30),
            },
            AppointmentInterval {
                provider_id: "prov2".into(),
                start_time: at(5, 10, 0),
                end_time: at(5, 11, 0),
            },
        ];
        assert_eq!(appointments_on("prov1", date, &appts), vec![(at(5, 10, 0), at(5, 11, 0))]);
    }
}
