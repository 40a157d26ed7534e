//! Raw and classified calendar event types.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One calendar entry as it comes out of the feed. No ordering or dedup is
/// assumed; the classifier consumes these once per extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub title: String,
    pub start: EventStart,
    /// COLOR property value, if the organizer tagged the event.
    pub color: Option<String>,
}

/// Start time of an event, preserving whatever timezone information the feed
/// carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventStart {
    /// All-day event (date only).
    Date(NaiveDate),
    Utc(DateTime<Utc>),
    /// No offset in the feed; taken as already being in the local timezone.
    Floating(NaiveDateTime),
    Zoned { datetime: NaiveDateTime, tzid: String },
}

impl EventStart {
    /// Resolve the start to wall-clock time in `tz`.
    ///
    /// All-day events start at local midnight. A zoned start with a TZID we
    /// cannot resolve is treated as floating. Returns `None` when the local
    /// time does not exist (DST gap); the caller skips the event.
    pub fn localize(&self, tz: Tz) -> Option<DateTime<Tz>> {
        match self {
            EventStart::Date(date) => resolve_local(tz, date.and_time(NaiveTime::MIN)),
            EventStart::Utc(dt) => Some(dt.with_timezone(&tz)),
            EventStart::Floating(naive) => resolve_local(tz, *naive),
            EventStart::Zoned { datetime, tzid } => match tzid.parse::<Tz>() {
                Ok(source_tz) => {
                    resolve_local(source_tz, *datetime).map(|dt| dt.with_timezone(&tz))
                }
                Err(_) => {
                    log::debug!("Unknown TZID '{}', treating start as local time", tzid);
                    resolve_local(tz, *datetime)
                }
            },
        }
    }
}

fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        // Clock rolled back; the first occurrence is as good as any.
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Start of `date` in `tz`: local midnight, or the first valid instant after
/// it when midnight falls in a spring-forward gap (Chile's transitions
/// happen at midnight).
pub fn local_day_start(date: NaiveDate, tz: Tz) -> Option<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);

    resolve_local(tz, midnight).or_else(|| resolve_local(tz, midnight + Duration::hours(1)))
}

/// An event that was attributed to a setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEvent {
    pub title: String,
    /// Local wall-clock start time.
    pub time: NaiveTime,
    pub color: String,
    pub attended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::America::Santiago;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_floating_start_is_taken_as_local() {
        let start = EventStart::Floating(naive(2026, 1, 15, 9, 0));
        let local = start.localize(Santiago).unwrap();

        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_utc_start_is_converted() {
        // Santiago is UTC-3 in January (summer time).
        let start = EventStart::Utc(naive(2026, 1, 15, 12, 0).and_utc());
        let local = start.localize(Santiago).unwrap();

        assert_eq!(local.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_all_day_event_starts_at_local_midnight() {
        let start = EventStart::Date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        let local = start.localize(Santiago).unwrap();

        assert_eq!(local.time(), NaiveTime::MIN);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_zoned_start_with_unknown_tzid_falls_back_to_local() {
        let start = EventStart::Zoned {
            datetime: naive(2026, 1, 15, 9, 0),
            tzid: "Not/A_Zone".into(),
        };
        let local = start.localize(Santiago).unwrap();

        assert_eq!(local.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_local_day_start_is_midnight_on_a_plain_day() {
        let start = local_day_start(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(), Santiago)
            .unwrap();

        assert_eq!(start.time(), NaiveTime::MIN);
        // Santiago is UTC-3 in January.
        assert_eq!(start.to_utc().time(), NaiveTime::from_hms_opt(3, 0, 0).unwrap());
    }

    #[test]
    fn test_local_day_start_skips_the_spring_forward_gap() {
        // Santiago enters DST on 2026-09-06: midnight jumps straight to
        // 01:00, so the day starts there.
        let start = local_day_start(NaiveDate::from_ymd_opt(2026, 9, 6).unwrap(), Santiago)
            .unwrap();

        assert_eq!(start.time(), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn test_zoned_start_is_converted_across_zones() {
        let start = EventStart::Zoned {
            datetime: naive(2026, 1, 15, 7, 0),
            tzid: "America/New_York".into(),
        };
        // New York is UTC-5 in January, Santiago UTC-3: 07:00 NY = 09:00 SCL.
        let local = start.localize(Santiago).unwrap();

        assert_eq!(local.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }
}
