//! ICS feed parsing using the icalendar crate's parser.
//!
//! The feed is a standard calendar-exchange document; only SUMMARY, DTSTART
//! and COLOR of each VEVENT are read.

use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{RevopsError, RevopsResult};
use crate::event::{EventStart, RawEvent};

/// Parse the downloaded feed into raw events.
///
/// A document that is not valid ICS is an error; an individual VEVENT with a
/// missing or malformed start is skipped with a diagnostic and never aborts
/// the batch.
pub fn parse_feed(content: &str) -> RevopsResult<Vec<RawEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| RevopsError::IcsParse(e.to_string()))?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(parse_vevent)
        .collect())
}

fn parse_vevent(vevent: &Component<'_>) -> Option<RawEvent> {
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(no title)".to_string());

    let Some(dtstart) = vevent.find_prop("DTSTART") else {
        log::warn!("Skipping event without DTSTART: {}", title);
        return None;
    };

    let Ok(start) = DatePerhapsTime::try_from(dtstart) else {
        log::warn!("Skipping event with malformed DTSTART: {}", title);
        return None;
    };

    let color = vevent
        .find_prop("COLOR")
        .map(|p| p.val.to_string())
        .filter(|v| !v.is_empty());

    Some(RawEvent {
        title,
        start: to_event_start(start),
        color,
    })
}

/// Convert icalendar's DatePerhapsTime to our EventStart, preserving
/// timezone info.
fn to_event_start(dpt: DatePerhapsTime) -> EventStart {
    match dpt {
        DatePerhapsTime::Date(d) => EventStart::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => EventStart::Utc(dt),
            icalendar::CalendarDateTime::Floating(naive) => EventStart::Floating(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, tzid } => EventStart::Zoned {
                datetime: date_time,
                tzid,
            },
        },
    }
}
