//! Raw record → `Event` normalization.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{IcalFmtError, IcalFmtResult};
use crate::event::{Event, Events};
use crate::ics::decode::{RawCalendar, RawEvent, RawProperty};
use crate::string_set::Categories;

const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";

/// Normalize every record of a decoded calendar.
///
/// The first failing record aborts the whole batch; there is no partial result.
pub fn normalize_calendar(calendar: &RawCalendar) -> IcalFmtResult<Events> {
    let events = calendar
        .events
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_event(raw, index))
        .collect::<IcalFmtResult<Events>>()?;

    debug!(events = events.len(), "normalized calendar");
    Ok(events)
}

/// Normalize one raw record. `index` is its position in the feed, used in errors.
pub fn normalize_event(raw: &RawEvent, index: usize) -> IcalFmtResult<Event> {
    let props = raw
        .properties
        .as_ref()
        .ok_or(IcalFmtError::MissingProperties { index })?;

    let (start, all_day) = match non_empty(props, "DTSTART") {
        Some(value) => decode_date_field("DTSTART", value, index)?,
        None => {
            return Err(IcalFmtError::DateParse {
                field: "DTSTART",
                index,
                value: String::new(),
            });
        }
    };

    let end = match non_empty(props, "DTEND") {
        Some(value) => Some(decode_date_field("DTEND", value, index)?),
        None => None,
    };

    let mut event = Event::new(start);
    event.all_day = all_day;
    event.end = normalize_end(start, end);
    event.categories = split_categories(text(props, "CATEGORIES"));
    event.id = unescape_text(text(props, "UID"));
    event.summary = unescape_text(text(props, "SUMMARY"));
    event.description = unescape_text(text(props, "DESCRIPTION"));
    event.location = unescape_text(text(props, "LOCATION"));

    Ok(event)
}

/// Apply the zero-interval collapse and the exclusive all-day end correction.
///
/// A date-only end is the midnight after the last included day, so it moves
/// back one day. A one-day all-day event then has `end == start` and loses
/// its end like any other zero-length interval.
fn normalize_end(
    start: NaiveDateTime,
    end: Option<(NaiveDateTime, bool)>,
) -> Option<NaiveDateTime> {
    let (end, date_only) = end?;
    if end == start {
        return None;
    }

    let end = if date_only {
        end.checked_sub_days(Days::new(1)).unwrap_or(end)
    } else {
        end
    };

    (end != start).then_some(end)
}

fn decode_date_field(
    field: &'static str,
    value: &str,
    index: usize,
) -> IcalFmtResult<(NaiveDateTime, bool)> {
    parse_ics_date(value).ok_or_else(|| IcalFmtError::DateParse {
        field,
        index,
        value: value.to_string(),
    })
}

/// Decode an iCalendar DATE or DATE-TIME value.
///
/// A trailing `Z` is dropped, so UTC times read as naive wall-clock times.
/// A bare date reads as midnight; the returned flag is true in that case.
pub fn parse_ics_date(value: &str) -> Option<(NaiveDateTime, bool)> {
    let value = value.trim().trim_end_matches('Z');

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
        return Some((dt, false));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .map(|d| (d.and_time(chrono::NaiveTime::MIN), true))
}

/// Split a CATEGORIES value on unescaped commas, trimming and dropping empty tokens.
pub fn split_categories(value: &str) -> Categories {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ',' => tokens.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    tokens.push(current);

    tokens
        .iter()
        .map(|t| unescape_text(t.trim()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Undo iCalendar escaping of commas and backslashes.
///
/// `\,` becomes `,` and `\\` becomes `\`. Other escapes are left as written.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek().filter(|n| matches!(n, ',' | '\\')) {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }

    out
}

fn text<'a>(props: &'a BTreeMap<String, RawProperty>, key: &str) -> &'a str {
    props.get(key).map(|p| p.value.as_str()).unwrap_or_default()
}

fn non_empty<'a>(props: &'a BTreeMap<String, RawProperty>, key: &str) -> Option<&'a str> {
    Some(text(props, key).trim()).filter(|v| !v.is_empty())
}
