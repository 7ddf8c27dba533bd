//! The processing entry point: decode → normalize → filter/edit → sort → split.

use tracing::debug;

use crate::category_edit::{apply_category_edits, parse_category_edits};
use crate::config::{FormatConfig, Grouping};
use crate::date_range::{DateRange, month_of, year_of};
use crate::error::IcalFmtResult;
use crate::event::Events;
use crate::ics::{decode_calendar, normalize_calendar};

/// Decode and normalize .ics text, then run it through [`run`].
pub fn process_ics(content: &str, config: &FormatConfig) -> IcalFmtResult<Events> {
    let calendar = decode_calendar(content)?;
    let events = normalize_calendar(&calendar)?;
    run(events, config)
}

/// Apply the configured filters and category edits, sort, and optionally split
/// multi-day events.
pub fn run(mut events: Events, config: &FormatConfig) -> IcalFmtResult<Events> {
    config.validate()?;

    if let Some(year) = config.year {
        events = events.filter_time(year_of, year);
        debug!(year, remaining = events.len(), "filtered by year");
    }
    if let Some(month) = config.month {
        events = events.filter_time(month_of, month as i32);
        debug!(month, remaining = events.len(), "filtered by month");
    }

    let range = DateRange::from_args(config.from.as_deref(), config.to.as_deref())?;
    if !range.is_unbounded() {
        events = events.between(&range);
        debug!(?range, remaining = events.len(), "filtered by window");
    }

    if let Some(list) = config.categories.as_deref() {
        apply_category_edits(&mut events, &parse_category_edits(list));
    }

    events.sort();

    if config.split_long {
        events = events.split_long_events(&config.start_prefix, &config.end_prefix);
        debug!(events = events.len(), "split multi-day events");
    }

    Ok(events)
}

/// Bucket sorted events for rendering.
pub fn group(events: &Events, grouping: Grouping) -> Vec<Events> {
    match grouping {
        Grouping::None => vec![events.clone()],
        Grouping::Days => events.split_days(),
        Grouping::Months => events.split_months(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IcalFmtError;

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:trip\r\n\
SUMMARY:Trip\r\n\
DTSTART:20240301T100000\r\n\
DTEND:20240303T100000\r\n\
CATEGORIES:travel,work\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:standup\r\n\
SUMMARY:Standup\r\n\
DTSTART:20240301T090000\r\n\
DTEND:20240301T091500\r\n\
CATEGORIES:work\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:party\r\n\
SUMMARY:Party\r\n\
DTSTART;VALUE=DATE:20231231\r\n\
CATEGORIES:family\r\n\
END:VEVENT\r\n\
END:VCALENDAR";

    fn summaries(events: &Events) -> Vec<&str> {
        events.iter().map(|e| e.summary.as_str()).collect()
    }

    #[test]
    fn test_default_config_sorts_everything() {
        let events = process_ics(FEED, &FormatConfig::default()).unwrap();
        assert_eq!(summaries(&events), vec!["Party", "Standup", "Trip"]);
    }

    #[test]
    fn test_year_and_category_edits() {
        let config = FormatConfig {
            year: Some(2024),
            categories: Some("+cal,-work".into()),
            ..FormatConfig::default()
        };
        let events = process_ics(FEED, &config).unwrap();

        assert_eq!(summaries(&events), vec!["Standup", "Trip"]);
        assert_eq!(events[0].categories.as_slice(), ["cal".to_string()]);
        assert_eq!(
            events.distinct_categories().as_slice(),
            ["cal".to_string(), "travel".to_string()]
        );
    }

    #[test]
    fn test_month_filter_uses_month() {
        let config = FormatConfig {
            month: Some(12),
            ..FormatConfig::default()
        };
        let events = process_ics(FEED, &config).unwrap();
        assert_eq!(summaries(&events), vec!["Party"]);
    }

    #[test]
    fn test_window_and_split() {
        let config = FormatConfig {
            from: Some("2024-03-01".into()),
            split_long: true,
            start_prefix: "> ".into(),
            end_prefix: "< ".into(),
            ..FormatConfig::default()
        };
        let events = process_ics(FEED, &config).unwrap();
        assert_eq!(summaries(&events), vec!["Standup", "> Trip", "< Trip"]);

        let days = group(&events, Grouping::Days);
        assert_eq!(days.len(), 2);
        assert_eq!(summaries(&days[0]), vec!["Standup", "> Trip"]);
    }

    #[test]
    fn test_group_months() {
        let events = process_ics(FEED, &FormatConfig::default()).unwrap();
        let months = group(&events, Grouping::Months);
        assert_eq!(months.len(), 12);
        assert_eq!(months[2].len(), 2);
        assert_eq!(months[11].len(), 1);
        assert_eq!(group(&events, Grouping::None), vec![events]);
    }

    #[test]
    fn test_bad_window_is_an_error() {
        let config = FormatConfig {
            to: Some("soon".into()),
            ..FormatConfig::default()
        };
        assert!(process_ics(FEED, &config).is_err());
    }

    #[test]
    fn test_month_out_of_range_is_a_config_error() {
        for month in [0, 13] {
            let config = FormatConfig {
                month: Some(month),
                ..FormatConfig::default()
            };
            assert!(matches!(
                process_ics(FEED, &config),
                Err(IcalFmtError::Config(_))
            ));
        }
    }

    #[test]
    fn test_escaped_comma_keeps_category_whole() {
        let feed = FEED.replace(
            "CATEGORIES:family",
            "CATEGORIES:Meetings\\, internal,family",
        );
        let config = FormatConfig {
            year: Some(2023),
            ..FormatConfig::default()
        };
        let events = process_ics(&feed, &config).unwrap();

        assert_eq!(
            events[0].categories.as_slice(),
            ["Meetings, internal".to_string(), "family".to_string()]
        );
    }
}
