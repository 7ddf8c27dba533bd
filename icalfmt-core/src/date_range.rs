//! Date range for calendar-window queries.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{IcalFmtError, IcalFmtResult};
use crate::event::Event;

/// Half-open window `[from, to)`. `None` means unbounded in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        DateRange { from, to }
    }

    /// Parse command-line bounds.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD (from that day's midnight)
    /// - `to`: YYYY-MM-DD, inclusive of that whole day
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> IcalFmtResult<Self> {
        let from_dt = match from {
            None | Some("start") => None,
            Some(s) => Some(midnight(parse_date(s)?)),
        };

        let to_dt = match to {
            Some(s) => Some(midnight(next_day(parse_date(s)?)?)),
            None => None,
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// The whole calendar year `year`.
    pub fn year(year: i32) -> IcalFmtResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| IcalFmtError::InvalidDate(format!("year {}", year)))?;
        let next = first
            .checked_add_months(Months::new(12))
            .ok_or_else(|| IcalFmtError::InvalidDate(format!("year {}", year)))?;
        Ok(DateRange::new(Some(midnight(first)), Some(midnight(next))))
    }

    /// The whole calendar month `month` (1-12) of `year`.
    pub fn month(year: i32, month: u32) -> IcalFmtResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| IcalFmtError::InvalidDate(format!("{}-{:02}", year, month)))?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| IcalFmtError::InvalidDate(format!("{}-{:02}", year, month)))?;
        Ok(DateRange::new(Some(midnight(first)), Some(midnight(next))))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether the event overlaps the window.
    ///
    /// The event must start before `to`, and its end (or its start, when it
    /// has no end) must not lie before `from`.
    pub fn overlaps(&self, event: &Event) -> bool {
        let last = event.end.unwrap_or(event.start);
        let starts_before_end = self.to.is_none_or(|to| event.start < to);
        let ends_after_start = self.from.is_none_or(|from| last >= from);
        starts_before_end && ends_after_start
    }
}

fn parse_date(s: &str) -> IcalFmtResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        IcalFmtError::InvalidDate(format!("'{}'. Expected YYYY-MM-DD", s))
    })
}

fn next_day(date: NaiveDate) -> IcalFmtResult<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| IcalFmtError::InvalidDate(format!("{} is out of range", date)))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Calendar year of a timestamp, for use with `Events::filter_time`.
pub fn year_of(dt: &NaiveDateTime) -> i32 {
    dt.year()
}

/// Calendar month (1-12) of a timestamp, for use with `Events::filter_time`.
pub fn month_of(dt: &NaiveDateTime) -> i32 {
    dt.month() as i32
}
