//! ICS decoding and event normalization.
//!
//! `decode` turns .ics text into raw property records; `normalize` turns
//! those records into validated [`Events`](crate::Events).

mod decode;
mod normalize;

pub use decode::{RawCalendar, RawEvent, RawProperty, decode_calendar};
pub use normalize::{
    normalize_calendar, normalize_event, parse_ics_date, split_categories, unescape_text,
};
