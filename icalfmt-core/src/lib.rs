//! Core of icalfmt.
//!
//! This crate turns an iCalendar feed into sorted, filtered event lists ready
//! for an external renderer:
//! - `ics` decodes .ics text and normalizes each VEVENT into an [`Event`]
//! - `string_set` holds the category set algebra
//! - `ordering` builds the multi-key tie-break sort
//! - `transform` filters, edits and splits [`Events`]
//! - `pipeline` threads a [`FormatConfig`] through all of the above

pub mod category_edit;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod ics;
pub mod ordering;
pub mod pipeline;
pub mod string_set;
mod transform;

pub use config::FormatConfig;
pub use error::{IcalFmtError, IcalFmtResult};
pub use event::{Event, Events};
pub use string_set::{Categories, CategoryOp};
