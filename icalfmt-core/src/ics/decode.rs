//! Decoding .ics text into raw property records using the icalendar crate's parser.
//!
//! No interpretation happens here: values keep their iCalendar escaping
//! (`\,` stays `\,`) and dates stay text. Turning a [`RawEvent`] into an
//! [`Event`](crate::Event) is the normalizer's job.

use std::collections::BTreeMap;

use icalendar::ValueType;
use icalendar::parser::{Component, Property, read_calendar, unfold};
use tracing::debug;

use crate::error::{IcalFmtError, IcalFmtResult};

/// One property value as it appeared in the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperty {
    pub value: String,
    /// Parameters such as `VALUE=DATE` or `TZID=...`, in feed order.
    pub params: Vec<(String, Option<String>)>,
}

impl RawProperty {
    pub fn new(value: impl Into<String>) -> Self {
        RawProperty {
            value: value.into(),
            params: Vec::new(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }
}

/// One VEVENT, keyed by uppercase property name.
///
/// `properties` is `None` when the component carried no property table at all,
/// which is distinct from a record whose optional fields are merely absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub properties: Option<BTreeMap<String, RawProperty>>,
}

impl RawEvent {
    pub fn from_properties<I, K>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, RawProperty)>,
        K: Into<String>,
    {
        let properties = props
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_uppercase(), v))
            .collect();
        RawEvent {
            properties: Some(properties),
        }
    }

    pub fn without_properties() -> Self {
        RawEvent { properties: None }
    }
}

/// A decoded calendar: the raw VEVENT records in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCalendar {
    pub events: Vec<RawEvent>,
}

/// Parse ICS content into raw event records.
pub fn decode_calendar(content: &str) -> IcalFmtResult<RawCalendar> {
    let unfolded = protect_escapes(&unfold(content));
    let calendar = read_calendar(&unfolded).map_err(IcalFmtError::IcsParse)?;

    let mut events = Vec::new();
    for component in &calendar.components {
        collect_events(component, &mut events);
    }

    debug!(events = events.len(), "decoded calendar");
    Ok(RawCalendar { events })
}

/// VEVENTs may sit directly under the root or inside a VCALENDAR wrapper.
fn collect_events(component: &Component, out: &mut Vec<RawEvent>) {
    if component.name == "VEVENT" {
        out.push(to_raw_event(&component.properties));
        return;
    }
    for child in &component.components {
        collect_events(child, out);
    }
}

/// The parser unescapes TEXT values. With every backslash doubled beforehand,
/// that pass hands back the feed's escaped text unchanged.
fn protect_escapes(content: &str) -> String {
    content.replace('\\', "\\\\")
}

/// Undo [`protect_escapes`] for values the parser left alone.
fn restore_escapes(value: &str) -> String {
    value.replace("\\\\", "\\")
}

fn is_text(prop: &Property) -> bool {
    icalendar::Property::from(prop.clone()).value_type() == Some(ValueType::Text)
}

fn to_raw_event(properties: &[Property]) -> RawEvent {
    if properties.is_empty() {
        return RawEvent::without_properties();
    }

    let mut map: BTreeMap<String, RawProperty> = BTreeMap::new();
    for prop in properties {
        let name = prop.name.as_ref().to_ascii_uppercase();
        let value = if is_text(prop) {
            prop.val.to_string()
        } else {
            restore_escapes(prop.val.as_ref())
        };
        let raw = RawProperty {
            value,
            params: prop
                .params
                .iter()
                .map(|p| {
                    let val = p.val.as_ref().map(|v| restore_escapes(v.as_ref()));
                    (p.key.to_string(), val)
                })
                .collect(),
        };

        match map.get_mut(&name) {
            // Repeated CATEGORIES lines add to the same list
            Some(existing) if name == "CATEGORIES" => {
                existing.value.push(',');
                existing.value.push_str(&raw.value);
            }
            Some(_) => {}
            None => {
                map.insert(name, raw);
            }
        }
    }

    RawEvent {
        properties: Some(map),
    }
}
