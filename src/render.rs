//! Output printers.
//!
//! The JSON printer is the hand-off to external template renderers; the agenda
//! printer is a colored terminal view; the debug printer dumps one event per line.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use icalfmt_core::config::{Grouping, OutputFormat};
use icalfmt_core::{Event, Events, FormatConfig};
use owo_colors::OwoColorize;

/// Writes grouped events somewhere.
pub trait Printer {
    fn print(&self, out: &mut dyn Write, groups: &[Events]) -> Result<()>;
}

pub fn printer_for(config: &FormatConfig) -> Box<dyn Printer> {
    match config.format {
        OutputFormat::Json => Box::new(JsonPrinter {
            grouped: config.group != Grouping::None,
        }),
        OutputFormat::Agenda => Box::new(AgendaPrinter),
        OutputFormat::Debug => Box::new(DebugPrinter),
    }
}

/// A JSON array of events, or an array of arrays when grouped.
pub struct JsonPrinter {
    pub grouped: bool,
}

impl Printer for JsonPrinter {
    fn print(&self, out: &mut dyn Write, groups: &[Events]) -> Result<()> {
        if self.grouped {
            serde_json::to_writer_pretty(&mut *out, groups)?;
        } else {
            let flat: Vec<&Event> = groups.iter().flat_map(|g| g.iter()).collect();
            serde_json::to_writer_pretty(&mut *out, &flat)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

pub struct DebugPrinter;

impl Printer for DebugPrinter {
    fn print(&self, out: &mut dyn Write, groups: &[Events]) -> Result<()> {
        for event in groups.iter().flat_map(|g| g.iter()) {
            writeln!(out, "{:?}", event)?;
        }
        Ok(())
    }
}

/// Day-by-day listing with a bold header per day.
pub struct AgendaPrinter;

impl Printer for AgendaPrinter {
    fn print(&self, out: &mut dyn Write, groups: &[Events]) -> Result<()> {
        if groups.iter().all(|g| g.is_empty()) {
            writeln!(out, "{}", "No events found".dimmed())?;
            return Ok(());
        }

        let mut current_date: Option<String> = None;

        for event in groups.iter().flat_map(|g| g.iter()) {
            let date_label = event.start.format("%a %b %-d %Y").to_string();

            if current_date.as_ref() != Some(&date_label) {
                if current_date.is_some() {
                    writeln!(out)?;
                }
                writeln!(out, "{}", date_label.bold())?;
                current_date = Some(date_label);
            }

            writeln!(out, "  {}", format_line(event))?;
        }

        Ok(())
    }
}

fn format_line(event: &Event) -> String {
    let mut line = format!("{} {}", format_time(event), event.summary);

    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    if let Some(end) = &event.end {
        line.push_str(&format!(" {}", format!("(until {})", format_end(event, end)).dimmed()));
    }
    if !event.categories.is_empty() {
        let tags = format!("[{}]", event.categories.join(", "));
        line.push_str(&format!(" {}", tags.dimmed()));
    }

    line
}

/// Start time of an event (e.g. "15:00" or "all-day")
fn format_time(event: &Event) -> String {
    if event.all_day {
        "all-day".to_string()
    } else {
        format!("{:>7}", event.start.format("%H:%M"))
    }
}

fn format_end(event: &Event, end: &NaiveDateTime) -> String {
    if event.all_day {
        end.format("%a %b %-d").to_string()
    } else if end.date() == event.start.date() {
        end.format("%H:%M").to_string()
    } else {
        end.format("%a %b %-d %H:%M").to_string()
    }
}
