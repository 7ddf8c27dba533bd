pub mod categories;
pub mod events;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use icalfmt_core::{Events, FormatConfig, pipeline};

/// Read the feed from `path`, or from stdin when `path` is absent or "-".
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read calendar from stdin")?;
            Ok(content)
        }
    }
}

/// Read, decode and process the feed.
fn load_events(path: Option<&Path>, config: &FormatConfig) -> Result<Events> {
    let content = read_input(path)?;
    pipeline::process_ics(&content, config).context("Failed to process calendar")
}
