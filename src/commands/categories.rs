use std::io::Write;
use std::path::Path;

use anyhow::Result;
use icalfmt_core::FormatConfig;

pub fn run(input: Option<&Path>, config: &FormatConfig) -> Result<()> {
    let events = super::load_events(input, config)?;

    let mut out = std::io::stdout().lock();
    for category in &events.distinct_categories() {
        writeln!(out, "{}", category)?;
    }
    out.flush()?;

    Ok(())
}
