use std::io::Write;
use std::path::Path;

use anyhow::Result;
use icalfmt_core::{FormatConfig, pipeline};

use crate::render::{DebugPrinter, Printer, printer_for};

pub fn run(input: Option<&Path>, config: &FormatConfig, debug: bool) -> Result<()> {
    let events = super::load_events(input, config)?;
    let groups = pipeline::group(&events, config.group);

    if debug {
        DebugPrinter.print(&mut std::io::stderr().lock(), &groups)?;
    }

    let mut out = std::io::stdout().lock();
    printer_for(config).print(&mut out, &groups)?;
    out.flush()?;

    Ok(())
}
