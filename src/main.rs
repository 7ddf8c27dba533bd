mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use icalfmt_core::FormatConfig;
use icalfmt_core::config::{Grouping, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "icalfmt")]
#[command(about = "Normalize, filter and sort an iCalendar feed for rendering")]
struct Cli {
    /// Print debug info to stderr
    #[arg(short, long, global = true)]
    debug: bool,

    /// Config file (defaults to ~/.config/icalfmt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the processed events
    Events {
        #[command(flatten)]
        filter: FilterArgs,

        /// Replace multi-day events with start and end markers
        #[arg(long)]
        split_long: bool,

        /// Summary prefix for the start marker of a split event
        #[arg(long)]
        start_prefix: Option<String>,

        /// Summary prefix for the end marker of a split event
        #[arg(long)]
        end_prefix: Option<String>,

        /// Bucket events by day or month
        #[arg(short, long, value_enum)]
        group: Option<GroupArg>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
    /// List every category used by the processed events
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// .ics file to read ("-" or omitted for stdin)
    input: Option<PathBuf>,

    /// Limit output to year
    #[arg(short, long)]
    year: Option<i32>,

    /// Limit output to month (1-12)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Append (+), remove (-) or limit (=) categories: "+cat1,-cat2,=cat3"
    #[arg(short, long)]
    categories: Option<String>,

    /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
    #[arg(long)]
    from: Option<String>,

    /// Show events until this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupArg {
    None,
    Days,
    Months,
}

impl From<GroupArg> for Grouping {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::None => Grouping::None,
            GroupArg::Days => Grouping::Days,
            GroupArg::Months => Grouping::Months,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Agenda,
    Debug,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Agenda => OutputFormat::Agenda,
            FormatArg::Debug => OutputFormat::Debug,
        }
    }
}

impl FilterArgs {
    fn apply(&self, config: &mut FormatConfig) {
        if let Some(year) = self.year {
            config.year = Some(year);
        }
        if let Some(month) = self.month {
            config.month = Some(month);
        }
        if let Some(categories) = &self.categories {
            config.categories = Some(categories.clone());
        }
        if let Some(from) = &self.from {
            config.from = Some(from.clone());
        }
        if let Some(to) = &self.to {
            config.to = Some(to.clone());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut config =
        FormatConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Events {
            filter,
            split_long,
            start_prefix,
            end_prefix,
            group,
            format,
        } => {
            filter.apply(&mut config);
            config.split_long |= split_long;
            if let Some(prefix) = start_prefix {
                config.start_prefix = prefix;
            }
            if let Some(prefix) = end_prefix {
                config.end_prefix = prefix;
            }
            if let Some(group) = group {
                config.group = group.into();
            }
            if let Some(format) = format {
                config.format = format.into();
            }
            commands::events::run(filter.input.as_deref(), &config, cli.debug)
        }
        Commands::Categories { filter } => {
            filter.apply(&mut config);
            commands::categories::run(filter.input.as_deref(), &config)
        }
    }
}

/// Logs go to stderr so stdout stays clean for whatever consumes the output.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
