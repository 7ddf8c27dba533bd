//! Formatting configuration.
//!
//! Values come from `~/.config/icalfmt/config.toml` (optional) and are then
//! overridden by command-line flags. The resulting value is passed explicitly
//! into [`pipeline::run`](crate::pipeline::run).

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::error::{IcalFmtError, IcalFmtResult};

pub const DEFAULT_START_PREFIX: &str = "▶ ";
pub const DEFAULT_END_PREFIX: &str = "◀ ";

fn default_start_prefix() -> String {
    DEFAULT_START_PREFIX.to_string()
}

fn default_end_prefix() -> String {
    DEFAULT_END_PREFIX.to_string()
}

/// How events are bucketed for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    None,
    Days,
    Months,
}

/// Output printer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Agenda,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Keep only events starting in this year.
    pub year: Option<i32>,
    /// Keep only events starting in this month (1-12).
    pub month: Option<u32>,
    /// Category edit list, e.g. `+holiday,-work,=family`.
    pub categories: Option<String>,
    /// Window start, YYYY-MM-DD or "start".
    pub from: Option<String>,
    /// Window end (inclusive day), YYYY-MM-DD.
    pub to: Option<String>,
    /// Replace multi-day events with start and end markers.
    pub split_long: bool,
    #[serde(default = "default_start_prefix")]
    pub start_prefix: String,
    #[serde(default = "default_end_prefix")]
    pub end_prefix: String,
    pub group: Grouping,
    pub format: OutputFormat,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            year: None,
            month: None,
            categories: None,
            from: None,
            to: None,
            split_long: false,
            start_prefix: default_start_prefix(),
            end_prefix: default_end_prefix(),
            group: Grouping::default(),
            format: OutputFormat::default(),
        }
    }
}

impl FormatConfig {
    pub fn config_path() -> IcalFmtResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IcalFmtError::Config("Could not determine config directory".into()))?
            .join("icalfmt");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file yields the defaults; an explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> IcalFmtResult<Self> {
        let (path, required) = match path {
            Some(p) => (expand_tilde(p), true),
            None => (Self::config_path()?, false),
        };

        let config = Config::builder()
            .add_source(File::from(path).required(required))
            .build()
            .map_err(|e| IcalFmtError::Config(e.to_string()))?
            .try_deserialize::<FormatConfig>()
            .map_err(|e| IcalFmtError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values serde accepts but the filters cannot use.
    pub fn validate(&self) -> IcalFmtResult<()> {
        if let Some(month) = self.month.filter(|m| !(1..=12).contains(m)) {
            return Err(IcalFmtError::Config(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.start_prefix, DEFAULT_START_PREFIX);
        assert_eq!(config.group, Grouping::None);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.split_long);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FormatConfig = toml::from_str(
            r#"
year = 2024
categories = "+holiday"
group = "days"
format = "agenda"
"#,
        )
        .unwrap();

        assert_eq!(config.year, Some(2024));
        assert_eq!(config.categories.as_deref(), Some("+holiday"));
        assert_eq!(config.group, Grouping::Days);
        assert_eq!(config.format, OutputFormat::Agenda);
        assert_eq!(config.end_prefix, DEFAULT_END_PREFIX);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "month = 3\nsplit_long = true\nstart_prefix = \"[\"\n").unwrap();

        let config = FormatConfig::load(Some(&path)).unwrap();
        assert_eq!(config.month, Some(3));
        assert!(config.split_long);
        assert_eq!(config.start_prefix, "[");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let missing = Path::new("/nonexistent/icalfmt/config.toml");
        assert!(matches!(
            FormatConfig::load(Some(missing)),
            Err(IcalFmtError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_month_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "month = 13\n").unwrap();

        let err = FormatConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, IcalFmtError::Config(ref msg) if msg.contains("13")));
    }
}
