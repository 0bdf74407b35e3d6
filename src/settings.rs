//! Host configuration.
//!
//! Settings come from an optional config file plus `HEALTHWATCH_*`
//! environment variables:
//!
//! ```toml
//! log_level = "info"
//!
//! [levels.redfish_fans]
//! lower = [1200.0, 600.0]
//! ```
//!
//! Levels configured here replace the vendor-declared bounds for the same
//! side; command line levels replace both.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use healthwatch_engine::Thresholds;

/// Default log filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Loaded host settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log filter directive, e.g. `info` or `healthwatch_engine=debug`.
    pub log_level: Option<String>,

    /// Sensor levels per component name.
    pub levels: HashMap<String, Thresholds>,
}

impl Settings {
    /// Load settings from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("HEALTHWATCH"))
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Log filter to use when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Configured levels for a component, empty when none.
    pub fn thresholds_for(&self, component: &str) -> Thresholds {
        self.levels.get(component).copied().unwrap_or_default()
    }
}

/// Parse a `warn,crit` pair from the command line.
pub fn parse_levels(raw: &str) -> Result<(f64, f64), String> {
    let (warn, crit) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected WARN,CRIT, got '{}'", raw))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid level '{}': {}", s.trim(), e))
    };
    Ok((parse(warn)?, parse(crit)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_load_levels_from_file() {
        let file = config_file(
            r#"
log_level = "debug"

[levels.redfish_fans]
lower = [1200.0, 600.0]
"#,
        );
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.log_filter(), "debug");

        let fans = settings.thresholds_for("redfish_fans");
        assert_eq!(fans.lower, Some((1200.0, 600.0)));
        assert_eq!(fans.upper, None);
    }

    #[test]
    fn test_unconfigured_component_has_no_levels() {
        let settings = Settings::default();
        assert!(settings.thresholds_for("redfish_fans").is_empty());
        assert_eq!(settings.log_filter(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/healthwatch.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!(parse_levels("80,90"), Ok((80.0, 90.0)));
        assert_eq!(parse_levels(" 1200 , 600.5 "), Ok((1200.0, 600.5)));
        assert!(parse_levels("80").is_err());
        assert!(parse_levels("a,b").unwrap_err().contains("invalid level 'a'"));
    }
}
