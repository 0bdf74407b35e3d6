use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use healthwatch::baseline;
use healthwatch::report::{render_discovery, ServiceReport};
use healthwatch::settings::parse_levels;
use healthwatch::{FileSource, PayloadSource, ReaderSource, Settings};
use healthwatch_engine::{components, CheckParams, Component, DiscoveryParams, PayloadError};

#[derive(Parser, Debug)]
#[command(name = "healthwatch")]
#[command(about = "Normalize vendor hardware telemetry into a uniform health model")]
struct Args {
    /// Path to a config file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of plugin-style text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available components
    Components,

    /// Discover monitored items in a payload
    Discover {
        /// Component name, e.g. redfish_fans
        #[arg(short, long)]
        component: String,

        /// Store discovered items and their states in this baseline file
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Payload file; stdin when omitted
        payload: Option<PathBuf>,
    },

    /// Check one item of a payload
    Check {
        /// Component name, e.g. redfish_fans
        #[arg(short, long)]
        component: String,

        /// Item identifier as reported by discover
        #[arg(short, long)]
        item: String,

        /// Stored item parameters as JSON, e.g. '{"discovered": {"state": 0}}'
        #[arg(long)]
        params: Option<String>,

        /// Baseline file written by `discover --baseline`
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Upper warn,crit levels, replacing configured and vendor levels
        #[arg(long, value_parser = parse_levels)]
        upper: Option<(f64, f64)>,

        /// Lower warn,crit levels, replacing configured and vendor levels
        #[arg(long, value_parser = parse_levels)]
        lower: Option<(f64, f64)>,

        /// Payload file; stdin when omitted
        payload: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("healthwatch: {:#}", err);
            if err.downcast_ref::<PayloadError>().is_some() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}

fn init_logging(settings: &Settings) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.log_filter())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    init_logging(&settings);

    match args.command {
        Command::Components => {
            for component in components::all() {
                println!("{}\t{}", component.name(), component.service_name());
            }
            Ok(())
        }
        Command::Discover {
            component,
            baseline,
            payload,
        } => {
            let component = find_component(&component)?;
            let table = open(payload).load(&component.parser())?;
            let items = component.discover(&table);
            tracing::info!(component = component.name(), items = items.len(), "discovery finished");

            if let Some(path) = baseline {
                baseline::save(&path, &items)?;
                tracing::info!(path = %path.display(), "baseline stored");
            }

            if args.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if !items.is_empty() {
                println!("{}", render_discovery(component, &items));
            }
            Ok(())
        }
        Command::Check {
            component,
            item,
            params,
            baseline,
            upper,
            lower,
            payload,
        } => {
            let component = find_component(&component)?;
            let mut params = match params {
                Some(raw) => parse_params(&raw)?,
                None => CheckParams::default(),
            };
            if let (None, Some(path)) = (params.discovered, baseline) {
                params.discovered = baseline::params_for(&baseline::load(&path)?, &item);
            }
            if params.thresholds.is_empty() {
                params.thresholds = settings.thresholds_for(component.name());
            }
            if upper.is_some() {
                params.thresholds.upper = upper;
            }
            if lower.is_some() {
                params.thresholds.lower = lower;
            }

            let table = open(payload).load(&component.parser())?;
            let results = component.check(&item, &table, &params);
            let report = ServiceReport::new(component, &item, results);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render_text());
            }
            Ok(())
        }
    }
}

fn find_component(name: &str) -> Result<&'static dyn Component> {
    components::find(name).ok_or_else(|| anyhow!("Unknown component '{}', see `healthwatch components`", name))
}

fn open(payload: Option<PathBuf>) -> Box<dyn PayloadSource> {
    match payload {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(ReaderSource::stdin()),
    }
}

/// Item parameters are either full check parameters or a bare discovery
/// baseline as stored by `discover --json`.
fn parse_params(raw: &str) -> Result<CheckParams> {
    let value: serde_json::Value = serde_json::from_str(raw).context("Invalid --params")?;
    if value.get("state").is_some() {
        let discovered: DiscoveryParams = serde_json::from_value(value).context("Invalid --params")?;
        return Ok(CheckParams::default().with_discovered(discovered));
    }
    serde_json::from_value(value).context("Invalid --params")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_discover_with_config() {
        let args = Args::try_parse_from([
            "healthwatch",
            "discover",
            "-c",
            "redfish_memory",
            "--config",
            "healthwatch.toml",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("healthwatch.toml")));
        match args.command {
            Command::Discover {
                component,
                baseline,
                payload,
            } => {
                assert_eq!(component, "redfish_memory");
                assert_eq!(baseline, None);
                assert_eq!(payload, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_baseline_paths() {
        let args = Args::try_parse_from([
            "healthwatch",
            "check",
            "-c",
            "dell_powervault_me4_ports",
            "-i",
            "A0",
            "--baseline",
            "ports.cbor",
        ])
        .unwrap();
        match args.command {
            Command::Check { baseline, params, .. } => {
                assert_eq!(baseline, Some(PathBuf::from("ports.cbor")));
                assert_eq!(params, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_params_accept_bare_baseline() {
        let params = parse_params(r#"{"state": 1}"#).unwrap();
        assert_eq!(params.discovered, Some(DiscoveryParams::new(1)));
    }

    #[test]
    fn test_params_accept_full_form() {
        let params = parse_params(r#"{"discovered": {"state": 0}, "thresholds": {"lower": [10, 5]}}"#).unwrap();
        assert_eq!(params.discovered, Some(DiscoveryParams::new(0)));
        assert_eq!(params.thresholds.lower, Some((10.0, 5.0)));
    }

    #[test]
    fn test_invalid_params_are_not_payload_errors() {
        let err = parse_params("{nope").unwrap_err();
        assert!(err.downcast_ref::<PayloadError>().is_none());
    }

    #[test]
    fn test_cli_parses_check() {
        let args = Args::try_parse_from([
            "healthwatch",
            "check",
            "--component",
            "redfish_fans",
            "--item",
            "1",
            "--lower",
            "1200,600",
            "thermal.json",
        ])
        .unwrap();
        match args.command {
            Command::Check { lower, payload, .. } => {
                assert_eq!(lower, Some((1200.0, 600.0)));
                assert_eq!(payload, Some(PathBuf::from("thermal.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
