//! # healthwatch
//!
//! Command line front end and host glue for `healthwatch-engine`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          healthwatch                         │
//! │  ┌─────────┐    ┌──────────┐    ┌───────────┐    ┌────────┐  │
//! │  │ source  │───▶│  parser  │───▶│ discovery │───▶│ report │  │
//! │  │ (input) │    │ (engine) │    │  / check  │    │ (text) │  │
//! │  └─────────┘    └──────────┘    └─────┬─────┘    └────────┘  │
//! │                                       │                      │
//! │                                  ┌────┴─────┐                │
//! │                                  │ settings │                │
//! │                                  │ (levels) │                │
//! │                                  └──────────┘                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: payload input ([`PayloadSource`] trait) from files or
//!   any reader
//! - **[`settings`]**: config file and environment, per-component levels
//! - **[`report`]**: plugin-style text and JSON rendering of results
//! - **[`baseline`]**: CBOR files holding discovered items and their states
//!
//! ## Usage
//!
//! ```bash
//! # List the available components
//! healthwatch components
//!
//! # Discover fans in a Redfish thermal payload
//! healthwatch discover --component redfish_fans thermal.json
//!
//! # Check one fan, reading the payload from stdin
//! curl -s https://bmc/redfish/v1/Chassis/1/Thermal \
//!     | healthwatch check --component redfish_fans --item 1
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::io::Cursor;
//! use healthwatch::{PayloadSource, ReaderSource, ServiceReport};
//! use healthwatch_engine::{components, CheckParams};
//!
//! let payload = br#"{"A0": {"status": "Up", "actual-speed": "16Gb", "health-numeric": 0}}"#;
//! let ports = components::find("dell_powervault_me4_ports").unwrap();
//!
//! let mut source = ReaderSource::new(Cursor::new(payload.to_vec()), "example");
//! let table = source.load(&ports.parser()).unwrap();
//!
//! let results = ports.check("A0", &table, &CheckParams::default());
//! let report = ServiceReport::new(ports, "A0", results);
//! assert!(report.render_text().starts_with("OK Port A0"));
//! ```

pub mod baseline;
pub mod report;
pub mod settings;
pub mod source;

// Re-export main types for convenience
pub use report::ServiceReport;
pub use settings::Settings;
pub use source::{FileSource, PayloadSource, ReaderSource};
