//! # healthwatch-engine
//!
//! Status normalization and discovery for vendor hardware telemetry.
//!
//! The engine turns a raw inventory payload (Redfish resources, storage
//! array exports) into an [`EntityTable`], decides which entities become
//! monitored items, and checks each item into a list of results on a
//! common severity scale.
//!
//! ## Supported Systems
//!
//! - **Redfish** (`redfish` feature) - memory modules, memory summary,
//!   drives, volumes, Dell storage controllers and fans
//! - **Dell PowerVault ME4** (`powervault` feature) - host ports with drift
//!   detection
//! - **Pure FlashArray** (`purestorage` feature) - pods and member arrays
//!
//! ## Quick Start
//!
//! ```rust
//! use healthwatch_engine::{components, CheckParams, PayloadParser};
//!
//! let payload = r#"[{"Id": "DIMM1", "CapacityMiB": 32768, "MemoryDeviceType": "DDR4",
//!                    "Status": {"Health": "OK", "State": "Enabled"}}]"#;
//!
//! let memory = components::find("redfish_memory").unwrap();
//! let table = PayloadParser::new().parse(payload).unwrap();
//!
//! for discovered in memory.discover(&table) {
//!     for result in memory.check(&discovered.item, &table, &CheckParams::default()) {
//!         println!("{} {}", result.severity, result.text);
//!     }
//! }
//! ```
//!
//! Everything is a pure function of its inputs: the table is never
//! mutated, and the code tables are immutable statics.

pub mod check;
pub mod codes;
pub mod components;
pub mod discovery;
pub mod entity;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod perf;
pub mod thresholds;

pub use check::{CheckParams, Component};
pub use codes::{CodeEntry, CodeTable, StatusCodes};
pub use discovery::{DiscoveryEngine, ItemId};
pub use entity::{find_field, Entity, EntityExt, EntityTable};
pub use error::PayloadError;
pub use normalizer::{normalize, StatusSource};
pub use parser::PayloadParser;
pub use thresholds::{evaluate, Evaluation, Thresholds};

// Re-export types for convenience
pub use healthwatch_types::{
    CheckResult, DiscoveredItem, DiscoveryParams, Measurement, Metric, Severity, StatusValue, Unit,
    Visibility,
};
