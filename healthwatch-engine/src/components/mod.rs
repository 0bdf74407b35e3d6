//! Hardware components, grouped by vendor feature.
//!
//! - **Redfish** (`redfish` feature): memory modules, memory summary,
//!   drives, volumes, Dell storage controllers, fans
//! - **Dell PowerVault ME4** (`powervault` feature): host ports
//! - **Pure FlashArray** (`purestorage` feature): pods

use serde_json::Value;

use crate::check::Component;
use crate::entity::render_value;

#[cfg(feature = "redfish")]
mod controllers;
#[cfg(feature = "redfish")]
mod drives;
#[cfg(feature = "redfish")]
mod fans;
#[cfg(feature = "redfish")]
mod memory;
#[cfg(feature = "redfish")]
mod memory_summary;
#[cfg(feature = "redfish")]
mod volumes;

#[cfg(feature = "powervault")]
mod ports;

#[cfg(feature = "purestorage")]
mod pods;

#[cfg(feature = "redfish")]
pub use controllers::DellArrayControllers;
#[cfg(feature = "redfish")]
pub use drives::Drives;
#[cfg(feature = "redfish")]
pub use fans::Fans;
#[cfg(feature = "redfish")]
pub use memory::Memory;
#[cfg(feature = "redfish")]
pub use memory_summary::MemorySummary;
#[cfg(feature = "redfish")]
pub use volumes::Volumes;

#[cfg(feature = "powervault")]
pub use ports::PowerVaultPorts;

#[cfg(feature = "purestorage")]
pub use pods::PurePods;

/// Every component compiled into this build.
pub fn all() -> Vec<&'static dyn Component> {
    #[allow(unused_mut)]
    let mut all: Vec<&'static dyn Component> = Vec::new();

    #[cfg(feature = "redfish")]
    {
        let redfish: [&'static dyn Component; 6] = [
            &Memory,
            &MemorySummary,
            &Drives,
            &Volumes,
            &DellArrayControllers,
            &Fans,
        ];
        all.extend(redfish);
    }

    #[cfg(feature = "powervault")]
    all.push(&PowerVaultPorts);

    #[cfg(feature = "purestorage")]
    all.push(&PurePods);

    all
}

/// Look up a component by name.
pub fn find(name: &str) -> Option<&'static dyn Component> {
    all().into_iter().find(|c| c.name() == name)
}

#[cfg_attr(not(feature = "redfish"), allow(dead_code))]
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Bytes to GiB.
#[cfg_attr(not(feature = "redfish"), allow(dead_code))]
fn gib(bytes: f64) -> f64 {
    bytes / GIB
}

/// Join a list attribute for a message.
#[cfg_attr(not(feature = "redfish"), allow(dead_code))]
fn join_list(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| render_value(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    }
}
