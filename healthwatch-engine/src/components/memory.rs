//! Redfish memory modules.

use healthwatch_types::{CheckResult, Severity};

use crate::check::Component;
use crate::codes::{StatusCodes, HPE_DIMM_STATUS};
use crate::discovery::{DiscoveryEngine, ItemId};
use crate::entity::{render_value, value_as_f64, Entity, EntityExt};

/// One DIMM. Health comes from `Status`, or from the HPE `DIMMStatus` code
/// on iLO firmware that has no status object.
#[derive(Debug, Default, Clone, Copy)]
pub struct Memory;

impl Component for Memory {
    fn name(&self) -> &'static str {
        "redfish_memory"
    }

    fn service_name(&self) -> &'static str {
        "Memory Module %s"
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder()
            .item_id(ItemId::Field("Id"))
            .exclude_absent()
            .exclude_collections()
            .build()
    }

    fn describe(&self, entity: &Entity) -> Vec<CheckResult> {
        let capacity_mib = entity
            .first_set(&["CapacityMiB", "SizeMB"])
            .and_then(value_as_f64)
            .unwrap_or(0.0);
        let kind = render_value(entity.first_set(&["MemoryDeviceType", "DIMMType"]));
        let speed = render_value(entity.first_set(&["OperatingSpeedMhz", "MaximumFrequencyMHz"]));

        vec![CheckResult::summary(
            Severity::Ok,
            format!(
                "Size: {:.0}GB, Type: {}-{} {}",
                capacity_mib / 1024.0,
                kind,
                speed,
                entity.display("ErrorCorrection")
            ),
        )]
    }

    fn status_codes(&self) -> Option<StatusCodes> {
        Some(StatusCodes {
            field: "DIMMStatus",
            table: &HPE_DIMM_STATUS,
        })
    }
}
