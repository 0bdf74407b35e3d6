//! Redfish system memory summary.

use healthwatch_types::{CheckResult, Severity, StatusValue};

use crate::check::Component;
use crate::discovery::{DiscoveryEngine, ItemId};
use crate::entity::{Entity, EntityExt};
use crate::normalizer::health_state;

/// Total memory of a system, with the health rollup of its memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemorySummary;

impl Component for MemorySummary {
    fn name(&self) -> &'static str {
        "redfish_memory_summary"
    }

    fn service_name(&self) -> &'static str {
        "Memory %s"
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder()
            .item_id(ItemId::Summary)
            .require_field("MemorySummary")
            .build()
    }

    fn describe(&self, entity: &Entity) -> Vec<CheckResult> {
        let Some(summary) = entity.object("MemorySummary") else {
            return Vec::new();
        };
        let state = match summary.object("Status").filter(|s| !s.is_empty()) {
            Some(status) => health_state(status),
            None => StatusValue::new(Severity::Unknown, "Health: Unknown"),
        };
        vec![CheckResult::summary(
            state.severity,
            format!(
                "Capacity: {}GB, with State: {}",
                summary.display("TotalSystemMemoryGiB"),
                state.message
            ),
        )]
    }

    fn reports_health(&self) -> bool {
        false
    }
}
