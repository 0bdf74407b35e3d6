//! Dell PowerVault ME4 host ports.

use healthwatch_types::CheckResult;

use crate::check::Component;
use crate::codes::POWERVAULT_HEALTH;
use crate::discovery::{DiscoveryEngine, ItemId, MISSING_STATE};
use crate::entity::{Entity, EntityExt};

const HEALTH_FIELD: &str = "health-numeric";

/// Host ports, with drift detection on `health-numeric`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PowerVaultPorts;

impl Component for PowerVaultPorts {
    fn name(&self) -> &'static str {
        "dell_powervault_me4_ports"
    }

    fn service_name(&self) -> &'static str {
        "Port %s"
    }

    fn key_fields(&self) -> &'static [&'static str] {
        &["port", "durable-id", "name"]
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder()
            .item_id(ItemId::Key)
            .baseline(HEALTH_FIELD, &POWERVAULT_HEALTH)
            .build()
    }

    fn describe(&self, entity: &Entity) -> Vec<CheckResult> {
        let code = entity.integer(HEALTH_FIELD).unwrap_or(MISSING_STATE);
        let severity = POWERVAULT_HEALTH.lookup(&code).severity;
        let health = POWERVAULT_HEALTH.get(&code).map_or("Unknown", |entry| entry.message);

        let text = if entity.text("status") == Some("Disconnected") {
            "is not connected(!)".to_string()
        } else {
            format!(
                "with {} has state {} - health state is {}",
                entity.display("actual-speed"),
                entity.display("status"),
                health
            )
        };
        vec![CheckResult::summary(severity, text)]
    }

    fn reports_health(&self) -> bool {
        false
    }
}
