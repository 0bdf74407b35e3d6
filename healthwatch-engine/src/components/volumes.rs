//! Redfish logical volumes.

use healthwatch_types::{CheckResult, Severity};

use crate::check::Component;
use crate::discovery::{DiscoveryEngine, ItemId};
use crate::entity::{Entity, EntityExt};

use super::gib;

#[derive(Debug, Default, Clone, Copy)]
pub struct Volumes;

impl Component for Volumes {
    fn name(&self) -> &'static str {
        "redfish_volumes"
    }

    fn service_name(&self) -> &'static str {
        "Volume %s"
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder().item_id(ItemId::Field("Id")).build()
    }

    fn describe(&self, entity: &Entity) -> Vec<CheckResult> {
        let size = gib(entity.number("CapacityBytes").unwrap_or(0.0));
        vec![CheckResult::summary(
            Severity::Ok,
            format!("Raid Type: {}, Size: {:.1}GB", entity.display("RAIDType"), size),
        )]
    }
}
