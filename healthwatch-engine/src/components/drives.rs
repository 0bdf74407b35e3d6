//! Redfish physical drives.

use healthwatch_types::{CheckResult, Severity};

use crate::check::Component;
use crate::discovery::{DiscoveryEngine, ItemId};
use crate::entity::{is_set, render_value, Entity, EntityExt};

use super::gib;

#[derive(Debug, Default, Clone, Copy)]
pub struct Drives;

impl Component for Drives {
    fn name(&self) -> &'static str {
        "redfish_drives"
    }

    fn service_name(&self) -> &'static str {
        "Drive %s"
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder()
            .item_id(ItemId::Composite {
                id: "Id",
                default: "0",
                name: "Name",
            })
            .exclude_absent()
            .build()
    }

    fn describe(&self, entity: &Entity) -> Vec<CheckResult> {
        let size = gib(entity.number("CapacityBytes").unwrap_or(0.0));
        let speed = match entity.get("CapableSpeedGbs") {
            Some(value) if !value.is_null() => render_value(Some(value)),
            _ => "0".to_string(),
        };
        let mut text = format!("Size: {:.0}GB, Speed {} Gbs", size, speed);

        if entity.text("MediaType") == Some("SSD") {
            match entity.get("PredictedMediaLifeLeftPercent").filter(|v| is_set(v)) {
                Some(_) => {
                    let left = entity.number("PredictedMediaLifeLeftPercent").unwrap_or(0.0);
                    text.push_str(&format!(", Media Life Left: {}%", left.trunc() as i64));
                }
                None => text.push_str(", no SSD Media information available"),
            }
        }

        vec![CheckResult::summary(Severity::Ok, text)]
    }
}
