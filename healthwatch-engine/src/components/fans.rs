//! Redfish chassis fans.

use crate::check::Component;
use crate::discovery::{DiscoveryEngine, ItemId};

/// Fans listed in the `Fans` member of a chassis thermal resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fans;

impl Component for Fans {
    fn name(&self) -> &'static str {
        "redfish_fans"
    }

    fn service_name(&self) -> &'static str {
        "Fan %s"
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder()
            .members("Fans")
            .item_id(ItemId::Named {
                fields: &["Name", "FanName"],
                strip_prefix: "Fan",
            })
            .exclude_absent()
            .build()
    }

    fn sensor_label(&self) -> Option<&'static str> {
        Some("Speed")
    }
}
