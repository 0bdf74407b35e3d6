//! Dell storage controllers reported through Redfish.

use healthwatch_types::{CheckResult, Severity};

use crate::check::Component;
use crate::discovery::{DiscoveryEngine, ItemId};
use crate::entity::{Entity, EntityExt};

use super::join_list;

/// Storage subsystems with a Dell Oem extension.
///
/// Model and capabilities are only reported when the subsystem has exactly
/// one controller.
#[derive(Debug, Default, Clone, Copy)]
pub struct DellArrayControllers;

impl Component for DellArrayControllers {
    fn name(&self) -> &'static str {
        "redfish_arraycontrollers_dell"
    }

    fn service_name(&self) -> &'static str {
        "Storage Controller %s"
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder()
            .item_id(ItemId::Field("Id"))
            .require_vendor("Dell")
            .build()
    }

    fn describe(&self, entity: &Entity) -> Vec<CheckResult> {
        if entity.integer("StorageControllers@odata.count") != Some(1) {
            return Vec::new();
        }
        let Some(controller) = entity
            .list("StorageControllers")
            .and_then(|list| list.first())
            .and_then(|c| c.as_object())
        else {
            return Vec::new();
        };

        vec![CheckResult::summary(
            Severity::Ok,
            format!(
                "Type: {}, RaidLevels: {}, DeviceProtocols: {}",
                controller.display("Model"),
                join_list(controller.get("SupportedRAIDTypes")),
                join_list(controller.get("SupportedDeviceProtocols"))
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckParams;
    use crate::parser::parse;

    const PAYLOAD: &str = r#"[
        {"Id": "RAID.Integrated.1-1", "Oem": {"Dell": {"DellController": {"CacheSizeInMB": 8192}}},
         "StorageControllers@odata.count": 1,
         "StorageControllers": [{"Model": "PERC H740P Mini",
             "SupportedRAIDTypes": ["RAID0", "RAID1", "RAID5"],
             "SupportedDeviceProtocols": ["SAS", "SATA"]}],
         "Status": {"Health": "OK", "HealthRollup": "OK", "State": "Enabled"}},
        {"Id": "AHCI.Embedded.1-1", "Oem": {"Dell": {"DellController": {}}},
         "StorageControllers@odata.count": 2,
         "StorageControllers": [{"Model": "A"}, {"Model": "B"}],
         "Status": {"Health": "Warning"}},
        {"Id": "CPU.1", "Oem": {}}
    ]"#;

    #[test]
    fn test_only_dell_controllers_discovered() {
        let table = parse(PAYLOAD).unwrap();
        let items: Vec<String> = DellArrayControllers
            .discover(&table)
            .into_iter()
            .map(|d| d.item)
            .collect();
        assert_eq!(items, vec!["RAID.Integrated.1-1", "AHCI.Embedded.1-1"]);
    }

    #[test]
    fn test_single_controller_details() {
        let table = parse(PAYLOAD).unwrap();
        let results = DellArrayControllers.check("RAID.Integrated.1-1", &table, &CheckParams::default());
        assert_eq!(
            results[0].text,
            "Type: PERC H740P Mini, RaidLevels: RAID0,RAID1,RAID5, DeviceProtocols: SAS,SATA"
        );
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn multiple_controllers_only_report_health() {
        let table = parse(PAYLOAD).unwrap();
        let results = DellArrayControllers.check("AHCI.Embedded.1-1", &table, &CheckParams::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Warn);
        assert!(DellArrayControllers.check("CPU.1", &table, &CheckParams::default()).is_empty());
    }
}
