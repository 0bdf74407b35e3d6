//! Pure Storage FlashArray pods.

use serde_json::Value;

use healthwatch_types::{CheckResult, Severity};

use crate::check::Component;
use crate::codes::PURE_ARRAY_STATUS;
use crate::discovery::DiscoveryEngine;
use crate::entity::{Entity, EntityExt};

/// A pod and the arrays it is stretched across.
#[derive(Debug, Default, Clone, Copy)]
pub struct PurePods;

impl Component for PurePods {
    fn name(&self) -> &'static str {
        "pure_fa_pod"
    }

    fn service_name(&self) -> &'static str {
        "Pure Pod %s"
    }

    fn discovery(&self) -> DiscoveryEngine {
        DiscoveryEngine::builder().build()
    }

    fn describe(&self, entity: &Entity) -> Vec<CheckResult> {
        let actual = entity.get("promotion_status");
        let requested = entity.get("requested_promotion_state");

        let mut results = vec![if actual == requested {
            CheckResult::summary(
                Severity::Ok,
                format!("Promotion state: {}", entity.display("promotion_status")),
            )
        } else {
            CheckResult::summary(
                Severity::Warn,
                format!(
                    "Actual promotion state is different than the expected one - {} vs. {}",
                    entity.display("promotion_status"),
                    entity.display("requested_promotion_state")
                ),
            )
        }];

        let arrays = entity.list("arrays").into_iter().flatten().filter_map(Value::as_object);
        for array in arrays {
            let status = array.text("status").unwrap_or("unknown");
            let severity = PURE_ARRAY_STATUS.lookup(status).severity;
            results.push(CheckResult::notice(
                severity,
                format!("Array {} has state {}", array.display("name"), status),
            ));
        }
        results
    }

    fn reports_health(&self) -> bool {
        false
    }
}
