//! The check engine and the [`Component`] trait.
//!
//! A component describes one kind of hardware item: how it is discovered,
//! what its primary result says, and whether it carries a sensor or a
//! vendor code table. The flow around it is shared:
//!
//! 1. locate the item with the component's discovery rules
//! 2. primary result(s) from [`Component::describe`]
//! 3. drift against the discovery baseline, if one was stored
//! 4. sensor reading evaluated against thresholds, for sensor components
//! 5. normalized health, shown as a notice

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use healthwatch_types::{CheckResult, DiscoveredItem, DiscoveryParams, Metric, Severity};

use crate::codes::StatusCodes;
use crate::discovery::{Baseline, DiscoveryEngine};
use crate::entity::{Entity, EntityTable};
use crate::normalizer::normalize;
use crate::parser::{PayloadParser, DEFAULT_KEY_FIELDS};
use crate::perf::{extract, unit_hint};
use crate::thresholds::{evaluate, Thresholds};

/// Message when a sensor component has no reading.
pub const NO_PERFDATA: &str = "No performance data found";

/// Per-item parameters handed in by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckParams {
    /// Baseline stored at discovery time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovered: Option<DiscoveryParams>,

    /// Configured levels for sensor readings.
    pub thresholds: Thresholds,
}

impl CheckParams {
    pub fn with_discovered(mut self, params: DiscoveryParams) -> Self {
        self.discovered = Some(params);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// One kind of monitored hardware item.
pub trait Component: Send + Sync + fmt::Debug {
    /// Unique component name, e.g. `redfish_fans`.
    fn name(&self) -> &'static str;

    /// Service name template; `%s` is replaced by the item.
    fn service_name(&self) -> &'static str;

    /// Discovery rules, also used to locate items on check.
    fn discovery(&self) -> DiscoveryEngine;

    /// Fields that key list elements of this component's payload.
    fn key_fields(&self) -> &'static [&'static str] {
        DEFAULT_KEY_FIELDS
    }

    /// Parser for this component's payload.
    fn parser(&self) -> PayloadParser {
        PayloadParser::with_key_fields(self.key_fields().iter().copied())
    }

    /// Primary results for an entity.
    fn describe(&self, _entity: &Entity) -> Vec<CheckResult> {
        Vec::new()
    }

    /// Vendor code table consulted when the entity has no `Status` object.
    fn status_codes(&self) -> Option<StatusCodes> {
        None
    }

    /// Whether a normalized health notice follows the other results.
    fn reports_health(&self) -> bool {
        true
    }

    /// Label of the sensor reading, for sensor-bearing components.
    fn sensor_label(&self) -> Option<&'static str> {
        None
    }

    /// Service name for an item.
    fn service(&self, item: &str) -> String {
        self.service_name().replacen("%s", item, 1)
    }

    fn discover(&self, table: &EntityTable) -> Vec<DiscoveredItem> {
        self.discovery().discover(table)
    }

    fn check(&self, item: &str, table: &EntityTable, params: &CheckParams) -> Vec<CheckResult> {
        check(self, item, table, params)
    }
}

/// Run the shared check flow for one item.
///
/// Unknown, excluded and empty items yield no results.
pub fn check<C>(component: &C, item: &str, table: &EntityTable, params: &CheckParams) -> Vec<CheckResult>
where
    C: Component + ?Sized,
{
    let discovery = component.discovery();
    let Some(entity) = discovery.locate(table, item) else {
        debug!(component = component.name(), item, "item not found");
        return Vec::new();
    };

    let mut results = component.describe(entity);

    if let (Some(baseline), Some(discovered)) = (discovery.baseline(), params.discovered) {
        results.extend(drift(baseline, entity, discovered));
    }

    if let Some(label) = component.sensor_label() {
        results.extend(sensor_results(entity, label, &params.thresholds));
    }

    if component.reports_health() {
        let health = normalize(entity, component.status_codes());
        results.push(CheckResult::notice(health.severity, health.message));
    }

    results
}

/// Compare the current state code with the one stored at discovery.
///
/// No result when unchanged.
pub fn drift(baseline: &Baseline, entity: &Entity, discovered: DiscoveryParams) -> Option<CheckResult> {
    let current = baseline.current(entity);
    if current == discovered.state {
        return None;
    }
    let severity = baseline.states.lookup(&current).severity.worst(Severity::Warn);
    Some(CheckResult::summary(
        severity,
        format!(
            "State changed since discovery from {} to {}(!)",
            baseline.describe(discovered.state),
            baseline.describe(current)
        ),
    ))
}

/// Evaluate an entity's sensor reading.
pub fn sensor_results(entity: &Entity, label: &str, thresholds: &Thresholds) -> Vec<CheckResult> {
    let Some(measurement) = extract(entity) else {
        return vec![CheckResult::summary(Severity::Ok, NO_PERFDATA)];
    };
    let measurement = thresholds.apply(measurement);
    let evaluation = evaluate(&measurement, label);

    let mut results = vec![CheckResult::summary(evaluation.severity, evaluation.message)
        .with_metric(Metric::from_measurement(&measurement))];
    if let Some(note) = unit_hint(entity).note() {
        results.push(CheckResult::summary(Severity::Ok, note));
    }
    results
}
