//! Rendering check and discovery output for the monitoring host.
//!
//! Text output follows the usual plugin convention:
//!
//! ```text
//! WARN Fan 1 - Speed: 900.0 rpm (warn/crit below 1200.0 rpm/600.0 rpm)(!) | fan=900;1200:;600:;0;16000
//! Health: OK, State: Enabled (This function or resource is enabled)
//! ```
//!
//! The first line carries the worst state, the summary texts and the
//! performance data; notices follow on their own lines. Levels use range
//! syntax: `80` alerts above 80, `1200:` below 1200, `1200:5000` outside
//! that span.

use serde::Serialize;

use healthwatch_engine::{Component, DiscoveredItem};
use healthwatch_types::{CheckResult, Metric, Severity, Visibility};

/// Summary used when a check produced no results.
pub const ITEM_NOT_FOUND: &str = "Item not found in monitoring data";

/// Marker appended to texts that need attention.
pub fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "",
        Severity::Warn => "(!)",
        Severity::Crit => "(!!)",
        Severity::Unknown => "(?)",
    }
}

/// Results of one check run, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceReport {
    pub component: String,
    pub item: String,
    pub service: String,
    pub state: Severity,
    pub results: Vec<CheckResult>,
}

impl ServiceReport {
    pub fn new(component: &dyn Component, item: &str, results: Vec<CheckResult>) -> Self {
        let state = if results.is_empty() {
            Severity::Unknown
        } else {
            Severity::worst_of(results.iter().map(|r| r.severity))
        };
        Self {
            component: component.name().to_string(),
            item: item.to_string(),
            service: component.service(item),
            state,
            results,
        }
    }

    /// Plugin-style text output.
    pub fn render_text(&self) -> String {
        let summary: Vec<String> = if self.results.is_empty() {
            vec![ITEM_NOT_FOUND.to_string()]
        } else {
            self.results
                .iter()
                .filter(|r| r.visibility == Visibility::Summary || r.severity.is_problem())
                .map(|r| format!("{}{}", r.text, marker(r.severity)))
                .collect()
        };

        let mut out = format!("{} {} - {}", self.state, self.service, summary.join(", "));

        let perfdata: Vec<String> = self
            .results
            .iter()
            .filter_map(|r| r.metric.as_ref())
            .map(render_metric)
            .collect();
        if !perfdata.is_empty() {
            out.push_str(" | ");
            out.push_str(&perfdata.join(" "));
        }

        for notice in self.results.iter().filter(|r| r.visibility == Visibility::Notice) {
            out.push('\n');
            out.push_str(&notice.text);
            out.push_str(marker(notice.severity));
        }
        out
    }
}

/// Range for one level: lower bound with a trailing colon, then upper.
fn level(lower: Option<f64>, upper: Option<f64>) -> String {
    match (lower, upper) {
        (None, None) => String::new(),
        (None, Some(upper)) => upper.to_string(),
        (Some(lower), None) => format!("{}:", lower),
        (Some(lower), Some(upper)) => format!("{}:{}", lower, upper),
    }
}

/// `name=value;warn;crit;min;max`
pub fn render_metric(metric: &Metric) -> String {
    let (min, max) = match metric.boundaries {
        Some((min, max)) => (min.to_string(), max.to_string()),
        None => (String::new(), String::new()),
    };
    format!(
        "{}={};{};{};{};{}",
        metric.name,
        metric.value,
        level(metric.lower.warn, metric.upper.warn),
        level(metric.lower.crit, metric.upper.crit),
        min,
        max
    )
}

/// One line per discovered item: item, service name and baseline state.
pub fn render_discovery(component: &dyn Component, items: &[DiscoveredItem]) -> String {
    items
        .iter()
        .map(|d| match d.params {
            Some(params) => format!("{}\t{}\tstate={}", d.item, component.service(&d.item), params.state),
            None => format!("{}\t{}", d.item, component.service(&d.item)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
