//! Threshold evaluation.
//!
//! One evaluator for every sensor-bearing check. Upper levels trip when the
//! value rises to or above them, lower levels when it falls below them.
//! Critical is checked before warning on each side and the worse side wins.

use serde::{Deserialize, Serialize};

use healthwatch_types::{Bounds, Measurement, Severity};

/// Host-configured levels for one item.
///
/// A configured side replaces the vendor-declared bounds for that side; an
/// unconfigured side keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// (warn, crit) at or above.
    pub upper: Option<(f64, f64)>,
    /// (warn, crit) below.
    pub lower: Option<(f64, f64)>,
}

impl Thresholds {
    pub fn is_empty(&self) -> bool {
        self.upper.is_none() && self.lower.is_none()
    }

    /// Overlay these levels onto a measurement.
    pub fn apply(&self, mut measurement: Measurement) -> Measurement {
        if let Some((warn, crit)) = self.upper {
            measurement.upper = Bounds::levels(warn, crit);
        }
        if let Some((warn, crit)) = self.lower {
            measurement.lower = Bounds::levels(warn, crit);
        }
        measurement
    }
}

/// Outcome of evaluating a measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub severity: Severity,
    /// The value rendered for its unit.
    pub rendered: String,
    pub message: String,
}

fn upper_severity(value: f64, bounds: &Bounds) -> Severity {
    if bounds.crit.is_some_and(|crit| value >= crit) {
        Severity::Crit
    } else if bounds.warn.is_some_and(|warn| value >= warn) {
        Severity::Warn
    } else {
        Severity::Ok
    }
}

fn lower_severity(value: f64, bounds: &Bounds) -> Severity {
    if bounds.crit.is_some_and(|crit| value < crit) {
        Severity::Crit
    } else if bounds.warn.is_some_and(|warn| value < warn) {
        Severity::Warn
    } else {
        Severity::Ok
    }
}

fn render_level(level: Option<f64>, measurement: &Measurement) -> String {
    match level {
        Some(level) => measurement.unit.render(level),
        None => "-".to_string(),
    }
}

/// Evaluate a measurement against its bounds.
///
/// `label` prefixes the message, e.g. `Speed`. Without any bounds the result
/// is always OK.
pub fn evaluate(measurement: &Measurement, label: &str) -> Evaluation {
    let value = measurement.value;
    let rendered = measurement.unit.render(value);

    let upper = upper_severity(value, &measurement.upper);
    let lower = lower_severity(value, &measurement.lower);
    let severity = upper.worst(lower);

    let mut message = format!("{}: {}", label, rendered);
    if upper > lower {
        message.push_str(&format!(
            " (warn/crit at {}/{})",
            render_level(measurement.upper.warn, measurement),
            render_level(measurement.upper.crit, measurement)
        ));
    } else if lower.is_problem() {
        message.push_str(&format!(
            " (warn/crit below {}/{})",
            render_level(measurement.lower.warn, measurement),
            render_level(measurement.lower.crit, measurement)
        ));
    }

    Evaluation {
        severity,
        rendered,
        message,
    }
}
