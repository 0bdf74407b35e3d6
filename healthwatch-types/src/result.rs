//! Check results handed back to the monitoring host.

use alloc::string::String;

use crate::{Bounds, Measurement, Severity, StatusValue};

/// Where the host should show a result's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Visibility {
    /// Part of the one-line service summary.
    #[default]
    Summary,
    /// Only in the long output, unless the severity is not OK.
    Notice,
}

/// Performance data attached to a result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    pub name: String,
    pub value: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub upper: Bounds,

    #[cfg_attr(feature = "serde", serde(default))]
    pub lower: Bounds,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub boundaries: Option<(f64, f64)>,
}

impl Metric {
    /// Build the metric for a measurement, named after its unit class.
    pub fn from_measurement(measurement: &Measurement) -> Self {
        Self {
            name: String::from(measurement.unit.metric_name()),
            value: measurement.value,
            upper: measurement.upper,
            lower: measurement.lower,
            boundaries: measurement.boundaries(),
        }
    }
}

/// One line of a check's output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckResult {
    pub severity: Severity,
    pub text: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub visibility: Visibility,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub metric: Option<Metric>,
}

impl CheckResult {
    /// A result shown in the summary line.
    pub fn summary(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            visibility: Visibility::Summary,
            metric: None,
        }
    }

    /// A result shown in the details only.
    pub fn notice(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            visibility: Visibility::Notice,
            metric: None,
        }
    }

    /// Attach performance data.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// The (severity, message) pair without presentation details.
    pub fn status(&self) -> StatusValue {
        StatusValue::new(self.severity, self.text.clone())
    }
}

impl From<StatusValue> for CheckResult {
    fn from(status: StatusValue) -> Self {
        CheckResult::summary(status.severity, status.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Unit;

    #[test]
    fn metric_takes_name_from_unit() {
        let m = Measurement::builder(40.0)
            .unit(Unit::Percent)
            .upper(Some(80.0), Some(90.0))
            .build();
        let metric = Metric::from_measurement(&m);
        assert_eq!(metric.name, "perc");
        assert_eq!(metric.upper, Bounds::levels(80.0, 90.0));
        assert_eq!(metric.boundaries, Some((0.0, 100.0)));
    }

    #[test]
    fn notice_and_summary_visibility() {
        assert_eq!(
            CheckResult::notice(Severity::Ok, "x").visibility,
            Visibility::Notice
        );
        let r: CheckResult = StatusValue::new(Severity::Warn, "degraded").into();
        assert_eq!(r.visibility, Visibility::Summary);
        assert_eq!(r.status(), StatusValue::new(Severity::Warn, "degraded"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_skips_empty_metric() {
        let r = CheckResult::summary(Severity::Ok, "fine");
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("metric"));
        assert!(json.contains("\"OK\""));
    }
}
