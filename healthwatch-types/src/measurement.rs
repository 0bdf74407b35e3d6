//! Sensor measurements and their threshold bounds.

use alloc::format;
use alloc::string::String;

/// Unit class of a measurement.
///
/// The unit decides both rendering and metric identity. Anything that is not
/// a percentage is rendered the same way as a fan speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    Percent,
    #[default]
    Rpm,
    Other,
}

impl Unit {
    /// Render a value with one decimal place and the unit suffix.
    pub fn render(self, value: f64) -> String {
        match self {
            Unit::Percent => format!("{:.1}%", value),
            Unit::Rpm | Unit::Other => format!("{:.1} rpm", value),
        }
    }

    /// Metric name used in performance data.
    pub fn metric_name(self) -> &'static str {
        match self {
            Unit::Percent => "perc",
            Unit::Rpm | Unit::Other => "fan",
        }
    }
}

/// Warning and critical levels on one side of a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub warn: Option<f64>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub crit: Option<f64>,
}

impl Bounds {
    pub const NONE: Bounds = Bounds {
        warn: None,
        crit: None,
    };

    pub fn new(warn: Option<f64>, crit: Option<f64>) -> Self {
        Self { warn, crit }
    }

    /// Both levels set.
    pub fn levels(warn: f64, crit: f64) -> Self {
        Self {
            warn: Some(warn),
            crit: Some(crit),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warn.is_none() && self.crit.is_none()
    }
}

/// A single numeric sensor reading.
///
/// Built fresh from entity attributes on every check and never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// The raw reading, never clamped.
    pub value: f64,

    pub unit: Unit,

    /// Set when no unit hint was present and `unit` is an assumption.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit_assumed: bool,

    /// Levels tripped when the value rises to or above them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upper: Bounds,

    /// Levels tripped when the value falls below them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lower: Bounds,

    /// Physical range of the sensor (min, max), if declared.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub hard_bounds: Option<(f64, f64)>,
}

impl Measurement {
    /// Create a new measurement with no bounds.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit,
            unit_assumed: false,
            upper: Bounds::NONE,
            lower: Bounds::NONE,
            hard_bounds: None,
        }
    }

    /// Create a builder for a measurement.
    pub fn builder(value: f64) -> MeasurementBuilder {
        MeasurementBuilder::new(value)
    }

    /// Check whether any warning or critical level is declared.
    pub fn has_bounds(&self) -> bool {
        !self.upper.is_empty() || !self.lower.is_empty()
    }

    /// Display range for performance data.
    ///
    /// Percentages are always shown on 0..100 no matter what the sensor
    /// claims; everything else uses the declared hard bounds.
    pub fn boundaries(&self) -> Option<(f64, f64)> {
        match self.unit {
            Unit::Percent => Some((0.0, 100.0)),
            Unit::Rpm | Unit::Other => self.hard_bounds,
        }
    }
}

/// Builder for `Measurement`.
#[derive(Debug)]
pub struct MeasurementBuilder {
    inner: Measurement,
}

impl MeasurementBuilder {
    /// Create a new builder. The unit defaults to an assumed RPM.
    pub fn new(value: f64) -> Self {
        let mut inner = Measurement::new(value, Unit::Rpm);
        inner.unit_assumed = true;
        Self { inner }
    }

    /// Set an explicit unit.
    pub fn unit(mut self, unit: Unit) -> Self {
        self.inner.unit = unit;
        self.inner.unit_assumed = false;
        self
    }

    /// Set the upper warning/critical levels.
    pub fn upper(mut self, warn: Option<f64>, crit: Option<f64>) -> Self {
        self.inner.upper = Bounds::new(warn, crit);
        self
    }

    /// Set the lower warning/critical levels.
    pub fn lower(mut self, warn: Option<f64>, crit: Option<f64>) -> Self {
        self.inner.lower = Bounds::new(warn, crit);
        self
    }

    /// Set the physical sensor range.
    pub fn hard_bounds(mut self, min: f64, max: f64) -> Self {
        self.inner.hard_bounds = Some((min, max));
        self
    }

    /// Build the measurement.
    pub fn build(self) -> Measurement {
        self.inner
    }
}
