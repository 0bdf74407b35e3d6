//! Sensor reading extraction.
//!
//! Redfish sensors describe a reading in two generations of schema:
//!
//! - flat: `Reading` / `ReadingRPM` / `CurrentReading` next to
//!   `UpperThresholdNonCritical`, `LowerThresholdCritical`, ... and
//!   `MinReadingRange` / `MaxReadingRange`
//! - nested: `SpeedPercent.Reading` and
//!   `Thresholds.{UpperCaution,UpperCritical,LowerCaution,LowerCritical}.Reading`
//!
//! Both produce the same [`Measurement`].

use healthwatch_types::{Measurement, Unit};

use crate::entity::{Entity, EntityExt};

const READING_FIELDS: &[&str] = &["Reading", "ReadingRPM", "CurrentReading"];

/// How the unit of a reading was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitHint {
    /// A recognised unit.
    Known(Unit),
    /// A unit field we do not recognise; rendered like RPM.
    Unrecognised(String),
    /// No unit field; RPM assumed.
    Missing,
}

impl UnitHint {
    pub fn unit(&self) -> Unit {
        match self {
            UnitHint::Known(unit) => *unit,
            UnitHint::Unrecognised(_) => Unit::Other,
            UnitHint::Missing => Unit::Rpm,
        }
    }

    /// Side note for the check output when the unit is not known.
    pub fn note(&self) -> Option<String> {
        match self {
            UnitHint::Known(_) => None,
            UnitHint::Unrecognised(unit) => Some(format!("Unit '{}' not recognised, assuming RPM", unit)),
            UnitHint::Missing => Some("No unit found, assuming RPM".to_string()),
        }
    }
}

/// Classify a unit string.
pub fn classify_unit(unit: &str) -> UnitHint {
    match unit.trim().to_ascii_lowercase().as_str() {
        "percent" | "%" => UnitHint::Known(Unit::Percent),
        "rpm" => UnitHint::Known(Unit::Rpm),
        _ => UnitHint::Unrecognised(unit.to_string()),
    }
}

/// Determine the unit of an entity's reading.
pub fn unit_hint(entity: &Entity) -> UnitHint {
    if let Some(units) = entity.text("ReadingUnits").filter(|u| !u.trim().is_empty()) {
        return classify_unit(units);
    }
    if nested_reading(entity, "SpeedPercent").is_some() {
        return UnitHint::Known(Unit::Percent);
    }
    if entity.get("ReadingRPM").is_some() {
        return UnitHint::Known(Unit::Rpm);
    }
    UnitHint::Missing
}

fn nested_reading(entity: &Entity, key: &str) -> Option<f64> {
    entity.object(key)?.number("Reading")
}

fn threshold(entity: &Entity, flat: &str, nested: &str) -> Option<f64> {
    entity.number(flat).or_else(|| {
        entity
            .object("Thresholds")
            .and_then(|t| nested_reading(t, nested))
    })
}

/// Build a measurement from an entity, or `None` for health-only entities.
///
/// The raw reading is never clamped.
pub fn extract(entity: &Entity) -> Option<Measurement> {
    let value = READING_FIELDS
        .iter()
        .find_map(|field| entity.number(field))
        .or_else(|| nested_reading(entity, "SpeedPercent"))?;

    let hint = unit_hint(entity);
    let mut builder = Measurement::builder(value)
        .upper(
            threshold(entity, "UpperThresholdNonCritical", "UpperCaution"),
            threshold(entity, "UpperThresholdCritical", "UpperCritical"),
        )
        .lower(
            threshold(entity, "LowerThresholdNonCritical", "LowerCaution"),
            threshold(entity, "LowerThresholdCritical", "LowerCritical"),
        );

    if !matches!(hint, UnitHint::Missing) {
        builder = builder.unit(hint.unit());
    }

    if let (Some(min), Some(max)) = (entity.number("MinReadingRange"), entity.number("MaxReadingRange")) {
        builder = builder.hard_bounds(min, max);
    }

    Some(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthwatch_types::Bounds;
    use serde_json::{json, Value};

    fn entity(value: Value) -> Entity {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_flat_rpm_sensor() {
        let fan = entity(json!({
            "Reading": 4200,
            "ReadingUnits": "RPM",
            "LowerThresholdNonCritical": 1000,
            "LowerThresholdCritical": 500,
            "MinReadingRange": 0,
            "MaxReadingRange": 12000
        }));
        let m = extract(&fan).unwrap();
        assert_eq!(m.value, 4200.0);
        assert_eq!(m.unit, Unit::Rpm);
        assert!(!m.unit_assumed);
        assert_eq!(m.lower, Bounds::levels(1000.0, 500.0));
        assert!(m.upper.is_empty());
        assert_eq!(m.boundaries(), Some((0.0, 12000.0)));
    }

    #[test]
    fn test_nested_percent_sensor() {
        let fan = entity(json!({
            "SpeedPercent": {"Reading": 42.5},
            "Thresholds": {
                "UpperCaution": {"Reading": 80},
                "UpperCritical": {"Reading": 95}
            }
        }));
        let m = extract(&fan).unwrap();
        assert_eq!(m.unit, Unit::Percent);
        assert_eq!(m.upper, Bounds::levels(80.0, 95.0));
        assert_eq!(m.boundaries(), Some((0.0, 100.0)));
    }

    #[test]
    fn missing_unit_is_assumed_rpm() {
        let fan = entity(json!({"Reading": 3000}));
        let m = extract(&fan).unwrap();
        assert_eq!(m.unit, Unit::Rpm);
        assert!(m.unit_assumed);
        assert_eq!(unit_hint(&fan).note().as_deref(), Some("No unit found, assuming RPM"));
    }

    #[test]
    fn unrecognised_unit_renders_like_rpm() {
        let fan = entity(json!({"Reading": 3, "ReadingUnits": "Cel"}));
        let m = extract(&fan).unwrap();
        assert_eq!(m.unit, Unit::Other);
        assert_eq!(m.unit.render(m.value), "3.0 rpm");
        assert!(unit_hint(&fan).note().unwrap().contains("'Cel'"));
    }

    #[test]
    fn percent_reading_is_not_clamped() {
        let fan = entity(json!({"Reading": 130, "ReadingUnits": "Percent"}));
        let m = extract(&fan).unwrap();
        assert_eq!(m.value, 130.0);
        assert_eq!(m.boundaries(), Some((0.0, 100.0)));
    }

    #[test]
    fn no_reading_is_health_only() {
        assert_eq!(extract(&entity(json!({"Status": {"Health": "OK"}}))), None);
        assert_eq!(extract(&entity(json!({"Reading": null}))), None);
        assert_eq!(extract(&entity(json!({"Reading": "fast"}))), None);
    }

    #[test]
    fn non_finite_reading_is_health_only() {
        for raw in ["NaN", "inf", "-Infinity"] {
            let fan = entity(json!({
                "Reading": raw,
                "ReadingUnits": "RPM",
                "LowerThresholdNonCritical": 1200,
                "LowerThresholdCritical": 600
            }));
            assert_eq!(extract(&fan), None, "reading {raw}");
        }
    }

    #[test]
    fn non_finite_threshold_is_ignored() {
        let fan = entity(json!({
            "Reading": 900,
            "LowerThresholdNonCritical": "NaN",
            "LowerThresholdCritical": 600
        }));
        let m = extract(&fan).unwrap();
        assert_eq!(m.lower, Bounds::new(None, Some(600.0)));
    }

    #[test]
    fn legacy_rpm_field() {
        let fan = entity(json!({"ReadingRPM": "2400"}));
        let m = extract(&fan).unwrap();
        assert_eq!(m.value, 2400.0);
        assert!(!m.unit_assumed);
    }

    #[test]
    fn unit_classification_is_case_insensitive() {
        assert_eq!(classify_unit("percent"), UnitHint::Known(Unit::Percent));
        assert_eq!(classify_unit("rpm"), UnitHint::Known(Unit::Rpm));
        assert_eq!(
            classify_unit("Hz"),
            UnitHint::Unrecognised("Hz".to_string())
        );
    }
}
