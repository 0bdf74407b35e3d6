//! Status normalization.
//!
//! Vendors express health in one of two dialects:
//!
//! - **Structured**: a Redfish style `Status` object with `Health`,
//!   `HealthRollup` and `State` fields
//! - **Enumeration**: a flat string code (e.g. HPE `DIMMStatus`) buried
//!   somewhere in a vendor extension, read through a [`CodeTable`]
//!
//! [`StatusSource::resolve`] picks the dialect for an entity and
//! [`StatusSource::normalize`] turns it into a [`StatusValue`]. Both are
//! total: every input yields exactly one (severity, message) pair.

use std::borrow::Cow;

use serde_json::Value;

use healthwatch_types::{Severity, StatusValue};

use crate::codes::{CodeTable, StatusCodes, REDFISH_STATES};
use crate::entity::{find_field, render_value, Entity, EntityExt};

/// Message for entities that carry no status information at all.
pub const NO_STATUS: &str = "No known status value found";

/// Where an entity's health information comes from.
#[derive(Debug, Clone)]
pub enum StatusSource<'a> {
    /// A `Status` object.
    Structured(&'a Entity),
    /// A vendor code, to be read with `table`.
    EnumCode {
        code: Cow<'a, str>,
        table: &'static CodeTable<&'static str>,
    },
    /// Nothing to go on.
    Absent,
}

impl<'a> StatusSource<'a> {
    /// Pick the status dialect for an entity.
    ///
    /// A non-empty `Status` object always wins. The vendor code is only
    /// searched for (recursively, first match) when there is none.
    pub fn resolve(entity: &'a Entity, codes: Option<StatusCodes>) -> Self {
        if let Some(status) = entity.object("Status").filter(|s| !s.is_empty()) {
            return StatusSource::Structured(status);
        }

        let Some(codes) = codes else {
            return StatusSource::Absent;
        };

        let found = entity
            .get(codes.field)
            .or_else(|| entity.values().find_map(|v| find_field(v, codes.field)));

        match found {
            Some(Value::String(code)) => StatusSource::EnumCode {
                code: Cow::Borrowed(code.as_str()),
                table: codes.table,
            },
            Some(Value::Null) | None => StatusSource::Absent,
            Some(other) => StatusSource::EnumCode {
                code: Cow::Owned(render_value(Some(other))),
                table: codes.table,
            },
        }
    }

    /// Translate into the common severity model.
    pub fn normalize(&self) -> StatusValue {
        match self {
            StatusSource::Structured(status) => health_state(status),
            StatusSource::EnumCode { code, table } => table.lookup(&**code),
            StatusSource::Absent => StatusValue::ok(NO_STATUS),
        }
    }
}

/// Resolve and normalize in one go.
pub fn normalize(entity: &Entity, codes: Option<StatusCodes>) -> StatusValue {
    let source = StatusSource::resolve(entity, codes);
    tracing::trace!(?source, "resolved status source");
    source.normalize()
}

/// Map a Redfish health value (case-insensitive).
pub fn health_severity(health: &str) -> Option<Severity> {
    match health.to_ascii_lowercase().as_str() {
        "ok" => Some(Severity::Ok),
        "warning" => Some(Severity::Warn),
        "critical" => Some(Severity::Crit),
        "unknown" => Some(Severity::Unknown),
        _ => None,
    }
}

/// Normalize a structured `Status` object.
///
/// Severity is the worst of `Health` and `HealthRollup`. Unrecognised health
/// values count as unknown and say so. Without either field the lifecycle
/// `State` decides; with nothing usable the result is unknown.
pub fn health_state(status: &Entity) -> StatusValue {
    let mut severity: Option<Severity> = None;
    let mut parts: Vec<String> = Vec::new();

    for (field, label) in [("Health", "Health"), ("HealthRollup", "Rollup")] {
        let Some(value) = status.get(field).filter(|v| !v.is_null()) else {
            continue;
        };
        let text = render_value(Some(value));
        let field_severity = match value.as_str().and_then(health_severity) {
            Some(s) => {
                parts.push(format!("{}: {}", label, text));
                s
            }
            None => {
                parts.push(format!("{}: unrecognised value '{}'", label, text));
                Severity::Unknown
            }
        };
        severity = Some(severity.map_or(field_severity, |s| s.worst(field_severity)));
    }

    let lifecycle = status.text("State").map(|state| (state, REDFISH_STATES.get(state)));
    if let Some((state, entry)) = lifecycle {
        match entry {
            Some(entry) => parts.push(format!("State: {} ({})", state, entry.message)),
            None => parts.push(format!("State: {}", state)),
        }
    }

    let severity = severity.unwrap_or_else(|| match lifecycle {
        Some((_, Some(entry))) => entry.severity,
        _ => Severity::Unknown,
    });

    if parts.is_empty() {
        parts.push("No health information in status".to_string());
    }

    StatusValue::new(severity, parts.join(", "))
}
