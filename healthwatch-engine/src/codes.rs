//! Vendor code tables.
//!
//! Each table maps a vendor state code to exactly one severity and one
//! human readable explanation. Tables are immutable statics and can be
//! enumerated, so every code is covered by tests.

use std::borrow::Borrow;

use healthwatch_types::{Severity, StatusValue};

/// Message used for codes missing from a table.
pub const UNKNOWN_STATE: &str = "Unknown state";

/// One row of a code table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeEntry<K> {
    pub code: K,
    pub message: &'static str,
    pub severity: Severity,
}

const fn entry<K>(code: K, message: &'static str, severity: Severity) -> CodeEntry<K> {
    CodeEntry {
        code,
        message,
        severity,
    }
}

impl<K> CodeEntry<K> {
    pub fn status(&self) -> StatusValue {
        StatusValue::new(self.severity, self.message)
    }
}

/// A fixed vendor enumeration.
#[derive(Debug)]
pub struct CodeTable<K: 'static> {
    name: &'static str,
    entries: &'static [CodeEntry<K>],
}

impl<K: PartialEq + 'static> CodeTable<K> {
    pub const fn new(name: &'static str, entries: &'static [CodeEntry<K>]) -> Self {
        Self { name, entries }
    }

    /// Table name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All rows, in declaration order.
    pub fn entries(&self) -> &'static [CodeEntry<K>] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the row for a code.
    pub fn get<Q>(&self, code: &Q) -> Option<&'static CodeEntry<K>>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries.iter().find(|e| code == e.code.borrow())
    }

    /// Normalize a code; unlisted codes are unknown.
    pub fn lookup<Q>(&self, code: &Q) -> StatusValue
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self.get(code) {
            Some(entry) => entry.status(),
            None => {
                tracing::trace!(table = self.name, "code not in table");
                StatusValue::unknown(UNKNOWN_STATE)
            }
        }
    }
}

/// A string code found somewhere inside an entity, plus the table it is read with.
#[derive(Debug, Clone, Copy)]
pub struct StatusCodes {
    /// Field name searched for recursively.
    pub field: &'static str,
    pub table: &'static CodeTable<&'static str>,
}

// ============================================================================
// Tables
// ============================================================================

/// HPE iLO DIMM status codes, found under `DIMMStatus` in the Oem extension.
pub static HPE_DIMM_STATUS: CodeTable<&str> = CodeTable::new(
    "hpe_dimm_status",
    &[
        entry("Null", "A value is temporarily unavailable", Severity::Warn),
        entry("Unknown", "The status of the DIMM is unknown.", Severity::Unknown),
        entry(
            "Other",
            "DIMM status that does not fit any of these definitions.",
            Severity::Unknown,
        ),
        entry("NotPresent", "DIMM is not present.", Severity::Warn),
        entry("PresentUnused", "DIMM is present but unused.", Severity::Ok),
        entry(
            "GoodInUse",
            "DIMM is functioning properly and currently in use.",
            Severity::Ok,
        ),
        entry("AddedButUnused", "DIMM is added but currently unused.", Severity::Ok),
        entry(
            "UpgradedButUnused",
            "DIMM is upgraded but currently unused.",
            Severity::Ok,
        ),
        entry("ExpectedButMissing", "DIMM is expected but missing.", Severity::Warn),
        entry("DoesNotMatch", "DIMM type does not match.", Severity::Warn),
        entry("NotSupported", "DIMM is not supported.", Severity::Warn),
        entry("ConfigurationError", "Configuration error in DIMM.", Severity::Crit),
        entry("Degraded", "DIMM state is degraded.", Severity::Warn),
        entry("PresentSpare", "DIMM is present but used as spare.", Severity::Ok),
        entry(
            "GoodPartiallyInUse",
            "DIMM is functioning properly but partially in use.",
            Severity::Ok,
        ),
        entry(
            "MapOutConfiguration",
            "DIMM mapped out due to configuration error.",
            Severity::Warn,
        ),
        entry(
            "MapOutError",
            "DIMM mapped out due to training failure.",
            Severity::Warn,
        ),
    ],
);

/// Dell PowerVault ME4 `health-numeric` codes.
pub static POWERVAULT_HEALTH: CodeTable<i64> = CodeTable::new(
    "powervault_health",
    &[
        entry(0, "OK", Severity::Ok),
        entry(1, "Degraded", Severity::Warn),
        entry(2, "Fault", Severity::Crit),
        entry(3, "Unknown", Severity::Unknown),
        entry(4, "Disconnected", Severity::Ok),
    ],
);

/// Pure FlashArray pod member array status.
pub static PURE_ARRAY_STATUS: CodeTable<&str> = CodeTable::new(
    "pure_array_status",
    &[
        entry("online", "Array is online", Severity::Ok),
        entry("offline", "Array is offline", Severity::Warn),
    ],
);

/// Redfish `Status.State` lifecycle values.
///
/// The severity is only used when a status object carries no health field.
pub static REDFISH_STATES: CodeTable<&str> = CodeTable::new(
    "redfish_states",
    &[
        entry("Enabled", "This function or resource is enabled", Severity::Ok),
        entry("Disabled", "This function or resource is disabled", Severity::Ok),
        entry(
            "StandbyOffline",
            "This function or resource is enabled but awaits an external action to activate it",
            Severity::Ok,
        ),
        entry(
            "StandbySpare",
            "This function or resource is part of a redundancy set and awaits a failover",
            Severity::Ok,
        ),
        entry(
            "InTest",
            "This function or resource is undergoing testing",
            Severity::Ok,
        ),
        entry("Starting", "This function or resource is starting", Severity::Ok),
        entry(
            "Absent",
            "This function or resource is either not present or detected",
            Severity::Ok,
        ),
        entry(
            "UnavailableOffline",
            "This function or resource is present but cannot be used",
            Severity::Warn,
        ),
        entry(
            "Deferring",
            "The element does not process any commands but queues new requests",
            Severity::Warn,
        ),
        entry(
            "Quiesced",
            "The element is enabled but only processes a restricted set of commands",
            Severity::Warn,
        ),
        entry(
            "Updating",
            "The element is updating and might be unavailable or degraded",
            Severity::Warn,
        ),
        entry(
            "Qualified",
            "The element quality is within the acceptable range of operation",
            Severity::Ok,
        ),
        entry("Degraded", "The function or resource is degraded", Severity::Warn),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique<K: std::hash::Hash + Eq + std::fmt::Debug + Copy + 'static>(table: &CodeTable<K>) {
        let codes: HashSet<K> = table.entries().iter().map(|e| e.code).collect();
        assert_eq!(codes.len(), table.len(), "duplicate code in {}", table.name());
    }

    #[test]
    fn tables_have_unique_codes() {
        assert_unique(&HPE_DIMM_STATUS);
        assert_unique(&POWERVAULT_HEALTH);
        assert_unique(&PURE_ARRAY_STATUS);
        assert_unique(&REDFISH_STATES);
    }

    #[test]
    fn every_dimm_code_normalizes_to_its_row() {
        assert_eq!(HPE_DIMM_STATUS.len(), 17);
        for row in HPE_DIMM_STATUS.entries() {
            let status = HPE_DIMM_STATUS.lookup(row.code);
            assert_eq!(status.severity, row.severity, "code {}", row.code);
            assert_eq!(status.message, row.message);
            assert!(!status.message.is_empty());
        }
    }

    #[test]
    fn dimm_severities() {
        assert_eq!(HPE_DIMM_STATUS.lookup("GoodInUse").severity, Severity::Ok);
        assert_eq!(HPE_DIMM_STATUS.lookup("Degraded").severity, Severity::Warn);
        assert_eq!(
            HPE_DIMM_STATUS.lookup("ConfigurationError").severity,
            Severity::Crit
        );
        assert_eq!(HPE_DIMM_STATUS.lookup("Other").severity, Severity::Unknown);
    }

    #[test]
    fn unlisted_code_is_unknown_state() {
        let status = HPE_DIMM_STATUS.lookup("Melted");
        assert_eq!(status.severity, Severity::Unknown);
        assert_eq!(status.message, UNKNOWN_STATE);

        let status = POWERVAULT_HEALTH.lookup(&9i64);
        assert_eq!(status.severity, Severity::Unknown);
    }

    #[test]
    fn powervault_codes() {
        let expected: [(i64, Severity, &str); 5] = [
            (0, Severity::Ok, "OK"),
            (1, Severity::Warn, "Degraded"),
            (2, Severity::Crit, "Fault"),
            (3, Severity::Unknown, "Unknown"),
            (4, Severity::Ok, "Disconnected"),
        ];
        assert_eq!(POWERVAULT_HEALTH.len(), expected.len());
        for (code, severity, message) in expected {
            assert_eq!(POWERVAULT_HEALTH.lookup(&code), StatusValue::new(severity, message));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(PURE_ARRAY_STATUS.lookup("online").severity, Severity::Ok);
        assert_eq!(PURE_ARRAY_STATUS.lookup("Online").severity, Severity::Unknown);
    }
}
