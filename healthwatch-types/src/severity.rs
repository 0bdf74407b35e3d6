//! The fixed severity scale.

use core::cmp::Ordering;
use core::fmt;

/// Severity of a check result.
///
/// The numeric codes follow the usual monitoring plugin convention
/// (0 = OK, 1 = WARN, 2 = CRIT, 3 = UNKNOWN). For "worst-of" aggregation
/// the ordering is `Ok < Warn < Unknown < Crit`: an unknown state is never
/// hidden behind a warning, but a confirmed critical still outranks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(index_only))]
pub enum Severity {
    #[default]
    #[cfg_attr(feature = "minicbor", n(0))]
    Ok,
    #[cfg_attr(feature = "minicbor", n(1))]
    Warn,
    #[cfg_attr(feature = "minicbor", n(2))]
    Crit,
    #[cfg_attr(feature = "minicbor", n(3))]
    Unknown,
}

impl Severity {
    /// All severities, in code order.
    pub const ALL: [Severity; 4] = [
        Severity::Ok,
        Severity::Warn,
        Severity::Crit,
        Severity::Unknown,
    ];

    /// Map a plugin state code to a severity. Anything outside 0..=2 is unknown.
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Severity::Ok,
            1 => Severity::Warn,
            2 => Severity::Crit,
            _ => Severity::Unknown,
        }
    }

    /// The plugin state code for this severity.
    pub const fn code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warn => 1,
            Severity::Crit => 2,
            Severity::Unknown => 3,
        }
    }

    /// Returns a short symbol for display.
    pub const fn symbol(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warn => "WARN",
            Severity::Crit => "CRIT",
            Severity::Unknown => "UNKNOWN",
        }
    }

    /// Position on the aggregation scale.
    const fn rank(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warn => 1,
            Severity::Unknown => 2,
            Severity::Crit => 3,
        }
    }

    /// The worse of two severities.
    pub fn worst(self, other: Severity) -> Severity {
        self.max(other)
    }

    /// Worst severity of an iterator, `Ok` when empty.
    pub fn worst_of<I: IntoIterator<Item = Severity>>(iter: I) -> Severity {
        iter.into_iter().max().unwrap_or(Severity::Ok)
    }

    /// Check if this severity needs attention.
    pub fn is_problem(self) -> bool {
        self != Severity::Ok
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_code(severity.code() as i64), severity);
        }
    }

    #[test]
    fn out_of_range_codes_are_unknown() {
        assert_eq!(Severity::from_code(-1), Severity::Unknown);
        assert_eq!(Severity::from_code(7), Severity::Unknown);
    }

    #[test]
    fn ordering_for_worst_of() {
        assert!(Severity::Ok < Severity::Warn);
        assert!(Severity::Warn < Severity::Crit);
        assert!(Severity::Warn < Severity::Unknown);
        assert!(Severity::Unknown < Severity::Crit);
    }

    #[test]
    fn unknown_is_never_dropped() {
        assert_eq!(Severity::Unknown.worst(Severity::Warn), Severity::Unknown);
        assert_eq!(Severity::Ok.worst(Severity::Unknown), Severity::Unknown);
        assert_eq!(Severity::Unknown.worst(Severity::Crit), Severity::Crit);
    }

    #[test]
    fn worst_of_empty_is_ok() {
        assert_eq!(Severity::worst_of([]), Severity::Ok);
        assert_eq!(
            Severity::worst_of([Severity::Ok, Severity::Crit, Severity::Warn]),
            Severity::Crit
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Severity::Unknown).unwrap();
        assert_eq!(json, "\"UNKNOWN\"");
        let parsed: Severity = serde_json::from_str("\"WARN\"").unwrap();
        assert_eq!(parsed, Severity::Warn);
    }
}
