//! Normalized (severity, message) pairs.

use alloc::string::String;

use crate::Severity;

/// A vendor status translated into the common severity model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct StatusValue {
    #[cfg_attr(feature = "minicbor", n(0))]
    pub severity: Severity,

    #[cfg_attr(feature = "minicbor", n(1))]
    pub message: String,
}

impl StatusValue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Severity::Ok, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Severity::Unknown, message)
    }

    /// Raise the severity to at least `floor`, keeping the message.
    pub fn at_least(mut self, floor: Severity) -> Self {
        self.severity = self.severity.worst(floor);
        self
    }
}
