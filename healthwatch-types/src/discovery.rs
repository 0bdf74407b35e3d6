//! Discovery records and the baseline parameters they carry.

use alloc::string::String;

/// State snapshot captured when an item was discovered.
///
/// The host stores this next to the item and hands it back unchanged on
/// every check, so a later run can tell "changed since discovery" apart
/// from "currently unhealthy".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct DiscoveryParams {
    /// Vendor state code at discovery time.
    #[cfg_attr(feature = "minicbor", n(0))]
    pub state: i64,
}

impl DiscoveryParams {
    pub fn new(state: i64) -> Self {
        Self { state }
    }
}

/// A monitored item found by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct DiscoveredItem {
    #[cfg_attr(feature = "minicbor", n(0))]
    pub item: String,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "minicbor", n(1))]
    pub params: Option<DiscoveryParams>,
}

impl DiscoveredItem {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            params: None,
        }
    }

    pub fn with_params(item: impl Into<String>, params: DiscoveryParams) -> Self {
        Self {
            item: item.into(),
            params: Some(params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_json_shape() {
        let item = DiscoveredItem::with_params("A0", DiscoveryParams::new(0));
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"item":"A0","params":{"state":0}}"#);

        let bare = serde_json::to_string(&DiscoveredItem::new("A1")).unwrap();
        assert_eq!(bare, r#"{"item":"A1"}"#);
    }

    #[cfg(feature = "minicbor")]
    #[test]
    fn test_minicbor_roundtrip() {
        let item = DiscoveredItem::with_params("A0", DiscoveryParams::new(4));

        let bytes = minicbor::to_vec(&item).unwrap();
        let parsed: DiscoveredItem = minicbor::decode(&bytes).unwrap();

        assert_eq!(item, parsed);
    }
}
