//! Baseline files.
//!
//! `discover --baseline FILE` stores the discovered items, with the state
//! each one had at discovery, as a CBOR array. `check --baseline FILE`
//! reads it back so drift can be reported without passing `--params`.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use healthwatch_types::{DiscoveredItem, DiscoveryParams};

/// Write discovered items to `path`, replacing any previous baseline.
pub fn save(path: &Path, items: &[DiscoveredItem]) -> Result<()> {
    let bytes = minicbor::to_vec(items).map_err(|e| anyhow!("Failed to encode baseline: {}", e))?;
    fs::write(path, bytes).with_context(|| format!("Write error: {}", path.display()))
}

/// Read discovered items from `path`.
pub fn load(path: &Path) -> Result<Vec<DiscoveredItem>> {
    let bytes = fs::read(path).with_context(|| format!("Read error: {}", path.display()))?;
    minicbor::decode(&bytes).map_err(|e| anyhow!("Invalid baseline {}: {}", path.display(), e))
}

/// Stored parameters for one item, if it was discovered with any.
pub fn params_for(items: &[DiscoveredItem], item: &str) -> Option<DiscoveryParams> {
    items.iter().find(|d| d.item == item).and_then(|d| d.params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_saved_baseline_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ports.cbor");
        let items = vec![
            DiscoveredItem::with_params("A0", DiscoveryParams::new(0)),
            DiscoveredItem::new("A1"),
        ];

        save(&path, &items).unwrap();
        let stored = load(&path).unwrap();

        assert_eq!(stored, items);
        assert_eq!(params_for(&stored, "A0"), Some(DiscoveryParams::new(0)));
        assert_eq!(params_for(&stored, "A1"), None);
        assert_eq!(params_for(&stored, "B0"), None);
    }

    #[test]
    fn test_save_replaces_previous_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ports.cbor");

        save(&path, &[DiscoveredItem::with_params("A0", DiscoveryParams::new(1))]).unwrap();
        save(&path, &[DiscoveredItem::with_params("A0", DiscoveryParams::new(0))]).unwrap();

        let stored = load(&path).unwrap();
        assert_eq!(params_for(&stored, "A0"), Some(DiscoveryParams::new(0)));
    }

    #[test]
    fn test_corrupt_baseline_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"item\": \"A0\"}").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid baseline"));
    }

    #[test]
    fn test_missing_baseline_is_an_error() {
        let err = load(Path::new("/nonexistent/ports.cbor")).unwrap_err();
        assert!(err.to_string().contains("Read error"));
    }
}
