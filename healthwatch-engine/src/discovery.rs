//! Discovery: which entities become monitored items.
//!
//! A [`DiscoveryEngine`] is a set of filters plus an [`ItemId`] rule. The
//! same filters run on discovery and on every check, so an item that is
//! excluded today yields no results even if it was discovered earlier.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use healthwatch_types::{DiscoveredItem, DiscoveryParams};

use crate::codes::CodeTable;
use crate::entity::{is_set, render_value, Entity, EntityExt, EntityTable};

/// Code recorded when a baseline field is missing at check time.
pub const MISSING_STATE: i64 = 3;

/// How an item identifier is derived from an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemId {
    /// The entity's key in the table.
    Key,
    /// A scalar field of the entity.
    Field(&'static str),
    /// `{id}-{name}`, with `default` standing in for a missing id.
    Composite {
        id: &'static str,
        default: &'static str,
        name: &'static str,
    },
    /// The first text field set, with a leading prefix removed.
    Named {
        fields: &'static [&'static str],
        strip_prefix: &'static str,
    },
    /// `Summary` for a single-entity table, `Summary {Id}` otherwise.
    Summary,
}

fn scalar(entity: &Entity, field: &str) -> Option<String> {
    match entity.get(field)? {
        value @ (Value::String(_) | Value::Number(_)) if is_set(value) => Some(render_value(Some(value))),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl ItemId {
    /// Derive the identifier, or `None` when the entity has none.
    pub fn derive(&self, key: &str, entity: &Entity, table_len: usize) -> Option<String> {
        match *self {
            ItemId::Key => Some(key.to_string()),
            ItemId::Field(field) => scalar(entity, field),
            ItemId::Composite { id, default, name } => {
                let name = scalar(entity, name)?;
                let id = scalar(entity, id).unwrap_or_else(|| default.to_string());
                Some(format!("{}-{}", id, name))
            }
            ItemId::Named {
                fields,
                strip_prefix,
            } => {
                let name = fields.iter().find_map(|f| entity.text(f).filter(|s| !s.is_empty()))?;
                let name = name.strip_prefix(strip_prefix).unwrap_or(name).trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            ItemId::Summary if table_len == 1 => Some("Summary".to_string()),
            ItemId::Summary => Some(format!(
                "Summary {}",
                scalar(entity, "Id").unwrap_or_else(|| "0".to_string())
            )),
        }
    }
}

/// A state code captured at discovery for drift detection.
#[derive(Debug, Clone, Copy)]
pub struct Baseline {
    /// Integer field holding the state code.
    pub field: &'static str,
    pub states: &'static CodeTable<i64>,
}

impl Baseline {
    /// Parameters to store with a newly discovered item.
    pub fn capture(&self, entity: &Entity) -> Option<DiscoveryParams> {
        entity.integer(self.field).map(DiscoveryParams::new)
    }

    /// Current code; a missing field counts as unknown.
    pub fn current(&self, entity: &Entity) -> i64 {
        entity.integer(self.field).unwrap_or(MISSING_STATE)
    }

    /// Short name of a code.
    pub fn describe(&self, code: i64) -> &'static str {
        self.states.get(&code).map_or("Unknown", |entry| entry.message)
    }
}

/// Decides which entities of a table are monitored items.
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    item_id: ItemId,
    members: Option<&'static str>,
    exclude_absent: bool,
    exclude_collections: bool,
    require_vendor: Option<&'static str>,
    require_field: Option<&'static str>,
    baseline: Option<Baseline>,
}

impl Default for DiscoveryEngine {
    fn default() -> Self {
        Self {
            item_id: ItemId::Key,
            members: None,
            exclude_absent: false,
            exclude_collections: false,
            require_vendor: None,
            require_field: None,
            baseline: None,
        }
    }
}

impl DiscoveryEngine {
    /// Create a builder. Without further settings every entity is an item
    /// named after its table key.
    pub fn builder() -> DiscoveryEngineBuilder {
        DiscoveryEngineBuilder::default()
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// All monitorable entities with their item ids, first occurrence wins.
    pub fn candidates<'a>(&self, table: &'a EntityTable) -> Vec<(String, &'a Entity)> {
        let skip_collections =
            self.exclude_collections && table.iter().any(|(_, entity)| !entity.is_collection());

        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for (key, entity) in table.iter() {
            if skip_collections && entity.is_collection() {
                debug!(key, "skipping collection entity");
                continue;
            }
            if let Some(vendor) = self.require_vendor {
                if !entity.has_vendor_extension(vendor) {
                    debug!(key, vendor, "skipping entity without vendor extension");
                    continue;
                }
            }
            if let Some(field) = self.require_field {
                if !entity.get(field).is_some_and(is_set) {
                    continue;
                }
            }

            match self.members {
                Some(list) => {
                    let members = entity.list(list).into_iter().flatten().filter_map(Value::as_object);
                    for member in members {
                        self.admit(key, member, table.len(), &mut seen, &mut found);
                    }
                }
                None => self.admit(key, entity, table.len(), &mut seen, &mut found),
            }
        }

        found
    }

    fn admit<'a>(
        &self,
        key: &str,
        entity: &'a Entity,
        table_len: usize,
        seen: &mut HashSet<String>,
        found: &mut Vec<(String, &'a Entity)>,
    ) {
        if entity.is_empty() {
            return;
        }
        if self.exclude_absent && entity.is_absent() {
            debug!(key, "skipping absent entity");
            return;
        }
        let Some(item) = self.item_id.derive(key, entity, table_len) else {
            debug!(key, "entity has no item identifier");
            return;
        };
        if !seen.insert(item.clone()) {
            debug!(item = %item, "duplicate item identifier, keeping the first");
            return;
        }
        found.push((item, entity));
    }

    /// Discover items, with baseline parameters when configured.
    pub fn discover(&self, table: &EntityTable) -> Vec<DiscoveredItem> {
        self.candidates(table)
            .into_iter()
            .map(|(item, entity)| match self.baseline.and_then(|b| b.capture(entity)) {
                Some(params) => DiscoveredItem::with_params(item, params),
                None => DiscoveredItem::new(item),
            })
            .collect()
    }

    /// Find the entity behind an item, applying the discovery filters.
    pub fn locate<'a>(&self, table: &'a EntityTable, item: &str) -> Option<&'a Entity> {
        self.candidates(table)
            .into_iter()
            .find_map(|(id, entity)| (id == item).then_some(entity))
    }
}

/// Builder for [`DiscoveryEngine`].
#[derive(Debug, Default)]
pub struct DiscoveryEngineBuilder {
    inner: DiscoveryEngine,
}

impl DiscoveryEngineBuilder {
    /// How item ids are derived.
    pub fn item_id(mut self, item_id: ItemId) -> Self {
        self.inner.item_id = item_id;
        self
    }

    /// Discover the objects inside a list field instead of the entities.
    pub fn members(mut self, list_field: &'static str) -> Self {
        self.inner.members = Some(list_field);
        self
    }

    /// Skip entities whose lifecycle state is `Absent`.
    pub fn exclude_absent(mut self) -> Self {
        self.inner.exclude_absent = true;
        self
    }

    /// Skip collection wrappers mixed in with concrete entities.
    pub fn exclude_collections(mut self) -> Self {
        self.inner.exclude_collections = true;
        self
    }

    /// Only entities with a non-empty `Oem.<vendor>` extension.
    pub fn require_vendor(mut self, vendor: &'static str) -> Self {
        self.inner.require_vendor = Some(vendor);
        self
    }

    /// Only entities where `field` is set.
    pub fn require_field(mut self, field: &'static str) -> Self {
        self.inner.require_field = Some(field);
        self
    }

    /// Capture a state code for drift detection.
    pub fn baseline(mut self, field: &'static str, states: &'static CodeTable<i64>) -> Self {
        self.inner.baseline = Some(Baseline { field, states });
        self
    }

    pub fn build(self) -> DiscoveryEngine {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::POWERVAULT_HEALTH;
    use crate::parser::parse;
    use serde_json::json;

    fn entity(value: Value) -> Entity {
        value.as_object().cloned().unwrap()
    }

    fn items(engine: &DiscoveryEngine, raw: &str) -> Vec<String> {
        let table = parse(raw).unwrap();
        engine.discover(&table).into_iter().map(|d| d.item).collect()
    }

    #[test]
    fn test_default_discovers_every_key() {
        let engine = DiscoveryEngine::builder().build();
        assert_eq!(items(&engine, r#"[{"name": "a"}, {"name": "b"}]"#), vec!["a", "b"]);
    }

    #[test]
    fn test_absent_entities_never_discovered() {
        let engine = DiscoveryEngine::builder()
            .item_id(ItemId::Field("Id"))
            .exclude_absent()
            .build();
        let raw = r#"[
            {"Id": "1", "Status": {"State": "Enabled"}},
            {"Id": "2", "Status": {"State": "Absent"}},
            {"Id": "3"}
        ]"#;
        assert_eq!(items(&engine, raw), vec!["1", "3"]);
    }

    #[test]
    fn collections_skipped_only_when_mixed() {
        let engine = DiscoveryEngine::builder().exclude_collections().build();
        let mixed = r##"{
            "all": {"@odata.type": "#MemoryCollection.MemoryCollection"},
            "dimm1": {"@odata.type": "#Memory.v1_7_0.Memory"}
        }"##;
        assert_eq!(items(&engine, mixed), vec!["dimm1"]);

        let only = r##"{"all": {"@odata.type": "#MemoryCollection.MemoryCollection"}}"##;
        assert_eq!(items(&engine, only), vec!["all"]);
    }

    #[test]
    fn vendor_extension_required() {
        let engine = DiscoveryEngine::builder()
            .item_id(ItemId::Field("Id"))
            .require_vendor("Dell")
            .build();
        let raw = r#"[
            {"Id": "RAID.1", "Oem": {"Dell": {"DellController": {}}}},
            {"Id": "AHCI.1", "Oem": {}},
            {"Id": "HBA.1"}
        ]"#;
        assert_eq!(items(&engine, raw), vec!["RAID.1"]);
    }

    #[test]
    fn test_item_ids_are_stable() {
        let engine = DiscoveryEngine::builder()
            .item_id(ItemId::Composite {
                id: "Id",
                default: "0",
                name: "Name",
            })
            .build();
        let raw = r#"[{"Id": "5", "Name": "Disk 5"}, {"name": "x", "Name": "Disk X"}]"#;
        let first = items(&engine, raw);
        assert_eq!(first, vec!["5-Disk 5", "0-Disk X"]);
        assert_eq!(items(&engine, raw), first);
    }

    #[test]
    fn named_members_strip_prefix() {
        let engine = DiscoveryEngine::builder()
            .members("Fans")
            .item_id(ItemId::Named {
                fields: &["Name", "FanName"],
                strip_prefix: "Fan",
            })
            .exclude_absent()
            .build();
        let raw = r#"{"1": {"Fans": [
            {"Name": "Fan 1"},
            {"FanName": "Fan Block 2"},
            {"Name": "Fan 3", "Status": {"State": "Absent"}},
            {"Name": "Fan"},
            "garbage"
        ]}}"#;
        assert_eq!(items(&engine, raw), vec!["1", "Block 2"]);
    }

    #[test]
    fn summary_item_depends_on_table_size() {
        let engine = DiscoveryEngine::builder()
            .item_id(ItemId::Summary)
            .require_field("MemorySummary")
            .build();
        let single = r#"{"Id": "1", "MemorySummary": {"TotalSystemMemoryGiB": 64}}"#;
        assert_eq!(items(&engine, single), vec!["Summary"]);

        let multi = r#"[
            {"Id": "1", "MemorySummary": {"TotalSystemMemoryGiB": 64}},
            {"Id": "2", "MemorySummary": {"TotalSystemMemoryGiB": 32}},
            {"Id": "3"}
        ]"#;
        assert_eq!(items(&engine, multi), vec!["Summary 1", "Summary 2"]);
    }

    #[test]
    fn duplicate_items_keep_first() {
        let engine = DiscoveryEngine::builder().item_id(ItemId::Field("Model")).build();
        let table = parse(r#"[{"name": "a", "Model": "X"}, {"name": "b", "Model": "X"}]"#).unwrap();
        let found = engine.candidates(&table);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.text("name"), Some("a"));
    }

    #[test]
    fn test_baseline_captured() {
        let engine = DiscoveryEngine::builder()
            .baseline("health-numeric", &POWERVAULT_HEALTH)
            .build();
        let table = parse(r#"{"A0": {"health-numeric": 0}, "A1": {"status": "Up"}}"#).unwrap();
        let found = engine.discover(&table);
        assert_eq!(found[0], DiscoveredItem::with_params("A0", DiscoveryParams::new(0)));
        assert_eq!(found[1], DiscoveredItem::new("A1"));

        let baseline = engine.baseline().unwrap();
        assert_eq!(baseline.current(table.get("A1").unwrap()), MISSING_STATE);
        assert_eq!(baseline.describe(1), "Degraded");
        assert_eq!(baseline.describe(42), "Unknown");
    }

    #[test]
    fn locate_applies_filters() {
        let engine = DiscoveryEngine::builder()
            .item_id(ItemId::Field("Id"))
            .exclude_absent()
            .build();
        let table = parse(
            r#"[{"Id": "1", "Status": {"State": "Absent"}}, {"Id": "2", "x": 1}]"#,
        )
        .unwrap();
        assert!(engine.locate(&table, "1").is_none());
        assert!(engine.locate(&table, "2").is_some());
        assert!(engine.locate(&table, "nonexistent-id").is_none());
    }

    #[test]
    fn empty_entities_are_not_items() {
        let engine = DiscoveryEngine::builder().build();
        let table = parse(r#"{"a": {}, "b": {"x": 1}}"#).unwrap();
        assert!(engine.locate(&table, "a").is_none());
        assert_eq!(engine.discover(&table).len(), 1);
    }

    #[test]
    fn composite_requires_name() {
        let id = ItemId::Composite {
            id: "Id",
            default: "0",
            name: "Name",
        };
        assert_eq!(id.derive("k", &entity(json!({"Id": "1"})), 1), None);
        assert_eq!(
            id.derive("k", &entity(json!({"Id": 7, "Name": "SSD"})), 1).as_deref(),
            Some("7-SSD")
        );
    }
}
