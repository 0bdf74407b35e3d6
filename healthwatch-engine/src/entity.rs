//! Entities and the table they are parsed into.
//!
//! An entity is kept as the vendor sent it: a JSON object whose attributes
//! may be missing, renamed or differently typed from one firmware to the
//! next. [`EntityExt`] provides tolerant accessors on top of it so the rest
//! of the engine never has to match on raw `Value`s.

use serde_json::{Map, Value};

/// One hardware component as described by the vendor.
pub type Entity = Map<String, Value>;

/// Depth limit for [`find_field`].
pub const MAX_SEARCH_DEPTH: usize = 32;

/// Parsed entities keyed by identifier, in payload order.
///
/// Identifiers are unique. Inserting an existing identifier replaces the
/// earlier entity but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    entries: Map<String, Value>,
}

impl EntityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, returning the one it replaced.
    pub fn insert(&mut self, id: impl Into<String>, entity: Entity) -> Option<Entity> {
        match self.entries.insert(id.into(), Value::Object(entity)) {
            Some(Value::Object(previous)) => Some(previous),
            _ => None,
        }
    }

    /// Get an entity by identifier.
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entries.get(id).and_then(Value::as_object)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate over all entities in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entries
            .iter()
            .filter_map(|(id, value)| value.as_object().map(|entity| (id.as_str(), entity)))
    }

    /// Iterate over identifiers in payload order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Entity)> for EntityTable {
    fn from_iter<I: IntoIterator<Item = (String, Entity)>>(iter: I) -> Self {
        let mut table = EntityTable::new();
        for (id, entity) in iter {
            table.insert(id, entity);
        }
        table
    }
}

/// Tolerant attribute access for entities.
pub trait EntityExt {
    /// A string attribute.
    fn text(&self, key: &str) -> Option<&str>;

    /// A finite numeric attribute. Numeric strings are accepted.
    fn number(&self, key: &str) -> Option<f64>;

    /// An integral attribute. Integral floats and numeric strings are accepted.
    fn integer(&self, key: &str) -> Option<i64>;

    /// A nested entity.
    fn object(&self, key: &str) -> Option<&Entity>;

    /// A list attribute.
    fn list(&self, key: &str) -> Option<&Vec<Value>>;

    /// The first of `keys` whose value is set and not empty, zero or false.
    fn first_set(&self, keys: &[&str]) -> Option<&Value>;

    /// Render an attribute for a message, `n/a` when missing.
    fn display(&self, key: &str) -> String;

    /// Lifecycle state from the structured status, e.g. `Enabled` or `Absent`.
    fn lifecycle_state(&self) -> Option<&str>;

    /// The component is reported as not installed.
    fn is_absent(&self) -> bool {
        self.lifecycle_state() == Some("Absent")
    }

    /// The entity is a collection wrapper rather than a concrete component.
    fn is_collection(&self) -> bool;

    /// The entity carries a non-empty `Oem.<vendor>` extension.
    fn has_vendor_extension(&self, vendor: &str) -> bool;
}

impl EntityExt for Entity {
    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(value_as_f64)
    }

    fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn object(&self, key: &str) -> Option<&Entity> {
        self.get(key).and_then(Value::as_object)
    }

    fn list(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    fn first_set(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.get(*key))
            .find(|value| is_set(value))
    }

    fn display(&self, key: &str) -> String {
        render_value(self.get(key))
    }

    fn lifecycle_state(&self) -> Option<&str> {
        self.object("Status")?.text("State")
    }

    fn is_collection(&self) -> bool {
        self.text("@odata.type")
            .is_some_and(|kind| kind.contains("Collection"))
    }

    fn has_vendor_extension(&self, vendor: &str) -> bool {
        self.object("Oem")
            .and_then(|oem| oem.get(vendor))
            .is_some_and(is_set)
    }
}

/// Interpret a value as a finite float. Numeric strings are accepted;
/// `NaN` and infinities are not.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

/// Set means present and not null, empty, zero or false.
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a scalar for a human readable message.
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "n/a".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Find the first value stored under `key` anywhere inside `value`.
///
/// Pre-order walk: an object's own key is checked before its children,
/// children are visited in document order and list elements in index order.
/// Nesting deeper than [`MAX_SEARCH_DEPTH`] is not searched.
pub fn find_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    find_field_at(value, key, 0)
}

fn find_field_at<'a>(value: &'a Value, key: &str, depth: usize) -> Option<&'a Value> {
    if depth > MAX_SEARCH_DEPTH {
        return None;
    }
    match value {
        Value::Object(map) => map.get(key).or_else(|| {
            map.values()
                .find_map(|child| find_field_at(child, key, depth + 1))
        }),
        Value::Array(items) => items
            .iter()
            .find_map(|child| find_field_at(child, key, depth + 1)),
        _ => None,
    }
}

/// Name of a value's JSON type, for diagnostics.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
