//! Payload parsing.
//!
//! Vendor agents hand over one of two base structures:
//!
//! - a flat list of entities, each keyed by its own `name`/`Id` field
//! - an object whose top-level keys already are entity identifiers
//!
//! A single entity object is accepted as a one-element list, and
//! newline-delimited JSON is accepted as a list spread over lines.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::entity::{kind_of, render_value, Entity, EntityTable};
use crate::error::PayloadError;

/// Identifier used for list elements without any key field.
pub const FALLBACK_ID: &str = "unknown";

/// Key fields tried, in order, on list elements.
pub const DEFAULT_KEY_FIELDS: &[&str] = &["name", "Id", "id"];

/// Turns raw payload text into an [`EntityTable`].
#[derive(Debug, Clone)]
pub struct PayloadParser {
    key_fields: Vec<String>,
}

impl Default for PayloadParser {
    fn default() -> Self {
        Self::with_key_fields(DEFAULT_KEY_FIELDS.iter().copied())
    }
}

impl PayloadParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom list of key fields for list elements.
    pub fn with_key_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse payload text.
    ///
    /// Only a payload that cannot be decoded as a whole is an error. Bad
    /// lines in a newline-delimited payload and non-object elements are
    /// skipped.
    pub fn parse(&self, raw: &str) -> Result<EntityTable, PayloadError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PayloadError::Empty);
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(value) => self.parse_value(value),
            Err(err) if raw.lines().filter(|l| !l.trim().is_empty()).count() > 1 => {
                debug!(error = %err, "payload is not a single document, trying line by line");
                self.parse_lines(raw, err)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Build a table from an already decoded payload.
    pub fn parse_value(&self, value: Value) -> Result<EntityTable, PayloadError> {
        let mut table = EntityTable::new();
        match value {
            Value::Array(items) => self.insert_list(&mut table, items),
            Value::Object(map) if self.key_of(&map).is_some() => self.insert_entity(&mut table, map),
            Value::Object(map) => {
                for (id, value) in map {
                    match value {
                        Value::Object(entity) => {
                            table.insert(id, entity);
                        }
                        other => warn!(id = %id, found = kind_of(&other), "skipping non-object entity"),
                    }
                }
            }
            other => {
                return Err(PayloadError::UnexpectedShape {
                    found: kind_of(&other),
                })
            }
        }
        debug!(entities = table.len(), "parsed payload");
        Ok(table)
    }

    fn parse_lines(&self, raw: &str, first_error: serde_json::Error) -> Result<EntityTable, PayloadError> {
        let mut table = EntityTable::new();
        let mut decoded = 0usize;

        for (number, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(entity)) => {
                    decoded += 1;
                    self.insert_entity(&mut table, entity);
                }
                Ok(Value::Array(items)) => {
                    decoded += 1;
                    self.insert_list(&mut table, items);
                }
                Ok(other) => warn!(line = number + 1, found = kind_of(&other), "skipping line"),
                Err(err) => warn!(line = number + 1, error = %err, "skipping undecodable line"),
            }
        }

        if decoded == 0 {
            return Err(first_error.into());
        }
        debug!(entities = table.len(), lines = decoded, "parsed line-delimited payload");
        Ok(table)
    }

    fn insert_list(&self, table: &mut EntityTable, items: Vec<Value>) {
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(entity) => self.insert_entity(table, entity),
                other => warn!(index, found = kind_of(&other), "skipping non-object list element"),
            }
        }
    }

    fn insert_entity(&self, table: &mut EntityTable, entity: Entity) {
        let id = self.key_of(&entity).unwrap_or_else(|| FALLBACK_ID.to_string());
        if table.insert(id.clone(), entity).is_some() {
            warn!(id = %id, "duplicate entity identifier, keeping the last one");
        }
    }

    /// The first key field holding a scalar value.
    fn key_of(&self, entity: &Map<String, Value>) -> Option<String> {
        self.key_fields.iter().find_map(|field| match entity.get(field) {
            Some(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
                Some(render_value(Some(value)))
            }
            _ => None,
        })
    }
}

/// Parse with the default key fields.
pub fn parse(raw: &str) -> Result<EntityTable, PayloadError> {
    PayloadParser::default().parse(raw)
}
