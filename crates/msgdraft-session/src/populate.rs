//! Structural default population
//!
//! Walks a schema from a given path and writes structurally-correct default
//! values into the instance, recursing through singular nested message
//! fields. The set of recognized scalar types is configuration
//! ([`DefaultTable`]), not hard-coded policy; an unrecognized type degrades
//! to a null default rather than failing.

use crate::cache::PathFieldCache;
use crate::error::SessionError;
use crate::store::MessageStore;
use indexmap::IndexMap;
use msgdraft_schema::{FieldDescriptor, FieldKind, FieldPath};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static BUILTIN_DEFAULTS: Lazy<IndexMap<String, Value>> = Lazy::new(|| {
    let mut table = IndexMap::new();
    table.insert("string".to_string(), json!(""));
    // enums reserve index 0 for the unspecified value
    table.insert("enum".to_string(), json!(1));
    table.insert("int32".to_string(), json!(0));
    table.insert("uint32".to_string(), json!(0));
    table.insert("float".to_string(), json!(0.0));
    table.insert("bool".to_string(), json!(false));
    table
});

/// Configurable map from type tag to default value
///
/// Lookup tries the field's declared type first, then falls back to its
/// field-kind tag. A miss on both is not an error; the populator stores a
/// null default instead.
#[derive(Debug, Clone)]
pub struct DefaultTable {
    entries: IndexMap<String, Value>,
}

impl DefaultTable {
    /// Table with the builtin scalar defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with no recognized types at all
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// With an additional (or replaced) type default
    #[must_use]
    pub fn with_entry(mut self, type_tag: impl Into<String>, value: Value) -> Self {
        self.entries.insert(type_tag.into(), value);
        self
    }

    /// Register or replace a type default
    pub fn insert(&mut self, type_tag: impl Into<String>, value: Value) {
        self.entries.insert(type_tag.into(), value);
    }

    /// Drop a recognized type
    pub fn remove(&mut self, type_tag: &str) -> Option<Value> {
        self.entries.shift_remove(type_tag)
    }

    /// Check if a type tag is recognized
    #[inline]
    #[must_use]
    pub fn contains(&self, type_tag: &str) -> bool {
        self.entries.contains_key(type_tag)
    }

    /// Default value for a field: declared type first, kind tag second
    #[must_use]
    pub fn lookup(&self, field: &FieldDescriptor) -> Option<Value> {
        self.entries
            .get(&field.type_name)
            .or_else(|| self.entries.get(field.kind.as_str()))
            .cloned()
    }
}

impl Default for DefaultTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_DEFAULTS.clone(),
        }
    }
}

/// Borrow-splitting view over a session's cache, store and default table
///
/// The only recursive entry point into default population; constructed by
/// the session facade and the oneof controller.
pub(crate) struct DefaultPopulator<'a> {
    pub(crate) cache: &'a mut PathFieldCache,
    pub(crate) store: &'a mut MessageStore,
    pub(crate) defaults: &'a DefaultTable,
}

impl DefaultPopulator<'_> {
    /// Write the default for one field at a path
    ///
    /// A nested message field gets its field name as a structural marker
    /// (wrapped as a one-element array when repeated); singular messages
    /// then recurse, upgrading the marker into an object of child defaults.
    /// Repeated messages only warm the cache for the element schema, so a
    /// type that references itself behind repeated indirection terminates.
    pub(crate) fn populate_field(
        &mut self,
        field: &FieldDescriptor,
        path: &FieldPath,
    ) -> Result<(), SessionError> {
        let repeated = field.is_repeated();
        match field.kind {
            FieldKind::Message => {
                let marker = Value::String(field.field_name.clone());
                self.store.set(path, marker, repeated)?;
                if repeated {
                    self.cache.resolve(path)?;
                } else {
                    self.populate_all(path)?;
                }
            }
            FieldKind::Scalar | FieldKind::Oneof => {
                let value = self.defaults.lookup(field).unwrap_or(Value::Null);
                if value.is_null() {
                    tracing::debug!(
                        path = %path,
                        declared = %field.type_name,
                        "no default for type, storing null"
                    );
                }
                self.store.set(path, value, repeated)?;
            }
        }
        Ok(())
    }

    /// Populate defaults for every field of the schema cached at a prefix
    pub(crate) fn populate_all(&mut self, prefix: &FieldPath) -> Result<(), SessionError> {
        let fields = self.cache.resolve(prefix)?.to_vec();
        for field in &fields {
            self.populate_field(field, &prefix.child(&field.field_name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgdraft_schema::{MessageSchema, SchemaRegistry};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    fn run_populate(
        root_fields: Vec<FieldDescriptor>,
        registry: SchemaRegistry,
    ) -> Result<(MessageStore, PathFieldCache), SessionError> {
        let mut cache = PathFieldCache::new(Arc::new(registry));
        cache.seed_root(root_fields);
        let mut store = MessageStore::new();
        let defaults = DefaultTable::new();
        DefaultPopulator {
            cache: &mut cache,
            store: &mut store,
            defaults: &defaults,
        }
        .populate_all(&FieldPath::root())?;
        Ok((store, cache))
    }

    #[test]
    fn table_lookup_by_type_then_kind() {
        let table = DefaultTable::new().with_entry("scalar", json!("fallback"));
        let known = FieldDescriptor::scalar("a", "int32");
        let unknown = FieldDescriptor::scalar("b", "sfixed64");
        assert_eq!(table.lookup(&known), Some(json!(0)));
        assert_eq!(table.lookup(&unknown), Some(json!("fallback")));
    }

    #[test]
    fn table_unrecognized_type_is_none() {
        let table = DefaultTable::new();
        let field = FieldDescriptor::scalar("b", "sfixed64");
        assert_eq!(table.lookup(&field), None);
    }

    #[test]
    fn scalar_defaults_are_written() {
        let (store, _) = run_populate(
            vec![
                FieldDescriptor::scalar("name", "string"),
                FieldDescriptor::scalar("mode", "enum"),
                FieldDescriptor::scalar("count", "int32"),
                FieldDescriptor::scalar("ratio", "float"),
                FieldDescriptor::scalar("enabled", "bool"),
            ],
            SchemaRegistry::new(),
        )
        .unwrap();
        assert_eq!(
            store.root(),
            &json!({"name": "", "mode": 1, "count": 0, "ratio": 0.0, "enabled": false})
        );
    }

    #[test]
    fn unrecognized_scalar_defaults_to_null() {
        let (store, _) = run_populate(
            vec![FieldDescriptor::scalar("raw", "bytes")],
            SchemaRegistry::new(),
        )
        .unwrap();
        assert_eq!(store.root(), &json!({"raw": null}));
    }

    #[test]
    fn repeated_scalar_wraps_default() {
        let (store, _) = run_populate(
            vec![FieldDescriptor::scalar("thresholds", "float").repeated()],
            SchemaRegistry::new(),
        )
        .unwrap();
        assert_eq!(store.root(), &json!({"thresholds": [0.0]}));
    }

    #[test]
    fn oneof_slot_defaults_to_null() {
        let (store, _) = run_populate(
            vec![FieldDescriptor::oneof(
                "output",
                vec![FieldDescriptor::scalar("digital", "bool")],
            )],
            SchemaRegistry::new(),
        )
        .unwrap();
        assert_eq!(store.root(), &json!({"output": null}));
    }

    #[test]
    fn singular_message_recurses_into_defaults() {
        let registry = SchemaRegistry::with_schemas([MessageSchema::new(
            "Pin",
            vec![
                FieldDescriptor::scalar("name", "string"),
                FieldDescriptor::scalar("level", "int32"),
            ],
        )]);
        let (store, cache) =
            run_populate(vec![FieldDescriptor::message("pin", "Pin")], registry).unwrap();
        assert_eq!(store.root(), &json!({"pin": {"name": "", "level": 0}}));
        assert!(cache.contains(&path("pin")));
    }

    #[test]
    fn empty_message_keeps_structural_marker() {
        let registry = SchemaRegistry::with_schemas([MessageSchema::new("Empty", vec![])]);
        let (store, _) =
            run_populate(vec![FieldDescriptor::message("nothing", "Empty")], registry).unwrap();
        assert_eq!(store.root(), &json!({"nothing": "nothing"}));
    }

    #[test]
    fn repeated_message_keeps_marker_and_warms_cache() {
        let registry = SchemaRegistry::with_schemas([MessageSchema::new(
            "Pin",
            vec![FieldDescriptor::scalar("name", "string")],
        )]);
        let (store, cache) = run_populate(
            vec![FieldDescriptor::message("pins", "Pin").repeated()],
            registry,
        )
        .unwrap();
        assert_eq!(store.root(), &json!({"pins": ["pins"]}));
        assert_eq!(cache.fields_at(&path("pins")).unwrap().len(), 1);
    }

    #[test]
    fn self_referential_type_behind_repeated_terminates() {
        let registry = SchemaRegistry::with_schemas([MessageSchema::new(
            "Node",
            vec![
                FieldDescriptor::scalar("label", "string"),
                FieldDescriptor::message("children", "Node").repeated(),
            ],
        )]);
        let (store, _) =
            run_populate(vec![FieldDescriptor::message("tree", "Node")], registry).unwrap();
        assert_eq!(
            store.root(),
            &json!({"tree": {"label": "", "children": ["children"]}})
        );
    }

    #[test]
    fn missing_schema_aborts_population() {
        let err = run_populate(
            vec![FieldDescriptor::message("pin", "Ghost")],
            SchemaRegistry::new(),
        )
        .unwrap_err();
        assert!(err.is_schema_unavailable());
    }
}
