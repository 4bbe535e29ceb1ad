//! Schema source abstraction
//!
//! The core never parses schema definition files; it asks a [`SchemaSource`]
//! for the definition behind a `message`-typed field and treats a missing
//! result as the caller's problem to surface.

use crate::descriptor::{FieldDescriptor, MessageSchema};
use indexmap::IndexMap;

/// External lookup capability for message type definitions
///
/// Implementations are synchronous and must never block indefinitely; a
/// lookup either yields the schema behind the field's declared type or
/// reports it missing with `None`.
pub trait SchemaSource: Send + Sync {
    /// Resolve the schema referenced by a field's declared type
    fn lookup(&self, field: &FieldDescriptor) -> Option<MessageSchema>;
}

/// In-memory [`SchemaSource`] keyed by message type name
///
/// Insertion order is preserved so hosts can enumerate types in the order
/// they were registered.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, MessageSchema>,
}

impl SchemaRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: IndexMap::new(),
        }
    }

    /// Create registry from an iterator of schemas
    #[must_use]
    pub fn with_schemas(schemas: impl IntoIterator<Item = MessageSchema>) -> Self {
        let mut registry = Self::new();
        for schema in schemas {
            registry.register(schema);
        }
        registry
    }

    /// Register a schema under its type name, replacing any previous one
    pub fn register(&mut self, schema: MessageSchema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// Get a schema by type name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MessageSchema> {
        self.schemas.get(name)
    }

    /// Check if a type name is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Number of registered schemas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered type names in insertion order
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }
}

impl SchemaSource for SchemaRegistry {
    fn lookup(&self, field: &FieldDescriptor) -> Option<MessageSchema> {
        self.schemas.get(&field.type_name).cloned()
    }
}
