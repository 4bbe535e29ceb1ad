//! Per-path field descriptor cache
//!
//! [`PathFieldCache`] memoizes, per canonical dot path, the ordered list of
//! field descriptors valid at that path, resolving nested message schemas on
//! demand through the external [`SchemaSource`]. Entries hold independent
//! copies of the canonical schema's fields so that runtime add/remove of
//! oneof options at one path never mutates the template data.

use crate::error::SessionError;
use indexmap::IndexMap;
use msgdraft_schema::{FieldDescriptor, FieldKind, FieldPath, SchemaSource};
use std::fmt;
use std::sync::Arc;

/// Lazily filled map from canonical path to the fields valid there
///
/// An entry exists iff its path has been resolved (or seeded/appended) since
/// the current message started. Entries are only removed by
/// [`PathFieldCache::invalidate`] at a prefix path or by
/// [`PathFieldCache::reset`].
pub struct PathFieldCache {
    entries: IndexMap<FieldPath, Vec<FieldDescriptor>>,
    source: Arc<dyn SchemaSource>,
}

impl PathFieldCache {
    /// Create an empty cache backed by a schema source
    #[must_use]
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            entries: IndexMap::new(),
            source,
        }
    }

    /// Install the root entry from a schema's field list
    ///
    /// The caller passes an owned copy; the canonical schema stays untouched.
    pub fn seed_root(&mut self, fields: Vec<FieldDescriptor>) {
        self.entries.insert(FieldPath::root(), fields);
    }

    /// Resolve the field descriptors valid at a path
    ///
    /// A cache hit for the full canonical path short-circuits. Otherwise the
    /// path is walked prefix-by-prefix: an unmatched segment is a recoverable
    /// structural miss (logged, cached as an empty dead end), while a
    /// `message`-typed field whose schema the source cannot supply is fatal
    /// for the call.
    ///
    /// # Errors
    /// [`SessionError::SchemaUnavailable`] when the source has no definition
    /// for a structural field on the path.
    pub fn resolve(&mut self, path: &FieldPath) -> Result<&[FieldDescriptor], SessionError> {
        let key = path.canonical();
        if !self.entries.contains_key(&key) {
            self.resolve_walk(&key)?;
        }
        Ok(self.entries.get(&key).map_or(&[], Vec::as_slice))
    }

    fn resolve_walk(&mut self, key: &FieldPath) -> Result<(), SessionError> {
        for depth in 1..=key.len() {
            let current = key.prefix(depth);
            if self.entries.contains_key(&current) {
                continue;
            }

            let parent = current.parent().unwrap_or_default();
            let segment = current.last_name().unwrap_or_default().to_string();
            let owner = self
                .entries
                .get(&parent)
                .and_then(|fields| owner_for(fields, &segment))
                .cloned();

            let Some(target) = owner else {
                tracing::warn!(path = %current, segment = %segment, "field not found, caching structural dead end");
                self.entries.insert(current, Vec::new());
                continue;
            };

            match target.kind {
                FieldKind::Message => {
                    let schema = self
                        .source
                        .lookup(&target)
                        .ok_or_else(|| SessionError::schema_unavailable(&target, &current))?;
                    tracing::debug!(
                        path = %current,
                        schema = %schema.name,
                        fields = schema.fields.len(),
                        "cached nested schema fields"
                    );
                    self.entries.insert(current, schema.fields);
                }
                FieldKind::Scalar | FieldKind::Oneof => {
                    tracing::debug!(path = %current, kind = %target.kind, "field has no child fields");
                    self.entries.insert(current, Vec::new());
                }
            }
        }
        Ok(())
    }

    /// Pre-flight check that a field's schema, if any, can be resolved
    ///
    /// Used by the oneof controller to fail an activation before mutating
    /// anything. Non-message fields always pass.
    ///
    /// # Errors
    /// [`SessionError::SchemaUnavailable`] when a `message`-typed field has
    /// no definition in the source.
    pub fn ensure_resolvable(
        &self,
        field: &FieldDescriptor,
        path: &FieldPath,
    ) -> Result<(), SessionError> {
        match field.kind {
            FieldKind::Message if self.source.lookup(field).is_none() => {
                Err(SessionError::schema_unavailable(field, path))
            }
            FieldKind::Message | FieldKind::Scalar | FieldKind::Oneof => Ok(()),
        }
    }

    /// Append an activated oneof option to the group's field list
    pub fn append_option(&mut self, group: &FieldPath, option: FieldDescriptor) {
        self.entries
            .entry(group.canonical())
            .or_default()
            .push(option);
    }

    /// Remove a previously appended oneof option from the group's field list
    ///
    /// Returns whether the option was present.
    pub fn remove_option(&mut self, group: &FieldPath, option: &FieldDescriptor) -> bool {
        let Some(fields) = self.entries.get_mut(&group.canonical()) else {
            return false;
        };
        match fields.iter().position(|field| field == option) {
            Some(index) => {
                fields.remove(index);
                true
            }
            None => false,
        }
    }

    /// Find a direct field entry by name at a group path
    #[must_use]
    pub fn option_named(&self, group: &FieldPath, name: &str) -> Option<FieldDescriptor> {
        self.entries
            .get(&group.canonical())?
            .iter()
            .find(|field| field.field_name == name)
            .cloned()
    }

    /// Drop the entry at a path and every descendant entry
    pub fn invalidate(&mut self, path: &FieldPath) {
        let key = path.canonical();
        self.entries.retain(|cached, _| !key.is_prefix_of(cached));
    }

    /// Drop all entries
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Non-resolving read-only view of the entry at a path
    #[must_use]
    pub fn fields_at(&self, path: &FieldPath) -> Option<&[FieldDescriptor]> {
        self.entries.get(&path.canonical()).map(Vec::as_slice)
    }

    /// Check if a path has been resolved
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.entries.contains_key(&path.canonical())
    }

    /// Number of cached entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for PathFieldCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFieldCache")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Find the descriptor a path segment addresses within a field list
///
/// Oneof fields are matched through their option list, never through the
/// oneof's own name; the matching option is the owner.
fn owner_for<'a>(fields: &'a [FieldDescriptor], segment: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find_map(|field| match field.kind {
        FieldKind::Oneof => field.option_named(segment),
        FieldKind::Scalar | FieldKind::Message => {
            (field.field_name == segment).then_some(field)
        }
    })
}
