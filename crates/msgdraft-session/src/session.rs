//! Session lifecycle and host-facing facade
//!
//! A [`Session`] pairs one message instance with its path-resolution cache;
//! the two are created together by [`Session::start`] and destroyed together
//! by [`Session::clear`], never outliving one another. Every other operation
//! requires an active session and runs synchronously to completion; the host
//! serializes calls, there is no internal locking.

use crate::cache::PathFieldCache;
use crate::error::SessionError;
use crate::oneof::OneofController;
use crate::populate::{DefaultPopulator, DefaultTable};
use crate::store::MessageStore;
use msgdraft_schema::{FieldDescriptor, FieldPath, MessageSchema, SchemaSource};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Receiver of session lifecycle signals
///
/// The core has no concept of screens or routes; the host reacts to these
/// to drive its own navigation. Both methods default to no-ops.
pub trait SessionObserver: Send + Sync {
    /// Entered editing mode for a schema
    fn editing_started(&self, schema: &MessageSchema) {
        let _ = schema;
    }

    /// Returned to neutral mode
    fn editing_cleared(&self) {}
}

/// One message instance under construction, with its cache
struct ActiveMessage {
    schema: MessageSchema,
    cache: PathFieldCache,
    store: MessageStore,
}

/// Owner of the composition state and the host's single entry point
///
/// Holds the external collaborators (schema source, default table, optional
/// lifecycle observer) and at most one active message at a time.
pub struct Session {
    source: Arc<dyn SchemaSource>,
    defaults: DefaultTable,
    observer: Option<Arc<dyn SessionObserver>>,
    active: Option<ActiveMessage>,
}

impl Session {
    /// Create an idle session over a schema source
    #[must_use]
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            defaults: DefaultTable::new(),
            observer: None,
            active: None,
        }
    }

    /// With a custom default-value table
    #[must_use]
    pub fn with_defaults(mut self, defaults: DefaultTable) -> Self {
        self.defaults = defaults;
        self
    }

    /// With a lifecycle observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Start composing a new message for a schema
    ///
    /// Resets any previous message, seeds the root cache entry with a copy
    /// of the schema's fields, populates structural defaults, and signals
    /// the host. On failure the session holds no active message at all —
    /// never a partially populated one.
    ///
    /// # Errors
    /// [`SessionError::SchemaUnavailable`] when a nested message type cannot
    /// be resolved during default population.
    pub fn start(&mut self, schema: MessageSchema) -> Result<(), SessionError> {
        self.active = None;

        let mut cache = PathFieldCache::new(Arc::clone(&self.source));
        cache.seed_root(schema.fields.clone());
        let mut store = MessageStore::new();
        DefaultPopulator {
            cache: &mut cache,
            store: &mut store,
            defaults: &self.defaults,
        }
        .populate_all(&FieldPath::root())?;

        tracing::info!(schema = %schema.name, "message session started");
        if let Some(observer) = &self.observer {
            observer.editing_started(&schema);
        }
        self.active = Some(ActiveMessage {
            schema,
            cache,
            store,
        });
        Ok(())
    }

    /// Discard the active message, its cache and schema reference in one step
    ///
    /// The only full reset in the core, and its only cancellation primitive.
    pub fn clear(&mut self) {
        self.active = None;
        tracing::info!("message session cleared");
        if let Some(observer) = &self.observer {
            observer.editing_cleared();
        }
    }

    /// Check if a message is being composed
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Schema of the active message
    #[inline]
    #[must_use]
    pub fn schema(&self) -> Option<&MessageSchema> {
        self.active.as_ref().map(|active| &active.schema)
    }

    /// The whole instance tree of the active message
    #[inline]
    #[must_use]
    pub fn instance(&self) -> Option<&Value> {
        self.active.as_ref().map(|active| active.store.root())
    }

    /// Read the value at a path
    #[must_use]
    pub fn value(&self, path: &FieldPath) -> Option<&Value> {
        self.active.as_ref().and_then(|active| active.store.get(path))
    }

    /// Cached field descriptors at a path, without resolving
    #[must_use]
    pub fn fields_at(&self, path: &FieldPath) -> Option<&[FieldDescriptor]> {
        self.active
            .as_ref()
            .and_then(|active| active.cache.fields_at(path))
    }

    /// Number of cached path entries (zero when idle)
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.active.as_ref().map_or(0, |active| active.cache.len())
    }

    /// Resolve the field descriptors valid at a path
    ///
    /// # Errors
    /// [`SessionError::NoActiveSession`] when idle;
    /// [`SessionError::SchemaUnavailable`] for an unresolvable nested type.
    pub fn resolve(&mut self, path: &FieldPath) -> Result<&[FieldDescriptor], SessionError> {
        self.active
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?
            .cache
            .resolve(path)
    }

    /// Write a value at a path, creating intermediate containers
    ///
    /// With `as_array` the value is stored as a single-element sequence
    /// (repeated field slots).
    ///
    /// # Errors
    /// [`SessionError::NoActiveSession`] when idle; store errors for
    /// unwritable paths.
    pub fn set_value(
        &mut self,
        path: &FieldPath,
        value: Value,
        as_array: bool,
    ) -> Result<(), SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        active.store.set(path, value, as_array)?;
        Ok(())
    }

    /// Delete the value at a path
    ///
    /// # Errors
    /// [`SessionError::NoActiveSession`] when idle.
    pub fn remove_value(&mut self, path: &FieldPath) -> Result<Option<Value>, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        Ok(active.store.remove(path))
    }

    /// Remove and return the last element of the array at a path
    ///
    /// # Errors
    /// [`SessionError::NoActiveSession`] when idle;
    /// [`SessionError::Store`] when the slot holds a non-array.
    pub fn pop_last(&mut self, path: &FieldPath) -> Result<Option<Value>, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        Ok(active.store.pop_last(path)?)
    }

    /// Activate a oneof option at the group's path
    ///
    /// # Errors
    /// [`SessionError::NoActiveSession`] when idle;
    /// [`SessionError::SchemaUnavailable`] when the option's payload schema
    /// is missing (checked before any mutation).
    pub fn activate(
        &mut self,
        path: &FieldPath,
        selection: &FieldDescriptor,
    ) -> Result<(), SessionError> {
        let Some(active) = self.active.as_mut() else {
            return Err(SessionError::NoActiveSession);
        };
        OneofController {
            cache: &mut active.cache,
            store: &mut active.store,
            defaults: &self.defaults,
        }
        .activate(path, selection)
    }

    /// Deactivate a oneof option at the group's path
    ///
    /// # Errors
    /// [`SessionError::NoActiveSession`] when idle.
    pub fn deactivate(
        &mut self,
        path: &FieldPath,
        selection: &FieldDescriptor,
    ) -> Result<(), SessionError> {
        let Some(active) = self.active.as_mut() else {
            return Err(SessionError::NoActiveSession);
        };
        OneofController {
            cache: &mut active.cache,
            store: &mut active.store,
            defaults: &self.defaults,
        }
        .deactivate(path, selection)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.active.is_some())
            .field("schema", &self.schema().map(|s| s.name.as_str()))
            .finish_non_exhaustive()
    }
}
