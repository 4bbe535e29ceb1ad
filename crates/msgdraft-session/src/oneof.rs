//! Oneof variant activation and deactivation
//!
//! A oneof option is schema-absent until chosen, so it cannot be treated as
//! an ordinary always-present field. The controller is the single place that
//! keeps the descriptor cache and the instance tree mutually consistent
//! across variant switches: activating appends the option as a valid sibling
//! field and seeds its payload, deactivating removes both again.

use crate::cache::PathFieldCache;
use crate::error::SessionError;
use crate::populate::{DefaultPopulator, DefaultTable};
use crate::store::MessageStore;
use msgdraft_schema::{FieldDescriptor, FieldPath};
use serde_json::Value;

/// Borrow-splitting view driving variant switches
pub(crate) struct OneofController<'a> {
    pub(crate) cache: &'a mut PathFieldCache,
    pub(crate) store: &'a mut MessageStore,
    pub(crate) defaults: &'a DefaultTable,
}

impl OneofController<'_> {
    /// Activate a oneof option
    ///
    /// `path` addresses the oneof group's own slot, which holds the
    /// discriminator value; the option's payload lands beside it at
    /// `parent(path).option_name`. A previously active sibling recorded in
    /// the discriminator is deactivated first. The fallible schema lookup
    /// happens before any mutation, so a failed activation leaves no
    /// partial state behind.
    pub(crate) fn activate(
        &mut self,
        path: &FieldPath,
        selection: &FieldDescriptor,
    ) -> Result<(), SessionError> {
        let group = path.parent().unwrap_or_default();
        let payload = group.child(&selection.field_name);
        self.cache.ensure_resolvable(selection, &payload)?;

        let previous = match self.store.get(path) {
            Some(Value::String(name)) if *name != selection.field_name => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = previous {
            if let Some(sibling) = self.cache.option_named(&group, &name) {
                self.deactivate(path, &sibling)?;
            }
        }

        self.cache.resolve(&group)?;
        if self.cache.option_named(&group, &selection.field_name).is_none() {
            self.cache.append_option(&group, selection.clone());
        }
        self.store
            .set(path, Value::String(selection.field_name.clone()), false)?;
        DefaultPopulator {
            cache: &mut *self.cache,
            store: &mut *self.store,
            defaults: self.defaults,
        }
        .populate_field(selection, &payload)?;

        tracing::debug!(path = %path, option = %selection.field_name, "activated oneof option");
        Ok(())
    }

    /// Deactivate a oneof option
    ///
    /// Removes the option from the group's field list, drops cache entries
    /// at and below the payload path, deletes the payload value, and clears
    /// the discriminator to null. Deactivating an option that is not active
    /// is stale UI intent: logged and ignored, the session stays untouched.
    pub(crate) fn deactivate(
        &mut self,
        path: &FieldPath,
        selection: &FieldDescriptor,
    ) -> Result<(), SessionError> {
        let group = path.parent().unwrap_or_default();
        if !self.cache.remove_option(&group, selection) {
            tracing::warn!(
                path = %path,
                option = %selection.field_name,
                "deactivation of inactive oneof option ignored"
            );
            return Ok(());
        }

        let payload = group.child(&selection.field_name);
        self.cache.invalidate(&payload);
        self.store.remove(&payload);
        self.store.set(path, Value::Null, false)?;

        tracing::debug!(path = %path, option = %selection.field_name, "deactivated oneof option");
        Ok(())
    }
}
