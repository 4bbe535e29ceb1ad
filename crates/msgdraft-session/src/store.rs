//! Path-addressed value store for a message instance
//!
//! [`MessageStore`] is the schema-unaware half of the core: generic
//! read/write/delete of values inside a nested tree addressed by
//! [`FieldPath`]. All schema-driven decisions happen in the populator and
//! the oneof controller.

use crate::error::StoreError;
use msgdraft_schema::{FieldPath, PathSegment};
use serde_json::{Map, Value};

/// Nested value tree holding the message instance under construction
///
/// The root is always an object. Writes create intermediate containers as
/// needed; a non-container intermediate (such as a structural marker left by
/// the populator) is upgraded to a container when a write descends through
/// it.
#[derive(Debug, Clone)]
pub struct MessageStore {
    root: Value,
}

impl MessageStore {
    /// Create an empty instance tree
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// The whole instance tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Check if nothing has been written yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.as_object().is_some_and(Map::is_empty)
    }

    /// Read the value at a path
    ///
    /// The root path yields the whole tree. Returns `None` for missing slots
    /// and for index access into non-array values.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.segments() {
            current = current.as_object()?.get(segment.name())?;
            if let Some(index) = segment.index() {
                current = current.as_array()?.get(index)?;
            }
        }
        Some(current)
    }

    /// Write a value at a path, creating intermediate containers
    ///
    /// With `as_array` the value is wrapped as a single-element sequence,
    /// which is how repeated field slots are seeded.
    pub fn set(&mut self, path: &FieldPath, value: Value, as_array: bool) -> Result<(), StoreError> {
        let Some(last) = path.last() else {
            return Err(StoreError::RootWrite);
        };
        let stored = if as_array {
            Value::Array(vec![value])
        } else {
            value
        };

        let mut current = &mut self.root;
        for segment in &path.segments()[..path.len() - 1] {
            current = descend(current, segment);
        }

        let map = ensure_object(current);
        match last.index() {
            None => {
                map.insert(last.name().to_string(), stored);
            }
            Some(index) => {
                let slot = map
                    .entry(last.name().to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                *ensure_element(slot, index) = stored;
            }
        }
        Ok(())
    }

    /// Delete the slot at a path, returning the removed value
    ///
    /// Removing the root or a missing slot is a no-op yielding `None`.
    pub fn remove(&mut self, path: &FieldPath) -> Option<Value> {
        let last = path.last()?.clone();
        let parent = path.parent()?;
        let map = self.get_mut(&parent)?.as_object_mut()?;
        match last.index() {
            None => map.remove(last.name()),
            Some(index) => {
                let items = map.get_mut(last.name())?.as_array_mut()?;
                (index < items.len()).then(|| items.remove(index))
            }
        }
    }

    /// Remove and return the last element of the array at a path
    ///
    /// A missing slot yields `Ok(None)`; a present non-array slot is a
    /// [`StoreError::NotAnArray`].
    pub fn pop_last(&mut self, path: &FieldPath) -> Result<Option<Value>, StoreError> {
        match self.get_mut(path) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(items.pop()),
            Some(_) => Err(StoreError::NotAnArray {
                path: path.to_string(),
            }),
        }
    }

    fn get_mut(&mut self, path: &FieldPath) -> Option<&mut Value> {
        let mut current = &mut self.root;
        for segment in path.segments() {
            current = current.as_object_mut()?.get_mut(segment.name())?;
            if let Some(index) = segment.index() {
                current = current.as_array_mut()?.get_mut(index)?;
            }
        }
        Some(current)
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Traverse one segment for writing, creating or upgrading containers
fn descend<'a>(slot: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    let map = ensure_object(slot);
    let child = map
        .entry(segment.name().to_string())
        .or_insert_with(|| match segment.index() {
            Some(_) => Value::Array(Vec::new()),
            None => Value::Object(Map::new()),
        });
    match segment.index() {
        Some(index) => ensure_element(child, index),
        None => child,
    }
}

fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just made an object"),
    }
}

/// Array element at `index`, padding with nulls and replacing a non-array
fn ensure_element(slot: &mut Value, index: usize) -> &mut Value {
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => {
            while items.len() <= index {
                items.push(Value::Null);
            }
            &mut items[index]
        }
        _ => unreachable!("slot was just made an array"),
    }
}
