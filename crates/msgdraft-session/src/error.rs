//! Error types for the session core
//!
//! Two error classes, matching the degradation policy of the core:
//! - recoverable structural misses are logged and cached as dead ends, never
//!   surfaced as errors;
//! - an unresolvable `message`-typed field is fatal for the resolution call
//!   and always surfaced to the caller.

use msgdraft_schema::{FieldDescriptor, FieldPath, PathError};

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Operation requires an active message session
    #[error("no active message session")]
    NoActiveSession,

    /// Schema source could not supply a definition for a message-typed field
    #[error("schema not found for field '{field}' of type '{type_name}' at '{path}'")]
    SchemaUnavailable {
        /// Name of the unresolved field
        field: String,
        /// Declared message type the source failed to supply
        type_name: String,
        /// Path at which resolution failed
        path: String,
    },

    /// Value store rejected the operation
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Malformed field path
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

impl SessionError {
    /// Fatal schema-unavailable error for a field at a path
    #[must_use]
    pub(crate) fn schema_unavailable(field: &FieldDescriptor, path: &FieldPath) -> Self {
        Self::SchemaUnavailable {
            field: field.field_name.clone(),
            type_name: field.type_name.clone(),
            path: path.to_string(),
        }
    }

    /// Check if the error is the fatal schema-unavailable class
    #[inline]
    #[must_use]
    pub fn is_schema_unavailable(&self) -> bool {
        matches!(self, Self::SchemaUnavailable { .. })
    }
}

/// Errors from the schema-unaware value store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The instance root is not a writable slot
    #[error("cannot write the instance root directly")]
    RootWrite,

    /// Array operation on a non-array value
    #[error("value at '{path}' is not an array")]
    NotAnArray {
        /// Path holding the offending value
        path: String,
    },
}
