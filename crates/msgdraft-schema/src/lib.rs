//! msgdraft Schema Model
//!
//! Leaf data model for the msgdraft workspace: recursively structured message
//! schemas, typed field paths, and the schema-source abstraction the session
//! core resolves nested types through.
//!
//! # Core Concepts
//!
//! - [`FieldDescriptor`]: metadata for one field (name, kind, type, rule)
//! - [`MessageSchema`]: named, ordered collection of field descriptors
//! - [`FieldPath`]: typed dot path addressing a slot in a message instance
//! - [`SchemaSource`]: external lookup for `message`-typed fields
//! - [`SchemaRegistry`]: in-memory source implementation
//!
//! # Example
//!
//! ```
//! use msgdraft_schema::{FieldDescriptor, FieldPath, MessageSchema, SchemaRegistry};
//!
//! let schema = MessageSchema::new(
//!     "Pin",
//!     vec![FieldDescriptor::scalar("name", "string")],
//! );
//! let registry = SchemaRegistry::with_schemas([schema]);
//! assert!(registry.contains("Pin"));
//!
//! let path: FieldPath = "pins[0].name".parse().unwrap();
//! assert_eq!(path.canonical().to_string(), "pins.name");
//! ```

mod descriptor;
mod path;
mod source;

// Re-exports
pub use descriptor::{FieldDescriptor, FieldKind, FieldRule, MessageSchema};
pub use path::{FieldPath, PathError, PathSegment};
pub use source::{SchemaRegistry, SchemaSource};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for schema handling
    pub use crate::{
        FieldDescriptor, FieldKind, FieldPath, FieldRule, MessageSchema, PathSegment,
        SchemaRegistry, SchemaSource,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
