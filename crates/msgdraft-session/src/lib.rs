//! msgdraft Session Core
//!
//! Incremental construction of one message instance against a recursively
//! defined schema, addressed by dot-delimited paths.
//!
//! # Core Concepts
//!
//! - [`Session`]: lifecycle owner pairing one instance with its path cache
//! - [`PathFieldCache`]: memoized field descriptors per canonical path
//! - [`MessageStore`]: schema-unaware path-addressed value tree
//! - [`DefaultTable`]: configurable scalar default values
//! - [`SessionObserver`]: lifecycle signals for the host's navigation
//!
//! The oneof controller and default populator are internal; the host drives
//! them through [`Session::activate`], [`Session::deactivate`] and
//! [`Session::start`].
//!
//! # Example
//!
//! ```
//! use msgdraft_schema::{FieldDescriptor, FieldPath, MessageSchema, SchemaRegistry};
//! use msgdraft_session::Session;
//! use std::sync::Arc;
//!
//! let registry = SchemaRegistry::new();
//! let mut session = Session::new(Arc::new(registry));
//! session.start(MessageSchema::new(
//!     "Status",
//!     vec![FieldDescriptor::scalar("note", "string")],
//! ))?;
//!
//! let note: FieldPath = "note".parse()?;
//! assert_eq!(session.value(&note), Some(&serde_json::json!("")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cache;
mod error;
mod oneof;
mod populate;
mod session;
mod store;

// Re-exports
pub use cache::PathFieldCache;
pub use error::{SessionError, StoreError};
pub use populate::DefaultTable;
pub use session::{Session, SessionObserver};
pub use store::MessageStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
