//! Document-store abstraction
//!
//! The persistence collaborator is an opaque document store: logical
//! collections of loosely-typed records queried by filter. Everything the
//! rest of the crate knows about persistence goes through the
//! [`DocumentStore`] and [`DocumentCollection`] traits defined here.

mod collection;
mod filter;

pub use collection::{DocumentCollection, DocumentStore, UpdateOutcome};
pub use filter::{FieldChange, Filter, Update};

/// A single stored record: a flat JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;
