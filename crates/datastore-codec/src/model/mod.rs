//! Data model types for the datastore codec.
//!
//! This module contains the application-side types:
//! - Keys (hierarchical, partitioned identifiers)
//! - Values (the closed set of property value kinds)
//! - Entities (ordered property bags with index and meaning metadata)

pub mod entity;
pub mod key;
pub mod value;

pub use entity::{Entity, Meaning, Property};
pub use key::{FlatPathItem, Key, KeyId, PathElement};
pub use value::{Value, WireTag};
