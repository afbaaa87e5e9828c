//! Protobuf marshalling for the legacy datastore wire format.
//!
//! This crate converts between typed application entities and the
//! protocol-buffer messages exchanged with the datastore service
//! (v1beta2 schema).
//!
//! # Overview
//!
//! - **Values**: a closed set of kinds (null, bool, integer, double,
//!   timestamp, string, blob, key, entity, list), each carried in one field
//!   of the wire value union
//! - **Keys**: partitioned, hierarchical identifiers
//! - **Entities**: ordered properties with per-property index exclusion and
//!   the semantic annotation ("meaning") they were decoded with
//! - **Dataset resolution**: discovers the fully qualified id of a bare
//!   dataset id with a single probe lookup
//!
//! # Quick Start
//!
//! ```rust
//! use datastore_codec::{Entity, Key, Value};
//! use datastore_codec::codec::{decode_entity, encode_entity};
//!
//! let key = Key::single("Person", "alice").unwrap();
//! let mut entity = Entity::with_key(key);
//! entity.set("name", "Alice");
//! entity.set("age", 31);
//! entity.set("tags", vec![Value::from("admin"), Value::from("ops")]);
//! entity.exclude_from_indexes("tags");
//!
//! // Encode to protobuf bytes
//! let bytes = encode_entity(&entity).unwrap();
//!
//! // Decode back
//! let decoded = decode_entity(&bytes).unwrap();
//! assert_eq!(decoded, entity);
//! assert!(decoded.is_excluded("tags"));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Application types (Entity, Key, Value)
//! - [`codec`]: Conversion to and from the wire messages
//! - [`pb`]: The wire messages
//! - [`resolve`]: Dataset identity resolution over an injected transport
//! - [`error`]: Error types
//! - [`limits`]: Decoding limits and sentinel constants
//!
//! # Security
//!
//! Decoding untrusted input is bounded: entity nesting is limited to
//! [`limits::MAX_NESTING_DEPTH`], and malformed keys, nested lists and
//! inconsistent list annotations are rejected with descriptive errors.
//! A single malformed property fails the whole entity.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod pb;
pub mod resolve;

// Re-export commonly used types at crate root
pub use codec::{
    decode_entity, decode_key, encode_entity, encode_key, entity_from_protobuf,
    entity_to_protobuf, entity_to_protobuf_with_options, key_from_protobuf, key_to_protobuf,
    prepare_key_for_request, value_from_protobuf, value_to_protobuf, EncodeOptions,
};
pub use error::{DecodeError, EncodeError, ErrorKind, KeyError, ResolveError};
pub use model::{Entity, FlatPathItem, Key, KeyId, Meaning, PathElement, Property, Value, WireTag};
pub use resolve::{find_true_dataset_id, probe_request, Lookup};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
