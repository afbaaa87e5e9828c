//! Protobuf marshalling between the application model and the wire messages.

pub mod entity;
pub mod key;
pub mod meaning;
pub mod value;

pub use entity::{
    decode_entity, encode_entity, entity_from_protobuf, entity_to_protobuf,
    entity_to_protobuf_with_options, EncodeOptions,
};
pub use key::{decode_key, encode_key, key_from_protobuf, key_to_protobuf, prepare_key_for_request};
pub use meaning::{list_meaning, value_meaning};
pub use value::{value_from_protobuf, value_to_protobuf, wire_tag_of};
