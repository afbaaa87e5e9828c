//! Entity encoding/decoding.
//!
//! Composes the key and value codecs, and reconciles the per-value wire
//! annotations (`indexed`, `meaning`) with the per-property flags of the
//! application model.

use prost::Message;
use tracing::trace;

use crate::codec::key::{key_from_protobuf, key_to_protobuf};
use crate::codec::meaning::{list_meaning, value_meaning};
use crate::codec::value::{decode_value_at, encode_value_with};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{Entity, Meaning, Property, Value};
use crate::pb;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a wire entity.
///
/// Properties are taken in wire order. A property whose value is unindexed
/// is marked excluded; for a list every element must agree. A meaning is
/// recorded together with the decoded value so that encoding can tell
/// whether the value has changed since.
///
/// Any malformed property fails the whole entity.
pub fn entity_from_protobuf(pb: &pb::Entity) -> Result<Entity, DecodeError> {
    decode_entity_at(pb, 0)
}

/// Decodes an entity from protobuf bytes.
pub fn decode_entity(input: &[u8]) -> Result<Entity, DecodeError> {
    let pb = pb::Entity::decode(input)?;
    entity_from_protobuf(&pb)
}

pub(crate) fn decode_entity_at(pb: &pb::Entity, depth: usize) -> Result<Entity, DecodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    let mut entity = match &pb.key {
        Some(key) => Entity::with_key(key_from_protobuf(key)?),
        None => Entity::new(),
    };

    let unset = pb::Value::default();
    for property_pb in &pb.property {
        let value_pb = property_pb.value.as_ref().unwrap_or(&unset);
        let value = decode_value_at(value_pb, depth)?;

        let (excluded, meaning) = if value.is_list() {
            let excluded = list_excluded(&property_pb.name, &value_pb.list_value)?;
            (excluded, list_meaning(&value_pb.list_value)?)
        } else {
            (!value_pb.indexed(), value_meaning(value_pb))
        };

        let meaning = meaning.map(|code| Meaning {
            code,
            original: value.clone(),
        });
        entity.insert(Property {
            name: property_pb.name.clone(),
            value,
            excluded,
            meaning,
        });
    }

    trace!(
        depth,
        properties = entity.len(),
        keyed = entity.key().is_some(),
        "decoded entity"
    );
    Ok(entity)
}

/// Returns whether a list property is excluded from indexes.
///
/// Mixed flags cannot be represented by a single per-property flag.
fn list_excluded(name: &str, items: &[pb::Value]) -> Result<bool, DecodeError> {
    let Some((first, rest)) = items.split_first() else {
        return Ok(false);
    };
    let indexed = first.indexed();
    if rest.iter().any(|item| item.indexed() != indexed) {
        return Err(DecodeError::MixedListIndexing {
            property: name.to_string(),
        });
    }
    Ok(!indexed)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Options for entity encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Drop the dataset id from entity keys.
    ///
    /// The service scopes requests by dataset out of band. Callers that need
    /// it on the key must reattach it. Keys stored as property values are
    /// not affected.
    pub strip_dataset_id: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            strip_dataset_id: true,
        }
    }
}

impl EncodeOptions {
    /// Creates default (dataset-stripping) encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that keep the dataset id on entity keys.
    pub fn keep_dataset_id() -> Self {
        Self {
            strip_dataset_id: false,
        }
    }
}

/// Encodes an entity with default options.
pub fn entity_to_protobuf(entity: &Entity) -> Result<pb::Entity, EncodeError> {
    encode_entity_with(entity, EncodeOptions::default())
}

/// Encodes an entity with the given options.
pub fn entity_to_protobuf_with_options(
    entity: &Entity,
    options: EncodeOptions,
) -> Result<pb::Entity, EncodeError> {
    encode_entity_with(entity, options)
}

/// Encodes an entity to protobuf bytes with default options.
pub fn encode_entity(entity: &Entity) -> Result<Vec<u8>, EncodeError> {
    Ok(entity_to_protobuf(entity)?.encode_to_vec())
}

pub(crate) fn encode_entity_with(
    entity: &Entity,
    options: EncodeOptions,
) -> Result<pb::Entity, EncodeError> {
    let key = entity.key().map(|key| {
        let mut key_pb = key_to_protobuf(key);
        if options.strip_dataset_id {
            strip_dataset_id(&mut key_pb);
        }
        key_pb
    });

    let mut properties = Vec::with_capacity(entity.len());
    for property in entity {
        // An empty list has nothing to carry; omitting it keeps the bytes
        // identical to an entity without the property.
        if property.value.as_list().is_some_and(<[Value]>::is_empty) {
            continue;
        }

        let mut value_pb = encode_value_with(&property.value, options)?;
        let meaning = property.current_meaning();
        if property.value.is_list() {
            for item in &mut value_pb.list_value {
                if property.excluded {
                    item.indexed = Some(false);
                }
                item.meaning = meaning;
            }
        } else {
            if property.excluded {
                value_pb.indexed = Some(false);
            }
            value_pb.meaning = meaning;
        }

        properties.push(pb::Property {
            name: property.name.clone(),
            value: Some(value_pb),
        });
    }

    Ok(pb::Entity {
        key,
        property: properties,
    })
}

fn strip_dataset_id(key: &mut pb::Key) {
    if let Some(partition) = &mut key.partition_id {
        partition.dataset_id = None;
        if partition.namespace.is_none() {
            key.partition_id = None;
        }
    }
}
