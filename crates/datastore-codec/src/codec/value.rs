//! Value encoding/decoding.
//!
//! Maps each application value kind onto its field of the wire `Value`
//! union and back. Nested entities go through the entity codec, keys
//! through the key codec.

use chrono::DateTime;

use crate::codec::entity::{EncodeOptions, decode_entity_at, encode_entity_with};
use crate::codec::key::{key_from_protobuf, key_to_protobuf};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Value, WireTag};
use crate::pb;

// =============================================================================
// DECODING
// =============================================================================

/// Returns the field a wire value carries its payload in.
///
/// The protocol sets at most one; if several are set the first in this
/// order wins. An empty `list_value` counts as unset.
pub fn wire_tag_of(pb: &pb::Value) -> Option<WireTag> {
    if pb.timestamp_microseconds_value.is_some() {
        Some(WireTag::TimestampMicrosecondsValue)
    } else if pb.key_value.is_some() {
        Some(WireTag::KeyValue)
    } else if pb.boolean_value.is_some() {
        Some(WireTag::BooleanValue)
    } else if pb.double_value.is_some() {
        Some(WireTag::DoubleValue)
    } else if pb.integer_value.is_some() {
        Some(WireTag::IntegerValue)
    } else if pb.string_value.is_some() {
        Some(WireTag::StringValue)
    } else if pb.blob_key_value.is_some() {
        Some(WireTag::BlobKeyValue)
    } else if pb.blob_value.is_some() {
        Some(WireTag::BlobValue)
    } else if pb.entity_value.is_some() {
        Some(WireTag::EntityValue)
    } else if !pb.list_value.is_empty() {
        Some(WireTag::ListValue)
    } else {
        None
    }
}

/// Decodes a wire value.
///
/// A value with no field set decodes to [`Value::Null`]. Timestamps decode
/// as UTC.
pub fn value_from_protobuf(pb: &pb::Value) -> Result<Value, DecodeError> {
    decode_value_at(pb, 0)
}

pub(crate) fn decode_value_at(pb: &pb::Value, depth: usize) -> Result<Value, DecodeError> {
    let Some(tag) = wire_tag_of(pb) else {
        return Ok(Value::Null);
    };

    let value = match tag {
        WireTag::TimestampMicrosecondsValue => {
            let micros = pb.timestamp_microseconds_value();
            let timestamp = DateTime::from_timestamp_micros(micros)
                .ok_or(DecodeError::TimestampOutOfRange { micros })?;
            Value::Timestamp(timestamp)
        }
        WireTag::KeyValue => match &pb.key_value {
            Some(key) => Value::Key(key_from_protobuf(key)?),
            None => Value::Null,
        },
        WireTag::BooleanValue => Value::Bool(pb.boolean_value()),
        WireTag::DoubleValue => Value::Double(pb.double_value()),
        WireTag::IntegerValue => Value::Integer(pb.integer_value()),
        WireTag::StringValue => Value::String(pb.string_value().to_string()),
        WireTag::BlobKeyValue => Value::String(pb.blob_key_value().to_string()),
        WireTag::BlobValue => Value::Blob(pb.blob_value().to_vec()),
        WireTag::EntityValue => match &pb.entity_value {
            Some(entity) => Value::Entity(decode_entity_at(entity, depth + 1)?),
            None => Value::Null,
        },
        WireTag::ListValue => {
            let mut items = Vec::with_capacity(pb.list_value.len());
            for item in &pb.list_value {
                if !item.list_value.is_empty() {
                    return Err(DecodeError::NestedList);
                }
                items.push(decode_value_at(item, depth)?);
            }
            Value::List(items)
        }
    };
    Ok(value)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value into a fresh wire value.
///
/// `indexed` and `meaning` are left unset; the entity codec fills them in.
/// Null produces a wire value with no field set.
pub fn value_to_protobuf(value: &Value) -> Result<pb::Value, EncodeError> {
    encode_value_with(value, EncodeOptions::default())
}

pub(crate) fn encode_value_with(
    value: &Value,
    options: EncodeOptions,
) -> Result<pb::Value, EncodeError> {
    let mut pb = pb::Value::default();
    match value {
        Value::Null => {}
        Value::Key(key) => pb.key_value = Some(key_to_protobuf(key)),
        Value::Entity(entity) => pb.entity_value = Some(encode_entity_with(entity, options)?),
        Value::List(items) => {
            pb.list_value = Vec::with_capacity(items.len());
            for item in items {
                if item.is_list() {
                    return Err(EncodeError::NestedList);
                }
                pb.list_value.push(encode_value_with(item, options)?);
            }
        }
        Value::Bool(b) => pb.boolean_value = Some(*b),
        Value::Integer(i) => pb.integer_value = Some(*i),
        Value::Double(f) => pb.double_value = Some(*f),
        // Whole seconds times 10^6 plus the microsecond remainder; any
        // sub-microsecond part is truncated.
        Value::Timestamp(t) => pb.timestamp_microseconds_value = Some(t.timestamp_micros()),
        Value::Blob(bytes) => pb.blob_value = Some(bytes.clone()),
        Value::String(s) => pb.string_value = Some(s.clone()),
    }
    Ok(pb)
}
