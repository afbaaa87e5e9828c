//! Application-level values.
//!
//! Values are the typed contents of entity properties. The set of kinds is
//! closed; each maps onto exactly one field of the wire value.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::error::EncodeError;
use crate::model::{Entity, Key};

/// Wire field a value is carried in, numbered as in the `Value` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireTag {
    BooleanValue = 1,
    IntegerValue = 2,
    DoubleValue = 3,
    TimestampMicrosecondsValue = 4,
    KeyValue = 5,
    EntityValue = 6,
    ListValue = 7,
    BlobKeyValue = 16,
    StringValue = 17,
    BlobValue = 18,
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value. Encodes to a wire value with no field set.
    Null,

    Bool(bool),

    Integer(i64),

    Double(f64),

    /// UTC timestamp, carried on the wire with microsecond precision.
    ///
    /// Build it with `Value::from`, which truncates to microseconds. A
    /// timestamp constructed here directly loses any sub-microsecond part
    /// on encode and so does not compare equal after a round trip.
    Timestamp(DateTime<Utc>),

    /// Unicode text.
    String(String),

    /// Opaque bytes.
    Blob(Vec<u8>),

    /// Reference to another entity.
    Key(Key),

    /// Nested entity, owned by the containing property.
    Entity(Entity),

    /// Homogeneously annotated values. May not contain another list.
    List(Vec<Value>),
}

impl Value {
    /// Returns the wire field this value is encoded into.
    ///
    /// Null has no field.
    pub fn wire_tag(&self) -> Option<WireTag> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(WireTag::BooleanValue),
            Value::Integer(_) => Some(WireTag::IntegerValue),
            Value::Double(_) => Some(WireTag::DoubleValue),
            Value::Timestamp(_) => Some(WireTag::TimestampMicrosecondsValue),
            Value::String(_) => Some(WireTag::StringValue),
            Value::Blob(_) => Some(WireTag::BlobValue),
            Value::Key(_) => Some(WireTag::KeyValue),
            Value::Entity(_) => Some(WireTag::EntityValue),
            Value::List(_) => Some(WireTag::ListValue),
        }
    }

    /// Creates an integer value from a wider integer.
    ///
    /// Fails with a range error outside the signed 64-bit range.
    pub fn integer(value: i128) -> Result<Value, EncodeError> {
        i64::try_from(value)
            .map(Value::Integer)
            .map_err(|_| EncodeError::IntegerOutOfRange { value })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&Key> {
        match self {
            Value::Key(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Value::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<u64> for Value {
    type Error = EncodeError;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        Value::integer(i128::from(v))
    }
}

impl TryFrom<i128> for Value {
    type Error = EncodeError;

    fn try_from(v: i128) -> Result<Self, Self::Error> {
        Value::integer(v)
    }
}

impl TryFrom<u128> for Value {
    type Error = EncodeError;

    fn try_from(v: u128) -> Result<Self, Self::Error> {
        // Anything past i128::MAX is also past i64::MAX; saturate for the report.
        Value::integer(i128::try_from(v).unwrap_or(i128::MAX))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Double(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

/// Truncates to microseconds so the value survives a wire round trip.
impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v.trunc_subsecs(6))
    }
}

/// A naive datetime is taken to be UTC already.
impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::from(v.and_utc())
    }
}

impl From<Key> for Value {
    fn from(v: Key) -> Self {
        Value::Key(v)
    }
}

impl From<Entity> for Value {
    fn from(v: Entity) -> Self {
        Value::Entity(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
