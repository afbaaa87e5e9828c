//! Wire messages for the legacy datastore protocol (v1beta2, proto2 syntax).
//!
//! These are the message shapes `prost-build` emits for the service's
//! `datastore_v1beta2.proto`, written out with `prost` derives so the crate
//! builds without `protoc`. Only the messages the codec and the dataset
//! resolver touch are included.
//!
//! Proto2 presence is kept: every optional scalar is an `Option`, so "unset"
//! and "set to the default" stay distinguishable (the meaning resolution
//! depends on it).

/// Partition a key or entity lives in.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PartitionId {
    #[prost(string, optional, tag = "3")]
    pub dataset_id: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub namespace: Option<String>,
}

/// A hierarchical key: partition plus an ordered path.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Key {
    #[prost(message, optional, tag = "1")]
    pub partition_id: Option<PartitionId>,
    #[prost(message, repeated, tag = "2")]
    pub path_element: Vec<key::PathElement>,
}

/// Nested message and enum types in `Key`.
pub mod key {
    /// One `(kind, id | name)` step of a key path.
    ///
    /// At most one of `id` and `name` is set. Neither set marks an
    /// incomplete final element awaiting id allocation.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PathElement {
        #[prost(string, required, tag = "1")]
        pub kind: String,
        #[prost(int64, optional, tag = "2")]
        pub id: Option<i64>,
        #[prost(string, optional, tag = "3")]
        pub name: Option<String>,
    }
}

/// A tagged value.
///
/// At most one of the primitive fields, `key_value`, `entity_value` or a
/// non-empty `list_value` is set. `indexed` and `meaning` annotate whatever
/// is set.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Value {
    #[prost(bool, optional, tag = "1")]
    pub boolean_value: Option<bool>,
    #[prost(int64, optional, tag = "2")]
    pub integer_value: Option<i64>,
    #[prost(double, optional, tag = "3")]
    pub double_value: Option<f64>,
    #[prost(int64, optional, tag = "4")]
    pub timestamp_microseconds_value: Option<i64>,
    #[prost(message, optional, tag = "5")]
    pub key_value: Option<Key>,
    #[prost(message, optional, tag = "6")]
    pub entity_value: Option<Entity>,
    #[prost(message, repeated, tag = "7")]
    pub list_value: Vec<Value>,
    #[prost(int32, optional, tag = "14")]
    pub meaning: Option<i32>,
    #[prost(bool, optional, tag = "15", default = "true")]
    pub indexed: Option<bool>,
    #[prost(string, optional, tag = "16")]
    pub blob_key_value: Option<String>,
    #[prost(string, optional, tag = "17")]
    pub string_value: Option<String>,
    #[prost(bytes = "vec", optional, tag = "18")]
    pub blob_value: Option<Vec<u8>>,
}

/// A named property on an entity.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Property {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub value: Option<Value>,
}

/// An entity: optional key plus properties in wire order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Entity {
    #[prost(message, optional, tag = "1")]
    pub key: Option<Key>,
    #[prost(message, repeated, tag = "2")]
    pub property: Vec<Property>,
}

/// Wrapper the lookup response uses for found and missing entities.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityResult {
    #[prost(message, optional, tag = "1")]
    pub entity: Option<Entity>,
}

/// Request body of the `lookup` RPC.
///
/// `read_options` (tag 1) is left to the transport.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LookupRequest {
    #[prost(message, repeated, tag = "3")]
    pub key: Vec<Key>,
}

/// Response body of the `lookup` RPC.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LookupResponse {
    #[prost(message, repeated, tag = "1")]
    pub found: Vec<EntityResult>,
    #[prost(message, repeated, tag = "2")]
    pub missing: Vec<EntityResult>,
    #[prost(message, repeated, tag = "3")]
    pub deferred: Vec<Key>,
}
