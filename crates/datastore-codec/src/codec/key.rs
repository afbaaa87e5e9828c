//! Key encoding/decoding.

use std::borrow::Cow;

use prost::Message;

use crate::error::DecodeError;
use crate::model::{Key, KeyId, PathElement};
use crate::pb;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a wire key.
///
/// The partition's dataset id is copied as given; an empty namespace reads
/// as the default (absent) namespace. A path
/// element with neither id nor name becomes an incomplete element, which is
/// only accepted in last position.
pub fn key_from_protobuf(pb: &pb::Key) -> Result<Key, DecodeError> {
    let path = pb
        .path_element
        .iter()
        .map(|element| PathElement {
            kind: element.kind.clone(),
            // The service sets at most one of the two.
            id_or_name: match (element.id, &element.name) {
                (Some(id), _) => Some(KeyId::Id(id)),
                (None, Some(name)) => Some(KeyId::Name(name.clone())),
                (None, None) => None,
            },
        })
        .collect();

    let mut key = Key::new(path)?;
    if let Some(partition) = &pb.partition_id {
        key.set_partition(partition.dataset_id.clone(), partition.namespace.clone());
    }
    Ok(key)
}

/// Decodes a key from protobuf bytes.
pub fn decode_key(input: &[u8]) -> Result<Key, DecodeError> {
    let pb = pb::Key::decode(input)?;
    key_from_protobuf(&pb)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a key.
///
/// The namespace is written only when present and non-empty; the partition
/// is omitted entirely when it would carry nothing.
pub fn key_to_protobuf(key: &Key) -> pb::Key {
    let namespace = key.namespace().filter(|ns| !ns.is_empty());
    let partition_id = if key.dataset_id().is_some() || namespace.is_some() {
        Some(pb::PartitionId {
            dataset_id: key.dataset_id().map(str::to_string),
            namespace: namespace.map(str::to_string),
        })
    } else {
        None
    };

    let path_element = key
        .path()
        .iter()
        .map(|element| {
            let (id, name) = match &element.id_or_name {
                Some(KeyId::Id(id)) => (Some(*id), None),
                Some(KeyId::Name(name)) => (None, Some(name.clone())),
                None => (None, None),
            };
            pb::key::PathElement {
                kind: element.kind.clone(),
                id,
                name,
            }
        })
        .collect();

    pb::Key {
        partition_id,
        path_element,
    }
}

/// Encodes a key to protobuf bytes.
pub fn encode_key(key: &Key) -> Vec<u8> {
    key_to_protobuf(key).encode_to_vec()
}

/// Prepares a wire key for a lookup or mutation request.
///
/// Dataset scoping travels outside the key, so a key whose partition names
/// a dataset is copied with the partition cleared. Any other key is
/// returned borrowed, untouched.
pub fn prepare_key_for_request(key: &pb::Key) -> Cow<'_, pb::Key> {
    let has_dataset = key
        .partition_id
        .as_ref()
        .is_some_and(|partition| partition.dataset_id.is_some());
    if !has_dataset {
        return Cow::Borrowed(key);
    }
    let mut prepared = key.clone();
    prepared.partition_id = None;
    Cow::Owned(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyError;

    fn make_pb(
        dataset_id: Option<&str>,
        namespace: Option<&str>,
        path: &[(&str, Option<i64>, Option<&str>)],
    ) -> pb::Key {
        let partition_id = if dataset_id.is_some() || namespace.is_some() {
            Some(pb::PartitionId {
                dataset_id: dataset_id.map(str::to_string),
                namespace: namespace.map(str::to_string),
            })
        } else {
            None
        };
        pb::Key {
            partition_id,
            path_element: path
                .iter()
                .map(|(kind, id, name)| pb::key::PathElement {
                    kind: kind.to_string(),
                    id: *id,
                    name: name.map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn test_without_namespace() {
        let pb = make_pb(Some("DATASET"), None, &[("KIND", None, None)]);
        let key = key_from_protobuf(&pb).unwrap();
        assert_eq!(key.dataset_id(), Some("DATASET"));
        assert_eq!(key.namespace(), None);
        assert!(key.is_partial());
        assert_eq!(key.path(), &[PathElement::incomplete("KIND")]);
    }

    #[test]
    fn test_with_namespace() {
        let pb = make_pb(Some("DATASET"), Some("NAMESPACE"), &[("KIND", None, None)]);
        let key = key_from_protobuf(&pb).unwrap();
        assert_eq!(key.dataset_id(), Some("DATASET"));
        assert_eq!(key.namespace(), Some("NAMESPACE"));
    }

    #[test]
    fn test_nested_path() {
        let pb = make_pb(
            Some("DATASET"),
            None,
            &[
                ("PARENT", None, Some("NAME")),
                ("CHILD", Some(1234), None),
                ("GRANDCHILD", Some(5678), None),
            ],
        );
        let key = key_from_protobuf(&pb).unwrap();
        assert_eq!(
            key.path(),
            &[
                PathElement::with_name("PARENT", "NAME"),
                PathElement::with_id("CHILD", 1234),
                PathElement::with_id("GRANDCHILD", 5678),
            ]
        );
    }

    #[test]
    fn test_empty_path_is_error() {
        let pb = make_pb(None, None, &[]);
        assert_eq!(
            key_from_protobuf(&pb),
            Err(DecodeError::InvalidKey(KeyError::EmptyPath))
        );
    }

    #[test]
    fn test_kindless_single_element_is_error() {
        let pb = make_pb(None, None, &[("", None, None)]);
        assert!(matches!(
            key_from_protobuf(&pb),
            Err(DecodeError::InvalidKey(KeyError::MissingKind { index: 0 }))
        ));
    }

    #[test]
    fn test_incomplete_ancestor_is_error() {
        let pb = make_pb(None, None, &[("PARENT", None, None), ("CHILD", Some(1), None)]);
        assert!(matches!(
            key_from_protobuf(&pb),
            Err(DecodeError::InvalidKey(KeyError::IncompleteAncestor { index: 0 }))
        ));
    }

    #[test]
    fn test_encode_key() {
        let key = Key::single("PATH", 1234i64).unwrap().with_dataset_id("DATASET");
        let pb = key_to_protobuf(&key);
        assert_eq!(pb, make_pb(Some("DATASET"), None, &[("PATH", Some(1234), None)]));
    }

    #[test]
    fn test_encode_key_skips_empty_namespace() {
        let key = Key::single("PATH", "NAME").unwrap().with_namespace("");
        let pb = key_to_protobuf(&key);
        assert!(pb.partition_id.is_none());

        let key = key.with_namespace("NS");
        let pb = key_to_protobuf(&key);
        assert_eq!(pb.partition_id.unwrap().namespace.as_deref(), Some("NS"));
    }

    #[test]
    fn test_key_bytes_roundtrip() {
        let key = Key::new(vec![
            PathElement::with_id("Family", 1234),
            PathElement::with_name("King", "Spades"),
        ])
        .unwrap()
        .with_dataset_id("DATASET")
        .with_namespace("NS");
        let bytes = encode_key(&key);
        assert_eq!(decode_key(&bytes).unwrap(), key);
    }

    #[test]
    fn test_empty_namespace_roundtrip() {
        let key = Key::single("KIND", 1i64).unwrap().with_namespace("");
        assert_eq!(decode_key(&encode_key(&key)).unwrap(), key);

        let pb = make_pb(Some("DATASET"), Some(""), &[("KIND", Some(1), None)]);
        let decoded = key_from_protobuf(&pb).unwrap();
        assert_eq!(decoded.namespace(), None);
        assert_eq!(key_from_protobuf(&key_to_protobuf(&decoded)).unwrap(), decoded);
    }

    #[test]
    fn test_prepare_dataset_id_set() {
        let key = make_pb(Some("foo"), None, &[]);
        let prepared = prepare_key_for_request(&key);
        assert!(matches!(prepared, Cow::Owned(_)));
        assert!(!std::ptr::eq(prepared.as_ref(), &key));
        assert_eq!(prepared.into_owned(), pb::Key::default());
    }

    #[test]
    fn test_prepare_dataset_id_unset() {
        let key = pb::Key::default();
        let prepared = prepare_key_for_request(&key);
        assert!(matches!(prepared, Cow::Borrowed(_)));
        assert!(std::ptr::eq(prepared.as_ref(), &key));
    }
}
