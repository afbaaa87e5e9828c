//! Dataset identity resolution.
//!
//! Older deployments accepted dataset ids without the managed-storage prefix
//! (`s~` or `e~`). Which prefix a bare id belongs to is discovered by
//! looking up a probe key that can never exist: the service echoes the key
//! back, found or missing, with the fully qualified dataset id in its
//! partition.
//!
//! Resolution costs one lookup per bare id. Nothing is cached here; callers
//! that resolve repeatedly should memoize.

use tracing::debug;

use crate::codec::key::{key_to_protobuf, prepare_key_for_request};
use crate::error::ResolveError;
use crate::limits::{MANAGED_PREFIXES, MISSING_LOOKUP_ID, MISSING_LOOKUP_KIND};
use crate::model::{Key, PathElement};
use crate::pb;

/// The `lookup` RPC of the datastore service.
///
/// Implementations own retries, timeouts and authentication. Errors are
/// handed back to the caller of [`find_true_dataset_id`] unchanged.
pub trait Lookup {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Looks up `keys` in the dataset `dataset_id`.
    fn lookup(&self, dataset_id: &str, keys: &[pb::Key]) -> Result<pb::LookupResponse, Self::Error>;
}

/// Returns true if `dataset_id` already carries a managed-storage prefix.
pub fn is_qualified(dataset_id: &str) -> bool {
    MANAGED_PREFIXES
        .iter()
        .any(|prefix| dataset_id.starts_with(prefix))
}

/// The probe key: a single `__MissingLookupKind` element with id 1.
pub fn probe_key(dataset_id: &str) -> Key {
    Key::from_valid_path(vec![PathElement::with_id(MISSING_LOOKUP_KIND, MISSING_LOOKUP_ID)])
        .with_dataset_id(dataset_id)
}

/// Builds the lookup request carrying the probe key, ready to send.
pub fn probe_request(dataset_id: &str) -> pb::LookupRequest {
    let key = key_to_protobuf(&probe_key(dataset_id));
    pb::LookupRequest {
        key: vec![prepare_key_for_request(&key).into_owned()],
    }
}

/// Resolves a dataset id to its fully qualified, prefixed form.
///
/// A prefixed id is returned as-is without touching the transport.
/// Otherwise one probe lookup is issued for the bare id, and the dataset
/// id of the single key the service reports back, from `found` or
/// `missing`, is the answer. That partition already holds the prefixed id,
/// so no prefix is joined onto the bare id here.
pub fn find_true_dataset_id<L: Lookup>(
    dataset_id: &str,
    transport: &L,
) -> Result<String, ResolveError<L::Error>> {
    if is_qualified(dataset_id) {
        debug!(dataset_id, "dataset id already qualified");
        return Ok(dataset_id.to_string());
    }

    let request = probe_request(dataset_id);
    debug!(dataset_id, "probing for qualified dataset id");
    let response = transport
        .lookup(dataset_id, &request.key)
        .map_err(ResolveError::Transport)?;

    let mut results = response.found.iter().chain(&response.missing);
    let result = match (results.next(), results.next()) {
        (Some(result), None) => result,
        _ => {
            return Err(ResolveError::UnexpectedResultCount {
                count: response.found.len() + response.missing.len(),
            });
        }
    };

    let qualified = result
        .entity
        .as_ref()
        .and_then(|entity| entity.key.as_ref())
        .and_then(|key| key.partition_id.as_ref())
        .and_then(|partition| partition.dataset_id.as_deref())
        .filter(|id| !id.is_empty())
        .ok_or(ResolveError::MissingDatasetId)?;

    debug!(dataset_id, qualified, "resolved dataset id");
    Ok(qualified.to_string())
}
