use super::container::Container;
use crate::constants::{KRB_COLLECTION, PERSISTENT_KEYRING_PREFIX};
use crate::error::KrbError;
use tracing::{debug, error};

/// Walks from an anchor keyring down to the persistent credential collection:
///
/// <anchor> -> _persistent.<uid> -> _krb
///
/// Nothing is cached, every call resolves the chain again.
pub fn locate_collection<C: Container>(anchor: &C, uid: u32) -> Result<C, KrbError> {
    let persistent_name = format!("{PERSISTENT_KEYRING_PREFIX}{uid}");
    let persistent = anchor.open_container(&persistent_name).inspect_err(|err| {
        error!(?err, ?persistent_name, "Failed to open persistent keyring")
    })?;
    debug!(?persistent_name, "Resolved persistent keyring");

    let collection = persistent.open_container(KRB_COLLECTION).inspect_err(|err| {
        error!(?err, ?persistent_name, "Failed to open credential collection")
    })?;
    debug!(collection = KRB_COLLECTION, "Resolved collection");

    Ok(collection)
}
