use super::container::{Container, Entry};
use super::navigator::locate_collection;
use super::primary::PrimaryName;
use super::principal::Principal;
use crate::constants::{DEFAULT_PRINCIPAL_KEY, PRIMARY_KEY};
use crate::error::KrbError;
use tracing::{debug, error};

/// The ticket granting ticket of the primary subsidiary, ready to hand to a
/// Kerberos client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyringCredential {
    /// Payload of the `krbtgt/<REALM>@<REALM>` key.
    pub ticket: Vec<u8>,
    /// Payload of the `__krb5_princ__` key, exactly as stored.
    pub principal: Vec<u8>,
    pub name: Principal,
}

/// Opens the subsidiary named by the collection's primary key.
pub fn open_primary_subsidiary<C: Container>(collection: &C) -> Result<(String, C), KrbError> {
    let payload = collection.read_key(PRIMARY_KEY)?;
    let primary = PrimaryName::decode(&payload)?;
    debug!(subsidiary = ?primary.name, version = primary.version, "Primary subsidiary");

    let subsidiary = collection.open_container(&primary.name).inspect_err(|err| {
        error!(?err, subsidiary = ?primary.name, "Failed to open subsidiary")
    })?;
    Ok((primary.name, subsidiary))
}

/// Reads the default principal and its TGT out of the active credential cache.
///
/// This never retries. A failure can mean the cache was being rewritten while
/// we read it, in which case calling again is up to the caller.
pub fn fetch_credential<C: Container>(
    anchor: &C,
    uid: u32,
) -> Result<KeyringCredential, KrbError> {
    let collection = locate_collection(anchor, uid)?;
    let (_, subsidiary) = open_primary_subsidiary(&collection)?;

    let principal = subsidiary.read_key(DEFAULT_PRINCIPAL_KEY)?;
    let (name, _) = Principal::decode(&principal)?;
    if name.components.is_empty() {
        error!(?name, "Default principal has no name components");
        return Err(KrbError::IncompletePrincipal);
    }

    let ticket_key = name.tgt_key_name();
    debug!(?ticket_key, "Search ticket");
    let ticket = subsidiary.read_key(&ticket_key)?;

    Ok(KeyringCredential {
        ticket,
        principal,
        name,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheListing {
    pub collection: Vec<Entry>,
    pub primary: Option<(String, Vec<Entry>)>,
}

/// Lists the collection and, when it resolves, the primary subsidiary.
pub fn list_entries<C: Container>(anchor: &C, uid: u32) -> Result<CacheListing, KrbError> {
    let collection = locate_collection(anchor, uid)?;
    let entries = collection.entries()?;

    let primary = match open_primary_subsidiary(&collection) {
        Ok((name, subsidiary)) => Some((name, subsidiary.entries()?)),
        Err(err) => {
            debug!(?err, "No usable primary subsidiary");
            None
        }
    };

    Ok(CacheListing {
        collection: entries,
        primary,
    })
}
