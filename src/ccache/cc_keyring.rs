/*
 * MIT's persistent keyring ccache ("KEYRING:persistent:<uid>") as seen from
 * the user session keyring:
 *
 * $ keyctl show @us
 *  ... keyring: _uid_ses.1000
 *  ...  \_ keyring: _persistent.1000
 *  ...      \_ keyring: _krb
 *  ...          \_ user: krb_ccache:primary
 *  ...          \_ keyring: krb_ccache_Hsq3H8X
 *  ...          |   \_ user: __krb5_princ__
 *  ...          |   \_ user: krbtgt/AFOREST.AD@AFOREST.AD
 *  ...          |   \_ user: __krb5_time_offsets__
 *
 * Every lookup is a keyctl search, which walks nested keyrings the caller
 * has search permission on.
 */

use super::container::{Container, Entry, EntryKind};
use crate::error::KrbError;

use keyutils::keytypes::user::User;
use keyutils::{Keyring, SpecialKeyring};
use tracing::error;

impl From<errno::Errno> for KrbError {
    fn from(value: errno::Errno) -> Self {
        error!(errno = ?value, "kernel keyring error");
        KrbError::KeyutilsError
    }
}

#[derive(Debug)]
pub struct KernelKeyring {
    keyring: Keyring,
}

impl KernelKeyring {
    /// Attaches to the calling process' user session keyring.
    pub fn user_session() -> Result<Self, KrbError> {
        let keyring = Keyring::attach(SpecialKeyring::UserSession).map_err(|e| {
            error!(?e, "Failed to attach to user session keyring");
            KrbError::from(e)
        })?;
        Ok(KernelKeyring { keyring })
    }
}

fn is_missing(e: errno::Errno) -> bool {
    matches!(
        e,
        errno::Errno(libc::ENOKEY)
            | errno::Errno(libc::EKEYEXPIRED)
            | errno::Errno(libc::EKEYREVOKED)
    )
}

impl Container for KernelKeyring {
    fn open_container(&self, name: &str) -> Result<Self, KrbError> {
        match self.keyring.search_for_keyring(name, None) {
            Ok(keyring) => Ok(KernelKeyring { keyring }),
            Err(e) if is_missing(e) => {
                error!(parent = ?self.keyring, ?name, ?e, "Keyring not found");
                Err(KrbError::ContainerNotFound)
            }
            Err(e) => {
                error!(parent = ?self.keyring, ?name, ?e, "Failed to search for keyring");
                Err(KrbError::from(e))
            }
        }
    }

    fn read_key(&self, name: &str) -> Result<Vec<u8>, KrbError> {
        let key = match self
            .keyring
            .search_for_key::<User, &str, Option<&mut Keyring>>(name, None)
        {
            Ok(k) => k,
            Err(e) if is_missing(e) => {
                error!(parent = ?self.keyring, ?name, ?e, "Key not found");
                return Err(KrbError::ContainerNotFound);
            }
            Err(e) => {
                error!(parent = ?self.keyring, ?name, ?e, "Failed to search for key");
                return Err(KrbError::from(e));
            }
        };

        key.read().map_err(|e| {
            error!(?key, ?e, "Failed to read key payload");
            KrbError::from(e)
        })
    }

    fn entries(&self) -> Result<Vec<Entry>, KrbError> {
        let (keys, keyrings) = self.keyring.read().map_err(|e| {
            error!(keyring = ?self.keyring, ?e, "Failed to read keyring");
            KrbError::from(e)
        })?;

        let mut entries = Vec::with_capacity(keys.len() + keyrings.len());
        for keyring in keyrings {
            let desc = keyring.description()?;
            entries.push(Entry {
                kind: EntryKind::Keyring,
                description: desc.description,
            });
        }
        for key in keys {
            let desc = key.description()?;
            entries.push(Entry {
                kind: EntryKind::Key,
                description: desc.description,
            });
        }
        Ok(entries)
    }
}
