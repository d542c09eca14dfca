mod container;
mod locator;
mod navigator;
mod primary;
mod principal;

#[cfg(feature = "keyring")]
mod cc_keyring;

pub use self::container::{Container, Entry, EntryKind, MemoryContainer};
pub use self::locator::{
    fetch_credential, list_entries, open_primary_subsidiary, CacheListing, KeyringCredential,
};
pub use self::navigator::locate_collection;
pub use self::primary::PrimaryName;
pub use self::principal::Principal;

#[cfg(feature = "keyring")]
pub use self::cc_keyring::KernelKeyring;

use crate::error::KrbError;
use bytes::Buf;

// Both keyring records are built from big endian u32s and u32 length
// prefixed strings. These never index past the end of the buffer.

/// Reads a big endian u32, or fails with `err` if fewer than four bytes remain.
pub(crate) fn take_u32(buf: &mut &[u8], err: KrbError) -> Result<u32, KrbError> {
    buf.try_get_u32().map_err(|_| err)
}

/// Splits `len` bytes off the front of `buf`, or fails with `err` if they are not all there.
pub(crate) fn take_bytes<'a>(
    buf: &mut &'a [u8],
    len: u32,
    err: KrbError,
) -> Result<&'a [u8], KrbError> {
    let len = usize::try_from(len).map_err(|_| err)?;
    let rest: &'a [u8] = buf;
    let (head, tail) = rest.split_at_checked(len).ok_or(err)?;
    *buf = tail;
    Ok(head)
}
