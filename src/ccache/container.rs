use crate::error::KrbError;
use std::collections::BTreeMap;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Keyring,
    Key,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Entry {
    pub kind: EntryKind,
    pub description: String,
}

/// A read only view of one keyring in the credential store.
///
/// Lookups only ever find direct or nested children by description; nothing
/// here creates, links or modifies keys.
pub trait Container: Sized {
    /// Finds the child keyring with the given description.
    fn open_container(&self, name: &str) -> Result<Self, KrbError>;

    /// Finds the key with the given description and returns its payload.
    fn read_key(&self, name: &str) -> Result<Vec<u8>, KrbError>;

    fn entries(&self) -> Result<Vec<Entry>, KrbError>;
}

/// A keyring tree held in memory. Used to build synthetic stores.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    keys: BTreeMap<String, Vec<u8>>,
    keyrings: BTreeMap<String, MemoryContainer>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, name: &str, payload: Vec<u8>) -> Self {
        self.keys.insert(name.to_string(), payload);
        self
    }

    pub fn with_keyring(mut self, name: &str, keyring: MemoryContainer) -> Self {
        self.keyrings.insert(name.to_string(), keyring);
        self
    }
}

impl Container for MemoryContainer {
    fn open_container(&self, name: &str) -> Result<Self, KrbError> {
        self.keyrings.get(name).cloned().ok_or_else(|| {
            error!(?name, "keyring not found");
            KrbError::ContainerNotFound
        })
    }

    fn read_key(&self, name: &str) -> Result<Vec<u8>, KrbError> {
        self.keys.get(name).cloned().ok_or_else(|| {
            error!(?name, "key not found");
            KrbError::ContainerNotFound
        })
    }

    fn entries(&self) -> Result<Vec<Entry>, KrbError> {
        let keyrings = self.keyrings.keys().map(|description| Entry {
            kind: EntryKind::Keyring,
            description: description.clone(),
        });
        let keys = self.keys.keys().map(|description| Entry {
            kind: EntryKind::Key,
            description: description.clone(),
        });
        Ok(keyrings.chain(keys).collect())
    }
}
