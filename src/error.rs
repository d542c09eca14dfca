#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KrbError {
    // =========================================================================================
    // IMPORTANT: Don't add variables to variants in this enum. The payloads we handle are
    // credentials, and anything carried here can end up in userfacing contexts.
    //
    // If you want to debug the error, then use the error! macro at the error raise site to
    // report relevant information.
    // =========================================================================================
    /// A keyring in the lookup chain, or a key inside one, does not exist.
    ContainerNotFound,

    // Primary name and principal record decoding.
    TooShort,
    LengthMismatch,
    RealmLengthMismatch,
    ItemLengthMismatch,
    ItemDataMismatch,

    /// The default principal has no name components, so there is no identity to use.
    IncompletePrincipal,

    KeyutilsError,
    BinRWError,
    IoError,
    ConfigParse,
}

impl From<std::io::Error> for KrbError {
    fn from(_value: std::io::Error) -> Self {
        KrbError::IoError
    }
}
