/// Prefix of the per user persistent keyring, completed with the numeric uid.
pub const PERSISTENT_KEYRING_PREFIX: &str = "_persistent.";

/// The credential collection inside the persistent keyring.
pub const KRB_COLLECTION: &str = "_krb";

/// Key within the collection naming the primary subsidiary.
pub const PRIMARY_KEY: &str = "krb_ccache:primary";

/// Key within a subsidiary holding its default principal.
pub const DEFAULT_PRINCIPAL_KEY: &str = "__krb5_princ__";

pub const DEFAULT_KRB5_CONF: &str = "/etc/krb5.conf";
