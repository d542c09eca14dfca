use crate::constants::DEFAULT_KRB5_CONF;
use crate::error::KrbError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

fn default_krb5_conf() -> PathBuf {
    PathBuf::from(DEFAULT_KRB5_CONF)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Kerberos configuration handed to the client built from the fetched ticket.
    #[serde(default = "default_krb5_conf")]
    pub krb5_conf: PathBuf,
    /// SPNEGO protected endpoint the fetched credential is meant for.
    pub service: Option<String>,
    /// Look up this uid's persistent keyring instead of the caller's.
    pub uid: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            krb5_conf: default_krb5_conf(),
            service: None,
            uid: None,
        }
    }
}

impl Config {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Config, KrbError> {
        let contents = fs::read_to_string(&path).map_err(|err| {
            error!(?err, path = ?path.as_ref(), "Failed to read config file");
            KrbError::IoError
        })?;

        Self::parse_str(&contents)
    }

    pub fn parse_str(contents: &str) -> Result<Config, KrbError> {
        toml::from_str(contents).map_err(|err| {
            error!(?err, "toml parse failure");
            KrbError::ConfigParse
        })
    }

    /// The uid whose persistent keyring is searched.
    pub fn effective_uid(&self) -> u32 {
        self.uid.unwrap_or_else(uzers::get_current_uid)
    }
}
