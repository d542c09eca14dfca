use clap::{Parser, Subcommand};
use krbring::ccache::{fetch_credential, list_entries, CacheListing, Entry, KernelKeyring};
use krbring::config::Config;
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[clap(about = "Read the active Kerberos TGT from the kernel keyring")]
struct OptParser {
    /// Path to a TOML configuration file.
    #[clap(short, long, global = true, env = "KRBRING_CONFIG")]
    config: Option<PathBuf>,
    /// Search this uid's persistent keyring. Overrides the configuration.
    #[clap(short, long, global = true)]
    uid: Option<u32>,
    #[clap(subcommand)]
    command: Opt,
}

#[derive(Debug, Subcommand)]
enum Opt {
    /// Print the default principal of the active cache.
    Principal,
    /// Print the ticket and principal payloads as hex.
    Fetch,
    /// List the collection and the active subsidiary.
    List,
}

fn print_entries(entries: &[Entry], indent: &str) {
    for entry in entries {
        println!("{indent}{:?}: {}", entry.kind, entry.description);
    }
}

fn main() -> Result<(), ()> {
    tracing_subscriber::fmt::init();

    let opt = OptParser::parse();

    let mut cfg = match &opt.config {
        Some(path) => Config::parse(path).map_err(|e| {
            error!("Could not parse config file {:?}: {:?}", path, e);
        })?,
        None => Config::default(),
    };
    if opt.uid.is_some() {
        cfg.uid = opt.uid;
    }
    debug!(?cfg);

    let uid = cfg.effective_uid();
    let anchor = KernelKeyring::user_session().map_err(|e| {
        error!(?e, "Could not attach to the user session keyring");
    })?;

    match opt.command {
        Opt::Principal => {
            let cred = fetch_credential(&anchor, uid).map_err(|e| {
                error!(?e, ?uid, "Could not fetch credential");
            })?;
            println!("{}", cred.name);
        }
        Opt::Fetch => {
            let cred = fetch_credential(&anchor, uid).map_err(|e| {
                error!(?e, ?uid, "Could not fetch credential");
            })?;
            info!(
                principal = %cred.name,
                krb5_conf = ?cfg.krb5_conf,
                service = ?cfg.service,
                "Fetched ticket granting ticket"
            );
            println!("principal: {}", hex::encode(&cred.principal));
            println!("ticket: {}", hex::encode(&cred.ticket));
        }
        Opt::List => {
            let CacheListing {
                collection,
                primary,
            } = list_entries(&anchor, uid).map_err(|e| {
                error!(?e, ?uid, "Could not list credential collection");
            })?;
            println!("collection:");
            print_entries(&collection, "  ");
            match primary {
                Some((name, entries)) => {
                    println!("primary: {name}");
                    print_entries(&entries, "  ");
                }
                None => println!("primary: <none>"),
            }
        }
    }

    Ok(())
}
