use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cluster;
pub mod faucet;
pub mod models;
pub mod nft;
pub mod notify;
pub mod program;
pub mod query;
pub mod rpc_client;
pub mod settings;
pub mod ui;

pub use self::cluster::{Cluster, Explorer};
pub use self::program::{JournalError, JournalProgram};
pub use self::rpc_client::{LedgerRpc, RpcLedgerClient};
pub use self::settings::Config;

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}
