use std::fmt;

use solana_sdk::signature::Signature;

use crate::cluster::Explorer;

/// User-facing outcome of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Transaction { signature: Signature, link: String },
    Error(String),
}

impl Notice {
    pub fn transaction(signature: Signature, explorer: &Explorer) -> Self {
        Notice::Transaction {
            signature,
            link: explorer.link("tx", signature),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Transaction { link, .. } => write!(f, "Transaction sent: {link}"),
            Notice::Error(message) => f.write_str(message),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match &notice {
            Notice::Transaction { signature, .. } => tracing::info!(%signature, "{notice}"),
            Notice::Error(_) => tracing::error!("{notice}"),
        }
    }
}
