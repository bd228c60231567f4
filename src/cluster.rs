use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network the client talks to. Carried explicitly by `Config` and `JournalProgram`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Localnet => "localnet",
        }
    }

    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://localhost:8899",
        }
    }

    /// Explorer URL for an `address`, `tx` or `block`, assuming the default RPC URL.
    pub fn explorer_link(&self, kind: &str, id: impl fmt::Display) -> String {
        Explorer::from(*self).link(kind, id)
    }
}

/// Builds explorer links for a cluster reached through a given RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explorer {
    cluster: Cluster,
    endpoint: String,
}

impl Explorer {
    pub fn new(cluster: Cluster, endpoint: impl Into<String>) -> Self {
        Self {
            cluster,
            endpoint: endpoint.into(),
        }
    }

    pub fn cluster(&self) -> Cluster {
        self.cluster
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Localnet links carry the endpoint as an encoded `customUrl`.
    pub fn link(&self, kind: &str, id: impl fmt::Display) -> String {
        let link = format!("https://explorer.solana.com/{kind}/{id}");
        match self.cluster {
            Cluster::MainnetBeta => link,
            Cluster::Localnet => {
                let custom_url: String =
                    url::form_urlencoded::byte_serialize(self.endpoint.as_bytes()).collect();
                format!("{link}?cluster=custom&customUrl={custom_url}")
            }
            cluster => format!("{link}?cluster={}", cluster.as_str()),
        }
    }
}

impl From<Cluster> for Explorer {
    fn from(cluster: Cluster) -> Self {
        Self::new(cluster, cluster.rpc_url())
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(format!("unknown cluster `{other}`")),
        }
    }
}
