use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use config::{Environment, File};
use serde::Deserialize;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair};

use crate::cluster::{Cluster, Explorer};
use crate::models::pubkey_from_str;

/// Address of the deployed `crudapp` program.
pub const DEFAULT_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("EswGRpQv4MS8E3kdP78sG5SxYXsE3PYYe7uuWJVgQW8v");

/// Settings file looked up in the working directory when no path is given.
const DEFAULT_SETTINGS_NAME: &str = "journal";

const ENV_PREFIX: &str = "JOURNAL";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub cluster: Cluster,
    pub rpc_endpoint: Option<String>,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub program_id: Pubkey,
    pub keypair_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster: Cluster::Devnet,
            rpc_endpoint: None,
            program_id: DEFAULT_PROGRAM_ID,
            keypair_path: None,
        }
    }
}

impl Config {
    /// Reads `journal.yaml` (or `path`) and then `JOURNAL_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_NAME).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")
    }

    pub fn rpc_endpoint(&self) -> String {
        self.rpc_endpoint
            .clone()
            .unwrap_or_else(|| self.cluster.rpc_url().to_string())
    }

    pub fn explorer(&self) -> Explorer {
        Explorer::new(self.cluster, self.rpc_endpoint())
    }

    pub fn keypair_path(&self) -> PathBuf {
        match &self.keypair_path {
            Some(path) => path.clone(),
            None => {
                let home = std::env::var_os("HOME").unwrap_or_default();
                PathBuf::from(home).join(".config/solana/id.json")
            }
        }
    }

    pub fn load_keypair(&self) -> Result<Keypair> {
        let path = self.keypair_path();
        read_keypair_file(&path)
            .map_err(|e| anyhow!("Failed to read keypair `{}`: {e}", path.display()))
    }

    /// The wallet used to sign journal mutations, `None` when no keypair file exists.
    pub fn connected_wallet(&self) -> Result<Option<Keypair>> {
        if !self.keypair_path().exists() {
            tracing::warn!(
                "no keypair at `{}`, continuing without a wallet",
                self.keypair_path().display()
            );
            return Ok(None);
        }
        self.load_keypair().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn defaults_point_at_devnet() {
        let config = Config::default();
        assert_eq!(config.cluster, Cluster::Devnet);
        assert_eq!(config.rpc_endpoint(), "https://api.devnet.solana.com");
        assert_eq!(config.program_id, DEFAULT_PROGRAM_ID);
    }

    #[test]
    fn environment_overrides_defaults() {
        let program_id = Pubkey::new_unique();
        temp_env::with_vars(
            [
                ("JOURNAL_CLUSTER", Some("testnet".to_string())),
                ("JOURNAL_RPC_ENDPOINT", Some("http://127.0.0.1:8899".to_string())),
                ("JOURNAL_PROGRAM_ID", Some(program_id.to_string())),
                ("JOURNAL_KEYPAIR_PATH", Some("/tmp/journal-id.json".to_string())),
            ],
            || {
                let config = Config::load(None).unwrap();
                assert_eq!(config.cluster, Cluster::Testnet);
                assert_eq!(config.rpc_endpoint(), "http://127.0.0.1:8899");
                assert_eq!(config.program_id, program_id);
                assert_eq!(config.keypair_path(), PathBuf::from("/tmp/journal-id.json"));
            },
        );
    }

    #[test]
    fn invalid_program_id_is_rejected() {
        temp_env::with_var("JOURNAL_PROGRAM_ID", Some("not-a-key"), || {
            assert!(Config::load(None).is_err());
        });
    }

    #[test]
    fn reads_yaml_file() {
        let path = std::env::temp_dir().join(format!("journal-settings-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "cluster: mainnet-beta\nprogram_id: \"11111111111111111111111111111111\"\n",
        )
        .unwrap();

        let config = temp_env::with_vars_unset(
            ["JOURNAL_CLUSTER", "JOURNAL_RPC_ENDPOINT", "JOURNAL_PROGRAM_ID"],
            || Config::load(Some(&path)).unwrap(),
        );
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.cluster, Cluster::MainnetBeta);
        assert_eq!(
            config.program_id,
            Pubkey::from_str("11111111111111111111111111111111").unwrap()
        );
        assert!(config.rpc_endpoint.is_none());
    }

    #[test]
    fn unquoted_numeric_program_id_is_explained() {
        let path = std::env::temp_dir()
            .join(format!("journal-settings-numeric-{}.yaml", std::process::id()));
        std::fs::write(&path, "program_id: 11111111111111111111111111111111\n").unwrap();

        let result = temp_env::with_vars_unset(["JOURNAL_PROGRAM_ID"], || {
            Config::load(Some(&path))
        });
        std::fs::remove_file(&path).unwrap();

        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("quote the public key"), "{err}");
    }

    #[test]
    fn explorer_uses_configured_endpoint() {
        let config = Config {
            cluster: Cluster::Localnet,
            rpc_endpoint: Some("http://127.0.0.1:9000".to_string()),
            ..Config::default()
        };
        assert_eq!(config.explorer().endpoint(), "http://127.0.0.1:9000");
        assert!(config
            .explorer()
            .link("tx", "sig")
            .ends_with("customUrl=http%3A%2F%2F127.0.0.1%3A9000"));
    }

    #[test]
    fn missing_keypair_means_no_wallet() {
        let config = Config {
            keypair_path: Some(PathBuf::from("/nonexistent/journal/id.json")),
            ..Config::default()
        };
        assert!(config.connected_wallet().unwrap().is_none());
    }
}
