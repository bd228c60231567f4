use anyhow::{Context, Result};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::rpc_client::*;

impl RpcLedgerClient {
    pub async fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        self.rpc
            .get_balance(address)
            .await
            .with_context(|| format!("Failed to fetch balance of `{address}`"))
    }

    pub async fn airdrop_and_confirm(&self, address: &Pubkey, lamports: u64) -> Result<Signature> {
        let signature = self
            .rpc
            .request_airdrop(address, lamports)
            .await
            .context("Failed to request airdrop")?;

        self.rpc
            .poll_for_signature(&signature)
            .await
            .context("Couldn't confirm airdrop")?;

        Ok(signature)
    }
}
