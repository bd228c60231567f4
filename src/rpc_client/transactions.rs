use anyhow::{Context, Result};
use solana_program::instruction::Instruction;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

use crate::rpc_client::*;

impl RpcLedgerClient {
    pub async fn sign_and_send(
        &self,
        instructions: &[Instruction],
        signer: &Keypair,
    ) -> Result<Signature> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .context("Failed to fetch latest blockhash")?;

        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&signer.pubkey()),
            &[signer],
            blockhash,
        );

        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .context("Failed transaction submission")?;

        tracing::debug!(%signature, payer = %signer.pubkey(), "transaction confirmed");
        Ok(signature)
    }
}
