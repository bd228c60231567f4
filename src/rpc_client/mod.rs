use std::sync::Arc;

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{Keypair, Signature};

mod accounts;
mod faucet;
mod transactions;

/// Ledger operations the journal client and the NFT flow rely on.
pub trait LedgerRpc: Send + Sync {
    fn account_exists<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<bool>>;

    fn account_data<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<Option<Vec<u8>>>>;

    /// Accounts owned by `program_id` whose data starts with `discriminator`.
    fn program_accounts<'a>(
        &'a self,
        program_id: &'a Pubkey,
        discriminator: &'a [u8],
    ) -> BoxFuture<'a, Result<Vec<(Pubkey, Vec<u8>)>>>;

    fn balance<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<u64>>;

    /// Requests faucet funds and waits until the airdrop is confirmed.
    fn request_airdrop<'a>(
        &'a self,
        address: &'a Pubkey,
        lamports: u64,
    ) -> BoxFuture<'a, Result<Signature>>;

    fn send_and_confirm<'a>(
        &'a self,
        instructions: &'a [Instruction],
        signer: &'a Keypair,
    ) -> BoxFuture<'a, Result<Signature>>;
}

#[derive(Clone)]
pub struct RpcLedgerClient {
    rpc: Arc<RpcClient>,
}

impl RpcLedgerClient {
    pub fn new(rpc_endpoint: String) -> Self {
        let rpc = Arc::new(RpcClient::new_with_commitment(
            rpc_endpoint,
            CommitmentConfig::confirmed(),
        ));
        Self { rpc }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

impl LedgerRpc for RpcLedgerClient {
    fn account_exists<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<bool>> {
        async move { Ok::<_, anyhow::Error>(self.get_account_data(address).await?.is_some()) }
            .boxed()
    }

    fn account_data<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<Option<Vec<u8>>>> {
        self.get_account_data(address).boxed()
    }

    fn program_accounts<'a>(
        &'a self,
        program_id: &'a Pubkey,
        discriminator: &'a [u8],
    ) -> BoxFuture<'a, Result<Vec<(Pubkey, Vec<u8>)>>> {
        self.get_program_accounts_by_discriminator(program_id, discriminator)
            .boxed()
    }

    fn balance<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<u64>> {
        self.get_balance(address).boxed()
    }

    fn request_airdrop<'a>(
        &'a self,
        address: &'a Pubkey,
        lamports: u64,
    ) -> BoxFuture<'a, Result<Signature>> {
        self.airdrop_and_confirm(address, lamports).boxed()
    }

    fn send_and_confirm<'a>(
        &'a self,
        instructions: &'a [Instruction],
        signer: &'a Keypair,
    ) -> BoxFuture<'a, Result<Signature>> {
        self.sign_and_send(instructions, signer).boxed()
    }
}
