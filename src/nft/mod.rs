//! Verifies a fixed NFT as a member of a fixed collection.

use anyhow::{Context, Result};
use solana_program::pubkey::Pubkey;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::signature::{Keypair, Signature, Signer};

use crate::cluster::Explorer;
use crate::faucet::airdrop_if_required;
use crate::rpc_client::LedgerRpc;

pub use self::instruction::{
    find_master_edition_pda, find_metadata_pda, verify_collection_v1, MetadataError,
    VerificationArgs, TOKEN_METADATA_PROGRAM_ID,
};

mod instruction;

pub const NFT_MINT: Pubkey =
    solana_program::pubkey!("CLkFD5asVtGXpjwDcpWAdReT47yBZ6B2s759TRVTLwU");
pub const COLLECTION_MINT: Pubkey =
    solana_program::pubkey!("FzTfeRwi4u4nhnDnkrdNsjy7XNqG1SAktTdS2UwdmGfF");

pub const AIRDROP_AMOUNT: u64 = LAMPORTS_PER_SOL;
pub const MINIMUM_BALANCE: u64 = LAMPORTS_PER_SOL / 2;

/// Token Metadata client that signs as `identity`.
pub struct MetadataClient<'a, R: ?Sized> {
    rpc: &'a R,
    identity: &'a Keypair,
}

impl<'a, R: LedgerRpc + ?Sized> MetadataClient<'a, R> {
    pub fn new(rpc: &'a R, identity: &'a Keypair) -> Self {
        Self { rpc, identity }
    }

    pub fn identity(&self) -> Pubkey {
        self.identity.pubkey()
    }

    pub async fn verify_collection_v1(
        &self,
        metadata: Pubkey,
        collection_mint: Pubkey,
    ) -> Result<Signature> {
        let ix = verify_collection_v1(&self.identity(), &metadata, &collection_mint)?;
        self.rpc.send_and_confirm(&[ix], self.identity).await
    }
}

/// Funds `identity` if needed, verifies `NFT_MINT` in `COLLECTION_MINT` and
/// returns the explorer link of the NFT.
pub async fn verify_collection_membership<R: LedgerRpc + ?Sized>(
    rpc: &R,
    identity: &Keypair,
    explorer: impl Into<Explorer>,
) -> Result<String> {
    let explorer = explorer.into();
    let user = identity.pubkey();
    let balance = airdrop_if_required(rpc, &user, AIRDROP_AMOUNT, MINIMUM_BALANCE)
        .await
        .context("Failed to fund user")?;
    tracing::info!(balance, "Loaded user {user}");

    let client = MetadataClient::new(rpc, identity);
    tracing::info!("Set up metadata client for user");

    let (metadata, _) = find_metadata_pda(&NFT_MINT);
    let signature = client
        .verify_collection_v1(metadata, COLLECTION_MINT)
        .await
        .context("Failed to verify collection membership")?;
    tracing::info!(%signature, "verify transaction confirmed");

    Ok(explorer.link("address", NFT_MINT))
}
