use anyhow::Result;
use solana_program::pubkey::Pubkey;
use solana_sdk::native_token::lamports_to_sol;

use crate::rpc_client::LedgerRpc;

/// Airdrops `amount` lamports when the balance is below `minimum_balance`.
///
/// Returns the balance after any top-up.
pub async fn airdrop_if_required<R: LedgerRpc + ?Sized>(
    rpc: &R,
    address: &Pubkey,
    amount: u64,
    minimum_balance: u64,
) -> Result<u64> {
    let balance = rpc.balance(address).await?;
    if balance >= minimum_balance {
        tracing::debug!(%address, balance, "balance above minimum, skipping airdrop");
        return Ok(balance);
    }

    tracing::info!(
        %address,
        "balance {} SOL is below {} SOL, requesting {} SOL",
        lamports_to_sol(balance),
        lamports_to_sol(minimum_balance),
        lamports_to_sol(amount),
    );
    rpc.request_airdrop(address, amount).await?;
    rpc.balance(address).await
}
