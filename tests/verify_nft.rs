mod common;

use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::signature::{Keypair, Signer};

use journal_lib::nft::{
    self, find_metadata_pda, AIRDROP_AMOUNT, COLLECTION_MINT, MINIMUM_BALANCE, NFT_MINT,
    TOKEN_METADATA_PROGRAM_ID,
};
use journal_lib::Cluster;

use common::{Call, MockLedger};

#[test]
fn funding_constants() {
    assert_eq!(AIRDROP_AMOUNT, LAMPORTS_PER_SOL);
    assert_eq!(MINIMUM_BALANCE, LAMPORTS_PER_SOL / 2);
}

#[tokio::test]
async fn funds_then_verifies_once() {
    let ledger = MockLedger::default();
    let user = Keypair::new();
    ledger.set_balance(user.pubkey(), LAMPORTS_PER_SOL / 5);

    let link = nft::verify_collection_membership(&ledger, &user, Cluster::Devnet)
        .await
        .unwrap();

    assert_eq!(
        link,
        format!("https://explorer.solana.com/address/{NFT_MINT}?cluster=devnet")
    );

    let calls = ledger.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], Call::Balance(user.pubkey()));
    assert_eq!(calls[1], Call::Airdrop(user.pubkey(), LAMPORTS_PER_SOL));
    assert_eq!(calls[2], Call::Balance(user.pubkey()));

    let sends = ledger.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].len(), 1);

    let ix = &sends[0][0];
    assert_eq!(ix.program_id, TOKEN_METADATA_PROGRAM_ID);
    assert_eq!(ix.data, vec![52, 1]);
    assert_eq!(ix.accounts[0].pubkey, user.pubkey());
    assert!(ix.accounts[0].is_signer);
    assert_eq!(ix.accounts[2].pubkey, find_metadata_pda(&NFT_MINT).0);
    assert_eq!(ix.accounts[3].pubkey, COLLECTION_MINT);
}

#[tokio::test]
async fn skips_airdrop_at_minimum_balance() {
    let ledger = MockLedger::default();
    let user = Keypair::new();
    ledger.set_balance(user.pubkey(), MINIMUM_BALANCE);

    nft::verify_collection_membership(&ledger, &user, Cluster::Devnet)
        .await
        .unwrap();

    assert_eq!(ledger.count(|call| matches!(call, Call::Airdrop(..))), 0);
    assert_eq!(ledger.sends().len(), 1);
}

#[tokio::test]
async fn verification_failure_aborts() {
    let ledger = MockLedger::default();
    let user = Keypair::new();
    ledger.set_balance(user.pubkey(), LAMPORTS_PER_SOL);
    ledger.fail_next_send("Collection Must Be a Unique Master Edition v2");

    let err = nft::verify_collection_membership(&ledger, &user, Cluster::Devnet)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to verify collection membership");
    assert!(format!("{err:#}").contains("Unique Master Edition"));
}
