//! Token Metadata addresses and the `Verify` instruction.

use borsh::BorshSerialize;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::{system_program, sysvar};

pub const TOKEN_METADATA_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

const METADATA_SEED: &[u8] = b"metadata";
const EDITION_SEED: &[u8] = b"edition";

const VERIFY_DISCRIMINATOR: u8 = 52;

#[derive(BorshSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationArgs {
    CreatorV1,
    CollectionV1,
}

#[derive(BorshSerialize)]
struct VerifyInstructionData {
    discriminator: u8,
    args: VerificationArgs,
}

pub fn find_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_SEED, TOKEN_METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

pub fn find_master_edition_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// `Verify` with `CollectionV1` args.
///
/// Absent optional accounts are passed as the Token Metadata program id.
pub fn verify_collection_v1(
    authority: &Pubkey,
    metadata: &Pubkey,
    collection_mint: &Pubkey,
) -> Result<Instruction, MetadataError> {
    let (collection_metadata, _) = find_metadata_pda(collection_mint);
    let (collection_master_edition, _) = find_master_edition_pda(collection_mint);

    let mut data = Vec::new();
    VerifyInstructionData {
        discriminator: VERIFY_DISCRIMINATOR,
        args: VerificationArgs::CollectionV1,
    }
    .serialize(&mut data)?;

    Ok(Instruction {
        program_id: TOKEN_METADATA_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            // delegate record
            AccountMeta::new_readonly(TOKEN_METADATA_PROGRAM_ID, false),
            AccountMeta::new(*metadata, false),
            AccountMeta::new_readonly(*collection_mint, false),
            AccountMeta::new(collection_metadata, false),
            AccountMeta::new_readonly(collection_master_edition, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(sysvar::instructions::id(), false),
        ],
        data,
    })
}

#[derive(thiserror::Error, Debug)]
pub enum MetadataError {
    #[error("Failed to encode instruction: {0}")]
    Encode(#[from] std::io::Error),
}
