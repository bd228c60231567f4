//! Address derivation for `crudapp` journal entry accounts.
//!
//! Seeds are `[title, owner]`, matching the program's `#[account(seeds = ...)]`.

use solana_program::pubkey::{Pubkey, MAX_SEED_LEN};

use super::state::MAX_TITLE_LEN;
use super::JournalError;

/// Longest title that can still be used as a seed.
pub const MAX_TITLE_SEED_LEN: usize = if MAX_SEED_LEN < MAX_TITLE_LEN {
    MAX_SEED_LEN
} else {
    MAX_TITLE_LEN
};

pub fn find_journal_entry_address(
    program_id: &Pubkey,
    title: &str,
    owner: &Pubkey,
) -> Result<(Pubkey, u8), JournalError> {
    validate_title(title)?;
    Pubkey::try_find_program_address(&[title.as_bytes(), owner.as_ref()], program_id)
        .ok_or_else(|| JournalError::NoProgramAddress(title.to_string()))
}

pub(crate) fn validate_title(title: &str) -> Result<(), JournalError> {
    let len = title.len();
    if len == 0 || len > MAX_TITLE_SEED_LEN {
        return Err(JournalError::InvalidTitle {
            len,
            max: MAX_TITLE_SEED_LEN,
        });
    }
    Ok(())
}
