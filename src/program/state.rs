use borsh::{BorshDeserialize, BorshSerialize};
use once_cell::sync::Lazy;
use solana_program::pubkey::Pubkey;

use super::{discriminator, JournalError};
use crate::models::JournalEntryState;

pub const MAX_TITLE_LEN: usize = 50;
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Bytes allocated for every entry account: discriminator, owner, two length-prefixed strings.
pub const JOURNAL_ENTRY_SPACE: usize = 8 + 32 + (4 + MAX_TITLE_LEN) + (4 + MAX_MESSAGE_LEN);

pub static JOURNAL_ENTRY_DISCRIMINATOR: Lazy<[u8; 8]> =
    Lazy::new(|| discriminator("account", "JournalEntryState"));

#[derive(BorshSerialize, BorshDeserialize)]
struct JournalEntryLayout {
    owner: [u8; 32],
    title: String,
    message: String,
}

impl JournalEntryState {
    /// Decodes account data. Trailing bytes past the message are allocation padding.
    pub fn decode(data: &[u8]) -> Result<Self, JournalError> {
        if data.len() < 8 || data[..8] != JOURNAL_ENTRY_DISCRIMINATOR[..] {
            return Err(JournalError::DiscriminatorMismatch);
        }
        let mut body = &data[8..];
        let layout = JournalEntryLayout::deserialize(&mut body)
            .map_err(|e| JournalError::Decode(e.to_string()))?;

        Ok(Self {
            owner: Pubkey::new_from_array(layout.owner),
            title: layout.title,
            message: layout.message,
        })
    }

    /// Encodes the state the way the program lays it out, padded to the allocated space.
    pub fn encode(&self) -> Result<Vec<u8>, JournalError> {
        let layout = JournalEntryLayout {
            owner: self.owner.to_bytes(),
            title: self.title.clone(),
            message: self.message.clone(),
        };

        let mut data = JOURNAL_ENTRY_DISCRIMINATOR.to_vec();
        layout
            .serialize(&mut data)
            .map_err(|e| JournalError::Encode(e.to_string()))?;
        if data.len() < JOURNAL_ENTRY_SPACE {
            data.resize(JOURNAL_ENTRY_SPACE, 0);
        }
        Ok(data)
    }
}
