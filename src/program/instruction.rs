//! Instruction builders for the `crudapp` program.
//!
//! Data is Anchor-encoded: an 8 byte `global:<name>` discriminator followed by
//! the borsh-encoded arguments.

use borsh::{BorshDeserialize, BorshSerialize};
use once_cell::sync::Lazy;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_program;

use super::pda::find_journal_entry_address;
use super::state::MAX_MESSAGE_LEN;
use super::{discriminator, JournalError};

static CREATE_DISCRIMINATOR: Lazy<[u8; 8]> =
    Lazy::new(|| discriminator("global", "create_journal_entry"));
static UPDATE_DISCRIMINATOR: Lazy<[u8; 8]> =
    Lazy::new(|| discriminator("global", "update_journal_entry"));
static DELETE_DISCRIMINATOR: Lazy<[u8; 8]> =
    Lazy::new(|| discriminator("global", "delete_journal_entry"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalInstruction {
    CreateJournalEntry { title: String, message: String },
    UpdateJournalEntry { title: String, message: String },
    DeleteJournalEntry { title: String },
}

#[derive(BorshSerialize, BorshDeserialize)]
struct EntryArgs {
    title: String,
    message: String,
}

#[derive(BorshSerialize, BorshDeserialize)]
struct TitleArgs {
    title: String,
}

impl JournalInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            JournalInstruction::CreateJournalEntry { .. } => "create_journal_entry",
            JournalInstruction::UpdateJournalEntry { .. } => "update_journal_entry",
            JournalInstruction::DeleteJournalEntry { .. } => "delete_journal_entry",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            JournalInstruction::CreateJournalEntry { title, .. }
            | JournalInstruction::UpdateJournalEntry { title, .. }
            | JournalInstruction::DeleteJournalEntry { title } => title,
        }
    }

    pub fn pack(&self) -> Result<Vec<u8>, JournalError> {
        let mut data = Vec::new();
        let encoded = match self {
            JournalInstruction::CreateJournalEntry { title, message } => {
                data.extend_from_slice(&CREATE_DISCRIMINATOR[..]);
                EntryArgs { title: title.clone(), message: message.clone() }.serialize(&mut data)
            }
            JournalInstruction::UpdateJournalEntry { title, message } => {
                data.extend_from_slice(&UPDATE_DISCRIMINATOR[..]);
                EntryArgs { title: title.clone(), message: message.clone() }.serialize(&mut data)
            }
            JournalInstruction::DeleteJournalEntry { title } => {
                data.extend_from_slice(&DELETE_DISCRIMINATOR[..]);
                TitleArgs { title: title.clone() }.serialize(&mut data)
            }
        };
        encoded.map_err(|e| JournalError::Encode(e.to_string()))?;
        Ok(data)
    }

    pub fn unpack(data: &[u8]) -> Result<Self, JournalError> {
        if data.len() < 8 {
            return Err(JournalError::UnknownInstruction);
        }
        let (tag, args) = data.split_at(8);
        let decode_err = |e: std::io::Error| JournalError::Decode(e.to_string());

        if tag == &CREATE_DISCRIMINATOR[..] {
            let EntryArgs { title, message } = EntryArgs::try_from_slice(args).map_err(decode_err)?;
            Ok(JournalInstruction::CreateJournalEntry { title, message })
        } else if tag == &UPDATE_DISCRIMINATOR[..] {
            let EntryArgs { title, message } = EntryArgs::try_from_slice(args).map_err(decode_err)?;
            Ok(JournalInstruction::UpdateJournalEntry { title, message })
        } else if tag == &DELETE_DISCRIMINATOR[..] {
            let TitleArgs { title } = TitleArgs::try_from_slice(args).map_err(decode_err)?;
            Ok(JournalInstruction::DeleteJournalEntry { title })
        } else {
            Err(JournalError::UnknownInstruction)
        }
    }

    /// Builds the instruction signed by `owner`, targeting the entry account derived from the title.
    pub fn into_instruction(
        self,
        program_id: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Instruction, JournalError> {
        if let JournalInstruction::CreateJournalEntry { message, .. }
        | JournalInstruction::UpdateJournalEntry { message, .. } = &self
        {
            if message.len() > MAX_MESSAGE_LEN {
                return Err(JournalError::InvalidMessage(message.len()));
            }
        }

        let (journal_entry, _bump) = find_journal_entry_address(program_id, self.title(), owner)?;
        Ok(Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(journal_entry, false),
                AccountMeta::new(*owner, true),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            data: self.pack()?,
        })
    }
}

pub fn create_journal_entry(
    program_id: &Pubkey,
    owner: &Pubkey,
    title: &str,
    message: &str,
) -> Result<Instruction, JournalError> {
    JournalInstruction::CreateJournalEntry {
        title: title.to_string(),
        message: message.to_string(),
    }
    .into_instruction(program_id, owner)
}

pub fn update_journal_entry(
    program_id: &Pubkey,
    owner: &Pubkey,
    title: &str,
    message: &str,
) -> Result<Instruction, JournalError> {
    JournalInstruction::UpdateJournalEntry {
        title: title.to_string(),
        message: message.to_string(),
    }
    .into_instruction(program_id, owner)
}

pub fn delete_journal_entry(
    program_id: &Pubkey,
    owner: &Pubkey,
    title: &str,
) -> Result<Instruction, JournalError> {
    JournalInstruction::DeleteJournalEntry {
        title: title.to_string(),
    }
    .into_instruction(program_id, owner)
}
