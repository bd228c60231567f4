use std::fmt;

use anyhow::Result;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use super::CONNECT_WALLET;
use crate::models::CreateJournalEntryArgs;
use crate::program::JournalProgram;
use crate::rpc_client::LedgerRpc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub message: String,
}

impl CreateForm {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.message.trim().is_empty()
    }

    pub fn submit_enabled(&self, pending: bool) -> bool {
        !pending && self.is_valid()
    }

    /// Issues the create mutation. `None` when the submit control is disabled
    /// or no wallet is connected.
    pub async fn submit<R: LedgerRpc>(
        &self,
        program: &JournalProgram<R>,
    ) -> Option<Result<Signature>> {
        let owner = program.wallet()?;
        if !self.submit_enabled(program.create_mutation().is_pending()) {
            return None;
        }

        Some(
            program
                .create_journal_entry(CreateJournalEntryArgs {
                    title: self.title.clone(),
                    message: self.message.clone(),
                    owner,
                })
                .await,
        )
    }

    pub fn render(&self, wallet: Option<Pubkey>, pending: bool) -> CreateView {
        if wallet.is_none() {
            return CreateView::ConnectWallet;
        }
        CreateView::Form {
            title: self.title.clone(),
            message: self.message.clone(),
            submit_enabled: self.submit_enabled(pending),
            pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateView {
    ConnectWallet,
    Form {
        title: String,
        message: String,
        submit_enabled: bool,
        pending: bool,
    },
}

impl fmt::Display for CreateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateView::ConnectWallet => f.write_str(CONNECT_WALLET),
            CreateView::Form {
                title,
                message,
                submit_enabled,
                pending,
            } => {
                writeln!(f, "Title:   {title}")?;
                writeln!(f, "Message: {message}")?;
                let ellipsis = if *pending { "..." } else { "" };
                let state = if *submit_enabled { "" } else { " (disabled)" };
                write!(f, "[Create{ellipsis}]{state}")
            }
        }
    }
}
