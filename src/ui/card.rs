use std::fmt;

use anyhow::Result;
use solana_sdk::signature::Signature;

use super::{ellipsify, Confirm, CONNECT_WALLET};
use crate::models::{DeleteJournalEntryArgs, JournalEntryState, UpdateJournalEntryArgs};
use crate::program::JournalEntryHandle;
use crate::query::QueryState;
use crate::rpc_client::LedgerRpc;

pub const CLOSE_PROMPT: &str = "Are you sure you want to close this account?";

/// One entry account with an editable draft of its message.
pub struct EntryCard<R> {
    handle: JournalEntryHandle<R>,
    draft: String,
}

impl<R: LedgerRpc> EntryCard<R> {
    /// Fetches the account and seeds the draft with its current message.
    pub async fn load(handle: JournalEntryHandle<R>) -> Self {
        let state = handle.load().await;
        let draft = state
            .data()
            .map(|entry| entry.message.clone())
            .unwrap_or_default();
        Self { handle, draft }
    }

    pub fn handle(&self) -> &JournalEntryHandle<R> {
        &self.handle
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, message: impl Into<String>) {
        self.draft = message.into();
    }

    pub fn title(&self) -> Option<String> {
        self.handle
            .account_query()
            .state()
            .data()
            .map(|entry| entry.title.clone())
    }

    pub fn update_enabled(&self) -> bool {
        !self.handle.update_mutation().is_pending()
            && !self.draft.trim().is_empty()
            && self.title().is_some()
    }

    pub fn delete_enabled(&self) -> bool {
        !self.handle.delete_mutation().is_pending()
    }

    /// Sends the draft as the new message. `None` when the update control is disabled.
    pub async fn submit_update(&self) -> Option<Result<Signature>> {
        let owner = self.handle.program().wallet()?;
        if !self.update_enabled() {
            return None;
        }
        let title = self.title()?;

        Some(
            self.handle
                .update_journal_entry(UpdateJournalEntryArgs {
                    title,
                    message: self.draft.clone(),
                    owner,
                })
                .await,
        )
    }

    /// Closes the account after `confirm` accepts [`CLOSE_PROMPT`]. Declining issues no remote call.
    ///
    /// Without a connected wallet the prompt is never shown.
    pub async fn close(&self, confirm: &dyn Confirm) -> Option<Result<Signature>> {
        self.handle.program().wallet()?;
        if !self.delete_enabled() || !confirm.confirm(CLOSE_PROMPT) {
            return None;
        }
        let title = self.title()?;

        Some(
            self.handle
                .delete_journal_entry(DeleteJournalEntryArgs { title })
                .await,
        )
    }

    pub fn render(&self) -> CardView {
        let program = self.handle.program();
        if program.wallet().is_none() {
            return CardView::ConnectWallet;
        }

        match self.handle.account_query().state() {
            QueryState::Idle | QueryState::Loading => CardView::Loading,
            QueryState::Error(error) => CardView::Error(error),
            QueryState::Success(entry) => {
                let address = self.handle.address().to_string();
                CardView::Entry {
                    link: program.explorer().link("account", &address),
                    label: ellipsify(&address, 4),
                    entry,
                    draft: self.draft.clone(),
                    update_enabled: self.update_enabled(),
                    update_pending: self.handle.update_mutation().is_pending(),
                    delete_enabled: self.delete_enabled(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardView {
    ConnectWallet,
    Loading,
    Error(String),
    Entry {
        entry: JournalEntryState,
        draft: String,
        label: String,
        link: String,
        update_enabled: bool,
        update_pending: bool,
        delete_enabled: bool,
    },
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardView::ConnectWallet => f.write_str(CONNECT_WALLET),
            CardView::Loading => f.write_str("Loading..."),
            CardView::Error(error) => write!(f, "Failed to load journal entry: {error}"),
            CardView::Entry {
                entry,
                draft,
                label,
                link,
                update_enabled,
                update_pending,
                delete_enabled,
            } => {
                writeln!(f, "{}", entry.title)?;
                writeln!(f, "{}", entry.message)?;
                writeln!(f)?;
                writeln!(f, "Draft: {draft}")?;
                writeln!(
                    f,
                    "[Update Journal Entry{}]{}",
                    if *update_pending { "..." } else { "" },
                    if *update_enabled { "" } else { " (disabled)" }
                )?;
                writeln!(f, "{label} {link}")?;
                write!(f, "[Close]{}", if *delete_enabled { "" } else { " (disabled)" })
            }
        }
    }
}
