use std::sync::Arc;

use anyhow::{Context, Result};
use solana_program::hash::hash;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};

use crate::cluster::{Cluster, Explorer};
use crate::models::{CreateJournalEntryArgs, JournalAccount, JournalEntryState};
use crate::notify::{Notice, Notifier};
use crate::query::{Mutation, Query, QueryState};
use crate::rpc_client::LedgerRpc;

pub use self::entry::JournalEntryHandle;
pub use self::instruction::JournalInstruction;
pub use self::pda::find_journal_entry_address;
pub use self::state::JOURNAL_ENTRY_DISCRIMINATOR;

mod entry;
pub mod instruction;
pub mod pda;
pub mod state;

/// Client for the `crudapp` program on one cluster.
///
/// Holds the cached list of entry accounts and the create mutation. Every
/// successful mutation refetches the list; failed ones leave it untouched.
pub struct JournalProgram<R> {
    rpc: Arc<R>,
    explorer: Explorer,
    program_id: Pubkey,
    wallet: Option<Arc<Keypair>>,
    notifier: Arc<dyn Notifier>,
    accounts: Arc<Query<Vec<JournalAccount>>>,
    program_account: Arc<Query<bool>>,
    create: Arc<Mutation<Signature>>,
}

impl<R> Clone for JournalProgram<R> {
    fn clone(&self) -> Self {
        Self {
            rpc: self.rpc.clone(),
            explorer: self.explorer.clone(),
            program_id: self.program_id,
            wallet: self.wallet.clone(),
            notifier: self.notifier.clone(),
            accounts: self.accounts.clone(),
            program_account: self.program_account.clone(),
            create: self.create.clone(),
        }
    }
}

impl<R: LedgerRpc> JournalProgram<R> {
    pub fn new(
        rpc: Arc<R>,
        explorer: impl Into<Explorer>,
        program_id: Pubkey,
        wallet: Option<Keypair>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let explorer = explorer.into();
        let cluster = explorer.cluster();
        Self {
            rpc,
            explorer,
            program_id,
            wallet: wallet.map(Arc::new),
            notifier,
            accounts: Arc::new(Query::new(format!("crudapp/all/{cluster}"))),
            program_account: Arc::new(Query::new(format!("get-program-account/{cluster}"))),
            create: Arc::new(Mutation::new(format!("journalEntry/create/{cluster}"))),
        }
    }

    pub fn cluster(&self) -> Cluster {
        self.explorer.cluster()
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Public key of the connected wallet.
    pub fn wallet(&self) -> Option<Pubkey> {
        self.wallet.as_ref().map(|wallet| wallet.pubkey())
    }

    pub fn accounts(&self) -> &Query<Vec<JournalAccount>> {
        &self.accounts
    }

    pub fn program_account(&self) -> &Query<bool> {
        &self.program_account
    }

    pub fn create_mutation(&self) -> &Mutation<Signature> {
        &self.create
    }

    /// Cached entry accounts, fetched on first use.
    pub async fn list(&self) -> QueryState<Vec<JournalAccount>> {
        if self.accounts.state().is_idle() {
            return self.refetch_accounts().await;
        }
        self.accounts.state()
    }

    pub async fn refetch_accounts(&self) -> QueryState<Vec<JournalAccount>> {
        self.accounts.resolve(self.load_accounts()).await
    }

    /// Whether the program is deployed on the selected cluster, fetched on first use.
    pub async fn check_program_account(&self) -> QueryState<bool> {
        if !self.program_account.state().is_idle() {
            return self.program_account.state();
        }
        self.program_account
            .resolve(self.rpc.account_exists(&self.program_id))
            .await
    }

    pub async fn fetch(&self, address: Pubkey) -> Result<JournalEntryState> {
        let data = self
            .rpc
            .account_data(&address)
            .await?
            .ok_or(JournalError::AccountNotFound(address))?;

        JournalEntryState::decode(&data)
            .with_context(|| format!("Failed to decode journal entry `{address}`"))
    }

    /// Handle for one entry account, with its own query and update/delete mutations.
    pub fn entry(&self, address: Pubkey) -> JournalEntryHandle<R> {
        JournalEntryHandle::new(self.clone(), address)
    }

    pub fn entry_address(&self, title: &str, owner: &Pubkey) -> Result<Pubkey> {
        let (address, _bump) = find_journal_entry_address(&self.program_id, title, owner)?;
        Ok(address)
    }

    pub async fn create_journal_entry(&self, args: CreateJournalEntryArgs) -> Result<Signature> {
        let submit = async {
            let signer = self.signer_for(&args.owner)?;
            let ix = instruction::create_journal_entry(
                &self.program_id,
                &args.owner,
                &args.title,
                &args.message,
            )?;
            self.submit(ix, signer).await
        };

        let result = self.create.run(submit).await;
        self.settle("create", result).await
    }

    async fn load_accounts(&self) -> Result<Vec<JournalAccount>> {
        let accounts = self
            .rpc
            .program_accounts(&self.program_id, &JOURNAL_ENTRY_DISCRIMINATOR[..])
            .await?;

        accounts
            .into_iter()
            .map(|(address, data)| -> Result<JournalAccount> {
                let state = JournalEntryState::decode(&data)
                    .with_context(|| format!("Failed to decode journal entry `{address}`"))?;
                Ok(JournalAccount { address, state })
            })
            .collect()
    }

    pub(crate) fn signer_for(&self, owner: &Pubkey) -> Result<&Keypair, JournalError> {
        let wallet = self.wallet.as_deref().ok_or(JournalError::WalletNotConnected)?;
        if wallet.pubkey() != *owner {
            return Err(JournalError::OwnerMismatch {
                owner: *owner,
                wallet: wallet.pubkey(),
            });
        }
        Ok(wallet)
    }

    pub(crate) fn connected_signer(&self) -> Result<&Keypair, JournalError> {
        self.wallet.as_deref().ok_or(JournalError::WalletNotConnected)
    }

    pub(crate) async fn submit(&self, ix: Instruction, signer: &Keypair) -> Result<Signature> {
        if let Ok(decoded) = JournalInstruction::unpack(&ix.data) {
            tracing::info!(
                instruction = decoded.name(),
                title = decoded.title(),
                account = %ix.accounts[0].pubkey,
                "submitting"
            );
        }
        self.rpc.send_and_confirm(&[ix], signer).await
    }

    /// Emits the notice for a finished mutation and refreshes the list on success.
    pub(crate) async fn settle(&self, verb: &str, result: Result<Signature>) -> Result<Signature> {
        match result {
            Ok(signature) => {
                self.notifier
                    .notify(Notice::transaction(signature, &self.explorer));
                self.refetch_accounts().await;
                Ok(signature)
            }
            Err(error) => {
                self.notifier.notify(Notice::Error(format!(
                    "Failed to {verb} journal entry: {error:#}"
                )));
                Err(error)
            }
        }
    }
}

/// First 8 bytes of `sha256("<namespace>:<name>")`, as Anchor tags accounts and instructions.
pub(crate) fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    out
}

#[derive(thiserror::Error, Debug)]
pub enum JournalError {
    #[error("Account `{0}` not found")]
    AccountNotFound(Pubkey),
    #[error("Account data is not a journal entry")]
    DiscriminatorMismatch,
    #[error("Failed to decode journal data: {0}")]
    Decode(String),
    #[error("Failed to encode journal data: {0}")]
    Encode(String),
    #[error("Unknown journal instruction")]
    UnknownInstruction,
    #[error("Title must be 1 to {max} bytes, got {len}")]
    InvalidTitle { len: usize, max: usize },
    #[error("Message must be at most 1000 bytes, got {0}")]
    InvalidMessage(usize),
    #[error("No program address for title `{0}`")]
    NoProgramAddress(String),
    #[error("Wallet not connected")]
    WalletNotConnected,
    #[error("Owner `{owner}` is not the connected wallet `{wallet}`")]
    OwnerMismatch { owner: Pubkey, wallet: Pubkey },
}
