use anyhow::Result;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};

use super::{instruction, JournalProgram};
use crate::models::{DeleteJournalEntryArgs, JournalEntryState, UpdateJournalEntryArgs};
use crate::query::{Mutation, Query, QueryState};
use crate::rpc_client::LedgerRpc;

pub struct JournalEntryHandle<R> {
    program: JournalProgram<R>,
    address: Pubkey,
    account_query: Query<JournalEntryState>,
    update: Mutation<Signature>,
    delete: Mutation<Signature>,
}

impl<R: LedgerRpc> JournalEntryHandle<R> {
    pub(super) fn new(program: JournalProgram<R>, address: Pubkey) -> Self {
        let cluster = program.cluster();
        Self {
            program,
            address,
            account_query: Query::new(format!("crudapp/fetch/{cluster}/{address}")),
            update: Mutation::new(format!("journalEntry/update/{cluster}")),
            delete: Mutation::new(format!("journalEntry/delete/{cluster}")),
        }
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn program(&self) -> &JournalProgram<R> {
        &self.program
    }

    pub fn account_query(&self) -> &Query<JournalEntryState> {
        &self.account_query
    }

    pub fn update_mutation(&self) -> &Mutation<Signature> {
        &self.update
    }

    pub fn delete_mutation(&self) -> &Mutation<Signature> {
        &self.delete
    }

    /// Decoded account state, fetched on first use.
    pub async fn load(&self) -> QueryState<JournalEntryState> {
        if self.account_query.state().is_idle() {
            return self.refetch().await;
        }
        self.account_query.state()
    }

    pub async fn refetch(&self) -> QueryState<JournalEntryState> {
        self.account_query
            .resolve(self.program.fetch(self.address))
            .await
    }

    pub async fn update_journal_entry(&self, args: UpdateJournalEntryArgs) -> Result<Signature> {
        let program = &self.program;
        let submit = async {
            let signer = program.signer_for(&args.owner)?;
            let ix = instruction::update_journal_entry(
                &program.program_id(),
                &args.owner,
                &args.title,
                &args.message,
            )?;
            program.submit(ix, signer).await
        };

        let result = self.update.run(submit).await;
        program.settle("update", result).await
    }

    pub async fn delete_journal_entry(&self, args: DeleteJournalEntryArgs) -> Result<Signature> {
        let program = &self.program;
        let submit = async {
            let signer = program.connected_signer()?;
            let ix = instruction::delete_journal_entry(
                &program.program_id(),
                &signer.pubkey(),
                &args.title,
            )?;
            program.submit(ix, signer).await
        };

        let result = self.delete.run(submit).await;
        program.settle("delete", result).await
    }
}
