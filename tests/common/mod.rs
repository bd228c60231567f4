#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use tokio::sync::Notify;

use journal_lib::models::JournalEntryState;
use journal_lib::notify::{Notice, Notifier};
use journal_lib::program::{find_journal_entry_address, JournalInstruction};
use journal_lib::settings::DEFAULT_PROGRAM_ID;
use journal_lib::{Cluster, JournalProgram, LedgerRpc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AccountExists(Pubkey),
    AccountData(Pubkey),
    ProgramAccounts(Pubkey),
    Balance(Pubkey),
    Airdrop(Pubkey, u64),
    Send(Vec<Instruction>),
}

/// In-memory ledger that runs the journal program's account rules.
#[derive(Default)]
pub struct MockLedger {
    journal_program: Option<Pubkey>,
    accounts: Mutex<BTreeMap<Pubkey, Vec<u8>>>,
    balances: Mutex<HashMap<Pubkey, u64>>,
    calls: Mutex<Vec<Call>>,
    fail_next_send: Mutex<Option<String>>,
    send_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockLedger {
    pub fn with_journal_program(program_id: Pubkey) -> Self {
        Self {
            journal_program: Some(program_id),
            ..Default::default()
        }
    }

    pub fn set_balance(&self, address: Pubkey, lamports: u64) {
        self.balances.lock().insert(address, lamports);
    }

    pub fn fail_next_send(&self, error: &str) {
        *self.fail_next_send.lock() = Some(error.to_string());
    }

    /// Holds every send until the returned `Notify` is signalled.
    pub fn gate_sends(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.send_gate.lock() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| pred(call)).count()
    }

    pub fn sends(&self) -> Vec<Vec<Instruction>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Send(ixs) => Some(ixs.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn insert_entry(&self, owner: Pubkey, title: &str, message: &str) -> Pubkey {
        let program_id = self.journal_program.expect("journal program");
        let (address, _) = find_journal_entry_address(&program_id, title, &owner).unwrap();
        let state = JournalEntryState {
            owner,
            title: title.to_string(),
            message: message.to_string(),
        };
        self.accounts.lock().insert(address, state.encode().unwrap());
        address
    }

    fn apply(&self, ix: &Instruction, signer: &Pubkey) -> Result<()> {
        let Some(program_id) = self.journal_program else {
            return Ok(());
        };
        if ix.program_id != program_id {
            return Ok(());
        }

        let decoded = JournalInstruction::unpack(&ix.data)?;
        let (expected, _) = find_journal_entry_address(&program_id, decoded.title(), signer)?;
        if ix.accounts[0].pubkey != expected {
            bail!("A seeds constraint was violated");
        }

        let mut accounts = self.accounts.lock();
        match decoded {
            JournalInstruction::CreateJournalEntry { title, message } => {
                if accounts.contains_key(&expected) {
                    bail!("Allocate: account {expected} already in use");
                }
                let state = JournalEntryState {
                    owner: *signer,
                    title,
                    message,
                };
                accounts.insert(expected, state.encode()?);
            }
            JournalInstruction::UpdateJournalEntry { message, .. } => {
                let data = accounts
                    .get_mut(&expected)
                    .ok_or_else(|| anyhow!("AccountNotInitialized"))?;
                let mut state = JournalEntryState::decode(data)?;
                state.message = message;
                *data = state.encode()?;
            }
            JournalInstruction::DeleteJournalEntry { .. } => {
                accounts
                    .remove(&expected)
                    .ok_or_else(|| anyhow!("AccountNotInitialized"))?;
            }
        }
        Ok(())
    }
}

impl LedgerRpc for MockLedger {
    fn account_exists<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<bool>> {
        async move {
            self.calls.lock().push(Call::AccountExists(*address));
            Ok(self.journal_program == Some(*address) || self.accounts.lock().contains_key(address))
        }
        .boxed()
    }

    fn account_data<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<Option<Vec<u8>>>> {
        async move {
            self.calls.lock().push(Call::AccountData(*address));
            Ok(self.accounts.lock().get(address).cloned())
        }
        .boxed()
    }

    fn program_accounts<'a>(
        &'a self,
        program_id: &'a Pubkey,
        discriminator: &'a [u8],
    ) -> BoxFuture<'a, Result<Vec<(Pubkey, Vec<u8>)>>> {
        async move {
            self.calls.lock().push(Call::ProgramAccounts(*program_id));
            if self.journal_program != Some(*program_id) {
                return Ok(vec![]);
            }
            Ok(self
                .accounts
                .lock()
                .iter()
                .filter(|(_, data)| data.starts_with(discriminator))
                .map(|(address, data)| (*address, data.clone()))
                .collect())
        }
        .boxed()
    }

    fn balance<'a>(&'a self, address: &'a Pubkey) -> BoxFuture<'a, Result<u64>> {
        async move {
            self.calls.lock().push(Call::Balance(*address));
            Ok(self.balances.lock().get(address).copied().unwrap_or_default())
        }
        .boxed()
    }

    fn request_airdrop<'a>(
        &'a self,
        address: &'a Pubkey,
        lamports: u64,
    ) -> BoxFuture<'a, Result<Signature>> {
        async move {
            self.calls.lock().push(Call::Airdrop(*address, lamports));
            *self.balances.lock().entry(*address).or_default() += lamports;
            Ok(Signature::new_unique())
        }
        .boxed()
    }

    fn send_and_confirm<'a>(
        &'a self,
        instructions: &'a [Instruction],
        signer: &'a Keypair,
    ) -> BoxFuture<'a, Result<Signature>> {
        async move {
            self.calls.lock().push(Call::Send(instructions.to_vec()));

            let gate = self.send_gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            let failure = self.fail_next_send.lock().take();
            if let Some(error) = failure {
                bail!(error);
            }
            for ix in instructions {
                self.apply(ix, &signer.pubkey())?;
            }
            Ok(Signature::new_unique())
        }
        .boxed()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

pub struct Harness {
    pub ledger: Arc<MockLedger>,
    pub notifier: Arc<RecordingNotifier>,
    pub program: JournalProgram<MockLedger>,
}

impl Harness {
    pub fn connected() -> Self {
        Self::new(Some(Keypair::new()), true)
    }

    pub fn disconnected() -> Self {
        Self::new(None, true)
    }

    pub fn undeployed() -> Self {
        Self::new(Some(Keypair::new()), false)
    }

    fn new(wallet: Option<Keypair>, deployed: bool) -> Self {
        let ledger = Arc::new(if deployed {
            MockLedger::with_journal_program(DEFAULT_PROGRAM_ID)
        } else {
            MockLedger::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let program = JournalProgram::new(
            ledger.clone(),
            Cluster::Devnet,
            DEFAULT_PROGRAM_ID,
            wallet,
            notifier.clone(),
        );
        Self {
            ledger,
            notifier,
            program,
        }
    }

    pub fn owner(&self) -> Pubkey {
        self.program.wallet().expect("connected wallet")
    }
}
