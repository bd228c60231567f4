use std::fmt;

use super::ellipsify;
use crate::models::JournalAccount;
use crate::program::JournalProgram;
use crate::query::QueryState;
use crate::rpc_client::LedgerRpc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    ProgramNotFound,
    Error(String),
    Empty,
    Entries(Vec<JournalAccount>),
}

impl ListView {
    pub fn from_states(
        program_account: &QueryState<bool>,
        accounts: &QueryState<Vec<JournalAccount>>,
    ) -> Self {
        match program_account {
            QueryState::Idle | QueryState::Loading => return ListView::Loading,
            QueryState::Success(true) => {}
            QueryState::Success(false) | QueryState::Error(_) => return ListView::ProgramNotFound,
        }

        match accounts {
            QueryState::Idle | QueryState::Loading => ListView::Loading,
            QueryState::Error(error) => ListView::Error(error.clone()),
            QueryState::Success(accounts) if accounts.is_empty() => ListView::Empty,
            QueryState::Success(accounts) => ListView::Entries(accounts.clone()),
        }
    }

    /// Checks the deployment, then loads the entry list if the program exists.
    pub async fn load<R: LedgerRpc>(program: &JournalProgram<R>) -> Self {
        let program_account = program.check_program_account().await;
        if program_account.data() != Some(&true) {
            return Self::from_states(&program_account, &QueryState::Idle);
        }
        let accounts = program.list().await;
        Self::from_states(&program_account, &accounts)
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListView::Loading => f.write_str("Loading..."),
            ListView::ProgramNotFound => f.write_str(
                "Program account not found. Make sure you have deployed the program and are on the correct cluster.",
            ),
            ListView::Error(error) => write!(f, "Failed to load journal entries: {error}"),
            ListView::Empty => {
                writeln!(f, "No accounts")?;
                f.write_str("No accounts found. Create one above to get started.")
            }
            ListView::Entries(accounts) => {
                for (i, account) in accounts.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "{}  {}: {}",
                        ellipsify(&account.address.to_string(), 4),
                        account.state.title,
                        account.state.message
                    )?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use solana_program::pubkey::Pubkey;

    use super::*;
    use crate::models::JournalEntryState;

    fn account(title: &str) -> JournalAccount {
        JournalAccount {
            address: Pubkey::new_unique(),
            state: JournalEntryState {
                owner: Pubkey::new_unique(),
                title: title.to_string(),
                message: "Hello".to_string(),
            },
        }
    }

    #[test]
    fn missing_program_is_a_banner() {
        let view = ListView::from_states(&QueryState::Success(false), &QueryState::Idle);
        assert_eq!(view, ListView::ProgramNotFound);
        assert!(view.to_string().starts_with("Program account not found."));
    }

    #[test]
    fn loading_until_both_queries_settle() {
        assert_eq!(
            ListView::from_states(&QueryState::Loading, &QueryState::Idle),
            ListView::Loading
        );
        assert_eq!(
            ListView::from_states(&QueryState::Success(true), &QueryState::Loading),
            ListView::Loading
        );
    }

    #[test]
    fn empty_and_populated_lists() {
        assert_eq!(
            ListView::from_states(&QueryState::Success(true), &QueryState::Success(vec![])),
            ListView::Empty
        );

        let entries = vec![account("Day 1"), account("Day 2")];
        let view =
            ListView::from_states(&QueryState::Success(true), &QueryState::Success(entries.clone()));
        assert_eq!(view, ListView::Entries(entries));
        assert_eq!(view.to_string().lines().count(), 2);
    }

    #[test]
    fn list_errors_are_shown() {
        let view = ListView::from_states(
            &QueryState::Success(true),
            &QueryState::Error("rpc down".to_string()),
        );
        assert_eq!(view.to_string(), "Failed to load journal entries: rpc down");
    }
}
