use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use argh::FromArgs;
use solana_program::pubkey::Pubkey;

use crate::cluster::Cluster;
use crate::notify::TracingNotifier;
use crate::program::JournalProgram;
use crate::query::QueryState;
use crate::rpc_client::{LedgerRpc, RpcLedgerClient};
use crate::settings::Config;
use crate::ui::{Confirm, CreateForm, CreateView, EntryCard, ListView, CONNECT_WALLET};

#[derive(FromArgs, Debug, PartialEq)]
/// Read and write journal entries stored by the crudapp program.
pub struct Cli {
    /// path to a YAML settings file (default: ./journal.yaml)
    #[argh(option)]
    pub config: Option<PathBuf>,

    /// cluster to use: devnet, testnet, mainnet-beta or localnet
    #[argh(option)]
    pub cluster: Option<Cluster>,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand)]
pub enum Command {
    List(ListCommand),
    Show(ShowCommand),
    Create(CreateCommand),
    Update(UpdateCommand),
    Delete(DeleteCommand),
}

#[derive(FromArgs, Debug, PartialEq)]
/// List all journal entries.
#[argh(subcommand, name = "list")]
pub struct ListCommand {
    /// print entries as JSON
    #[argh(switch)]
    pub json: bool,
}

#[derive(FromArgs, Debug, PartialEq)]
/// Show one journal entry account.
#[argh(subcommand, name = "show")]
pub struct ShowCommand {
    /// entry account address
    #[argh(positional)]
    pub address: Pubkey,

    /// print the entry as JSON
    #[argh(switch)]
    pub json: bool,
}

#[derive(FromArgs, Debug, PartialEq)]
/// Create a journal entry owned by the connected wallet.
#[argh(subcommand, name = "create")]
pub struct CreateCommand {
    /// entry title, unique per owner
    #[argh(option)]
    pub title: String,

    /// entry message
    #[argh(option)]
    pub message: String,
}

#[derive(FromArgs, Debug, PartialEq)]
/// Replace the message of a journal entry.
#[argh(subcommand, name = "update")]
pub struct UpdateCommand {
    /// entry title
    #[argh(option)]
    pub title: String,

    /// new message
    #[argh(option)]
    pub message: String,
}

#[derive(FromArgs, Debug, PartialEq)]
/// Close a journal entry account.
#[argh(subcommand, name = "delete")]
pub struct DeleteCommand {
    /// entry title
    #[argh(option)]
    pub title: String,

    /// skip the confirmation prompt
    #[argh(switch)]
    pub yes: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(cluster) = cli.cluster {
        config.cluster = cluster;
    }

    let rpc = Arc::new(RpcLedgerClient::new(config.rpc_endpoint()));
    tracing::debug!(url = %rpc.url(), cluster = %config.cluster, "connecting");

    let program = JournalProgram::new(
        rpc,
        config.explorer(),
        config.program_id,
        config.connected_wallet()?,
        Arc::new(TracingNotifier),
    );

    match cli.command {
        Command::List(cmd) => list(&program, cmd.json).await,
        Command::Show(cmd) => show(&program, cmd.address, cmd.json).await,
        Command::Create(cmd) => create(&program, CreateForm::new(cmd.title, cmd.message)).await,
        Command::Update(cmd) => update(&program, &cmd.title, cmd.message).await,
        Command::Delete(cmd) => delete(&program, &cmd.title, cmd.yes).await,
    }
}

async fn list<R: LedgerRpc>(program: &JournalProgram<R>, json: bool) -> Result<()> {
    let view = ListView::load(program).await;
    if let ListView::Error(error) = &view {
        bail!("Failed to load journal entries: {error}");
    }
    if !json {
        println!("{view}");
        return Ok(());
    }
    println!("{}", list_json(&view)?);
    Ok(())
}

/// JSON array of the listed entries. Banners go to the log so stdout stays parseable.
fn list_json(view: &ListView) -> Result<String> {
    match view {
        ListView::Entries(accounts) => Ok(serde_json::to_string_pretty(accounts)?),
        ListView::ProgramNotFound | ListView::Loading => {
            tracing::warn!("{view}");
            Ok("[]".to_string())
        }
        ListView::Empty => Ok("[]".to_string()),
        ListView::Error(error) => bail!("Failed to load journal entries: {error}"),
    }
}

async fn show<R: LedgerRpc>(program: &JournalProgram<R>, address: Pubkey, json: bool) -> Result<()> {
    let handle = program.entry(address);
    if json {
        let entry = match handle.load().await {
            QueryState::Success(entry) => entry,
            state => bail!(state.error().unwrap_or("entry not loaded").to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let card = EntryCard::load(handle).await;
    println!("{}", card.render());
    Ok(())
}

async fn create<R: LedgerRpc>(program: &JournalProgram<R>, form: CreateForm) -> Result<()> {
    let pending = program.create_mutation().is_pending();
    if let view @ CreateView::ConnectWallet = form.render(program.wallet(), pending) {
        bail!("{view}");
    }
    if !form.is_valid() {
        bail!("Title and message must not be empty");
    }

    match form.submit(program).await {
        Some(result) => {
            let signature = result?;
            println!("{signature}");
            Ok(())
        }
        None => Err(anyhow!("Create is not available right now")),
    }
}

async fn update<R: LedgerRpc>(program: &JournalProgram<R>, title: &str, message: String) -> Result<()> {
    let owner = program.wallet().ok_or_else(|| anyhow!(CONNECT_WALLET))?;
    let address = program.entry_address(title, &owner)?;

    let mut card = EntryCard::load(program.entry(address)).await;
    if let Some(error) = card.handle().account_query().state().error() {
        bail!("Failed to load journal entry `{title}`: {error}");
    }
    card.set_draft(message);
    if card.draft().trim().is_empty() {
        bail!("Message must not be empty");
    }

    let signature = card
        .submit_update()
        .await
        .ok_or_else(|| anyhow!("Update is not available right now"))??;
    println!("{signature}");
    Ok(())
}

async fn delete<R: LedgerRpc>(program: &JournalProgram<R>, title: &str, yes: bool) -> Result<()> {
    let owner = program.wallet().ok_or_else(|| anyhow!(CONNECT_WALLET))?;
    let address = program.entry_address(title, &owner)?;

    let card = EntryCard::load(program.entry(address)).await;
    if let Some(error) = card.handle().account_query().state().error() {
        bail!("Failed to load journal entry `{title}`: {error}");
    }

    let confirm = StdinConfirm { assume_yes: yes };
    match card.close(&confirm).await {
        Some(result) => {
            println!("{}", result?);
        }
        None => tracing::info!("close cancelled"),
    }
    Ok(())
}

/// Prompts on stdin. A non-interactive stdin declines unless `--yes` was given.
struct StdinConfirm {
    assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !atty::is(atty::Stream::Stdin) {
            tracing::warn!("stdin is not a terminal, pass --yes to confirm");
            return false;
        }

        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}
