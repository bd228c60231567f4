use anyhow::Result;

use journal_lib::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    journal_lib::init_logging();

    let args: Cli = argh::from_env();
    cli::run(args).await
}
