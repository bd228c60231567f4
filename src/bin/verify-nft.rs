use anyhow::Result;

use journal_lib::nft;
use journal_lib::{Config, RpcLedgerClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    journal_lib::init_logging();

    let config = Config::load(None)?;
    let user = config.load_keypair()?;
    let rpc = RpcLedgerClient::new(config.rpc_endpoint());

    let link = nft::verify_collection_membership(&rpc, &user, config.explorer()).await?;
    println!("NFT verified! Address is {link}");

    Ok(())
}
