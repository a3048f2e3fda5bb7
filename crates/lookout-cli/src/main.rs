//! lookout - federated IP, WHOIS and DNS lookups from the terminal.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    lookout_cli::run().await
}
