//! Table bootstrap for the todo backend.
//!
//! Usage:
//!   migrator up      - Create the items table if it does not exist
//!
//! Reads `TODO__TABLE__NAME` and, for DynamoDB Local, `TODO__TABLE__ENDPOINT_URL`.

use anyhow::{Context, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_db::{connect, ensure_table};
use todo_shared::config::{TableConfig, load_section};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "migrator=info,todo_db=info".into()),
        )
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    if command != "up" {
        bail!("unknown command {command:?}; expected `up`");
    }

    let table: TableConfig = load_section("table").context("Failed to load table configuration")?;
    let client = connect(&table).await;

    if ensure_table(&client, &table.name).await? {
        info!(table = %table.name, "Table created");
    } else {
        info!(table = %table.name, "Table already present, nothing to do");
    }

    Ok(())
}
