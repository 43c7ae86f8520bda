//! `farol ps` — List containers.

use std::sync::Arc;

use clap::Args;
use farol_common::types::Container;
use farol_runtime::command::ProcessRunner;
use farol_runtime::inventory::InventoryBuilder;

use crate::output;

/// Arguments for the `ps` command.
#[derive(Args, Debug)]
pub struct PsArgs {
    /// Show all containers (including stopped).
    #[arg(short, long)]
    pub all: bool,

    /// Print the records as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `ps` command.
///
/// # Errors
///
/// Returns an error if either inventory query fails.
#[allow(clippy::print_stdout)]
pub async fn execute(runner: Arc<ProcessRunner>, args: &PsArgs) -> anyhow::Result<()> {
    let snapshot = InventoryBuilder::new(runner).build().await?;
    let containers: Vec<&Container> = if args.all {
        snapshot.all().iter().collect()
    } else {
        snapshot.running().collect()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&containers)?);
        return Ok(());
    }
    if containers.is_empty() {
        println!("No containers found.");
        return Ok(());
    }
    print!("{}", output::container_table(&containers));
    Ok(())
}
