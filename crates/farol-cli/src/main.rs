//! # farol — container dashboard
//!
//! Terminal dashboard and companion commands for the containers of a
//! local Docker-compatible runtime.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod commands;
mod logging;
mod output;

use anyhow::Context;
use clap::Parser;
use farol_runtime::shutdown;

use crate::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    logging::init(&config, cli.is_dashboard(), cli.log_json);

    let (trigger, signal) = shutdown::channel();
    ctrlc::set_handler(move || {
        tracing::info!("termination signal received");
        trigger.trigger();
    })
    .context("failed to install signal handler")?;

    commands::execute(cli, &config, signal).await
}
