//! `farol create` — Create and start a detached container.

use std::sync::Arc;

use clap::Args;
use farol_common::types::ActionKind;
use farol_runtime::actions::ActionExecutor;
use farol_runtime::command::ProcessRunner;

use crate::commands::lifecycle::report;

/// Arguments for the `create` command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name for the new container.
    pub name: String,

    /// Image to run.
    pub image: String,
}

/// Executes the `create` command.
///
/// # Errors
///
/// Returns a validation error for an empty name or image, otherwise the
/// runtime's error.
pub async fn execute(runner: Arc<ProcessRunner>, args: &CreateArgs) -> anyhow::Result<()> {
    ActionExecutor::new(runner).create(&args.name, &args.image).await?;
    report(ActionKind::Create, args.name.trim());
    Ok(())
}
