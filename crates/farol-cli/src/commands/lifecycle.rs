//! `farol start|stop|rm` — Single-container lifecycle actions.

use std::sync::Arc;

use clap::Args;
use farol_common::types::{ActionKind, ContainerId};
use farol_runtime::actions::ActionExecutor;
use farol_runtime::command::ProcessRunner;

/// Arguments shared by `start`, `stop`, and `rm`.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Container ID or name.
    pub container: String,
}

/// Executes the `start` command.
///
/// # Errors
///
/// Returns the runtime's error, including its output.
pub async fn start(runner: Arc<ProcessRunner>, args: &TargetArgs) -> anyhow::Result<()> {
    let id = ContainerId::new(&args.container);
    ActionExecutor::new(runner).start(&id).await?;
    report(ActionKind::Start, &args.container);
    Ok(())
}

/// Executes the `stop` command.
///
/// # Errors
///
/// Returns the runtime's error, including its output.
pub async fn stop(runner: Arc<ProcessRunner>, args: &TargetArgs) -> anyhow::Result<()> {
    let id = ContainerId::new(&args.container);
    ActionExecutor::new(runner).stop(&id).await?;
    report(ActionKind::Stop, &args.container);
    Ok(())
}

/// Executes the `rm` command.
///
/// # Errors
///
/// Returns the runtime's error, including its output.
pub async fn remove(runner: Arc<ProcessRunner>, args: &TargetArgs) -> anyhow::Result<()> {
    let id = ContainerId::new(&args.container);
    ActionExecutor::new(runner).remove(&id).await?;
    report(ActionKind::Remove, &args.container);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub(crate) fn report(kind: ActionKind, target: &str) {
    println!("{} {target}", kind.past());
}
