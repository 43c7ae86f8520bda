//! `farol inspect` — Show a container's details and live state.

use std::sync::Arc;

use clap::Args;
use farol_common::types::Container;
use farol_runtime::actions::ActionExecutor;
use farol_runtime::command::ProcessRunner;
use farol_runtime::inventory::InventoryBuilder;

use crate::output;

/// Arguments for the `inspect` command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Container ID or name.
    pub container: String,
}

/// Executes the `inspect` command.
///
/// The live state read is best-effort and prints as "unknown" on failure.
///
/// # Errors
///
/// Returns an error if the inventory cannot be built or no container
/// matches.
#[allow(clippy::print_stdout)]
pub async fn execute(runner: Arc<ProcessRunner>, args: &InspectArgs) -> anyhow::Result<()> {
    let snapshot = InventoryBuilder::new(Arc::clone(&runner)).build().await?;
    let container = resolve(snapshot.all(), &args.container)
        .ok_or_else(|| anyhow::anyhow!("no such container: {}", args.container))?;

    let live = ActionExecutor::new(runner).inspect(&container.id).await;
    print!("{}", output::container_details(container, live));
    Ok(())
}

/// Finds a container by name or id.
///
/// An exact name or id wins. Otherwise the query may be a full id whose
/// short form is listed, or an id prefix; either must match exactly one
/// container.
fn resolve<'a>(containers: &'a [Container], query: &str) -> Option<&'a Container> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(exact) = containers
        .iter()
        .find(|c| c.name == query || c.id.as_str() == query)
    {
        return Some(exact);
    }
    let mut matches = containers.iter().filter(|c| {
        let id = c.id.as_str();
        query.starts_with(id) || id.starts_with(query)
    });
    let first = matches.next()?;
    matches.next().is_none().then_some(first)
}
