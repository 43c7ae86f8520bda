//! `farol dashboard` — Open the interactive dashboard.

use std::sync::Arc;

use anyhow::Context;
use farol_runtime::command::ProcessRunner;
use farol_runtime::inventory::InventoryBuilder;
use farol_runtime::shutdown::ShutdownSignal;
use farol_runtime::store::InventoryStore;

/// Executes the `dashboard` command.
///
/// The initial inventory must load; later refresh failures are shown in
/// the dashboard instead.
///
/// # Errors
///
/// Returns an error if the initial inventory cannot be built or the
/// terminal fails.
pub async fn execute(runner: Arc<ProcessRunner>, shutdown: ShutdownSignal) -> anyhow::Result<()> {
    let snapshot = InventoryBuilder::new(Arc::clone(&runner))
        .build()
        .await
        .context("failed to load the initial container inventory")?;
    tracing::info!(containers = snapshot.len(), "dashboard starting");

    let store = Arc::new(InventoryStore::new(snapshot));
    farol_tui::session::run_dashboard(runner, store, shutdown)
        .await
        .context("dashboard terminated with a terminal error")?;

    tracing::info!("dashboard closed");
    Ok(())
}
