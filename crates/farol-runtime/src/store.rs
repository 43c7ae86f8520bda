//! Holder of the current inventory snapshot.
//!
//! The store owns exactly one [`Snapshot`] behind an `Arc`. Refreshing
//! swaps the `Arc`; readers clone it once and project from that single
//! snapshot, so they never see a mix of two refreshes.

use std::sync::{Arc, PoisonError, RwLock};

use farol_common::error::Result;
use farol_common::types::Container;

use crate::command::CommandRunner;
use crate::inventory::InventoryBuilder;
use crate::snapshot::Snapshot;

/// The latest inventory snapshot and its single-flight refresh gate.
#[derive(Debug, Default)]
pub struct InventoryStore {
    current: RwLock<Arc<Snapshot>>,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl InventoryStore {
    /// Creates a store holding the given snapshot.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Atomically swaps in a new snapshot and returns it.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&snapshot);
        snapshot
    }

    /// Returns the currently held snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Every container in the current snapshot.
    #[must_use]
    pub fn all(&self) -> Vec<Container> {
        self.snapshot().all().to_vec()
    }

    /// Running containers in the current snapshot.
    #[must_use]
    pub fn running(&self) -> Vec<Container> {
        self.snapshot().running().cloned().collect()
    }

    /// Stopped containers in the current snapshot.
    #[must_use]
    pub fn stopped(&self) -> Vec<Container> {
        self.snapshot().stopped().cloned().collect()
    }

    /// Rebuilds the snapshot from the runtime and swaps it in.
    ///
    /// Refreshes are serialized: a second caller waits for the first to
    /// finish, then runs its own build. On failure the previous snapshot
    /// stays in place.
    ///
    /// # Errors
    ///
    /// Returns the builder's query error.
    pub async fn refresh<R: CommandRunner>(
        &self,
        builder: &InventoryBuilder<R>,
    ) -> Result<Arc<Snapshot>> {
        let _in_flight = self.refresh_gate.lock().await;
        match builder.build().await {
            Ok(snapshot) => Ok(self.replace(snapshot)),
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }
}
