//! Immutable point-in-time inventory.

use chrono::{DateTime, Local};
use farol_common::types::{Container, ContainerId};

/// Container records as seen by one refresh, in runtime order.
///
/// Never mutated after construction; a refresh builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    containers: Vec<Container>,
    taken_at: DateTime<Local>,
}

impl Snapshot {
    /// Wraps records built at this instant.
    #[must_use]
    pub fn new(containers: Vec<Container>) -> Self {
        Self {
            containers,
            taken_at: Local::now(),
        }
    }

    /// A snapshot with no containers.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every record, in runtime order.
    #[must_use]
    pub fn all(&self) -> &[Container] {
        &self.containers
    }

    /// Records whose id was in the running set.
    pub fn running(&self) -> impl Iterator<Item = &Container> {
        self.containers.iter().filter(|c| c.running)
    }

    /// Records whose id was not in the running set.
    pub fn stopped(&self) -> impl Iterator<Item = &Container> {
        self.containers.iter().filter(|c| !c.running)
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == *id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether the runtime reported no containers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// When this snapshot was built.
    #[must_use]
    pub const fn taken_at(&self) -> DateTime<Local> {
        self.taken_at
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}
