//! Domain primitive types used across the Farol workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime-assigned identifier of a container.
///
/// Opaque to Farol: it is only compared and passed back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Whether a container was running when its snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    /// Listed by the running-containers query.
    Running,
    /// Known to the runtime but not running.
    Stopped,
}

impl ContainerState {
    /// Maps the derived running flag to a state.
    #[must_use]
    pub const fn from_running(running: bool) -> Self {
        if running { Self::Running } else { Self::Stopped }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// One container as seen at snapshot-build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Runtime identifier.
    pub id: ContainerId,
    /// Image reference the container was created from.
    pub image: String,
    /// Human-readable name.
    pub name: String,
    /// Whether the id appeared in the running-containers query.
    pub running: bool,
}

impl Container {
    /// Returns the state label for this record.
    #[must_use]
    pub const fn state(&self) -> ContainerState {
        ContainerState::from_running(self.running)
    }
}

/// Operations the dashboard can perform against a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Start a stopped container.
    Start,
    /// Stop a running container.
    Stop,
    /// Remove a container permanently.
    Remove,
    /// Create and run a new detached container.
    Create,
    /// Read the live running state of a container.
    Inspect,
}

impl ActionKind {
    /// Whether the action changes runtime state and needs a refresh afterwards.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(self, Self::Inspect)
    }

    /// Progressive verb used in status messages, e.g. "Stopping".
    #[must_use]
    pub const fn progressive(self) -> &'static str {
        match self {
            Self::Start => "Starting",
            Self::Stop => "Stopping",
            Self::Remove => "Removing",
            Self::Create => "Creating",
            Self::Inspect => "Inspecting",
        }
    }

    /// Past-tense verb used in status messages, e.g. "Stopped".
    #[must_use]
    pub const fn past(self) -> &'static str {
        match self {
            Self::Start => "Started",
            Self::Stop => "Stopped",
            Self::Remove => "Removed",
            Self::Create => "Created",
            Self::Inspect => "Inspected",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
            Self::Remove => write!(f, "remove"),
            Self::Create => write!(f, "create"),
            Self::Inspect => write!(f, "inspect"),
        }
    }
}
