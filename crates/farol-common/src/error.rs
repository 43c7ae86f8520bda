//! Unified error types for the Farol workspace.
//!
//! Every failure the inventory core can produce is one of these variants,
//! so the dashboard can render it as data instead of terminating.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::types::{ActionKind, ContainerId};

/// Why an in-flight runtime call was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The process is shutting down.
    Shutdown,
    /// The call exceeded the configured timeout.
    Timeout(Duration),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "shutdown requested"),
            Self::Timeout(after) => write!(f, "timed out after {}s", after.as_secs()),
        }
    }
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum FarolError {
    /// A query against the runtime failed.
    #[error("runtime query `{command}` failed: {cause}{}", detail(.output))]
    RuntimeQuery {
        /// The runtime command line that was issued.
        command: String,
        /// Short description of the failure.
        cause: String,
        /// Raw combined output of the runtime, possibly empty.
        output: String,
    },

    /// Caller-supplied input violates a precondition.
    #[error("{field}: {message}")]
    Validation {
        /// Name of the offending input.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A lifecycle or inspect call against the runtime failed.
    #[error("failed to {op} container{}: {cause}{}", target(.id.as_ref()), detail(.output))]
    Action {
        /// Which operation failed.
        op: ActionKind,
        /// Target container, absent for create.
        id: Option<ContainerId>,
        /// Short description of the failure.
        cause: String,
        /// Raw combined output of the runtime, possibly empty.
        output: String,
    },

    /// An in-flight runtime call was cancelled.
    #[error("`{command}` cancelled: {reason}")]
    Cancelled {
        /// The runtime command line that was abandoned.
        command: String,
        /// What triggered the cancellation.
        reason: CancelReason,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl FarolError {
    /// Short title for an error dialog.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::RuntimeQuery { .. } => "Refresh Error",
            Self::Validation { .. } => "Validation Error",
            Self::Action { op, .. } => match op {
                ActionKind::Start => "Start Container Error",
                ActionKind::Stop => "Stop Container Error",
                ActionKind::Remove => "Remove Container Error",
                ActionKind::Create => "Create Error",
                ActionKind::Inspect => "Inspect Error",
            },
            Self::Cancelled { .. } => "Cancelled",
            Self::Config { .. } => "Configuration Error",
            Self::Io { .. } | Self::Serialization { .. } => "Error",
        }
    }

    /// Whether this is a validation failure raised before any runtime call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

fn target(id: Option<&ContainerId>) -> String {
    id.map_or_else(String::new, |id| format!(" {id}"))
}

fn detail(output: &str) -> String {
    let output = output.trim();
    if output.is_empty() {
        String::new()
    } else {
        format!("\nOutput: {output}")
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FarolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_error_message_carries_runtime_output() {
        let err = FarolError::Action {
            op: ActionKind::Stop,
            id: Some(ContainerId::new("a1")),
            cause: "exit status 1".into(),
            output: "Error response from daemon: no such container: a1\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to stop container a1: exit status 1\nOutput: Error response from daemon: no such container: a1"
        );
        assert_eq!(err.title(), "Stop Container Error");
    }

    #[test]
    fn create_error_has_no_target_id() {
        let err = FarolError::Action {
            op: ActionKind::Create,
            id: None,
            cause: "exit status 125".into(),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "failed to create container: exit status 125");
    }

    #[test]
    fn cancelled_error_names_reason() {
        let err = FarolError::Cancelled {
            command: "docker stop a1".into(),
            reason: CancelReason::Timeout(Duration::from_secs(30)),
        };
        assert_eq!(err.to_string(), "`docker stop a1` cancelled: timed out after 30s");
    }

    #[test]
    fn validation_is_flagged() {
        let err = FarolError::Validation {
            field: "name",
            message: "container name is required".into(),
        };
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "name: container name is required");
    }
}
