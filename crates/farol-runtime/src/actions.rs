//! Lifecycle actions against the runtime.
//!
//! Each operation is exactly one runtime call. The executor never touches
//! the inventory store; callers refresh after a mutating action returns.

use std::sync::Arc;

use farol_common::constants::INSPECT_RUNNING_FORMAT;
use farol_common::error::{FarolError, Result};
use farol_common::types::{ActionKind, ContainerId};

use crate::command::CommandRunner;

/// Performs start, stop, remove, create, and inspect.
#[derive(Debug)]
pub struct ActionExecutor<R> {
    runner: Arc<R>,
}

impl<R: CommandRunner> ActionExecutor<R> {
    /// Creates an executor over the given runner.
    #[must_use]
    pub const fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Starts a stopped container.
    ///
    /// # Errors
    ///
    /// Returns [`FarolError::Action`] with the runtime's output, or
    /// [`FarolError::Cancelled`].
    pub async fn start(&self, id: &ContainerId) -> Result<()> {
        self.mutate(ActionKind::Start, Some(id), vec!["start".into(), id.to_string()])
            .await
    }

    /// Stops a running container.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::start`].
    pub async fn stop(&self, id: &ContainerId) -> Result<()> {
        self.mutate(ActionKind::Stop, Some(id), vec!["stop".into(), id.to_string()])
            .await
    }

    /// Removes a container permanently.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::start`].
    pub async fn remove(&self, id: &ContainerId) -> Result<()> {
        self.mutate(ActionKind::Remove, Some(id), vec!["rm".into(), id.to_string()])
            .await
    }

    /// Creates and starts a detached container named `name` from `image`.
    ///
    /// Surrounding whitespace is ignored. Nothing is sent to the runtime
    /// unless both values are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`FarolError::Validation`] for an empty field, otherwise
    /// the same contract as [`Self::start`].
    pub async fn create(&self, name: &str, image: &str) -> Result<()> {
        let name = name.trim();
        let image = image.trim();
        if name.is_empty() {
            return Err(FarolError::Validation {
                field: "name",
                message: "container name is required".into(),
            });
        }
        if image.is_empty() {
            return Err(FarolError::Validation {
                field: "image",
                message: "image name is required".into(),
            });
        }
        let args = vec![
            "run".into(),
            "-d".into(),
            "--name".into(),
            name.to_string(),
            image.to_string(),
        ];
        self.mutate(ActionKind::Create, None, args).await
    }

    /// Reads whether the container is running right now.
    ///
    /// Best-effort: any failure is logged and yields `None`.
    pub async fn inspect(&self, id: &ContainerId) -> Option<bool> {
        let args = vec![
            "inspect".to_string(),
            "-f".to_string(),
            INSPECT_RUNNING_FORMAT.to_string(),
            id.to_string(),
        ];
        match self.runner.run(&args).await {
            Ok(output) if output.is_success() => {
                let state = output.stdout.trim();
                Some(state == "true")
            }
            Ok(output) => {
                tracing::warn!(
                    id = %id,
                    status = %output.status_text(),
                    output = %output.combined().trim(),
                    "failed to inspect container"
                );
                None
            }
            Err(failure) => {
                tracing::warn!(id = %id, error = %failure, "failed to inspect container");
                None
            }
        }
    }

    async fn mutate(&self, op: ActionKind, id: Option<&ContainerId>, args: Vec<String>) -> Result<()> {
        let command = self.runner.command_line(&args);
        let output = match self.runner.run(&args).await {
            Ok(output) => output,
            Err(failure) => {
                tracing::warn!(op = %op, command = %command, error = %failure, "action did not complete");
                return Err(match failure.cancel_reason() {
                    Some(reason) => FarolError::Cancelled { command, reason },
                    None => FarolError::Action {
                        op,
                        id: id.cloned(),
                        cause: failure.to_string(),
                        output: String::new(),
                    },
                });
            }
        };

        if !output.is_success() {
            tracing::warn!(op = %op, command = %command, status = %output.status_text(), "action failed");
            return Err(FarolError::Action {
                op,
                id: id.cloned(),
                cause: output.status_text(),
                output: output.combined(),
            });
        }

        tracing::info!(op = %op, command = %command, "action completed");
        Ok(())
    }
}
