//! Inventory queries against the runtime.
//!
//! Two independent point-in-time queries: every container with its
//! identity fields, and the ids of the running subset. No caching, no
//! retry, no interpretation of the listing beyond splitting it into lines.

use std::collections::HashSet;
use std::sync::Arc;

use farol_common::constants::{LIST_ALL_FORMAT, LIST_RUNNING_FORMAT};
use farol_common::error::{FarolError, Result};
use farol_common::types::ContainerId;

use crate::command::{CommandFailure, CommandRunner};

/// Issues the inventory queries through a [`CommandRunner`].
#[derive(Debug)]
pub struct RuntimeQuery<R> {
    runner: Arc<R>,
}

impl<R> Clone for RuntimeQuery<R> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
        }
    }
}

impl<R: CommandRunner> RuntimeQuery<R> {
    /// Creates a query adapter over the given runner.
    #[must_use]
    pub const fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Lists every container regardless of state, one `id|image|name`
    /// line per container, in the order the runtime reports them.
    ///
    /// # Errors
    ///
    /// Returns [`FarolError::RuntimeQuery`] if the runtime cannot be run or
    /// exits non-zero, or [`FarolError::Cancelled`] on timeout or shutdown.
    pub async fn list_all_containers(&self) -> Result<Vec<String>> {
        let args = vec![
            "ps".to_string(),
            "-a".to_string(),
            "--format".to_string(),
            LIST_ALL_FORMAT.to_string(),
        ];
        let stdout = self.query(&args).await?;
        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Lists the ids of currently running containers.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::list_all_containers`].
    pub async fn list_running_ids(&self) -> Result<HashSet<ContainerId>> {
        let args = vec![
            "ps".to_string(),
            "--format".to_string(),
            LIST_RUNNING_FORMAT.to_string(),
        ];
        let stdout = self.query(&args).await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(ContainerId::new)
            .collect())
    }

    async fn query(&self, args: &[String]) -> Result<String> {
        let command = self.runner.command_line(args);
        let output = self
            .runner
            .run(args)
            .await
            .map_err(|failure| query_failure(command.clone(), failure))?;
        if !output.is_success() {
            return Err(FarolError::RuntimeQuery {
                command,
                cause: output.status_text(),
                output: output.combined(),
            });
        }
        Ok(output.stdout)
    }
}

fn query_failure(command: String, failure: CommandFailure) -> FarolError {
    match failure.cancel_reason() {
        Some(reason) => FarolError::Cancelled { command, reason },
        None => FarolError::RuntimeQuery {
            command,
            cause: failure.to_string(),
            output: String::new(),
        },
    }
}
