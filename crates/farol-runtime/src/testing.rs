//! Scripted in-memory runtime for tests.
//!
//! [`ScriptedRunner`] answers commands from a rule table and records every
//! invocation, so tests can assert which runtime calls were made and in
//! which order without a container engine.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::command::{CommandFailure, CommandOutput, CommandRunner};

/// Canned answer for a matching command.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Exit zero with this stdout.
    Success(String),
    /// Exit with a non-zero code and this stderr.
    Exit(i32, String),
    /// The binary could not be started.
    SpawnError(String),
    /// The command timed out.
    TimedOut,
    /// The command was cancelled by shutdown.
    Cancelled,
}

impl Reply {
    fn answer(&self, program: &str) -> Result<CommandOutput, CommandFailure> {
        match self {
            Self::Success(stdout) => Ok(CommandOutput::success(stdout.clone())),
            Self::Exit(code, stderr) => Ok(CommandOutput::failure(*code, stderr.clone())),
            Self::SpawnError(message) => Err(CommandFailure::Spawn {
                program: program.to_string(),
                source: std::io::Error::other(message.clone()),
            }),
            Self::TimedOut => Err(CommandFailure::TimedOut {
                after: Duration::from_secs(30),
            }),
            Self::Cancelled => Err(CommandFailure::Cancelled),
        }
    }
}

/// Command runner driven by prefix-matched rules.
///
/// The most recently added rule whose prefix matches the arguments wins.
/// Unmatched commands succeed with empty output.
#[derive(Debug)]
pub struct ScriptedRunner {
    rules: Mutex<Vec<(Vec<String>, Reply)>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRunner {
    /// Creates a runner with no rules.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a runner answering both inventory queries.
    #[must_use]
    pub fn with_listing(all: &str, running: &str) -> Self {
        let runner = Self::new();
        runner.set_listing(all, running);
        runner
    }

    /// Adds a rule and returns the runner.
    #[must_use]
    pub fn on(self, prefix: &[&str], reply: Reply) -> Self {
        self.set(prefix, reply);
        self
    }

    /// Adds a rule that takes precedence over earlier ones.
    pub fn set(&self, prefix: &[&str], reply: Reply) {
        let prefix = prefix.iter().map(ToString::to_string).collect();
        self.rules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((prefix, reply));
    }

    /// Replaces the answers of both inventory queries.
    pub fn set_listing(&self, all: &str, running: &str) {
        self.set(&["ps", "-a"], Reply::Success(all.to_string()));
        self.set(&["ps", "--format"], Reply::Success(running.to_string()));
    }

    /// Every invocation so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every invocation so far, each joined into one line.
    #[must_use]
    pub fn call_lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|args| args.join(" ")).collect()
    }

    fn reply_for(&self, args: &[String]) -> Option<Reply> {
        self.rules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(prefix, _)| args.starts_with(prefix))
            .map(|(_, reply)| reply.clone())
    }
}

impl CommandRunner for ScriptedRunner {
    fn program(&self) -> &str {
        "docker"
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, CommandFailure> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args.to_vec());
        tokio::task::yield_now().await;
        self.reply_for(args).map_or_else(
            || Ok(CommandOutput::success(String::new())),
            |reply| reply.answer(self.program()),
        )
    }
}
