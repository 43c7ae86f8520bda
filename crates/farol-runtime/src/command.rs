//! Runtime command invocation.
//!
//! [`CommandRunner`] is the seam between the inventory core and the
//! container engine's CLI. [`ProcessRunner`] is the production
//! implementation; tests substitute a scripted runner.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use farol_common::error::CancelReason;
use thiserror::Error;

use crate::shutdown::ShutdownSignal;

/// Captured result of a runtime command that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, absent when the process was killed by a signal.
    pub code: Option<i32>,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a command that exited with status zero.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Output of a command that exited with the given non-zero status.
    #[must_use]
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Standard output followed by standard error, for diagnostics.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }

    /// Describes how the command ended, e.g. "exit status 1".
    #[must_use]
    pub fn status_text(&self) -> String {
        self.code.map_or_else(
            || "terminated by signal".to_string(),
            |code| format!("exit status {code}"),
        )
    }
}

/// A runtime command that did not run to completion.
#[derive(Debug, Error)]
pub enum CommandFailure {
    /// The runtime binary could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The command exceeded its timeout and was killed.
    #[error("timed out after {}s", .after.as_secs())]
    TimedOut {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// Shutdown was requested while the command was running.
    #[error("cancelled by shutdown")]
    Cancelled,
}

impl CommandFailure {
    /// Returns the cancellation reason when the command was abandoned
    /// rather than failing on its own.
    #[must_use]
    pub const fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            Self::Spawn { .. } => None,
            Self::TimedOut { after } => Some(CancelReason::Timeout(*after)),
            Self::Cancelled => Some(CancelReason::Shutdown),
        }
    }
}

/// Executes runtime CLI commands.
///
/// Implementations must not retry; each call is exactly one invocation.
pub trait CommandRunner: Send + Sync + 'static {
    /// Name of the runtime program, used in messages.
    fn program(&self) -> &str;

    /// Runs the runtime program with `args` and captures its output.
    ///
    /// A non-zero exit is reported as `Ok` with a failing
    /// [`CommandOutput`]; `Err` means the command never completed.
    fn run(
        &self,
        args: &[String],
    ) -> impl Future<Output = Result<CommandOutput, CommandFailure>> + Send;

    /// Renders the full command line for logs and error messages.
    fn command_line(&self, args: &[String]) -> String {
        let mut line = self.program().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runs the runtime binary as a child process.
///
/// Every call is bounded by a timeout and by the shutdown signal; the
/// child is killed when either fires.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    name: String,
    timeout: Duration,
    shutdown: ShutdownSignal,
}

impl ProcessRunner {
    /// Creates a runner for the given runtime binary.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Duration, shutdown: ShutdownSignal) -> Self {
        let program = program.into();
        let name = program.to_string_lossy().into_owned();
        Self {
            program,
            name,
            timeout,
            shutdown,
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn program(&self) -> &str {
        &self.name
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, CommandFailure> {
        tracing::debug!(command = %self.command_line(args), "invoking runtime");

        let mut cmd = tokio::process::Command::new(&self.program);
        let _ = cmd
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut shutdown = self.shutdown.clone();
        tokio::select! {
            finished = tokio::time::timeout(self.timeout, cmd.output()) => match finished {
                Ok(Ok(output)) => Ok(CommandOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }),
                Ok(Err(source)) => Err(CommandFailure::Spawn {
                    program: self.name.clone(),
                    source,
                }),
                Err(_) => Err(CommandFailure::TimedOut { after: self.timeout }),
            },
            () = shutdown.cancelled() => Err(CommandFailure::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn combined_output_keeps_stdout_then_stderr() {
        let out = CommandOutput {
            code: Some(1),
            stdout: "partial\n".into(),
            stderr: "Error: no such container\n".into(),
        };
        assert_eq!(out.combined(), "partial\nError: no such container\n");
        assert_eq!(out.status_text(), "exit status 1");
        assert!(!out.is_success());
    }

    #[test]
    fn signal_exit_has_no_code() {
        let out = CommandOutput::default();
        assert_eq!(out.status_text(), "terminated by signal");
    }

    #[test]
    fn command_line_joins_program_and_args() {
        let runner = ProcessRunner::new("docker", Duration::from_secs(1), ShutdownSignal::never());
        assert_eq!(runner.command_line(&args(&["stop", "a1"])), "docker stop a1");
    }

    #[test]
    fn failure_maps_to_cancel_reason() {
        assert_eq!(
            CommandFailure::Cancelled.cancel_reason(),
            Some(CancelReason::Shutdown)
        );
        let spawn = CommandFailure::Spawn {
            program: "docker".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(spawn.cancel_reason().is_none());
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_failure() {
        let runner = ProcessRunner::new(
            "/nonexistent/farol-runtime-binary",
            Duration::from_secs(5),
            ShutdownSignal::never(),
        );
        let err = runner.run(&args(&["ps"])).await.unwrap_err();
        assert!(matches!(err, CommandFailure::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_exit_status_and_output() {
        let runner = ProcessRunner::new("sh", Duration::from_secs(5), ShutdownSignal::never());
        let out = runner
            .run(&args(&["-c", "echo listed; echo broken >&2; exit 3"]))
            .await
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout, "listed\n");
        assert_eq!(out.stderr, "broken\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_times_out() {
        let runner = ProcessRunner::new("sleep", Duration::from_millis(50), ShutdownSignal::never());
        let err = runner.run(&args(&["5"])).await.unwrap_err();
        assert!(matches!(err, CommandFailure::TimedOut { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shutdown_cancels_in_flight_command() {
        let (trigger, signal) = shutdown::channel();
        let runner = ProcessRunner::new("sleep", Duration::from_secs(30), signal);
        let call = tokio::spawn(async move { runner.run(&args(&["5"])).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger();
        let err = call.await.unwrap().unwrap_err();
        assert!(matches!(err, CommandFailure::Cancelled));
    }
}
