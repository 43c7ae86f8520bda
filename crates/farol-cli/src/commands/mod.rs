//! CLI command definitions and dispatch.

pub mod create;
pub mod dashboard;
pub mod inspect;
pub mod lifecycle;
pub mod ps;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use farol_common::config::FarolConfig;
use farol_runtime::command::ProcessRunner;
use farol_runtime::shutdown::ShutdownSignal;

/// Farol — terminal dashboard for local containers.
#[derive(Parser, Debug)]
#[command(name = "farol", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute. Opens the dashboard when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a JSON configuration file.
    #[arg(long, global = true, env = "FAROL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Container runtime binary (docker, podman, ...).
    #[arg(long, global = true, env = "FAROL_RUNTIME")]
    pub runtime: Option<String>,

    /// Seconds before a runtime call is cancelled.
    #[arg(long, global = true, env = "FAROL_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Where the dashboard writes its log.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive dashboard.
    Dashboard,
    /// List containers.
    Ps(ps::PsArgs),
    /// Start a stopped container.
    Start(lifecycle::TargetArgs),
    /// Stop a running container.
    Stop(lifecycle::TargetArgs),
    /// Remove a container.
    Rm(lifecycle::TargetArgs),
    /// Create and start a detached container.
    Create(create::CreateArgs),
    /// Show a container's details and live state.
    Inspect(inspect::InspectArgs),
}

impl Cli {
    /// Whether this invocation opens the dashboard.
    #[must_use]
    pub const fn is_dashboard(&self) -> bool {
        matches!(self.command, None | Some(Command::Dashboard))
    }

    /// Merges defaults, the configuration file, and command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or a value is invalid.
    pub fn resolve_config(&self) -> anyhow::Result<FarolConfig> {
        let mut config = FarolConfig::load(self.config.as_deref())?;
        if let Some(runtime) = &self.runtime {
            config.runtime.clone_from(runtime);
        }
        if let Some(timeout) = self.timeout {
            config.command_timeout_secs = timeout;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file.clone_from(log_file);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the runtime binary cannot be found or the command
/// fails.
pub async fn execute(cli: Cli, config: &FarolConfig, shutdown: ShutdownSignal) -> anyhow::Result<()> {
    let program = which::which(&config.runtime)
        .with_context(|| format!("container runtime `{}` not found", config.runtime))?;
    tracing::debug!(runtime = %program.display(), "using container runtime");
    let runner = Arc::new(ProcessRunner::new(program, config.command_timeout(), shutdown.clone()));

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => dashboard::execute(runner, shutdown).await,
        Command::Ps(args) => ps::execute(runner, &args).await,
        Command::Start(args) => lifecycle::start(runner, &args).await,
        Command::Stop(args) => lifecycle::stop(runner, &args).await,
        Command::Rm(args) => lifecycle::remove(runner, &args).await,
        Command::Create(args) => create::execute(runner, &args).await,
        Command::Inspect(args) => inspect::execute(runner, &args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_opens_dashboard() {
        let cli = Cli::try_parse_from(["farol"]).unwrap();
        assert!(cli.is_dashboard());
        let cli = Cli::try_parse_from(["farol", "ps", "-a"]).unwrap();
        assert!(!cli.is_dashboard());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["farol", "--runtime", "podman", "--timeout", "5", "ps"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.runtime, "podman");
        assert_eq!(config.command_timeout_secs, 5);
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let cli = Cli::try_parse_from(["farol", "--timeout", "0"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn create_requires_name_and_image() {
        assert!(Cli::try_parse_from(["farol", "create", "web"]).is_err());
        let cli = Cli::try_parse_from(["farol", "create", "web", "nginx"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Create(_))));
    }
}
