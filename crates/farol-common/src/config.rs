//! Configuration model for Farol.
//!
//! Values come from built-in defaults, then an optional JSON file, then
//! command-line overrides applied by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{FarolError, Result};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarolConfig {
    /// Runtime binary name or path (e.g. `docker`, `podman`).
    pub runtime: String,
    /// Upper bound in seconds for any single runtime call.
    pub command_timeout_secs: u64,
    /// Where the dashboard writes its log.
    pub log_file: PathBuf,
}

impl Default for FarolConfig {
    fn default() -> Self {
        Self {
            runtime: constants::DEFAULT_RUNTIME.to_string(),
            command_timeout_secs: constants::DEFAULT_COMMAND_TIMEOUT_SECS,
            log_file: constants::default_log_file(),
        }
    }
}

impl FarolConfig {
    /// Loads configuration from a JSON file, or returns the defaults
    /// when no path is given. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// holds invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| FarolError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`FarolError::Config`] for an empty runtime or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.runtime.trim().is_empty() {
            return Err(FarolError::Config {
                message: "runtime must not be empty".into(),
            });
        }
        if self.command_timeout_secs == 0 {
            return Err(FarolError::Config {
                message: "command_timeout_secs must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
