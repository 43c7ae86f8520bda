//! System-wide constants and default paths.

use std::path::PathBuf;

/// Application name used in titles and log file names.
pub const APP_NAME: &str = "farol";

/// Title shown in the dashboard header.
pub const DASHBOARD_TITLE: &str = "Farol - Docker Manager";

/// Runtime binary used when none is configured.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Seconds a single runtime call may take before it is cancelled.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Field separator in the all-containers listing.
pub const FIELD_SEPARATOR: char = '|';

/// Go template for the all-containers query: id, image, name.
pub const LIST_ALL_FORMAT: &str = "{{.ID}}|{{.Image}}|{{.Names}}";

/// Go template for the running-containers query: id only.
pub const LIST_RUNNING_FORMAT: &str = "{{.ID}}";

/// Go template for the inspect query: live running flag.
pub const INSPECT_RUNNING_FORMAT: &str = "{{.State.Running}}";

/// Returns the per-user data directory (`$HOME/.farol`), falling back to
/// the working directory when no home is set.
pub fn data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(format!(".{APP_NAME}"))
}

/// Returns the default dashboard log file path.
pub fn default_log_file() -> PathBuf {
    data_dir().join(format!("{APP_NAME}.log"))
}
