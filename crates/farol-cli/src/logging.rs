//! Tracing subscriber setup.
//!
//! The dashboard owns the terminal, so it logs to a file; every other
//! command logs to stderr. `RUST_LOG` overrides the default level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use farol_common::config::FarolConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Installs the global subscriber.
pub fn init(config: &FarolConfig, dashboard: bool, json: bool) {
    let default_level = if dashboard { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let writer = if dashboard {
        file_writer(config)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(!dashboard);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[allow(clippy::print_stderr)]
fn file_writer(config: &FarolConfig) -> BoxMakeWriter {
    if let Some(parent) = config.log_file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&config.log_file) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!(
                "warning: cannot open log file {}: {e}; logging disabled",
                config.log_file.display()
            );
            BoxMakeWriter::new(std::io::sink)
        }
    }
}
