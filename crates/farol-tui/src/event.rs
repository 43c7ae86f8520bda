//! Events consumed by the dashboard loop.
//!
//! Terminal input and the results of background runtime calls arrive on
//! the same channel, so the loop handles them strictly one at a time.

use std::sync::Arc;

use farol_common::error::FarolError;
use farol_common::types::{ActionKind, Container};
use farol_runtime::snapshot::Snapshot;

/// Terminal input events.
#[derive(Debug, Clone)]
pub enum TerminalEvent {
    /// A key was pressed.
    Key(crossterm::event::KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
}

/// Everything the dashboard loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// Operator input.
    Terminal(TerminalEvent),
    /// A start, stop, remove, or create call returned.
    ActionFinished {
        /// Which operation ran.
        kind: ActionKind,
        /// Container name the operation targeted.
        target: String,
        /// Outcome of the runtime call.
        result: Result<(), FarolError>,
    },
    /// An inspect call returned.
    Inspected {
        /// The record that was inspected, as of the current snapshot.
        container: Container,
        /// Live running state, `None` when the read failed.
        running: Option<bool>,
    },
    /// A refresh of the inventory store finished.
    Refreshed(Result<Arc<Snapshot>, FarolError>),
}
