//! Container inventory core for Farol.
//!
//! Builds immutable snapshots of the runtime's containers from two
//! independent CLI queries, holds the latest one for readers, and executes
//! lifecycle actions with structured errors. Every runtime call goes
//! through a [`command::CommandRunner`], bounded by a timeout and the
//! process-wide [`shutdown::ShutdownSignal`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod actions;
pub mod command;
pub mod inventory;
pub mod query;
pub mod shutdown;
pub mod snapshot;
pub mod store;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
