//! # farol-tui
//!
//! Interactive terminal dashboard for managing local containers.
//!
//! Built with `ratatui` and `crossterm`, providing:
//! - Side-by-side panels of running and all containers.
//! - Start, Stop, Create, Inspect, and Remove workflows.
//! - Runtime calls executed off the event loop, with results posted back
//!   as events while the triggering controls stay disabled.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod app;
pub mod dispatch;
pub mod event;
pub mod session;
pub mod ui;
