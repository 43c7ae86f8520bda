//! End-to-end tests for the inventory core.
//!
//! These tests drive the public API the way the dashboard does:
//! 1. Build the initial snapshot from the two inventory queries
//! 2. Run a lifecycle action
//! 3. Refresh the store and read its projections
//!
//! The container engine is replaced by an in-memory runtime that keeps a
//! container table and answers the CLI commands from it.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::{Arc, Mutex};

use farol_common::error::FarolError;
use farol_common::types::{ActionKind, ContainerId};
use farol_runtime::actions::ActionExecutor;
use farol_runtime::command::{CommandFailure, CommandOutput, CommandRunner};
use farol_runtime::inventory::InventoryBuilder;
use farol_runtime::store::InventoryStore;

/// Minimal engine: (id, image, name, running) rows plus a call log.
#[derive(Default)]
struct FakeEngine {
    rows: Mutex<Vec<(String, String, String, bool)>>,
    log: Mutex<Vec<String>>,
    next_id: Mutex<u32>,
}

impl FakeEngine {
    fn with(rows: &[(&str, &str, &str, bool)]) -> Arc<Self> {
        let engine = Self::default();
        *engine.rows.lock().unwrap() = rows
            .iter()
            .map(|(id, image, name, running)| (id.to_string(), image.to_string(), name.to_string(), *running))
            .collect();
        Arc::new(engine)
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn set_running(&self, id: &str, running: bool) -> CommandOutput {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.0 == id) {
            Some(row) => {
                row.3 = running;
                CommandOutput::success(format!("{id}\n"))
            }
            None => CommandOutput::failure(
                1,
                format!("Error response from daemon: No such container: {id}\n"),
            ),
        }
    }

    fn answer(&self, args: &[String]) -> CommandOutput {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["ps", "-a", "--format", _] => {
                let rows = self.rows.lock().unwrap();
                let listing: String = rows
                    .iter()
                    .map(|(id, image, name, _)| format!("{id}|{image}|{name}\n"))
                    .collect();
                CommandOutput::success(listing)
            }
            ["ps", "--format", _] => {
                let rows = self.rows.lock().unwrap();
                let ids: String = rows
                    .iter()
                    .filter(|row| row.3)
                    .map(|(id, ..)| format!("{id}\n"))
                    .collect();
                CommandOutput::success(ids)
            }
            ["start", id] => self.set_running(id, true),
            ["stop", id] => self.set_running(id, false),
            ["rm", id] => {
                let mut rows = self.rows.lock().unwrap();
                let before = rows.len();
                rows.retain(|row| row.0 != *id);
                if rows.len() == before {
                    CommandOutput::failure(1, format!("Error: No such container: {id}\n"))
                } else {
                    CommandOutput::success(format!("{id}\n"))
                }
            }
            ["run", "-d", "--name", name, image] => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                let id = format!("new{next}");
                self.rows
                    .lock()
                    .unwrap()
                    .insert(0, (id.clone(), (*image).to_string(), (*name).to_string(), true));
                CommandOutput::success(format!("{id}\n"))
            }
            _ => CommandOutput::failure(125, "unknown command\n"),
        }
    }
}

impl CommandRunner for FakeEngine {
    fn program(&self) -> &str {
        "docker"
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, CommandFailure> {
        self.log.lock().unwrap().push(args.join(" "));
        Ok(self.answer(args))
    }
}

fn names(containers: &[farol_common::types::Container]) -> Vec<String> {
    containers.iter().map(|c| c.name.clone()).collect()
}

// ── Initial load ─────────────────────────────────────────────────────

#[tokio::test]
async fn pipeline_initial_snapshot_matches_runtime() {
    let engine = FakeEngine::with(&[("a1", "nginx", "web", true), ("a2", "redis", "cache", false)]);
    let builder = InventoryBuilder::new(Arc::clone(&engine));

    let store = InventoryStore::new(builder.build().await.unwrap());

    let all = store.all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, ContainerId::new("a1"));
    assert!(all[0].running);
    assert_eq!(all[1].image, "redis");
    assert!(!all[1].running);
    assert_eq!(names(&store.running()), vec!["web"]);
    assert_eq!(names(&store.stopped()), vec!["cache"]);
}

// ── Action then refresh ──────────────────────────────────────────────

#[tokio::test]
async fn pipeline_start_is_visible_after_refresh() {
    let engine = FakeEngine::with(&[("a1", "nginx", "web", false)]);
    let builder = InventoryBuilder::new(Arc::clone(&engine));
    let executor = ActionExecutor::new(Arc::clone(&engine));
    let store = InventoryStore::new(builder.build().await.unwrap());
    assert!(store.running().is_empty());

    executor.start(&ContainerId::new("a1")).await.unwrap();
    let _ = store.refresh(&builder).await.unwrap();

    assert_eq!(names(&store.running()), vec!["web"]);
    let log = engine.log();
    let start_at = log.iter().position(|c| c == "start a1").unwrap();
    let running_query_at = log.iter().rposition(|c| c.starts_with("ps --format")).unwrap();
    assert!(start_at < running_query_at);
    assert_eq!(log.len(), 5);
}

#[tokio::test]
async fn pipeline_create_then_remove_round_trip() {
    let engine = FakeEngine::with(&[("a1", "nginx", "web", true)]);
    let builder = InventoryBuilder::new(Arc::clone(&engine));
    let executor = ActionExecutor::new(Arc::clone(&engine));
    let store = InventoryStore::new(builder.build().await.unwrap());

    executor.create("queue", "rabbitmq").await.unwrap();
    let _ = store.refresh(&builder).await.unwrap();
    assert_eq!(names(&store.all()), vec!["queue", "web"]);
    assert_eq!(names(&store.running()), vec!["queue", "web"]);

    let new_id = store.all()[0].id.clone();
    executor.stop(&new_id).await.unwrap();
    executor.remove(&new_id).await.unwrap();
    let _ = store.refresh(&builder).await.unwrap();
    assert_eq!(names(&store.all()), vec!["web"]);
}

// ── Failures ─────────────────────────────────────────────────────────

#[tokio::test]
async fn pipeline_failed_stop_leaves_store_unchanged() {
    let engine = FakeEngine::with(&[("a2", "redis", "cache", true)]);
    let builder = InventoryBuilder::new(Arc::clone(&engine));
    let executor = ActionExecutor::new(Arc::clone(&engine));
    let store = InventoryStore::new(builder.build().await.unwrap());
    let before = store.snapshot();

    let err = executor.stop(&ContainerId::new("a1")).await.unwrap_err();

    match &err {
        FarolError::Action { op, id, output, .. } => {
            assert_eq!(*op, ActionKind::Stop);
            assert_eq!(id.as_ref().map(ContainerId::as_str), Some("a1"));
            assert!(output.contains("No such container"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[tokio::test]
async fn pipeline_create_validation_makes_no_runtime_call() {
    let engine = FakeEngine::with(&[]);
    let executor = ActionExecutor::new(Arc::clone(&engine));

    let err = executor.create("", "nginx").await.unwrap_err();

    assert!(matches!(err, FarolError::Validation { field: "name", .. }));
    assert!(engine.log().is_empty());
}
