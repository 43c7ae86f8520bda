//! Snapshot construction from the two inventory queries.
//!
//! The listing decides which containers exist; the running-id set only
//! decides each record's `running` flag. The queries are not atomic, so an
//! id can be running without being listed (created between the calls).
//! Such ids are ignored rather than turned into records.

use std::collections::HashSet;
use std::sync::Arc;

use farol_common::constants::FIELD_SEPARATOR;
use farol_common::error::Result;
use farol_common::types::{Container, ContainerId};

use crate::command::CommandRunner;
use crate::query::RuntimeQuery;
use crate::snapshot::Snapshot;

/// Builds [`Snapshot`]s from the runtime.
#[derive(Debug)]
pub struct InventoryBuilder<R> {
    query: RuntimeQuery<R>,
}

impl<R: CommandRunner> InventoryBuilder<R> {
    /// Creates a builder over the given runner.
    #[must_use]
    pub const fn new(runner: Arc<R>) -> Self {
        Self {
            query: RuntimeQuery::new(runner),
        }
    }

    /// Queries all containers, then the running ids, and merges them.
    ///
    /// # Errors
    ///
    /// Fails with the first query error; no partial snapshot is produced.
    pub async fn build(&self) -> Result<Snapshot> {
        let listing = self.query.list_all_containers().await?;
        let running = self.query.list_running_ids().await?;
        let snapshot = merge(&listing, &running);
        tracing::info!(
            total = snapshot.len(),
            running = snapshot.running().count(),
            "inventory built"
        );
        Ok(snapshot)
    }
}

/// Splits one listing line into `(id, image, name)`.
///
/// Returns `None` unless the line has exactly three fields. A line whose
/// id field is blank is also rejected, since no action could target it.
#[must_use]
pub fn parse_record(line: &str) -> Option<(ContainerId, String, String)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = line.split(FIELD_SEPARATOR);
    let (Some(id), Some(image), Some(name), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some((ContainerId::new(id), image.to_string(), name.to_string()))
}

/// Merges listing lines with the running-id set, keeping listing order.
///
/// Malformed lines are dropped with a warning.
#[must_use]
pub fn merge(listing: &[String], running: &HashSet<ContainerId>) -> Snapshot {
    let mut containers = Vec::with_capacity(listing.len());
    for line in listing {
        let Some((id, image, name)) = parse_record(line) else {
            tracing::warn!(line = %line, "dropping malformed container line");
            continue;
        };
        let is_running = running.contains(&id);
        containers.push(Container {
            id,
            image,
            name,
            running: is_running,
        });
    }

    let unlisted = running
        .iter()
        .filter(|id| !containers.iter().any(|c| c.id == **id))
        .count();
    if unlisted > 0 {
        tracing::debug!(unlisted, "running ids missing from listing ignored");
    }

    Snapshot::new(containers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedRunner};

    fn lines(raw: &str) -> Vec<String> {
        raw.lines().map(str::to_string).collect()
    }

    fn ids(list: &[&str]) -> HashSet<ContainerId> {
        list.iter().map(|id| ContainerId::new(*id)).collect()
    }

    #[test]
    fn parse_record_requires_three_fields() {
        assert_eq!(
            parse_record("a1|nginx|web"),
            Some((ContainerId::new("a1"), "nginx".into(), "web".into()))
        );
        assert_eq!(parse_record("a1|nginx"), None);
        assert_eq!(parse_record("a1|nginx|web|extra"), None);
        assert_eq!(parse_record(""), None);
    }

    #[test]
    fn parse_record_rejects_empty_id() {
        assert_eq!(parse_record("|nginx|web"), None);
    }

    #[test]
    fn parse_record_strips_carriage_return() {
        let (_, _, name) = parse_record("a1|nginx|web\r").unwrap();
        assert_eq!(name, "web");
    }

    #[test]
    fn merge_marks_running_by_membership() {
        let snapshot = merge(&lines("a1|nginx|web\na2|redis|cache"), &ids(&["a1"]));
        assert_eq!(
            snapshot.all(),
            &[
                Container {
                    id: ContainerId::new("a1"),
                    image: "nginx".into(),
                    name: "web".into(),
                    running: true,
                },
                Container {
                    id: ContainerId::new("a2"),
                    image: "redis".into(),
                    name: "cache".into(),
                    running: false,
                },
            ]
        );
    }

    #[test]
    fn merge_never_fabricates_running_only_ids() {
        let snapshot = merge(&lines("a1|nginx|web"), &ids(&["a1", "zz"]));
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get(&ContainerId::new("zz")).is_none());
    }

    #[test]
    fn merge_drops_malformed_lines_only() {
        let listing = lines("a1|nginx|web\ngarbage\na2|redis|cache\nb|c\nx|y|z|w\na3|alpine|job");
        let snapshot = merge(&listing, &HashSet::new());
        let names: Vec<_> = snapshot.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["web", "cache", "job"]);
    }

    #[test]
    fn merge_keeps_runtime_order() {
        let snapshot = merge(&lines("c3|i|z\na1|i|a\nb2|i|m"), &ids(&["b2"]));
        let order: Vec<_> = snapshot.all().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["c3", "a1", "b2"]);
    }

    #[test]
    fn merge_of_empty_listing_is_empty() {
        let snapshot = merge(&[], &ids(&["a1"]));
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn build_queries_listing_before_running_ids() {
        let runner = Arc::new(ScriptedRunner::with_listing("a1|nginx|web\na2|redis|cache\n", "a1\n"));
        let builder = InventoryBuilder::new(Arc::clone(&runner));

        let snapshot = builder.build().await.unwrap();
        assert_eq!(snapshot.running().count(), 1);
        assert_eq!(snapshot.stopped().count(), 1);

        let calls = runner.call_lines();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("ps -a"));
        assert!(calls[1].starts_with("ps --format"));
    }

    #[tokio::test]
    async fn build_fails_when_running_query_fails() {
        let runner = Arc::new(
            ScriptedRunner::with_listing("a1|nginx|web\n", "")
                .on(&["ps", "--format"], Reply::Exit(1, "daemon went away".into())),
        );
        let builder = InventoryBuilder::new(runner);

        let err = builder.build().await.unwrap_err();
        assert!(err.to_string().contains("daemon went away"));
    }
}
