//! Formatted output helpers for CLI commands.

use std::fmt::Write;

use farol_common::types::{Container, ContainerState};

/// Formats containers as an aligned table with a header row.
#[must_use]
pub fn container_table(containers: &[&Container]) -> String {
    let mut out = format!("{:<14} {:<24} {:<9} {:<30}\n", "CONTAINER ID", "NAME", "STATE", "IMAGE");
    for c in containers {
        let _ = writeln!(
            out,
            "{:<14} {:<24} {:<9} {:<30}",
            c.id.as_str(),
            c.name,
            c.state().to_string(),
            c.image
        );
    }
    out
}

/// Formats one container with its live running state.
#[must_use]
pub fn container_details(container: &Container, live_running: Option<bool>) -> String {
    let live = live_running.map_or_else(
        || "unknown".to_string(),
        |running| ContainerState::from_running(running).to_string(),
    );
    format!(
        "Name:   {}\nID:     {}\nImage:  {}\nStatus: {}\nLive:   {live}\n",
        container.name,
        container.id,
        container.image,
        container.state()
    )
}

#[cfg(test)]
mod tests {
    use farol_common::types::ContainerId;

    use super::*;

    fn web() -> Container {
        Container {
            id: ContainerId::new("a1"),
            image: "nginx".into(),
            name: "web".into(),
            running: true,
        }
    }

    #[test]
    fn table_has_header_and_one_row_per_container() {
        let web = web();
        let table = container_table(&[&web]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("CONTAINER ID"));
        assert!(lines[1].starts_with("a1"));
        assert!(lines[1].contains("Running"));
    }

    #[test]
    fn details_show_unknown_live_state() {
        let details = container_details(&web(), None);
        assert!(details.contains("Status: Running"));
        assert!(details.contains("Live:   unknown"));
    }
}
