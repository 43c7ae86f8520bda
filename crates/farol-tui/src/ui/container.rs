//! Container detail view.
//!
//! Shows the inspected record as of the current snapshot next to the
//! live running state read from the runtime.

use farol_common::types::{Container, ContainerState};
use ratatui::Frame;
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::ui::centered;

/// Renders the container detail popup.
pub fn render_container_detail(frame: &mut Frame, container: &Container, live_running: Option<bool>) {
    let live = live_running.map_or_else(
        || "unknown".to_string(),
        |running| ContainerState::from_running(running).to_string(),
    );
    let lines = vec![
        Line::from(format!("Name:   {}", container.name)),
        Line::from(format!("ID:     {}", container.id)),
        Line::from(format!("Image:  {}", container.image)),
        Line::from(format!("Status: {}", container.state())),
        Line::from(format!("Live:   {live}")),
        Line::default(),
        Line::from("Enter OK"),
    ];
    let area = centered(frame.area(), 60, 9);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Container Details ")),
        area,
    );
}
