//! Main dashboard layout.
//!
//! Header, the running and all-containers panels side by side, the
//! button bar, and the status line.

use farol_common::constants::DASHBOARD_TITLE;
use farol_common::types::{Container, ContainerState};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, Intent, Status};

/// Renders the main dashboard view.
pub fn render_dashboard(frame: &mut Frame, app: &App) {
    let [header, body, buttons, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(DASHBOARD_TITLE).centered().block(Block::bordered()),
        header,
    );
    render_panels(frame, app, body);
    render_buttons(frame, app, buttons);
    frame.render_widget(Paragraph::new(status_line(app)), status);
}

fn render_panels(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.store().snapshot();
    let [running_area, all_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let running: Vec<Line> = snapshot.running().map(|c| Line::from(c.name.clone())).collect();
    frame.render_widget(
        Paragraph::new(running).block(Block::bordered().title(" Running Containers ")),
        running_area,
    );

    let all: Vec<Line> = snapshot.all().iter().map(container_line).collect();
    frame.render_widget(
        Paragraph::new(all).block(Block::bordered().title(" All Containers ")),
        all_area,
    );
}

fn container_line(container: &Container) -> Line<'static> {
    let state = container.state();
    let label = Span::raw(state.to_string());
    let label = match state {
        ContainerState::Running => label.green(),
        ContainerState::Stopped => label.dark_gray(),
    };
    Line::from(vec![
        Span::raw(container.name.clone()),
        Span::raw(" ("),
        label,
        Span::raw(")"),
    ])
}

fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let slots = Layout::horizontal(Intent::ALL.map(|_| Constraint::Ratio(1, 5))).split(area);
    for (index, (intent, slot)) in Intent::ALL.iter().zip(slots.iter()).enumerate() {
        let label = format!("{} ({})", intent.label(), intent.shortcut());
        let style = if app.is_busy() {
            Style::new().dark_gray()
        } else if index == app.selected_button {
            Style::new().reversed().bold()
        } else {
            Style::new()
        };
        frame.render_widget(
            Paragraph::new(label).centered().style(style).block(Block::bordered()),
            *slot,
        );
    }
}

fn status_line(app: &App) -> Line<'static> {
    let status = match &app.status {
        Status::Ready => Span::raw("Ready").blue(),
        Status::Busy(text) => Span::raw(text.clone()).yellow(),
        Status::Info(text) => Span::raw(text.clone()).blue(),
        Status::Failed(text) => Span::raw(text.clone()).red(),
    };
    Line::from(vec![
        status,
        Span::raw("   <-/-> select  Enter open  r refresh  q quit").dark_gray(),
    ])
}
