//! Rendering for the dashboard and its overlays.
//!
//! The dashboard is always drawn; the topmost view on the navigation stack
//! is drawn over it as a centered popup.

pub mod container;
pub mod dashboard;
pub mod forms;
pub mod modal;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::app::{App, View};

/// Renders the whole screen for the current state.
pub fn render(frame: &mut Frame, app: &App) {
    dashboard::render_dashboard(frame, app);
    match app.nav.current() {
        View::Dashboard => {}
        View::Picker(picker) => forms::render_picker(frame, picker, app.is_busy()),
        View::CreateForm(form) => forms::render_create_form(frame, form, app.is_busy()),
        View::Details {
            container,
            live_running,
        } => container::render_container_detail(frame, container, *live_running),
        View::Error { title, message } => modal::render_error(frame, title, message),
    }
}

/// Returns a `width` x `height` rectangle centered in `area`, clamped to it.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    popup
}
