//! Container picker and create form popups.

use farol_common::types::Container;
use ratatui::Frame;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::app::{CreateField, CreateForm, Picker};
use crate::ui::centered;

const POPUP_WIDTH: u16 = 60;

/// Rows taken by the borders, the blank spacer, and the footer.
const PICKER_CHROME: u16 = 4;

/// Renders the container chooser for an intent.
///
/// The popup is capped at the frame height; when the candidates do not
/// fit, the visible window follows the selection.
pub fn render_picker(frame: &mut Frame, picker: &Picker, busy: bool) {
    let frame_area = frame.area();
    let wanted = u16::try_from(picker.candidates.len())
        .unwrap_or(u16::MAX)
        .saturating_add(PICKER_CHROME);
    let height = wanted.min(frame_area.height);
    let (first, rows) = visible_window(picker.selected, height.saturating_sub(PICKER_CHROME));

    let mut lines: Vec<Line> = picker
        .candidates
        .iter()
        .enumerate()
        .skip(first)
        .take(rows)
        .map(|(index, container)| candidate_line(container, index == picker.selected))
        .collect();
    lines.push(Line::default());
    lines.push(footer(busy, "Enter confirm  Esc cancel"));

    let title = format!(
        " {} ({}/{}) ",
        picker.intent.picker_title(),
        picker.selected + 1,
        picker.candidates.len()
    );
    let area = centered(frame_area, POPUP_WIDTH, height);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(Block::bordered().title(title)), area);
}

/// First candidate index and row count so that `selected` stays visible.
fn visible_window(selected: usize, rows: u16) -> (usize, usize) {
    let rows = usize::from(rows).max(1);
    (selected.saturating_sub(rows - 1), rows)
}

fn candidate_line(container: &Container, selected: bool) -> Line<'static> {
    let text = format!(
        "{} {} ({}, {})",
        if selected { ">" } else { " " },
        container.name,
        container.image,
        container.state()
    );
    if selected {
        Line::from(Span::raw(text).reversed())
    } else {
        Line::from(text)
    }
}

/// Renders the create form.
pub fn render_create_form(frame: &mut Frame, form: &CreateForm, busy: bool) {
    let lines = vec![
        field_line("Container Name", &form.name, form.focus == CreateField::Name),
        field_line("Image", &form.image, form.focus == CreateField::Image),
        Line::default(),
        footer(busy, "Tab switch field  Enter create  Esc cancel"),
    ];
    let area = centered(frame.area(), POPUP_WIDTH, 6);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Create Container ")),
        area,
    );
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let value = if focused {
        Span::styled(format!("{value}_"), Style::new().bold())
    } else {
        Span::raw(value.to_string())
    };
    Line::from(vec![Span::raw(format!("{label:>15}: ")).dark_gray(), value])
}

fn footer(busy: bool, hint: &'static str) -> Line<'static> {
    if busy {
        Line::from(Span::raw("Working...").yellow())
    } else {
        Line::from(Span::raw(hint).dark_gray())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_at_top_until_selection_leaves_it() {
        assert_eq!(visible_window(0, 10), (0, 10));
        assert_eq!(visible_window(9, 10), (0, 10));
        assert_eq!(visible_window(10, 10), (1, 10));
        assert_eq!(visible_window(39, 26), (14, 26));
    }

    #[test]
    fn window_keeps_one_row_on_tiny_frames() {
        assert_eq!(visible_window(5, 0), (5, 1));
    }
}
