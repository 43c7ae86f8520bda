//! Error dialog.

use ratatui::Frame;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::ui::centered;

const MODAL_WIDTH: u16 = 70;

/// Renders an error with the runtime's diagnostic text.
pub fn render_error(frame: &mut Frame, title: &str, message: &str) {
    let mut text = Text::styled(message.to_string(), Style::new().red());
    text.push_line(Line::default());
    text.push_line(Line::from("Enter OK").dark_gray());

    // Borders take two columns; wrapped lines can only add height.
    let inner_width = usize::from(MODAL_WIDTH - 2);
    let rows: usize = text
        .lines
        .iter()
        .map(|line| line.width().div_ceil(inner_width).max(1))
        .sum();
    let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);

    let area = centered(frame.area(), MODAL_WIDTH, height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(format!(" {title} "))),
        area,
    );
}
