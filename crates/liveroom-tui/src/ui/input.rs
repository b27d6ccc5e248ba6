//! Chat input line.
//!
//! Renders the edit buffer behind a `nickname>` prompt and parks the
//! terminal cursor at the edit position.

use liveroom_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::InputState;

/// Hint shown while the buffer is empty.
const HINT: &str = "type to chat, Esc to leave";

/// Draw the input line and place the cursor in it.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let prompt = format!("{}> ", app.nickname());

    let mut spans = vec![Span::styled(
        prompt.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if input.buffer().is_empty() {
        spans.push(Span::styled(HINT, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(input.buffer()));
    }

    let widget = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);

    let column = prompt.chars().count().saturating_add(input.cursor_column());
    frame.set_cursor_position(cursor_position(area, column));
}

/// Terminal coordinates for the cursor, clamped inside the border.
#[allow(clippy::cast_possible_truncation)]
fn cursor_position(area: Rect, column: usize) -> (u16, u16) {
    let inner_width = usize::from(area.width.saturating_sub(2));
    let column = column.min(inner_width.saturating_sub(1)) as u16;

    (area.x.saturating_add(1).saturating_add(column), area.y.saturating_add(1))
}
