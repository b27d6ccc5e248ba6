//! Message feed
//!
//! Displays the bounded room feed: chat lines, gift acknowledgments, and
//! join/leave notices. The view pins to the tail unless the user scrolled
//! back.

use liveroom_app::App;
use liveroom_core::{Emphasis, render_row};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

fn emphasis_style(emphasis: Emphasis) -> Style {
    match emphasis {
        Emphasis::Author => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        Emphasis::Body => Style::default().fg(Color::Rgb(196, 196, 196)),
        Emphasis::Notice => Style::default().fg(Color::DarkGray),
    }
}

/// Render the message feed.
#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" {} ", app.room_name());
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if app.feed().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.feed()
            .iter()
            .map(|message| {
                let row = render_row(message);
                let mut spans: Vec<Span> = row
                    .segments
                    .into_iter()
                    .map(|segment| Span::styled(segment.text, emphasis_style(segment.emphasis)))
                    .collect();
                if let Some(icon) = row.icon {
                    spans.push(Span::raw(format!(" {icon}")));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let offset = app.scroll_offset().unwrap_or(0);
    let window_end = items.len().saturating_sub(offset);
    let skip = window_end.saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).take(visible_height).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}
