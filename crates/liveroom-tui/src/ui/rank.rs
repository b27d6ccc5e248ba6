//! Gift rank panel
//!
//! Displays the room's gift leaderboard, best first.

use liveroom_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the gift rank panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Top Gifts ");

    let rank = &app.panels().rank;
    let items: Vec<ListItem> = if rank.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No gifts yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        rank.iter()
            .enumerate()
            .map(|(index, entry)| {
                let style = if index == 0 {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. {}", index + 1, entry.nickname), style),
                    Span::styled(
                        format!("  {}", entry.points),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
