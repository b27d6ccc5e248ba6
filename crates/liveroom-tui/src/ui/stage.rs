//! Video stage
//!
//! Text stand-in for the video area: the local preview indicator, remote
//! publishers, guest seats, and the PK standing when a battle runs.

use liveroom_app::App;
use liveroom_core::{OwnerState, SeatState, Uid};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the stage panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Stage ");

    let mut lines: Vec<Line> = Vec::new();

    if app.capture_active() {
        lines.push(Line::from(Span::styled(
            "● local preview",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    for &uid in app.stage().tiles() {
        lines.push(Line::from(Span::styled(
            format!("▶ {}", tile_label(app, uid)),
            Style::default().fg(Color::Green),
        )));
    }

    match app.panels().owner_state {
        OwnerState::Online => {},
        OwnerState::Paused => {
            lines.push(Line::from(Span::styled(
                "host paused the stream",
                Style::default().fg(Color::Yellow),
            )));
        },
        OwnerState::Offline => {
            lines.push(Line::from(Span::styled(
                "host is offline",
                Style::default().fg(Color::Red),
            )));
        },
    }

    for seat in &app.panels().seats {
        let span = match (seat.state, &seat.occupant) {
            (SeatState::Taken, Some(occupant)) => {
                let mic = if occupant.muted { " (muted)" } else { "" };
                Span::styled(
                    format!("seat {}: {}{mic}", seat.index, occupant.nickname),
                    Style::default().fg(Color::Cyan),
                )
            },
            (SeatState::Locked, _) => Span::styled(
                format!("seat {}: locked", seat.index),
                Style::default().fg(Color::DarkGray),
            ),
            _ => Span::styled(
                format!("seat {}: open", seat.index),
                Style::default().fg(Color::DarkGray),
            ),
        };
        lines.push(Line::from(span));
    }

    if let Some(pk) = &app.panels().pk {
        lines.push(Line::from(Span::styled(
            format!(
                "PK vs {}: {}-{} ({}s)",
                pk.opponent_room, pk.our_points, pk.their_points, pk.seconds_left
            ),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No live video",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Label a stage tile, preferring the seat occupant's nickname over the
/// bare uid.
fn tile_label(app: &App, uid: Uid) -> String {
    app.panels()
        .seats
        .iter()
        .filter_map(|seat| seat.occupant.as_ref())
        .find(|occupant| occupant.uid == uid)
        .map_or_else(|| format!("uid {uid}"), |occupant| occupant.nickname.clone())
}
