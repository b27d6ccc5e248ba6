//! Status bar
//!
//! Displays the session phase, room information, and the transient status
//! line.

use liveroom_app::App;
use liveroom_session::SessionPhase;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Draw the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let phase_status = match app.phase() {
        SessionPhase::Unpermissioned => {
            Span::styled("Starting", Style::default().fg(Color::Yellow))
        },
        SessionPhase::RequestingPermission => {
            Span::styled("Requesting permissions...", Style::default().fg(Color::Yellow))
        },
        SessionPhase::Initializing => {
            Span::styled("Joining...", Style::default().fg(Color::Yellow))
        },
        SessionPhase::Ready => Span::styled(
            "Live",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        SessionPhase::Denied => {
            let detail = app
                .denied_permissions()
                .map_or_else(String::new, |denied| format!(": {denied}"));
            Span::styled(format!("Permission denied{detail}"), Style::default().fg(Color::Red))
        },
        SessionPhase::Closed => Span::styled("Closed", Style::default().fg(Color::Red)),
    };

    let room_info = format!(
        " | Room: {} | Members: {}",
        app.room_name(),
        app.panels().member_count
    );

    let mut spans = vec![
        Span::raw(" "),
        phase_status,
        Span::styled(room_info, Style::default().fg(Color::DarkGray)),
    ];

    if app.capture_active() {
        spans.push(Span::styled(
            " | REC",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(message) = app.status_message() {
        spans.push(Span::styled(format!(" | {message}"), Style::default().fg(Color::White)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
