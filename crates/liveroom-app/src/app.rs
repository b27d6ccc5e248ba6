//! Render state of the room screen.
//!
//! [`App`] holds everything the screen shows, decoupled from I/O and SDK
//! mechanics: it consumes [`crate::AppEvent`] inputs and hands back
//! [`crate::AppAction`] instructions for the runtime to carry out.
//!
//! # Responsibilities
//!
//! - Owns the message feed and the scroll position over it.
//! - Tracks the side panels (rank, seats, PK, owner state, member count).
//! - Tracks the stage tiles and local capture indicator for the status line.
//! - Remembers the terminal size across resizes.

use liveroom_core::{ClientRole, MessageFeed};
use liveroom_session::{PermissionSet, RoomUpdate, SessionPhase};

use crate::{AppAction, AppEvent, RoomPanels, StageView};

/// Lines jumped by a page scroll.
const SCROLL_PAGE: usize = 10;

/// Room screen state, fed by events and read by the renderer.
///
/// Does no I/O of its own, so tests drive it directly with events and
/// assert on the getters.
#[derive(Debug, Clone)]
pub struct App {
    /// Display name of the room.
    room_name: String,
    /// Our nickname.
    nickname: String,
    /// Whether we publish or only watch.
    role: ClientRole,
    /// Bootstrap phase mirrored from the session.
    phase: SessionPhase,
    /// The room's message feed.
    feed: MessageFeed,
    /// Lines scrolled back from the tail. `None` means follow the tail.
    scroll: Option<usize>,
    /// Side-panel state.
    panels: RoomPanels,
    /// Uids currently publishing video.
    stage: StageView,
    /// Whether our own capture is running.
    capture_active: bool,
    /// Permissions the user denied, once the session is over.
    denied: Option<PermissionSet>,
    /// Last reported terminal size as (columns, rows).
    terminal_size: (u16, u16),
    /// Transient message for the status bar, if any.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the given room.
    pub fn new(room_name: String, nickname: String, role: ClientRole) -> Self {
        Self {
            room_name,
            nickname,
            role,
            phase: SessionPhase::Unpermissioned,
            feed: MessageFeed::new(),
            scroll: None,
            panels: RoomPanels::new(),
            stage: StageView::new(),
            capture_active: false,
            denied: None,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Apply one event and report what the runtime should do next.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Update(update) => self.apply_update(update),
            AppEvent::CaptureChanged { active } => {
                self.capture_active = active;
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    fn apply_update(&mut self, update: RoomUpdate) -> Vec<AppAction> {
        match update {
            RoomUpdate::PhaseChanged { phase } => {
                self.phase = phase;
            },
            RoomUpdate::RoomEntered => {
                self.status_message = Some(format!("Entered '{}'", self.room_name));
            },
            RoomUpdate::Feed(message) => {
                self.feed.push(message);
                // Every append snaps the view back to the tail.
                self.scroll = None;
            },
            RoomUpdate::MemberCount { count } => {
                self.panels.member_count = count;
            },
            RoomUpdate::Rank { entries } => {
                self.panels.rank = entries;
            },
            RoomUpdate::Seats { seats } => {
                self.panels.seats = seats;
            },
            RoomUpdate::Pk { snapshot } => {
                self.panels.pk = Some(snapshot);
            },
            RoomUpdate::OwnerState { state } => {
                self.panels.owner_state = state;
            },
            RoomUpdate::StageChanged { uid, live } => {
                self.stage.set_live(uid, live);
            },
            RoomUpdate::PermissionDenied { denied } => {
                self.denied = Some(denied);
                self.status_message = Some(format!("Permissions denied: {denied}"));
            },
            RoomUpdate::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
            },
        }
        vec![AppAction::Render]
    }

    /// Put a message on the status bar.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Send a chat line to the room.
    pub fn send_chat(&self, text: String) -> Vec<AppAction> {
        vec![AppAction::SendChat { text }, AppAction::Render]
    }

    /// Start local capture.
    pub fn start_capture(&self) -> Vec<AppAction> {
        vec![AppAction::StartCapture, AppAction::Render]
    }

    /// Stop local capture.
    pub fn stop_capture(&self) -> Vec<AppAction> {
        vec![AppAction::StopCapture, AppAction::Render]
    }

    /// Switch between front and rear cameras.
    pub fn switch_camera(&mut self) -> Vec<AppAction> {
        self.status_message = Some("Switching camera".to_string());
        vec![AppAction::SwitchCamera, AppAction::Render]
    }

    /// Toggle the beauty filter.
    pub fn set_beauty(&mut self, enabled: bool) -> Vec<AppAction> {
        self.status_message =
            Some(if enabled { "Beauty filter on" } else { "Beauty filter off" }.to_string());
        vec![AppAction::SetBeauty { enabled }, AppAction::Render]
    }

    /// Leave the room.
    pub fn leave_room(&self) -> Vec<AppAction> {
        vec![AppAction::LeaveRoom]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Scroll the feed one line back from the tail.
    pub fn scroll_up(&mut self) -> Vec<AppAction> {
        self.scroll_back(1)
    }

    /// Scroll the feed one line toward the tail.
    pub fn scroll_down(&mut self) -> Vec<AppAction> {
        self.scroll_forward(1)
    }

    /// Scroll the feed a screenful back from the tail.
    pub fn scroll_page_up(&mut self) -> Vec<AppAction> {
        self.scroll_back(SCROLL_PAGE)
    }

    /// Scroll the feed a screenful toward the tail.
    pub fn scroll_page_down(&mut self) -> Vec<AppAction> {
        self.scroll_forward(SCROLL_PAGE)
    }

    fn scroll_back(&mut self, lines: usize) -> Vec<AppAction> {
        let max = self.feed.len().saturating_sub(1);
        let offset = (self.scroll.unwrap_or(0) + lines).min(max);
        self.scroll = Some(offset);
        vec![AppAction::Render]
    }

    fn scroll_forward(&mut self, lines: usize) -> Vec<AppAction> {
        self.scroll = match self.scroll {
            Some(offset) if offset > lines => Some(offset - lines),
            _ => None,
        };
        vec![AppAction::Render]
    }

    /// Display name of the room.
    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    /// Our nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Whether we publish or only watch.
    pub fn role(&self) -> ClientRole {
        self.role
    }

    /// Bootstrap phase mirrored from the session.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The room's message feed.
    pub fn feed(&self) -> &MessageFeed {
        &self.feed
    }

    /// Lines scrolled back from the tail. `None` means follow the tail.
    pub fn scroll_offset(&self) -> Option<usize> {
        self.scroll
    }

    /// Side-panel state.
    pub fn panels(&self) -> &RoomPanels {
        &self.panels
    }

    /// Uids currently publishing video.
    pub fn stage(&self) -> &StageView {
        &self.stage
    }

    /// Whether our own capture is running.
    pub fn capture_active(&self) -> bool {
        self.capture_active
    }

    /// Permissions the user denied, if the session ended that way.
    pub fn denied_permissions(&self) -> Option<PermissionSet> {
        self.denied
    }

    /// Last reported terminal size as (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Current status bar message, if one is set.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
