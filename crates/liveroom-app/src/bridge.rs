//! Session-to-Application translation layer.
//!
//! The [`Bridge`] wraps [`liveroom_session::Session`] so that the app and
//! runtime never speak the session vocabulary directly.
//!
//! # Responsibilities
//!
//! - Converts [`crate::AppAction`] intents into session events.
//! - Accumulates outgoing [`SdkCommand`]s to be run by the driver in the next
//!   I/O cycle.
//! - Turns session updates and errors into [`crate::AppEvent`]s for the app.
//! - Detects capture transitions so the UI indicator follows the real
//!   resource state instead of guessing from intents.

use liveroom_session::{
    CaptureState, PermissionSet, RoomProfile, SdkCommand, SdkEvent, Session, SessionAction,
    SessionError, SessionEvent,
};

use crate::{AppAction, AppEvent};

/// Bridge between App and the room session logic.
pub struct Bridge {
    session: Session,
    outgoing: Vec<SdkCommand>,
    close_requested: bool,
}

impl Bridge {
    /// Create a new Bridge for one room visit.
    pub fn new(profile: RoomProfile) -> Self {
        Self { session: Session::new(profile), outgoing: Vec::new(), close_requested: false }
    }

    /// The wrapped session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Enter the room with the permissions already held.
    pub fn enter(&mut self, granted: PermissionSet) -> Vec<AppEvent> {
        self.drive(SessionEvent::Enter { granted })
    }

    /// Feed one marshaled SDK callback through the session.
    pub fn handle_sdk_event(&mut self, event: SdkEvent) -> Vec<AppEvent> {
        self.drive(SessionEvent::Sdk(event))
    }

    /// Route one app action into the session.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::SendChat { text } => self.drive(SessionEvent::SendChat { text }),
            AppAction::StartCapture => self.drive(SessionEvent::StartCapture),
            AppAction::StopCapture => self.drive(SessionEvent::StopCapture),
            AppAction::SwitchCamera => self.drive(SessionEvent::SwitchCamera),
            AppAction::SetBeauty { enabled } => self.drive(SessionEvent::SetBeauty { enabled }),
            AppAction::LeaveRoom => self.drive(SessionEvent::Close),
            AppAction::Render | AppAction::Quit => vec![],
        }
    }

    /// Close the session. Safe to call on every exit path; a session that
    /// already closed absorbs it.
    pub fn close(&mut self) -> Vec<AppEvent> {
        self.drive(SessionEvent::Close)
    }

    /// Take pending outgoing SDK commands.
    pub fn take_outgoing(&mut self) -> Vec<SdkCommand> {
        std::mem::take(&mut self.outgoing)
    }

    /// Whether the session asked to leave the screen. Sticky.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn drive(&mut self, event: SessionEvent) -> Vec<AppEvent> {
        let capture_before = self.session.capture();
        let result = self.session.handle(event);
        let mut events = self.handle_session_result(result);

        let capture_now = self.session.capture();
        if capture_now != capture_before {
            events.push(AppEvent::CaptureChanged {
                active: capture_now == CaptureState::Active,
            });
        }
        events
    }

    fn handle_session_result(
        &mut self,
        result: Result<Vec<SessionAction>, SessionError>,
    ) -> Vec<AppEvent> {
        match result {
            Ok(actions) => self.process_session_actions(actions),
            Err(e) => vec![AppEvent::Error { message: e.to_string() }],
        }
    }

    fn process_session_actions(&mut self, actions: Vec<SessionAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                // The screen transition is the runtime's job, not the SDK's.
                SessionAction::Command(SdkCommand::CloseScreen) => {
                    self.close_requested = true;
                },
                SessionAction::Command(command) => {
                    self.outgoing.push(command);
                },
                SessionAction::Update(update) => {
                    events.push(AppEvent::Update(update));
                },
                SessionAction::Log { message } => {
                    tracing::debug!(%message, "session");
                },
            }
        }

        events
    }
}
