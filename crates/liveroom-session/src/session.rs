//! Sans-IO room session state machine.
//!
//! The session owns the lifecycle of one live room visit: permission
//! acquisition, one-time SDK initialization, the live phase, and teardown.
//! It performs no IO. The caller feeds [`SessionEvent`]s in and executes the
//! returned [`SessionAction`]s.
//!
//! # Lifecycle
//!
//! ```text
//! Unpermissioned --Enter--> RequestingPermission --granted--> Initializing
//!        |                          |                              |
//!        +--Enter (all held)--------|--denied--> Denied            v
//!                                   |                            Ready
//!                                   v                              |
//!                                 Denied <------Close------------Closed
//! ```
//!
//! Initialization runs exactly once: `Enter` is only honored in
//! `Unpermissioned`, and no transition leads back there. Teardown commands
//! are emitted on every exit path, whether the room was ever live or not.

use liveroom_core::{ClientRole, Presence, Uid};

use crate::error::SessionError;
use crate::event::{RoomUpdate, SdkCommand, SdkEvent, SessionAction, SessionEvent};
use crate::permission::PermissionSet;
use crate::signal::{self, ChannelMessage};

/// Bootstrap phase of a room session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the caller to enter the room.
    Unpermissioned,

    /// A permission request is in flight.
    RequestingPermission,

    /// Permissions held, SDK joins in flight.
    Initializing,

    /// Both channels joined, the room is live.
    Ready,

    /// A required permission was denied. Terminal.
    Denied,

    /// The session was torn down. Terminal.
    Closed,
}

/// Guard for the local capture resource.
///
/// Replaces an ad-hoc boolean so start and stop stay idempotent: redundant
/// transitions are absorbed instead of double-driving the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Camera and preview are off.
    Idle,

    /// Camera and preview are running.
    Active,
}

/// Immutable facts about the room visit, fixed at construction.
#[derive(Debug, Clone)]
pub struct RoomProfile {
    /// Display name of the room.
    pub room_name: String,

    /// Transport channel both SDKs join.
    pub channel: String,

    /// Our display name in chat and presence lines.
    pub nickname: String,

    /// Uid to join media with, 0 asks the transport to assign one.
    pub uid: Uid,

    /// Whether we publish or only watch.
    pub role: ClientRole,

    /// Initial state of the capture pre-process filter.
    pub beauty_enabled: bool,
}

/// Sans-IO session state machine.
///
/// See the [module docs](self) for the lifecycle diagram.
#[derive(Debug)]
pub struct Session {
    profile: RoomProfile,
    phase: SessionPhase,
    capture: CaptureState,
    beauty: bool,
    messaging_joined: bool,
    media_joined: bool,
    media_uid: Option<Uid>,
}

impl Session {
    /// Creates a session for one room visit.
    #[must_use]
    pub fn new(profile: RoomProfile) -> Self {
        let beauty = profile.beauty_enabled;
        Self {
            profile,
            phase: SessionPhase::Unpermissioned,
            capture: CaptureState::Idle,
            beauty,
            messaging_joined: false,
            media_joined: false,
            media_uid: None,
        }
    }

    /// Current bootstrap phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current capture resource state.
    pub fn capture(&self) -> CaptureState {
        self.capture
    }

    /// Whether the capture filter is currently on.
    pub fn beauty(&self) -> bool {
        self.beauty
    }

    /// The profile this session was built with.
    pub fn profile(&self) -> &RoomProfile {
        &self.profile
    }

    /// Uid the media transport assigned us, if joined.
    pub fn media_uid(&self) -> Option<Uid> {
        self.media_uid
    }

    /// Process one event, producing actions for the caller to execute.
    ///
    /// # Errors
    ///
    /// Returns an error when a user intent is invalid in the current state
    /// (for example sending chat before the room is live). SDK callbacks
    /// never error; stale ones are absorbed.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionAction>, SessionError> {
        match event {
            SessionEvent::Enter { granted } => Ok(self.handle_enter(granted)),
            SessionEvent::Sdk(sdk) => Ok(self.handle_sdk(sdk)),
            SessionEvent::SendChat { text } => self.handle_send_chat(text),
            SessionEvent::StartCapture => self.handle_start_capture(),
            SessionEvent::StopCapture => Ok(self.handle_stop_capture()),
            SessionEvent::SwitchCamera => self.handle_switch_camera(),
            SessionEvent::SetBeauty { enabled } => self.handle_set_beauty(enabled),
            SessionEvent::Close => Ok(self.handle_close()),
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self.phase, SessionPhase::Denied | SessionPhase::Closed)
    }

    fn handle_enter(&mut self, granted: PermissionSet) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Unpermissioned {
            return vec![SessionAction::Log {
                message: "enter ignored: bootstrap already ran".to_string(),
            }];
        }

        let missing = granted.missing();
        if missing.is_empty() {
            return self.begin_init();
        }

        self.phase = SessionPhase::RequestingPermission;
        vec![
            SessionAction::Update(RoomUpdate::PhaseChanged {
                phase: SessionPhase::RequestingPermission,
            }),
            SessionAction::Command(SdkCommand::RequestPermissions { permissions: missing }),
            SessionAction::Log { message: format!("requesting permissions: {missing}") },
        ]
    }

    fn handle_sdk(&mut self, event: SdkEvent) -> Vec<SessionAction> {
        // Terminal phases absorb everything still in flight from the SDKs.
        if self.is_terminal() {
            return Vec::new();
        }

        match event {
            SdkEvent::PermissionResult { denied, .. } => self.handle_permission_result(denied),
            SdkEvent::MessagingJoined => {
                self.messaging_joined = true;
                let mut actions = vec![SessionAction::Log {
                    message: "messaging channel joined".to_string(),
                }];
                self.check_ready(&mut actions);
                actions
            },
            SdkEvent::MessagingJoinFailed { reason } => {
                let message = format!("messaging join failed: {reason}");
                vec![
                    SessionAction::Update(RoomUpdate::Error { message: message.clone() }),
                    SessionAction::Log { message },
                ]
            },
            SdkEvent::MessagingLeft => {
                vec![SessionAction::Log { message: "messaging channel left".to_string() }]
            },
            SdkEvent::MediaJoined { uid } => {
                self.media_joined = true;
                self.media_uid = Some(uid);
                let mut actions = vec![SessionAction::Log {
                    message: format!("media transport joined as uid {uid}"),
                }];
                self.check_ready(&mut actions);
                actions
            },
            SdkEvent::MemberJoined { nickname } => {
                vec![SessionAction::presence(nickname, Presence::Joined)]
            },
            SdkEvent::MemberLeft { nickname } => {
                vec![SessionAction::presence(nickname, Presence::Left)]
            },
            SdkEvent::MemberCount { count } => {
                vec![SessionAction::Update(RoomUpdate::MemberCount { count })]
            },
            SdkEvent::ChannelText { json } => self.handle_channel_text(&json),
            SdkEvent::RemoteVideoState { uid, live } => {
                let command = if live {
                    SdkCommand::BindRemoteVideo { uid }
                } else {
                    SdkCommand::ReleaseRemoteVideo { uid }
                };
                vec![
                    SessionAction::Command(command),
                    SessionAction::Update(RoomUpdate::StageChanged { uid, live }),
                ]
            },
        }
    }

    fn handle_permission_result(&mut self, denied: PermissionSet) -> Vec<SessionAction> {
        if self.phase != SessionPhase::RequestingPermission {
            return vec![SessionAction::Log {
                message: "permission result ignored outside request phase".to_string(),
            }];
        }

        if !denied.is_empty() {
            self.phase = SessionPhase::Denied;
            let mut actions = vec![
                SessionAction::Update(RoomUpdate::PhaseChanged { phase: SessionPhase::Denied }),
                SessionAction::Update(RoomUpdate::PermissionDenied { denied }),
            ];
            actions.extend(self.teardown());
            actions.push(SessionAction::Log {
                message: format!("required permissions denied: {denied}"),
            });
            return actions;
        }

        self.begin_init()
    }

    /// One-time SDK bring-up. Only reachable from `Unpermissioned` (via
    /// `Enter` with everything granted) or `RequestingPermission` (via a
    /// fully granted result), so it cannot run twice.
    fn begin_init(&mut self) -> Vec<SessionAction> {
        self.phase = SessionPhase::Initializing;

        let mut actions = vec![
            SessionAction::Update(RoomUpdate::PhaseChanged { phase: SessionPhase::Initializing }),
            SessionAction::Command(SdkCommand::InitMessaging),
            SessionAction::Command(SdkCommand::RegisterVideoChannel),
            SessionAction::Command(SdkCommand::ConfigureMedia { role: self.profile.role }),
        ];

        if self.profile.role == ClientRole::Broadcaster {
            actions.push(SessionAction::Command(SdkCommand::SetPreProcess {
                enabled: self.beauty,
            }));
            actions.push(SessionAction::Command(SdkCommand::StartCapture));
            self.capture = CaptureState::Active;
        }

        actions.push(SessionAction::Command(SdkCommand::JoinMedia {
            channel: self.profile.channel.clone(),
            uid: self.profile.uid,
        }));
        actions.push(SessionAction::Command(SdkCommand::JoinMessaging {
            channel: self.profile.channel.clone(),
        }));
        actions.push(SessionAction::Log {
            message: format!(
                "initializing room '{}' as {:?}",
                self.profile.room_name, self.profile.role
            ),
        });

        actions
    }

    /// Promotes to `Ready` once both transports confirmed their joins.
    fn check_ready(&mut self, actions: &mut Vec<SessionAction>) {
        if self.phase != SessionPhase::Initializing
            || !self.messaging_joined
            || !self.media_joined
        {
            return;
        }

        self.phase = SessionPhase::Ready;
        actions.push(SessionAction::Update(RoomUpdate::PhaseChanged {
            phase: SessionPhase::Ready,
        }));
        actions.push(SessionAction::Update(RoomUpdate::RoomEntered));
        actions.push(SessionAction::Log {
            message: format!("room '{}' is live", self.profile.room_name),
        });
    }

    fn handle_channel_text(&mut self, json: &str) -> Vec<SessionAction> {
        let message = match signal::decode(json) {
            Ok(message) => message,
            Err(e) => {
                // Bad payloads are reported, never fatal.
                return vec![
                    SessionAction::Update(RoomUpdate::Error { message: e.to_string() }),
                    SessionAction::Log { message: format!("dropped channel payload: {e}") },
                ];
            },
        };

        match message {
            ChannelMessage::Chat { from, text } => vec![SessionAction::chat(from, text)],
            ChannelMessage::Gift { from, gift } => vec![SessionAction::gift(from, gift)],
            ChannelMessage::GiftRank { entries } => {
                vec![SessionAction::Update(RoomUpdate::Rank { entries })]
            },
            ChannelMessage::SeatState { seats } => {
                vec![SessionAction::Update(RoomUpdate::Seats { seats })]
            },
            ChannelMessage::Pk(snapshot) => {
                vec![SessionAction::Update(RoomUpdate::Pk { snapshot })]
            },
            ChannelMessage::OwnerState { state } => {
                vec![SessionAction::Update(RoomUpdate::OwnerState { state })]
            },
            ChannelMessage::Notification { joined, left } => {
                let mut actions = Vec::with_capacity(joined.len() + left.len());
                for nickname in joined {
                    actions.push(SessionAction::presence(nickname, Presence::Joined));
                }
                for nickname in left {
                    actions.push(SessionAction::presence(nickname, Presence::Left));
                }
                actions
            },
        }
    }

    fn handle_send_chat(&mut self, text: String) -> Result<Vec<SessionAction>, SessionError> {
        if self.phase != SessionPhase::Ready {
            return Err(SessionError::InvalidPhase { phase: self.phase, operation: "send chat" });
        }

        let json = signal::encode(&ChannelMessage::Chat {
            from: self.profile.nickname.clone(),
            text: text.clone(),
        })?;

        // Echo our own line immediately; the channel does not loop it back.
        Ok(vec![
            SessionAction::Command(SdkCommand::SendChannelMessage { json }),
            SessionAction::chat(self.profile.nickname.clone(), text),
        ])
    }

    fn handle_start_capture(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        if self.profile.role != ClientRole::Broadcaster {
            return Err(SessionError::NotBroadcaster { operation: "start capture" });
        }
        if self.phase != SessionPhase::Ready {
            return Err(SessionError::InvalidPhase {
                phase: self.phase,
                operation: "start capture",
            });
        }
        if self.capture == CaptureState::Active {
            return Ok(Vec::new());
        }

        self.capture = CaptureState::Active;
        Ok(vec![SessionAction::Command(SdkCommand::StartCapture)])
    }

    /// Stop is deliberately guard-only: it may run from any phase because
    /// teardown paths call through here.
    fn handle_stop_capture(&mut self) -> Vec<SessionAction> {
        if self.capture == CaptureState::Idle {
            return Vec::new();
        }

        self.capture = CaptureState::Idle;
        vec![SessionAction::Command(SdkCommand::StopCapture)]
    }

    fn handle_switch_camera(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        if self.profile.role != ClientRole::Broadcaster {
            return Err(SessionError::NotBroadcaster { operation: "switch camera" });
        }
        if self.phase != SessionPhase::Ready {
            return Err(SessionError::InvalidPhase {
                phase: self.phase,
                operation: "switch camera",
            });
        }

        Ok(vec![SessionAction::Command(SdkCommand::SwitchCamera)])
    }

    fn handle_set_beauty(&mut self, enabled: bool) -> Result<Vec<SessionAction>, SessionError> {
        if self.profile.role != ClientRole::Broadcaster {
            return Err(SessionError::NotBroadcaster { operation: "set beauty filter" });
        }
        if self.phase != SessionPhase::Ready {
            return Err(SessionError::InvalidPhase {
                phase: self.phase,
                operation: "set beauty filter",
            });
        }

        self.beauty = enabled;
        Ok(vec![SessionAction::Command(SdkCommand::SetPreProcess { enabled })])
    }

    fn handle_close(&mut self) -> Vec<SessionAction> {
        if self.is_terminal() {
            return Vec::new();
        }

        self.phase = SessionPhase::Closed;
        let mut actions = vec![SessionAction::Update(RoomUpdate::PhaseChanged {
            phase: SessionPhase::Closed,
        })];
        actions.extend(self.teardown());
        actions.push(SessionAction::Log {
            message: "leaving room, tearing down transports".to_string(),
        });
        actions
    }

    /// Teardown commands shared by every exit path.
    ///
    /// Leaves are emitted even when the matching join never confirmed; the
    /// SDK treats a leave without a join as a no-op, and skipping them here
    /// would leak a half-finished join.
    fn teardown(&mut self) -> Vec<SessionAction> {
        let mut actions = self.handle_stop_capture();
        actions.push(SessionAction::Command(SdkCommand::LeaveMedia));
        actions.push(SessionAction::Command(SdkCommand::LeaveMessaging));
        actions.push(SessionAction::Command(SdkCommand::CloseScreen));
        actions
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use liveroom_core::FeedMessage;

    use super::*;
    use crate::permission::Permission;

    fn profile(role: ClientRole) -> RoomProfile {
        RoomProfile {
            room_name: "morning show".to_string(),
            channel: "room-42".to_string(),
            nickname: "ana".to_string(),
            uid: 0,
            role,
            beauty_enabled: true,
        }
    }

    fn commands(actions: &[SessionAction]) -> Vec<&SdkCommand> {
        actions
            .iter()
            .filter_map(|action| match action {
                SessionAction::Command(command) => Some(command),
                _ => None,
            })
            .collect()
    }

    fn ready_session(role: ClientRole) -> Session {
        let mut session = Session::new(profile(role));
        session.handle(SessionEvent::Enter { granted: PermissionSet::all() }).unwrap();
        session.handle(SessionEvent::Sdk(SdkEvent::MessagingJoined)).unwrap();
        session.handle(SessionEvent::Sdk(SdkEvent::MediaJoined { uid: 7 })).unwrap();
        assert_eq!(session.phase(), SessionPhase::Ready);
        session
    }

    #[test]
    fn enter_with_all_permissions_skips_the_request() {
        let mut session = Session::new(profile(ClientRole::Audience));

        let actions =
            session.handle(SessionEvent::Enter { granted: PermissionSet::all() }).unwrap();

        assert_eq!(session.phase(), SessionPhase::Initializing);
        assert!(!commands(&actions)
            .iter()
            .any(|c| matches!(c, SdkCommand::RequestPermissions { .. })));
    }

    #[test]
    fn enter_with_missing_permissions_requests_the_rest() {
        let mut session = Session::new(profile(ClientRole::Audience));
        let granted = PermissionSet::from_iter([Permission::Camera]);

        let actions = session.handle(SessionEvent::Enter { granted }).unwrap();

        assert_eq!(session.phase(), SessionPhase::RequestingPermission);
        let requested = commands(&actions)
            .into_iter()
            .find_map(|c| match c {
                SdkCommand::RequestPermissions { permissions } => Some(*permissions),
                _ => None,
            })
            .unwrap();
        assert!(requested.contains(Permission::Microphone));
        assert!(requested.contains(Permission::Storage));
        assert!(!requested.contains(Permission::Camera));
    }

    #[test]
    fn broadcaster_init_starts_capture_before_joining() {
        let mut session = Session::new(profile(ClientRole::Broadcaster));

        let actions =
            session.handle(SessionEvent::Enter { granted: PermissionSet::all() }).unwrap();

        let commands = commands(&actions);
        let start = commands.iter().position(|c| **c == SdkCommand::StartCapture).unwrap();
        let join = commands
            .iter()
            .position(|c| matches!(c, SdkCommand::JoinMedia { .. }))
            .unwrap();
        assert!(start < join);
        assert_eq!(session.capture(), CaptureState::Active);
    }

    #[test]
    fn audience_init_never_touches_the_camera() {
        let mut session = Session::new(profile(ClientRole::Audience));

        let actions =
            session.handle(SessionEvent::Enter { granted: PermissionSet::all() }).unwrap();

        assert!(!commands(&actions).iter().any(|c| {
            matches!(c, SdkCommand::StartCapture | SdkCommand::SetPreProcess { .. })
        }));
        assert_eq!(session.capture(), CaptureState::Idle);
    }

    #[test]
    fn ready_requires_both_joins() {
        let mut session = Session::new(profile(ClientRole::Audience));
        session.handle(SessionEvent::Enter { granted: PermissionSet::all() }).unwrap();

        session.handle(SessionEvent::Sdk(SdkEvent::MessagingJoined)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Initializing);

        let actions = session.handle(SessionEvent::Sdk(SdkEvent::MediaJoined { uid: 3 })).unwrap();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(actions.contains(&SessionAction::Update(RoomUpdate::RoomEntered)));
        assert_eq!(session.media_uid(), Some(3));
    }

    #[test]
    fn send_chat_before_ready_is_an_error() {
        let mut session = Session::new(profile(ClientRole::Audience));
        session.handle(SessionEvent::Enter { granted: PermissionSet::all() }).unwrap();

        let result = session.handle(SessionEvent::SendChat { text: "hi".to_string() });

        assert!(matches!(
            result,
            Err(SessionError::InvalidPhase { phase: SessionPhase::Initializing, .. })
        ));
    }

    #[test]
    fn send_chat_echoes_our_own_line() {
        let mut session = ready_session(ClientRole::Audience);

        let actions = session.handle(SessionEvent::SendChat { text: "hello".to_string() }).unwrap();

        assert!(matches!(
            actions.first(),
            Some(SessionAction::Command(SdkCommand::SendChannelMessage { .. }))
        ));
        assert!(actions.contains(&SessionAction::Update(RoomUpdate::Feed(FeedMessage::Chat {
            author: "ana".to_string(),
            text: "hello".to_string(),
        }))));
    }

    #[test]
    fn audience_cannot_drive_the_camera() {
        let mut session = ready_session(ClientRole::Audience);

        assert!(matches!(
            session.handle(SessionEvent::StartCapture),
            Err(SessionError::NotBroadcaster { .. })
        ));
        assert!(matches!(
            session.handle(SessionEvent::SwitchCamera),
            Err(SessionError::NotBroadcaster { .. })
        ));
    }

    #[test]
    fn redundant_capture_transitions_are_absorbed() {
        let mut session = ready_session(ClientRole::Broadcaster);
        assert_eq!(session.capture(), CaptureState::Active);

        assert!(session.handle(SessionEvent::StartCapture).unwrap().is_empty());

        let actions = session.handle(SessionEvent::StopCapture).unwrap();
        assert_eq!(commands(&actions), vec![&SdkCommand::StopCapture]);
        assert!(session.handle(SessionEvent::StopCapture).unwrap().is_empty());
    }

    #[test]
    fn close_tears_down_and_absorbs_later_events() {
        let mut session = ready_session(ClientRole::Broadcaster);

        let actions = session.handle(SessionEvent::Close).unwrap();
        let commands = commands(&actions);
        assert_eq!(
            commands,
            vec![
                &SdkCommand::StopCapture,
                &SdkCommand::LeaveMedia,
                &SdkCommand::LeaveMessaging,
                &SdkCommand::CloseScreen,
            ]
        );
        assert_eq!(session.phase(), SessionPhase::Closed);

        assert!(session.handle(SessionEvent::Close).unwrap().is_empty());
        assert!(session
            .handle(SessionEvent::Sdk(SdkEvent::ChannelText { json: "{}".to_string() }))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn denied_permission_ends_the_session() {
        let mut session = Session::new(profile(ClientRole::Broadcaster));
        session
            .handle(SessionEvent::Enter {
                granted: PermissionSet::from_iter([Permission::Storage]),
            })
            .unwrap();

        let denied = PermissionSet::from_iter([Permission::Camera]);
        let actions = session
            .handle(SessionEvent::Sdk(SdkEvent::PermissionResult {
                granted: PermissionSet::from_iter([Permission::Microphone]),
                denied,
            }))
            .unwrap();

        assert_eq!(session.phase(), SessionPhase::Denied);
        assert!(actions.contains(&SessionAction::Update(RoomUpdate::PermissionDenied { denied })));
        assert!(commands(&actions).contains(&&SdkCommand::CloseScreen));

        // No second init is possible from the terminal phase.
        let actions = session
            .handle(SessionEvent::Enter { granted: PermissionSet::all() })
            .unwrap();
        assert!(commands(&actions).is_empty());
    }

    #[test]
    fn messaging_join_failure_is_surfaced_not_swallowed() {
        let mut session = Session::new(profile(ClientRole::Audience));
        session.handle(SessionEvent::Enter { granted: PermissionSet::all() }).unwrap();

        let actions = session
            .handle(SessionEvent::Sdk(SdkEvent::MessagingJoinFailed {
                reason: "timeout".to_string(),
            }))
            .unwrap();

        assert!(actions.iter().any(|action| matches!(
            action,
            SessionAction::Update(RoomUpdate::Error { message }) if message.contains("timeout")
        )));
        assert_eq!(session.phase(), SessionPhase::Initializing);
    }

    #[test]
    fn malformed_channel_text_reports_and_continues() {
        let mut session = ready_session(ClientRole::Audience);

        let actions = session
            .handle(SessionEvent::Sdk(SdkEvent::ChannelText { json: "garbage".to_string() }))
            .unwrap();

        assert!(actions
            .iter()
            .any(|action| matches!(action, SessionAction::Update(RoomUpdate::Error { .. }))));
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn remote_video_state_binds_and_releases_the_stage() {
        let mut session = ready_session(ClientRole::Audience);

        let actions = session
            .handle(SessionEvent::Sdk(SdkEvent::RemoteVideoState { uid: 9, live: true }))
            .unwrap();
        assert_eq!(commands(&actions), vec![&SdkCommand::BindRemoteVideo { uid: 9 }]);

        let actions = session
            .handle(SessionEvent::Sdk(SdkEvent::RemoteVideoState { uid: 9, live: false }))
            .unwrap();
        assert_eq!(commands(&actions), vec![&SdkCommand::ReleaseRemoteVideo { uid: 9 }]);
    }
}
