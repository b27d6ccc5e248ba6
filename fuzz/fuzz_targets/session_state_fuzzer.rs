//! Fuzz target for the session state machine
//!
//! # Strategy
//!
//! - Arbitrary event sequences against both roles
//! - Channel payloads: well-formed chat lines and raw garbage
//! - Permission results granted, denied, or mixed, in any phase
//!
//! # Invariants
//!
//! - Terminal phases absorb everything (no commands leak afterwards)
//! - Init commands are issued at most once per session
//! - Audience sessions never drive the capture resource
//! - The handler never panics, whatever the event order

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use liveroom_core::ClientRole;
use liveroom_session::{
    Permission, PermissionSet, RoomProfile, SdkCommand, SdkEvent, Session, SessionAction,
    SessionEvent, SessionPhase,
};

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    broadcaster: bool,
    beauty: bool,
    ops: Vec<SessionOp>,
}

#[derive(Debug, Clone, Arbitrary)]
enum SessionOp {
    Enter { camera: bool, microphone: bool, storage: bool },
    PermissionResult { deny_camera: bool, deny_microphone: bool },
    MessagingJoined,
    MessagingJoinFailed,
    MessagingLeft,
    MediaJoined { uid: u16 },
    MemberJoined { seed: u8 },
    MemberLeft { seed: u8 },
    MemberCount { count: u16 },
    ChannelChat { seed: u8 },
    ChannelGarbage { bytes: Vec<u8> },
    RemoteVideo { uid: u16, live: bool },
    SendChat { seed: u8 },
    StartCapture,
    StopCapture,
    SwitchCamera,
    SetBeauty { enabled: bool },
    Close,
}

fn permission_set(camera: bool, microphone: bool, storage: bool) -> PermissionSet {
    let mut set = PermissionSet::empty();
    if camera {
        set.insert(Permission::Camera);
    }
    if microphone {
        set.insert(Permission::Microphone);
    }
    if storage {
        set.insert(Permission::Storage);
    }
    set
}

fn build_event(op: SessionOp) -> SessionEvent {
    match op {
        SessionOp::Enter { camera, microphone, storage } => {
            SessionEvent::Enter { granted: permission_set(camera, microphone, storage) }
        }
        SessionOp::PermissionResult { deny_camera, deny_microphone } => {
            let denied = permission_set(deny_camera, deny_microphone, false);
            let granted = permission_set(!deny_camera, !deny_microphone, true);
            SessionEvent::Sdk(SdkEvent::PermissionResult { granted, denied })
        }
        SessionOp::MessagingJoined => SessionEvent::Sdk(SdkEvent::MessagingJoined),
        SessionOp::MessagingJoinFailed => SessionEvent::Sdk(SdkEvent::MessagingJoinFailed {
            reason: "fuzzed failure".to_owned(),
        }),
        SessionOp::MessagingLeft => SessionEvent::Sdk(SdkEvent::MessagingLeft),
        SessionOp::MediaJoined { uid } => {
            SessionEvent::Sdk(SdkEvent::MediaJoined { uid: u64::from(uid) })
        }
        SessionOp::MemberJoined { seed } => {
            SessionEvent::Sdk(SdkEvent::MemberJoined { nickname: format!("member{seed}") })
        }
        SessionOp::MemberLeft { seed } => {
            SessionEvent::Sdk(SdkEvent::MemberLeft { nickname: format!("member{seed}") })
        }
        SessionOp::MemberCount { count } => {
            SessionEvent::Sdk(SdkEvent::MemberCount { count: u32::from(count) })
        }
        SessionOp::ChannelChat { seed } => SessionEvent::Sdk(SdkEvent::ChannelText {
            json: format!(r#"{{"type":"chat","from":"member{seed}","text":"line {seed}"}}"#),
        }),
        SessionOp::ChannelGarbage { bytes } => SessionEvent::Sdk(SdkEvent::ChannelText {
            json: String::from_utf8_lossy(&bytes).into_owned(),
        }),
        SessionOp::RemoteVideo { uid, live } => {
            SessionEvent::Sdk(SdkEvent::RemoteVideoState { uid: u64::from(uid), live })
        }
        SessionOp::SendChat { seed } => SessionEvent::SendChat { text: format!("chat {seed}") },
        SessionOp::StartCapture => SessionEvent::StartCapture,
        SessionOp::StopCapture => SessionEvent::StopCapture,
        SessionOp::SwitchCamera => SessionEvent::SwitchCamera,
        SessionOp::SetBeauty { enabled } => SessionEvent::SetBeauty { enabled },
        SessionOp::Close => SessionEvent::Close,
    }
}

fuzz_target!(|input: FuzzInput| {
    let role = if input.broadcaster { ClientRole::Broadcaster } else { ClientRole::Audience };
    let profile = RoomProfile {
        room_name: "fuzz".to_owned(),
        channel: "fuzz".to_owned(),
        nickname: "fuzz".to_owned(),
        uid: 0,
        role,
        beauty_enabled: input.beauty,
    };
    let mut session = Session::new(profile);
    let mut init_commands = 0usize;

    for op in input.ops {
        let was_terminal =
            matches!(session.phase(), SessionPhase::Denied | SessionPhase::Closed);

        let Ok(actions) = session.handle(build_event(op)) else {
            continue;
        };

        for action in &actions {
            if let SessionAction::Command(command) = action {
                if was_terminal {
                    panic!("terminal session issued {command:?}");
                }
                if *command == SdkCommand::InitMessaging {
                    init_commands += 1;
                }
                if role == ClientRole::Audience {
                    assert!(
                        !matches!(
                            command,
                            SdkCommand::StartCapture
                                | SdkCommand::StopCapture
                                | SdkCommand::SwitchCamera
                                | SdkCommand::SetPreProcess { .. }
                        ),
                        "audience session drove the camera: {command:?}"
                    );
                }
            }
        }

        assert!(init_commands <= 1, "init ran more than once");
    }
});
