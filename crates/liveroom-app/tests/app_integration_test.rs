//! App and Bridge wired together, without a runtime.
//!
//! These tests pump bridge events into the app by hand, which keeps the
//! assertions close to the state: feed contents, scroll position, and the
//! status line after realistic sequences.

use liveroom_app::{App, AppAction, AppEvent, Bridge};
use liveroom_core::{ClientRole, FeedMessage, MessageFeed};
use liveroom_session::{PermissionSet, RoomProfile, SdkCommand, SdkEvent, SessionPhase};

fn wire(role: ClientRole) -> (App, Bridge) {
    let profile = RoomProfile {
        room_name: "integration".to_string(),
        channel: "int-1".to_string(),
        nickname: "ivy".to_string(),
        uid: 0,
        role,
        beauty_enabled: false,
    };
    let app = App::new(profile.room_name.clone(), profile.nickname.clone(), profile.role);
    let bridge = Bridge::new(profile);
    (app, bridge)
}

fn pump(app: &mut App, events: Vec<AppEvent>) {
    for event in events {
        let _ = app.handle(event);
    }
}

fn enter_live(app: &mut App, bridge: &mut Bridge) {
    let events = bridge.enter(PermissionSet::all());
    pump(app, events);
    let events = bridge.handle_sdk_event(SdkEvent::MessagingJoined);
    pump(app, events);
    let events = bridge.handle_sdk_event(SdkEvent::MediaJoined { uid: 1 });
    pump(app, events);
    assert_eq!(app.phase(), SessionPhase::Ready);
}

fn chat_json(n: usize) -> String {
    format!(r#"{{"type":"chat","from":"user{n}","text":"message {n}"}}"#)
}

#[test]
fn own_chat_echoes_into_the_feed() {
    let (mut app, mut bridge) = wire(ClientRole::Audience);
    enter_live(&mut app, &mut bridge);
    let _ = bridge.take_outgoing();

    let actions = app.send_chat("hello room".to_string());
    for action in actions {
        if matches!(action, AppAction::SendChat { .. }) {
            let events = bridge.process_app_action(action);
            pump(&mut app, events);
        }
    }

    assert_eq!(
        app.feed().latest(),
        Some(&FeedMessage::Chat { author: "ivy".to_string(), text: "hello room".to_string() })
    );
    assert!(bridge
        .take_outgoing()
        .iter()
        .any(|c| matches!(c, SdkCommand::SendChannelMessage { .. })));
}

#[test]
fn feed_stays_bounded_under_channel_load() {
    let (mut app, mut bridge) = wire(ClientRole::Audience);
    enter_live(&mut app, &mut bridge);

    for n in 0..60 {
        let events = bridge.handle_sdk_event(SdkEvent::ChannelText { json: chat_json(n) });
        pump(&mut app, events);
    }

    assert_eq!(app.feed().len(), MessageFeed::CAPACITY);
    // The first ten were evicted; message 10 is now the oldest.
    assert_eq!(
        app.feed().get(0),
        Some(&FeedMessage::Chat { author: "user10".to_string(), text: "message 10".to_string() })
    );
    assert_eq!(
        app.feed().latest(),
        Some(&FeedMessage::Chat { author: "user59".to_string(), text: "message 59".to_string() })
    );
}

#[test]
fn appends_snap_a_scrolled_feed_back_to_the_tail() {
    let (mut app, mut bridge) = wire(ClientRole::Audience);
    enter_live(&mut app, &mut bridge);

    for n in 0..5 {
        let events = bridge.handle_sdk_event(SdkEvent::ChannelText { json: chat_json(n) });
        pump(&mut app, events);
    }
    let _ = app.scroll_up();
    assert_eq!(app.scroll_offset(), Some(1));

    let events = bridge.handle_sdk_event(SdkEvent::ChannelText { json: chat_json(5) });
    pump(&mut app, events);

    assert_eq!(app.scroll_offset(), None);
}

#[test]
fn malformed_channel_payload_reaches_the_status_line() {
    let (mut app, mut bridge) = wire(ClientRole::Audience);
    enter_live(&mut app, &mut bridge);

    let events =
        bridge.handle_sdk_event(SdkEvent::ChannelText { json: "{not json".to_string() });
    pump(&mut app, events);

    assert!(app.status_message().is_some_and(|status| status.starts_with("Error:")));
    assert!(app.feed().is_empty());
}

#[test]
fn stale_callbacks_after_leave_do_not_disturb_the_app() {
    let (mut app, mut bridge) = wire(ClientRole::Audience);
    enter_live(&mut app, &mut bridge);

    let events = bridge.close();
    pump(&mut app, events);
    assert_eq!(app.phase(), SessionPhase::Closed);
    let feed_len = app.feed().len();

    let events = bridge.handle_sdk_event(SdkEvent::MemberJoined { nickname: "late".to_string() });
    assert!(events.is_empty());
    pump(&mut app, events);
    assert_eq!(app.feed().len(), feed_len);
}

#[test]
fn presence_and_count_updates_flow_through() {
    let (mut app, mut bridge) = wire(ClientRole::Audience);
    enter_live(&mut app, &mut bridge);

    let events = bridge.handle_sdk_event(SdkEvent::MemberJoined { nickname: "rem".to_string() });
    pump(&mut app, events);
    let events = bridge.handle_sdk_event(SdkEvent::MemberCount { count: 41 });
    pump(&mut app, events);

    assert!(matches!(app.feed().latest(), Some(FeedMessage::System { .. })));
    assert_eq!(app.panels().member_count, 41);
}
