//! Property-based tests for the App state machine.
//!
//! Tests verify that the feed, scroll, and render invariants hold under
//! arbitrary event sequences.

use liveroom_app::{App, AppAction, AppEvent};
use liveroom_core::{ClientRole, FeedMessage, MessageFeed, Presence};
use liveroom_session::RoomUpdate;
use proptest::prelude::*;

/// Strategy over the app's whole event vocabulary, weighted toward feed
/// traffic.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        1 => Just(AppEvent::Tick),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        4 => ("[a-z]{1,6}", "[a-z ]{0,20}").prop_map(|(author, text)| {
            AppEvent::Update(RoomUpdate::Feed(FeedMessage::Chat { author, text }))
        }),
        1 => "[a-z]{1,6}".prop_map(|nickname| {
            AppEvent::Update(RoomUpdate::Feed(FeedMessage::System {
                nickname,
                presence: Presence::Joined,
            }))
        }),
        1 => (0u32..500).prop_map(|count| AppEvent::Update(RoomUpdate::MemberCount { count })),
        1 => (1u64..20, any::<bool>()).prop_map(|(uid, live)| {
            AppEvent::Update(RoomUpdate::StageChanged { uid, live })
        }),
        1 => any::<bool>().prop_map(|active| AppEvent::CaptureChanged { active }),
        1 => Just(AppEvent::Error { message: "boom".to_string() }),
    ]
}

/// User scroll gestures interleaved with events.
#[derive(Debug, Clone)]
enum Step {
    Event(AppEvent),
    ScrollUp,
    ScrollDown,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => event_strategy().prop_map(Step::Event),
        1 => Just(Step::ScrollUp),
        1 => Just(Step::ScrollDown),
    ]
}

fn new_app() -> App {
    App::new("prop".into(), "probe".into(), ClientRole::Audience)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_feed_never_exceeds_capacity(
        events in prop::collection::vec(event_strategy(), 0..200),
    ) {
        let mut app = new_app();

        for event in events {
            let _ = app.handle(event);
            prop_assert!(app.feed().len() <= MessageFeed::CAPACITY);
        }
    }

    #[test]
    fn prop_every_state_change_renders(
        events in prop::collection::vec(event_strategy(), 0..50),
    ) {
        let mut app = new_app();

        for event in events {
            let is_tick = matches!(event, AppEvent::Tick);
            let actions = app.handle(event);
            if is_tick {
                prop_assert!(actions.is_empty());
            } else {
                prop_assert_eq!(actions, vec![AppAction::Render]);
            }
        }
    }

    #[test]
    fn prop_scroll_offset_stays_inside_the_feed(
        steps in prop::collection::vec(step_strategy(), 0..120),
    ) {
        let mut app = new_app();

        for step in steps {
            match step {
                Step::Event(event) => {
                    let _ = app.handle(event);
                },
                Step::ScrollUp => {
                    let _ = app.scroll_up();
                },
                Step::ScrollDown => {
                    let _ = app.scroll_down();
                },
            }

            if let Some(offset) = app.scroll_offset() {
                prop_assert!(offset <= app.feed().len().saturating_sub(1));
            }
        }
    }

    #[test]
    fn prop_appends_always_snap_to_tail(
        prefix in prop::collection::vec(step_strategy(), 0..40),
        author in "[a-z]{1,6}",
    ) {
        let mut app = new_app();
        for step in prefix {
            match step {
                Step::Event(event) => {
                    let _ = app.handle(event);
                },
                Step::ScrollUp => {
                    let _ = app.scroll_up();
                },
                Step::ScrollDown => {
                    let _ = app.scroll_down();
                },
            }
        }

        let _ = app.handle(AppEvent::Update(RoomUpdate::Feed(FeedMessage::Chat {
            author,
            text: "latest".to_string(),
        })));

        prop_assert_eq!(app.scroll_offset(), None);
    }
}
