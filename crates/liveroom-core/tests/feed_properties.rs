//! Property-based tests for the message feed.
//!
//! Verifies the feed's bounding and ordering invariants under arbitrary
//! message sequences.

use liveroom_core::{FeedMessage, GiftId, MessageFeed, Presence};
use proptest::prelude::*;

fn message_strategy() -> impl Strategy<Value = FeedMessage> {
    prop_oneof![
        ("[a-z]{1,8}", "[ -~]{0,40}")
            .prop_map(|(author, text)| FeedMessage::Chat { author, text }),
        ("[a-z]{1,8}", 0u8..16)
            .prop_map(|(author, index)| FeedMessage::Gift { author, gift: GiftId(index) }),
        ("[a-z]{1,8}", prop_oneof![Just(Presence::Joined), Just(Presence::Left)])
            .prop_map(|(nickname, presence)| FeedMessage::System { nickname, presence }),
    ]
}

proptest! {
    #[test]
    fn prop_feed_never_exceeds_capacity(
        messages in prop::collection::vec(message_strategy(), 0..200)
    ) {
        let mut feed = MessageFeed::new();
        for message in messages {
            feed.push(message);
            prop_assert!(feed.len() <= MessageFeed::CAPACITY);
        }
    }

    #[test]
    fn prop_short_sequences_keep_insertion_order(
        messages in prop::collection::vec(message_strategy(), 0..50)
    ) {
        let mut feed = MessageFeed::new();
        for message in &messages {
            feed.push(message.clone());
        }

        prop_assert_eq!(feed.len(), messages.len());
        for (index, message) in messages.iter().enumerate() {
            prop_assert_eq!(feed.get(index), Some(message));
        }
    }

    #[test]
    fn prop_overflow_keeps_latest_window(
        messages in prop::collection::vec(message_strategy(), 51..150)
    ) {
        let mut feed = MessageFeed::new();
        for message in &messages {
            feed.push(message.clone());
        }

        prop_assert_eq!(feed.len(), MessageFeed::CAPACITY);

        // The retained window is exactly the newest CAPACITY messages
        let expected = &messages[messages.len() - MessageFeed::CAPACITY..];
        for (index, message) in expected.iter().enumerate() {
            prop_assert_eq!(feed.get(index), Some(message));
        }
    }
}
