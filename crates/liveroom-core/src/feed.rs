//! Bounded message feed.
//!
//! The feed is an append-only window over the newest room messages. It is
//! owned by the UI state machine and mutated from a single task; there is no
//! interior mutability and no locking.

use std::collections::VecDeque;

use crate::FeedMessage;

/// Append-only feed holding the newest [`MessageFeed::CAPACITY`] messages.
///
/// Appending at capacity evicts the oldest entry so the window always covers
/// the latest messages. Ordering is insertion order; entries are immutable
/// once pushed and destroyed only by eviction.
#[derive(Debug, Clone)]
pub struct MessageFeed {
    items: VecDeque<FeedMessage>,
}

impl MessageFeed {
    /// Maximum number of retained messages.
    pub const CAPACITY: usize = 50;

    /// Create an empty feed.
    pub fn new() -> Self {
        Self { items: VecDeque::with_capacity(Self::CAPACITY) }
    }

    /// Append a message, evicting the oldest entry when full.
    pub fn push(&mut self, message: FeedMessage) {
        if self.items.len() == Self::CAPACITY {
            self.items.pop_front();
        }
        self.items.push_back(message);
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no messages are retained.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Message at `index`, oldest first. `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&FeedMessage> {
        self.items.get(index)
    }

    /// Most recently appended message. `None` if empty.
    pub fn latest(&self) -> Option<&FeedMessage> {
        self.items.back()
    }

    /// Iterate retained messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FeedMessage> {
        self.items.iter()
    }
}

impl Default for MessageFeed {
    fn default() -> Self {
        Self::new()
    }
}
