//! Feed message variants.
//!
//! Messages are immutable once constructed: the feed appends and evicts whole
//! values and never edits them in place. The variant tag is what selects the
//! render shape downstream.

use crate::gift::GiftId;

/// Presence change announced by a system notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Member entered the room.
    Joined,
    /// Member left the room.
    Left,
}

/// One entry in the room message feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMessage {
    /// Join/leave notice rendered from a fixed template.
    System {
        /// Nickname of the member the notice is about.
        nickname: String,
        /// Whether the member joined or left.
        presence: Presence,
    },

    /// Chat line from a member.
    Chat {
        /// Nickname of the sender.
        author: String,
        /// Chat text as typed.
        text: String,
    },

    /// Gift acknowledgment with a catalog icon.
    Gift {
        /// Nickname of the sender.
        author: String,
        /// Catalog index of the gift.
        gift: GiftId,
    },
}
