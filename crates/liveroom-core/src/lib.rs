//! Core domain types for the liveroom client stack.
//!
//! Defines the vocabulary shared by every layer: the bounded message feed,
//! the feed message variants, the gift catalog, and the pure mapping from
//! feed messages to framework-independent render rows.
//!
//! # Components
//!
//! - [`MessageFeed`]: Bounded, append-only feed with oldest-first eviction
//! - [`FeedMessage`]: Tagged message variants (system / chat / gift)
//! - [`GiftId`]: Index into the static gift catalog
//! - [`render_row`]: Pure mapping from a feed message to styled segments

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod feed;
mod gift;
mod message;
mod render;
mod room;

pub use feed::MessageFeed;
pub use gift::{GIFT_CATALOG, GiftId, GiftInfo, UNKNOWN_GIFT_ICON};
pub use message::{FeedMessage, Presence};
pub use render::{Emphasis, RenderRow, RowKind, Segment, render_row};
pub use room::{
    ClientRole, OwnerState, PkSnapshot, RankEntry, SeatInfo, SeatOccupant, SeatState, Uid,
};
