//! Shared room view types.
//!
//! These are the view-model shapes the UI renders; most of them are also the
//! payload shapes carried by the messaging channel and therefore derive
//! serde.

use serde::{Deserialize, Serialize};

/// Media transport user id.
pub type Uid = u64;

/// Role of this client in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    /// Publishes camera and microphone.
    Broadcaster,
    /// Watches and chats only.
    Audience,
}

/// One entry of the gift rank list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    /// Nickname of the ranked member.
    pub nickname: String,
    /// Accumulated gift points.
    pub points: u32,
}

/// Occupancy state of a guest seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatState {
    /// Seat is open for a guest.
    Open,
    /// Seat is occupied.
    Taken,
    /// Seat is locked by the owner.
    Locked,
}

/// Member occupying a guest seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatOccupant {
    /// Media uid of the occupant.
    pub uid: Uid,
    /// Nickname of the occupant.
    pub nickname: String,
    /// True if the occupant's microphone is muted.
    pub muted: bool,
}

/// One guest seat of the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    /// Seat position, 0-based.
    pub index: u8,
    /// Occupancy state.
    pub state: SeatState,
    /// Occupant when `state` is [`SeatState::Taken`].
    pub occupant: Option<SeatOccupant>,
}

/// Live PK battle standing between two rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkSnapshot {
    /// Name of the opposing room.
    pub opponent_room: String,
    /// Points accumulated by this room.
    pub our_points: u32,
    /// Points accumulated by the opposing room.
    pub their_points: u32,
    /// Seconds remaining in the battle.
    pub seconds_left: u32,
}

/// Media state of the room owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerState {
    /// Owner is publishing normally.
    Online,
    /// Owner paused their stream.
    Paused,
    /// Owner disconnected.
    Offline,
}
