//! View models for the room screen.
//!
//! [`StageView`] and [`RoomPanels`] hold the subset of session state the
//! renderer needs, without exposing the SDK lifecycle underneath.

use liveroom_core::{OwnerState, PkSnapshot, RankEntry, SeatInfo, Uid};

/// Uids currently publishing video, in order of appearance.
#[derive(Debug, Clone, Default)]
pub struct StageView {
    tiles: Vec<Uid>,
}

impl StageView {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Record a uid going live or dark. Idempotent in both directions.
    pub fn set_live(&mut self, uid: Uid, live: bool) {
        if live {
            if !self.tiles.contains(&uid) {
                self.tiles.push(uid);
            }
        } else {
            self.tiles.retain(|tile| *tile != uid);
        }
    }

    /// Whether the uid is currently publishing.
    pub fn is_live(&self, uid: Uid) -> bool {
        self.tiles.contains(&uid)
    }

    /// All live uids, oldest first.
    pub fn tiles(&self) -> &[Uid] {
        &self.tiles
    }

    /// Number of live uids.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether nobody is publishing.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Side-panel view model: everything shown next to the feed and the stage.
#[derive(Debug, Clone)]
pub struct RoomPanels {
    /// Member count of the messaging channel.
    pub member_count: u32,
    /// Gift rank standings, best first.
    pub rank: Vec<RankEntry>,
    /// Guest seats, in position order.
    pub seats: Vec<SeatInfo>,
    /// Current PK battle, if one is running.
    pub pk: Option<PkSnapshot>,
    /// Media state of the room owner.
    pub owner_state: OwnerState,
}

impl RoomPanels {
    /// Create panels for an empty room.
    pub fn new() -> Self {
        Self {
            member_count: 0,
            rank: Vec::new(),
            seats: Vec::new(),
            pk: None,
            owner_state: OwnerState::Online,
        }
    }
}

impl Default for RoomPanels {
    fn default() -> Self {
        Self::new()
    }
}
