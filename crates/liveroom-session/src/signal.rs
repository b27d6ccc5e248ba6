//! Messaging channel payloads.
//!
//! The messaging channel carries JSON text; every payload is one tagged
//! [`ChannelMessage`]. Decoding happens inside the session when channel text
//! arrives, so malformed traffic surfaces as an update instead of crashing
//! the consumer.

use liveroom_core::{GiftId, OwnerState, PkSnapshot, RankEntry, SeatInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One payload of the messaging channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelMessage {
    /// Chat line broadcast to the room.
    Chat {
        /// Nickname of the sender.
        from: String,
        /// Chat text.
        text: String,
    },

    /// Gift sent to the room owner.
    Gift {
        /// Nickname of the sender.
        from: String,
        /// Catalog index of the gift.
        gift: GiftId,
    },

    /// Refreshed gift rank standings.
    GiftRank {
        /// Ranked members, best first.
        entries: Vec<RankEntry>,
    },

    /// Full guest seat state of the room.
    SeatState {
        /// All seats, in position order.
        seats: Vec<SeatInfo>,
    },

    /// PK battle standing update.
    Pk(PkSnapshot),

    /// Media state change of the room owner.
    OwnerState {
        /// New owner state.
        state: OwnerState,
    },

    /// Batched join/leave notifications.
    Notification {
        /// Nicknames that entered the room.
        joined: Vec<String>,
        /// Nicknames that left the room.
        left: Vec<String>,
    },
}

/// Errors from channel payload encoding and decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// Payload was not a known channel message
    #[error("malformed channel message: {reason}")]
    Malformed {
        /// Decoder diagnostic
        reason: String,
    },

    /// Message could not be encoded
    #[error("channel message encoding failed: {reason}")]
    Encode {
        /// Encoder diagnostic
        reason: String,
    },
}

/// Decode a messaging channel payload.
pub fn decode(json: &str) -> Result<ChannelMessage, SignalError> {
    serde_json::from_str(json).map_err(|e| SignalError::Malformed { reason: e.to_string() })
}

/// Encode a messaging channel payload.
pub fn encode(message: &ChannelMessage) -> Result<String, SignalError> {
    serde_json::to_string(message).map_err(|e| SignalError::Encode { reason: e.to_string() })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use liveroom_core::{SeatOccupant, SeatState};

    use super::*;

    #[test]
    fn chat_decodes_from_wire_shape() {
        let json = r#"{"type":"chat","from":"mira","text":"hello"}"#;

        let message = decode(json).unwrap();
        assert_eq!(
            message,
            ChannelMessage::Chat { from: "mira".to_string(), text: "hello".to_string() }
        );
    }

    #[test]
    fn gift_carries_catalog_index() {
        let json = r#"{"type":"gift","from":"jon","gift":3}"#;

        let message = decode(json).unwrap();
        assert_eq!(message, ChannelMessage::Gift { from: "jon".to_string(), gift: GiftId(3) });
    }

    #[test]
    fn seat_state_decodes_occupants() {
        let json = r#"{"type":"seat_state","seats":[
            {"index":0,"state":"taken","occupant":{"uid":7,"nickname":"kai","muted":false}},
            {"index":1,"state":"open","occupant":null}
        ]}"#;

        let message = decode(json).unwrap();
        let ChannelMessage::SeatState { seats } = message else {
            panic!("expected seat state");
        };
        assert_eq!(seats.len(), 2);
        assert_eq!(
            seats[0],
            SeatInfo {
                index: 0,
                state: SeatState::Taken,
                occupant: Some(SeatOccupant {
                    uid: 7,
                    nickname: "kai".to_string(),
                    muted: false
                }),
            }
        );
        assert_eq!(seats[1].state, SeatState::Open);
    }

    #[test]
    fn pk_flattens_the_snapshot() {
        let json = r#"{"type":"pk","opponent_room":"arena","our_points":3,"their_points":5,"seconds_left":42}"#;

        let message = decode(json).unwrap();
        assert_eq!(
            message,
            ChannelMessage::Pk(PkSnapshot {
                opponent_room: "arena".to_string(),
                our_points: 3,
                their_points: 5,
                seconds_left: 42,
            })
        );
    }

    #[test]
    fn owner_state_uses_snake_case_tags() {
        let json = r#"{"type":"owner_state","state":"paused"}"#;

        let message = decode(json).unwrap();
        assert_eq!(message, ChannelMessage::OwnerState { state: OwnerState::Paused });
    }

    #[test]
    fn encode_round_trips() {
        let original = ChannelMessage::Notification {
            joined: vec!["a".to_string(), "b".to_string()],
            left: vec!["c".to_string()],
        };

        let json = encode(&original).unwrap();
        assert_eq!(decode(&json).unwrap(), original);
    }

    #[test]
    fn malformed_json_is_an_error_not_a_panic() {
        assert!(matches!(decode("not json"), Err(SignalError::Malformed { .. })));
        assert!(matches!(decode("{}"), Err(SignalError::Malformed { .. })));
        assert!(matches!(
            decode(r#"{"type":"unheard_of","x":1}"#),
            Err(SignalError::Malformed { .. })
        ));
    }
}
