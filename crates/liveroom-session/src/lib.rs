//! Session
//!
//! Action-based session state machine for a live room client. Manages the
//! permission-gated bootstrap, the messaging and media channel lifecycle,
//! camera capture, and decoding of channel signal payloads.
//!
//! # Architecture
//!
//! The session follows the Sans-IO, action-based pattern used across the
//! workspace. It receives events ([`SessionEvent`]), processes them through
//! pure state machine logic, and returns actions ([`SessionAction`]) for the
//! caller to execute: SDK commands to issue and room updates to display.
//!
//! # Components
//!
//! - [`Session`]: Bootstrap/teardown state machine for one room visit
//! - [`SessionEvent`] / [`SessionAction`]: The machine's inputs and outputs
//! - [`PermissionSet`]: Device permissions gating the bootstrap
//! - [`signal`]: JSON payloads carried by the messaging channel

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod event;
mod permission;
mod session;
pub mod signal;

pub use error::SessionError;
pub use event::{RoomUpdate, SdkCommand, SdkEvent, SessionAction, SessionEvent};
pub use permission::{Permission, PermissionSet};
pub use session::{CaptureState, RoomProfile, Session, SessionPhase};
pub use signal::{ChannelMessage, SignalError};
