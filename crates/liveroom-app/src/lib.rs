//! Application layer for Liveroom
//!
//! Pure state machines and generic runtime for UI and session orchestration,
//! enabling deterministic testing with the same code that runs against the
//! real terminal front end.
//!
//! # Components
//!
//! - [`App`]: render state of the room screen (feed, panels, scroll, status)
//! - [`Bridge`]: wraps the session, translating actions and updates
//! - [`Driver`]: trait the platform front ends implement for I/O
//! - [`Runtime`]: the event loop tying the three together

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::Bridge;
pub use driver::{Driver, SDK_QUEUE_CAPACITY, sdk_channel};
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{RoomPanels, StageView};
