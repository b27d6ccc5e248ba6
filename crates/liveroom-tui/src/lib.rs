//! Terminal UI for Liveroom
//!
//! A thin shell over [`liveroom_app::Driver`] that provides terminal-specific
//! I/O plus an in-process simulated SDK backend. All orchestration logic
//! lives in the generic [`liveroom_app::Runtime`].
//!
//! This crate only handles terminal rendering and SDK plumbing.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod commands;
mod input;

pub mod sdk;
pub mod terminal;
pub mod ui;

pub use input::InputState;
pub use liveroom_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use sdk::{SdkConfig, SdkHandle, spawn_sdk};
pub use terminal::{TerminalDriver, TerminalError};
