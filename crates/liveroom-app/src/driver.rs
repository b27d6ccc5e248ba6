//! Driver trait for abstracting SDK and input operations.
//!
//! A [`Driver`] is the runtime's only window onto the platform: input
//! arrives through it, render calls go out through it, and SDK commands
//! cross it. Keeping that surface behind a trait lets the terminal front
//! end and the test drivers share [`crate::Runtime`] unchanged.
//!
//! The module also defines the queue that marshals SDK callbacks onto the
//! runtime's single consumer: SDKs fire callbacks from their own threads, so
//! drivers forward them into [`sdk_channel`] and the runtime drains the
//! receiving end in its loop. All session and app state is touched from that
//! one consumer only; nothing in this crate needs a lock.

use std::future::Future;

use liveroom_session::{PermissionSet, SdkCommand, SdkEvent};
use tokio::sync::mpsc;

use crate::{App, AppAction};

/// Capacity of the SDK callback queue.
///
/// Generous for a single room; if producers ever outpace the consumer by
/// this much, backpressure on the SDK threads is the right failure mode.
pub const SDK_QUEUE_CAPACITY: usize = 256;

/// Create the queue that marshals SDK callbacks to the runtime.
///
/// The sender side is cloneable and handed to every SDK callback source;
/// the receiver belongs to the driver's [`Driver::next_sdk_event`].
pub fn sdk_channel() -> (mpsc::Sender<SdkEvent>, mpsc::Receiver<SdkEvent>) {
    mpsc::channel(SDK_QUEUE_CAPACITY)
}

/// Platform I/O surface for one room visit.
///
/// The runtime calls these methods and nothing else, so a driver built on
/// scripted inputs exercises the exact loop the production TUI runs.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, an in-process simulated SDK
/// - **Tests**: scripted inputs and a recorded command log
pub trait Driver: Send {
    /// Error produced by this driver's I/O.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event and translate it into app actions.
    ///
    /// Implementations should return within a bounded time even when idle so
    /// the runtime keeps draining SDK callbacks.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Run one SDK command.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK boundary is gone.
    fn run_command(
        &mut self,
        command: SdkCommand,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Next queued SDK callback, or `None` when nothing is pending.
    ///
    /// Must not block waiting for a callback; the runtime alternates between
    /// input and this queue.
    fn next_sdk_event(&mut self) -> impl Future<Output = Option<SdkEvent>> + Send;

    /// Permissions the platform already granted at startup.
    fn granted_permissions(&self) -> PermissionSet;

    /// Draw the current app state.
    ///
    /// # Errors
    ///
    /// Returns an error if the draw fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the SDK boundary and clean up resources.
    fn stop(&mut self);
}
