//! Inputs that drive the app.
//!
//! [`AppEvent`] covers both sources feeding [`crate::App`]: terminal
//! happenings (resize, ticks) and session notifications translated by the
//! [`crate::Bridge`].

use liveroom_session::RoomUpdate;

/// One input for [`crate::App::handle`].
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// New terminal size as (columns, rows).
    Resize(u16, u16),

    /// Session state change.
    Update(RoomUpdate),

    /// Local capture started or stopped.
    CaptureChanged {
        /// Whether capture is now running.
        active: bool,
    },

    /// Something failed; the app surfaces it on the status bar.
    Error {
        /// Human-readable description.
        message: String,
    },
}
