//! Instructions the app hands to the runtime.
//!
//! [`crate::App`] never performs a side effect itself; it returns
//! [`AppAction`] values and the runtime carries them out.

/// One instruction for the runtime: redraw, quit, or act on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Send a chat line to the room.
    SendChat {
        /// Chat text.
        text: String,
    },

    /// Start local capture.
    StartCapture,

    /// Stop local capture.
    StopCapture,

    /// Switch between front and rear cameras.
    SwitchCamera,

    /// Enable or disable the beauty filter.
    SetBeauty {
        /// Whether the filter should be on.
        enabled: bool,
    },

    /// Leave the room and tear the session down.
    LeaveRoom,
}
