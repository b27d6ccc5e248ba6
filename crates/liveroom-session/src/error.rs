//! Error types for the session state machine.
//!
//! Intents rejected by the machine return typed errors rather than being
//! silently dropped; callers surface them as status updates. SDK callbacks
//! never error — late or unexpected callbacks are ignored by the machine.

use thiserror::Error;

use crate::{SessionPhase, signal::SignalError};

/// Errors produced by [`crate::Session::handle`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Intent is not valid in the current phase
    #[error("cannot {operation} while {phase:?}")]
    InvalidPhase {
        /// Phase the session was in when the intent arrived
        phase: SessionPhase,
        /// Intent that was attempted
        operation: &'static str,
    },

    /// Intent requires the broadcaster role
    #[error("audience role cannot {operation}")]
    NotBroadcaster {
        /// Intent that was attempted
        operation: &'static str,
    },

    /// Outbound channel payload could not be encoded
    #[error(transparent)]
    Signal(#[from] SignalError),
}
