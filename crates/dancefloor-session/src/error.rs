//! Error types for the session layer.

use dancefloor_floor::FloorError;
use dancefloor_protocol::DancerId;

use crate::SessionState;

/// Errors that can occur while driving a dancer session.
///
/// Bad input from the client is *not* an error here: it is reported to
/// the diagnostic sink and swallowed. These variants cover misuse of the
/// lifecycle and a floor that stopped answering.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The operation is not allowed in the session's current state, e.g.
    /// receiving before joining or leaving twice.
    #[error("dancer {dancer}: cannot {operation} while {state}")]
    InvalidState {
        dancer: DancerId,
        operation: &'static str,
        state: SessionState,
    },

    /// The floor rejected the operation or is gone.
    #[error(transparent)]
    Floor(#[from] FloorError),
}
