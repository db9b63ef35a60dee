//! Unified error type for the dance floor server.

use dancefloor_floor::FloorError;
use dancefloor_protocol::ProtocolError;
use dancefloor_session::SessionError;
use dancefloor_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `dancefloor` crate you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DanceFloorError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (unparseable frame).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session lifecycle error.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The floor refused an operation or is gone.
    #[error(transparent)]
    Floor(#[from] FloorError),

    /// Reading the server's own socket address failed.
    #[error("local address unavailable: {0}")]
    LocalAddr(#[source] std::io::Error),
}
