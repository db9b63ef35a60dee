//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. A
//! `ProtocolError` always means one inbound (or outbound) text frame
//! could not be understood; it never says anything about the health of
//! the connection that carried it.

/// Errors that can occur while parsing wire text.
///
/// All variants carry the offending text so diagnostics can show exactly
/// what the client sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The command token is unknown, or is one clients may not send
    /// (`join` / `leave` are server-generated only).
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// A `move` or `fire` payload did not contain two numeric coordinates.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// A `mood` payload was not an integer in `0..=6`.
    #[error("invalid mood: {0}")]
    InvalidMood(String),

    /// An outbound frame was missing its `<dancerId>:` prefix.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}
