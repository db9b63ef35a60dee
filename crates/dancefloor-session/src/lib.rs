//! Dancer session management for the dance floor relay.
//!
//! This crate handles the lifecycle of one connection on the floor:
//!
//! 1. **Join**: put the dancer on the floor and replay who's already there
//! 2. **Receive**: parse each inbound frame and publish it, or report it
//!    as invalid through a [`DiagnosticSink`]
//! 3. **Leave**: take the dancer off the floor and tell everyone
//!
//! # How it fits in the stack
//!
//! ```text
//! Server / handler (above)  ← owns the socket, drives the session
//!     ↕
//! Session layer (this crate)  ← per-connection lifecycle + diagnostics
//!     ↕
//! Floor (below)  ← registry and fan-out
//! ```

mod diagnostics;
mod error;
mod session;

pub use diagnostics::{
    Action, ConnectionInfo, DiagnosticEvent, DiagnosticSink, TracingSink,
};
pub use error::SessionError;
pub use session::{Session, SessionState};
