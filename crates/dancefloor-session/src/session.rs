//! The dancer session: one connection's view of the floor.
//!
//! A session is created when the transport accepts a connection and is
//! driven by the connection handler through three calls:
//!
//! ```text
//!   Accepted ──join()──→ Active ──leave()──→ Left
//!                          │  ↑
//!                          └──┘ receive()
//! ```
//!
//! There is no way back from `Left`.

use std::fmt;
use std::sync::Arc;

use dancefloor_floor::{DancerSender, FloorHandle};
use dancefloor_protocol::{DancerId, Message};

use crate::{ConnectionInfo, DiagnosticEvent, DiagnosticSink, SessionError};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connection accepted, not yet on the floor.
    Accepted,
    /// On the floor, sending and receiving.
    Active,
    /// Off the floor for good.
    Left,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "Accepted"),
            Self::Active => write!(f, "Active"),
            Self::Left => write!(f, "Left"),
        }
    }
}

/// A single dancer's session.
///
/// The session holds only its own identity; what it last did lives in the
/// floor's registry, which it reaches through a [`FloorHandle`].
pub struct Session<D: DiagnosticSink> {
    conn: ConnectionInfo,
    state: SessionState,
    floor: FloorHandle,
    diagnostics: Arc<D>,
}

impl<D: DiagnosticSink> Session<D> {
    /// Creates a session for a freshly accepted connection.
    pub fn new(
        conn: ConnectionInfo,
        floor: FloorHandle,
        diagnostics: Arc<D>,
    ) -> Self {
        Self {
            conn,
            state: SessionState::Accepted,
            floor,
            diagnostics,
        }
    }

    /// Returns the dancer id.
    pub fn id(&self) -> DancerId {
        self.conn.id
    }

    /// Returns the connection info.
    pub fn connection(&self) -> &ConnectionInfo {
        &self.conn
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Puts the dancer on the floor.
    ///
    /// The floor announces `join` to everyone else, sends the dancer its
    /// own `join` and each peer's last move and mood into `sender`, then
    /// starts delivering live frames there. `connect` is recorded once the
    /// floor has accepted the dancer.
    ///
    /// # Errors
    /// - [`SessionError::InvalidState`] unless the session is `Accepted`
    /// - [`SessionError::Floor`] if the floor refuses or is gone
    pub async fn join(&mut self, sender: DancerSender) -> Result<(), SessionError> {
        self.expect_state(SessionState::Accepted, "join")?;

        self.floor.join(self.conn.id, sender).await?;
        self.state = SessionState::Active;
        self.diagnostics.record(DiagnosticEvent::connect(&self.conn));

        tracing::debug!(dancer = %self.conn.id, "session active");
        Ok(())
    }

    /// Handles one inbound text frame.
    ///
    /// A frame that parses is published to the floor (which also records
    /// `move`/`mood` as the dancer's last-known state). A frame that
    /// doesn't is reported as `invalidMessage` and dropped; the connection
    /// stays open either way.
    ///
    /// # Errors
    /// - [`SessionError::InvalidState`] unless the session is `Active`
    /// - [`SessionError::Floor`] if the floor is gone
    pub async fn receive(&mut self, text: &str) -> Result<(), SessionError> {
        self.expect_state(SessionState::Active, "receive")?;

        match Message::parse(text) {
            Ok(message) => {
                self.floor.publish(self.conn.id, message).await?;
            }
            Err(e) => {
                tracing::debug!(dancer = %self.conn.id, error = %e, "dropping invalid message");
                self.diagnostics
                    .record(DiagnosticEvent::invalid_message(&self.conn, text, &e));
            }
        }
        Ok(())
    }

    /// Takes the dancer off the floor.
    ///
    /// Everyone else receives `leave`, the registry entry is removed, and a
    /// `disconnect` event is recorded. The session is `Left` afterwards
    /// even if the floor was already gone.
    ///
    /// # Errors
    /// - [`SessionError::InvalidState`] unless the session is `Active`
    /// - [`SessionError::Floor`] if the floor refuses or is gone
    pub async fn leave(&mut self) -> Result<(), SessionError> {
        self.expect_state(SessionState::Active, "leave")?;

        self.state = SessionState::Left;
        let result = self.floor.leave(self.conn.id).await;
        self.diagnostics
            .record(DiagnosticEvent::disconnect(&self.conn));

        tracing::debug!(dancer = %self.conn.id, "session left");
        result.map_err(SessionError::from)
    }

    fn expect_state(
        &self,
        expected: SessionState,
        operation: &'static str,
    ) -> Result<(), SessionError> {
        if self.state != expected {
            return Err(SessionError::InvalidState {
                dancer: self.conn.id,
                operation,
                state: self.state,
            });
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
