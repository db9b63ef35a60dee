//! Error types for the floor layer.

use dancefloor_protocol::DancerId;

/// Errors that can occur while talking to the floor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FloorError {
    /// The dancer is already registered on the floor.
    #[error("dancer {0} is already on the floor")]
    AlreadyJoined(DancerId),

    /// The dancer is not registered on the floor.
    #[error("dancer {0} is not on the floor")]
    NotJoined(DancerId),

    /// The floor task has stopped; its command channel is closed.
    #[error("dance floor is unavailable")]
    Unavailable,
}
