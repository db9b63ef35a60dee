//! The dance floor: broadcast hub and dancer registry.
//!
//! The floor runs as an isolated Tokio task (actor model) that owns the
//! registry of dancers currently connected, their last-known move and
//! mood, and one delivery channel per dancer.
//!
//! # Key types
//!
//! - [`FloorHandle`]: send join/publish/leave commands to the floor
//! - [`DancerSender`]: the per-dancer delivery channel
//! - [`DancerState`]: last-known move and mood, replayed to newcomers
//! - [`FloorSnapshot`]: a read-only copy of the registry
//! - [`FloorConfig`]: floor settings
//!
//! # Guarantees
//!
//! - A published message reaches every other registered dancer, never the
//!   sender itself.
//! - Each dancer sees a given sender's messages in publish order.
//! - A newcomer's replay and its registration are one step: every peer is
//!   replayed exactly once.
//! - After `leave` returns, the dancer receives nothing more.

mod config;
mod error;
mod floor;
mod state;

pub use config::{DEFAULT_COMMAND_BUFFER, FloorConfig};
pub use error::FloorError;
pub use floor::{DancerSender, FloorHandle, spawn_floor};
pub use state::{DancerState, FloorSnapshot};
