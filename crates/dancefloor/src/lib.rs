//! # Dance floor
//!
//! Real-time relay server for a shared virtual dance floor.
//!
//! Every connected client (a "dancer") streams its own moves and moods;
//! the server relays each one to every *other* dancer, replays the floor's
//! current state to newcomers, and announces arrivals and departures.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dancefloor::prelude::*;
//!
//! # async fn run() -> Result<(), DanceFloorError> {
//! let server = DanceFloorServer::builder()
//!     .config(ServerConfig::from_env())
//!     .build(TracingSink)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_COMMAND_BUFFER, ServerConfig};
pub use error::DanceFloorError;
pub use server::{DanceFloorServer, DanceFloorServerBuilder};

/// Everything needed to run a server or write a client in one import.
pub mod prelude {
    pub use crate::{DanceFloorError, DanceFloorServer, DanceFloorServerBuilder, ServerConfig};
    pub use dancefloor_floor::{DancerState, FloorConfig, FloorError, FloorHandle, FloorSnapshot};
    pub use dancefloor_protocol::{
        Command, DancerId, Frame, Message, Mood, Position, ProtocolError,
    };
    pub use dancefloor_session::{
        Action, ConnectionInfo, DiagnosticEvent, DiagnosticSink, SessionError, TracingSink,
    };
}
