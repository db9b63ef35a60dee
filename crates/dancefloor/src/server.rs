//! `DanceFloorServer` builder and accept loop.
//!
//! This is the entry point for running a dance floor. It ties together all
//! the layers: transport → protocol → session → floor.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dancefloor_floor::{FloorConfig, FloorHandle, spawn_floor};
use dancefloor_protocol::DancerId;
use dancefloor_session::DiagnosticSink;
use dancefloor_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::{DanceFloorError, ServerConfig};

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The floor
/// handle is itself a channel sender, so no lock is needed here.
pub(crate) struct ServerState<D: DiagnosticSink> {
    pub(crate) floor: FloorHandle,
    pub(crate) diagnostics: Arc<D>,
    next_dancer: AtomicU64,
}

impl<D: DiagnosticSink> ServerState<D> {
    /// Hands out the next dancer id. Ids start at 0 and are never reused.
    pub(crate) fn next_dancer_id(&self) -> DancerId {
        DancerId(self.next_dancer.fetch_add(1, Ordering::Relaxed))
    }
}

/// Builder for configuring and starting a dance floor server.
///
/// # Example
///
/// ```rust,no_run
/// use dancefloor::prelude::*;
///
/// # async fn run() -> Result<(), DanceFloorError> {
/// let server = DanceFloorServer::builder()
///     .bind("0.0.0.0:1337")
///     .build(TracingSink)
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct DanceFloorServerBuilder {
    config: ServerConfig,
}

impl DanceFloorServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the floor configuration.
    pub fn floor_config(mut self, config: FloorConfig) -> Self {
        self.config.floor = config;
        self
    }

    /// Binds the listener, opens the floor, and returns a server ready to
    /// [`run`](DanceFloorServer::run).
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn build<D: DiagnosticSink>(
        self,
        diagnostics: D,
    ) -> Result<DanceFloorServer<D>, DanceFloorError> {
        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            floor: spawn_floor(&self.config.floor),
            diagnostics: Arc::new(diagnostics),
            next_dancer: AtomicU64::new(0),
        });

        Ok(DanceFloorServer { transport, state })
    }
}

impl Default for DanceFloorServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A dance floor server.
///
/// Call [`run()`](Self::run) to start accepting dancers.
pub struct DanceFloorServer<D: DiagnosticSink> {
    transport: WebSocketTransport,
    state: Arc<ServerState<D>>,
}

impl DanceFloorServer<dancefloor_session::TracingSink> {
    /// Creates a new builder.
    pub fn builder() -> DanceFloorServerBuilder {
        DanceFloorServerBuilder::new()
    }
}

impl<D: DiagnosticSink> DanceFloorServer<D> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, DanceFloorError> {
        self.transport.local_addr().map_err(DanceFloorError::LocalAddr)
    }

    /// Returns a handle to the server's floor.
    pub fn floor(&self) -> FloorHandle {
        self.state.floor.clone()
    }

    /// Runs the accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each
    /// dancer. A failed accept or handshake is logged and skipped. Runs
    /// until the process is terminated.
    pub async fn run(mut self) -> Result<(), DanceFloorError> {
        tracing::info!("dance floor server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
