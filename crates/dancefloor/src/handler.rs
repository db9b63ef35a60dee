//! Per-connection handler: join, relay, leave.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Assign a dancer id, create the session, join the floor
//!   2. Spawn a writer task draining the dancer's inbox to the socket
//!   3. Loop: receive text frames → `session.receive`
//!   4. On close or error: `session.leave` exactly once, then close the
//!      socket with a close frame

use std::sync::Arc;

use dancefloor_protocol::Frame;
use dancefloor_session::{ConnectionInfo, DiagnosticSink, Session};
use dancefloor_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::DanceFloorError;
use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<D: DiagnosticSink>(
    conn: WebSocketConnection,
    state: Arc<ServerState<D>>,
) -> Result<(), DanceFloorError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    let dancer = state.next_dancer_id();
    tracing::debug!(%conn_id, %dancer, "handling new connection");

    let mut session = Session::new(
        ConnectionInfo::new(dancer, conn.peer_addr()),
        state.floor.clone(),
        Arc::clone(&state.diagnostics),
    );

    // --- Step 1: Join ---
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    session.join(inbox_tx).await?;

    // --- Step 2: Writer ---
    let writer = tokio::spawn(write_frames(Arc::clone(&conn), inbox_rx));

    // --- Step 3: Read loop ---
    let outcome = read_frames(&conn, &mut session).await;

    // --- Step 4: Leave ---
    let left = session.leave().await;
    writer.abort();
    if let Err(e) = conn.close().await {
        tracing::debug!(%conn_id, error = %e, "close failed, peer already gone");
    }

    tracing::info!(%conn_id, %dancer, "dancer gone");
    outcome?;
    left?;
    Ok(())
}

/// Feeds inbound frames to the session until the peer goes away.
///
/// Returns `Ok` on a clean close or a transport error (both mean the
/// dancer is gone), and `Err` only if the floor stopped answering.
async fn read_frames<D: DiagnosticSink>(
    conn: &WebSocketConnection,
    session: &mut Session<D>,
) -> Result<(), DanceFloorError> {
    let dancer = session.id();
    loop {
        let text = match conn.recv().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(%dancer, "connection closed cleanly");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%dancer, error = %e, "recv error");
                return Ok(());
            }
        };

        session.receive(&text).await?;
    }
}

/// Delivers floor frames to the socket, in order, until the floor drops
/// the dancer's inbox or the socket fails.
async fn write_frames(conn: Arc<WebSocketConnection>, mut inbox: mpsc::UnboundedReceiver<Frame>) {
    while let Some(frame) = inbox.recv().await {
        if let Err(e) = conn.send(&frame.to_string()).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "send failed, stopping writer");
            break;
        }
    }
}
