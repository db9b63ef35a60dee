//! Diagnostic hook for connection events.
//!
//! Sessions report what happened (a dancer connected, disconnected, or
//! sent something unreadable) to a [`DiagnosticSink`] instead of writing
//! to the console themselves. Production uses [`TracingSink`]; tests plug
//! in a sink that records events in memory and assert on them.

use std::net::{IpAddr, SocketAddr};

use dancefloor_protocol::{DancerId, ProtocolError};
use serde::Serialize;

/// Who a session belongs to, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// The dancer id assigned on accept.
    pub id: DancerId,
    /// Remote address of the connection, when the transport knows it.
    pub addr: Option<SocketAddr>,
}

impl ConnectionInfo {
    /// Creates connection info.
    pub fn new(id: DancerId, addr: Option<SocketAddr>) -> Self {
        Self { id, addr }
    }
}

/// The kind of diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Connect,
    Disconnect,
    InvalidMessage,
}

/// One diagnostic record.
///
/// Serializes to a flat JSON object such as
/// `{"action":"invalidMessage","id":3,"ip":"127.0.0.1","port":51234,"message":"x:1","error":"invalid message: x:1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    pub action: Action,
    pub id: DancerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// The raw text that failed to parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Why it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DiagnosticEvent {
    fn new(action: Action, conn: &ConnectionInfo) -> Self {
        Self {
            action,
            id: conn.id,
            ip: conn.addr.map(|a| a.ip()),
            port: conn.addr.map(|a| a.port()),
            message: None,
            error: None,
        }
    }

    /// A dancer connected.
    pub fn connect(conn: &ConnectionInfo) -> Self {
        Self::new(Action::Connect, conn)
    }

    /// A dancer disconnected.
    pub fn disconnect(conn: &ConnectionInfo) -> Self {
        Self::new(Action::Disconnect, conn)
    }

    /// A dancer sent text that could not be parsed.
    pub fn invalid_message(
        conn: &ConnectionInfo,
        message: &str,
        error: &ProtocolError,
    ) -> Self {
        Self {
            message: Some(message.to_owned()),
            error: Some(error.to_string()),
            ..Self::new(Action::InvalidMessage, conn)
        }
    }
}

/// Receives diagnostic events from sessions.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because one sink is shared by every connection
/// task for the lifetime of the server. `record` is synchronous and
/// should not block.
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Records one event.
    fn record(&self, event: DiagnosticEvent);
}

/// Writes each event as one JSON line through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => tracing::info!(target: "dancefloor::diagnostics", "{line}"),
            Err(e) => tracing::warn!(error = %e, ?event, "unserializable diagnostic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> ConnectionInfo {
        ConnectionInfo::new(DancerId(3), Some("127.0.0.1:51234".parse().unwrap()))
    }

    #[test]
    fn test_connect_event_serializes_flat() {
        let json = serde_json::to_value(DiagnosticEvent::connect(&conn())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "connect",
                "id": 3,
                "ip": "127.0.0.1",
                "port": 51234,
            })
        );
    }

    #[test]
    fn test_invalid_message_event_carries_text_and_reason() {
        let err = ProtocolError::InvalidMessage("x:1".into());
        let event = DiagnosticEvent::invalid_message(&conn(), "x:1", &err);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["action"], "invalidMessage");
        assert_eq!(json["message"], "x:1");
        assert_eq!(json["error"], "invalid message: x:1");
    }

    #[test]
    fn test_event_without_address_omits_ip_and_port() {
        let info = ConnectionInfo::new(DancerId(0), None);
        let json = serde_json::to_value(DiagnosticEvent::disconnect(&info)).unwrap();
        assert_eq!(json, serde_json::json!({ "action": "disconnect", "id": 0 }));
    }
}
