//! Server configuration.

use dancefloor_floor::FloorConfig;
use serde::{Deserialize, Serialize};

/// Address the server binds to when nothing else is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:1337";

/// Environment variable overriding [`ServerConfig::bind_addr`].
pub const ENV_BIND_ADDR: &str = "DANCEFLOOR_ADDR";

/// Environment variable overriding [`FloorConfig::command_buffer`].
pub const ENV_COMMAND_BUFFER: &str = "DANCEFLOOR_COMMAND_BUFFER";

/// Configuration for a dance floor server.
///
/// Start from `ServerConfig::default()` (or [`ServerConfig::from_env`])
/// and override the fields you care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub bind_addr: String,

    /// Floor actor settings.
    pub floor: FloorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            floor: FloorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Builds a config from the process environment.
    ///
    /// Reads [`ENV_BIND_ADDR`] and [`ENV_COMMAND_BUFFER`]; anything unset
    /// or unparseable keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup(ENV_BIND_ADDR).filter(|a| !a.trim().is_empty()) {
            config.bind_addr = addr.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_COMMAND_BUFFER) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.floor.command_buffer = n,
                _ => tracing::warn!(
                    key = ENV_COMMAND_BUFFER,
                    value = %raw,
                    "ignoring invalid command buffer size"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:1337");
        assert_eq!(config.floor, FloorConfig::default());
    }

    #[test]
    fn test_from_lookup_empty_keeps_defaults() {
        assert_eq!(ServerConfig::from_lookup(|_| None), ServerConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (ENV_BIND_ADDR, "127.0.0.1:9000"),
            (ENV_COMMAND_BUFFER, "256"),
        ]));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.floor.command_buffer, 256);
    }

    #[test]
    fn test_from_lookup_invalid_buffer_falls_back() {
        for bad in ["0", "-1", "lots"] {
            let config =
                ServerConfig::from_lookup(lookup_from(&[(ENV_COMMAND_BUFFER, bad)]));
            assert_eq!(config.floor.command_buffer, 64, "{bad} should be ignored");
        }
    }

    #[test]
    fn test_from_lookup_blank_addr_falls_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[(ENV_BIND_ADDR, "  ")]));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }
}
