//! Floor configuration.

use serde::{Deserialize, Serialize};

/// Default command channel size for the floor actor.
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

/// Configuration for the floor actor.
///
/// `command_buffer` controls backpressure: once that many commands are
/// queued, callers of [`FloorHandle`](crate::FloorHandle) wait until the
/// floor catches up. Deliveries to dancers are never bounded by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Capacity of the floor's command channel. Must be at least 1.
    pub command_buffer: usize,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_config_default() {
        assert_eq!(FloorConfig::default().command_buffer, 64);
    }
}
