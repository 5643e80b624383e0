//! Engine configuration
//!
//! Consolidates the tunable parameters of the simulation engine behind a
//! single structure validated before the runtime starts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ----------------------------------------------------------------------------
// Channel Configuration
// ----------------------------------------------------------------------------

/// Buffer sizing for the command channel
///
/// The app-event side is unbounded, see
/// [`create_app_event_channel`](crate::message::create_app_event_channel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Buffer size for the Command channel (GUI → engine)
    pub command_buffer_size: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 32, // GUI commands are infrequent
        }
    }
}

impl ChannelConfig {
    /// Create configuration optimized for testing
    pub fn testing() -> Self {
        Self {
            command_buffer_size: 100,
        }
    }
}

// ----------------------------------------------------------------------------
// Simulation Configuration
// ----------------------------------------------------------------------------

/// Configuration for the simulation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Rows of the grid created on engine construction
    pub initial_rows: usize,
    /// Columns of the grid created on engine construction
    pub initial_cols: usize,
    /// Time between autonomous steps (inverse of generations/second)
    pub tick_period: Duration,
    /// Channel buffer sizing
    pub channels: ChannelConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_rows: 10,
            initial_cols: 10,
            tick_period: Duration::from_secs(1), // one generation per second
            channels: ChannelConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Create configuration optimized for testing: small fast grid, generous
    /// channel buffers.
    pub fn testing() -> Self {
        Self {
            initial_rows: 5,
            initial_cols: 5,
            tick_period: Duration::from_millis(10),
            channels: ChannelConfig::testing(),
        }
    }

    /// Validate the configuration, returning a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_rows == 0 || self.initial_cols == 0 {
            return Err(format!(
                "initial grid size {}x{} is invalid: both dimensions must be positive",
                self.initial_rows, self.initial_cols
            ));
        }
        if self.tick_period.is_zero() {
            return Err("tick period must be greater than zero".to_string());
        }
        if self.channels.command_buffer_size == 0 {
            return Err("command buffer size must be greater than zero".to_string());
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
