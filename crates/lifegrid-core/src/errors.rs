//! Error types for the lifegrid engine
//!
//! Specific error enums per concern (grid geometry, simulation control,
//! preset storage) unified under the top-level [`LifeError`]. Every error in
//! this taxonomy is recoverable by the caller; nothing here is fatal to the
//! process.

use std::time::Duration;

// ----------------------------------------------------------------------------
// Specific Error Types
// ----------------------------------------------------------------------------

/// Grid geometry and cell access errors
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Invalid grid size {rows}x{cols}: both dimensions must be positive")]
    InvalidSize { rows: usize, cols: usize },
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Simulation control errors
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Invalid tick period {period:?}: must be greater than zero")]
    InvalidPeriod { period: Duration },
}

/// Preset storage errors
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("Invalid preset name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
    #[error("Preset {name:?} already exists")]
    AlreadyExists { name: String },
    #[error("Preset {name:?} not found")]
    NotFound { name: String },
    #[error("Corrupt preset snapshot: {reason}")]
    CorruptSnapshot { reason: String },
    #[error("Preset storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Preset encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

// ----------------------------------------------------------------------------
// Unified Error Type
// ----------------------------------------------------------------------------

/// Top-level error type for the lifegrid engine
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    /// Channel communication error (internal to the engine/scheduler wiring)
    #[error("Channel error: {message}")]
    Channel { message: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

// ----------------------------------------------------------------------------
// Convenience Error Constructors
// ----------------------------------------------------------------------------

impl LifeError {
    /// Create a channel error with a message
    pub fn channel_error<T: Into<String>>(message: T) -> Self {
        LifeError::Channel {
            message: message.into(),
        }
    }

    /// Create a configuration error with a reason
    pub fn config_error<T: Into<String>>(reason: T) -> Self {
        LifeError::Configuration {
            reason: reason.into(),
        }
    }
}

impl PresetError {
    /// Create an invalid name error with a reason
    pub fn invalid_name<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        PresetError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

// ----------------------------------------------------------------------------
// Type Aliases
// ----------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, LifeError>;
pub type LifeResult<T> = Result<T>;
