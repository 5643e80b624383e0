//! Command/notification protocol between the GUI shell and the engine
//!
//! The GUI shell is an external collaborator: it issues [`Command`]s into the
//! engine and receives [`AppEvent`] state-change notifications back. All
//! traffic across that boundary flows through these message types.

use crate::config::ChannelConfig;
use crate::grid::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

// ----------------------------------------------------------------------------
// Command: GUI/External → Engine
// ----------------------------------------------------------------------------

/// Commands sent from the GUI shell and external systems to the engine task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    /// Set a cell alive
    SelectCell { pos: Position },
    /// Set a cell dead
    UnselectCell { pos: Position },
    /// Flip a cell; the externally observed "click a cell" behavior
    ToggleCell { pos: Position },
    /// Replace the grid with an all-dead grid of the given size
    Resize { rows: usize, cols: usize },
    /// Set every cell dead, size unchanged
    Reset,
    /// Advance a single generation
    Step,
    /// Start or stop autonomous stepping
    SetRunning { running: bool },
    /// Change the tick period; takes effect on the next tick
    SetPeriod { period: Duration },
    /// Persist the current grid under a name
    SavePreset { name: String },
    /// Replace the grid with a stored snapshot
    LoadPreset { name: String },
    /// Delete a stored snapshot
    RemovePreset { name: String },
    /// Enumerate stored snapshot names
    ListPresets,
    /// Shut down the engine task
    Shutdown,
}

// ----------------------------------------------------------------------------
// AppEvent: Engine → GUI
// ----------------------------------------------------------------------------

/// State-change notifications sent from the engine to the GUI shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// A cell became alive
    CellBorn { pos: Position },
    /// A cell became dead
    CellDied { pos: Position },
    /// The grid was replaced with a new all-dead grid
    GridResized { rows: usize, cols: usize },
    /// Every cell was set dead
    GridCleared,
    /// Autonomous stepping started
    SimulationStarted,
    /// Autonomous stepping stopped
    SimulationStopped { reason: StopReason },
    /// The tick period changed
    PeriodChanged { period: Duration },
    /// A preset was persisted
    PresetSaved { name: String },
    /// A preset replaced the grid
    PresetLoaded {
        name: String,
        rows: usize,
        cols: usize,
    },
    /// A preset was deleted
    PresetRemoved { name: String },
    /// Response to `ListPresets`
    PresetList { names: Vec<String> },
    /// A command was rejected; the grid is unchanged
    CommandFailed { description: String },
}

/// Why the simulation left the running state
///
/// Distinguishes the user-initiated transition from the engine-initiated
/// auto-stop on a zero-change generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Explicit stop command from the GUI
    UserRequested,
    /// A generation produced zero changes
    Stabilized,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::UserRequested => write!(f, "user requested"),
            StopReason::Stabilized => write!(f, "stabilized"),
        }
    }
}

// ----------------------------------------------------------------------------
// Channel Constructors
// ----------------------------------------------------------------------------

pub type CommandSender = mpsc::Sender<Command>;
pub type CommandReceiver = mpsc::Receiver<Command>;
pub type AppEventSender = mpsc::UnboundedSender<AppEvent>;
pub type AppEventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Create the Command channel (GUI → engine)
pub fn create_command_channel(config: &ChannelConfig) -> (CommandSender, CommandReceiver) {
    mpsc::channel(config.command_buffer_size)
}

/// Create the AppEvent channel (engine → GUI)
///
/// Unbounded so synchronous mutation paths never block on a slow UI
/// consumer; a step emits at most one event per changed cell.
pub fn create_app_event_channel() -> (AppEventSender, AppEventReceiver) {
    mpsc::unbounded_channel()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(format!("{}", StopReason::Stabilized), "stabilized");
        assert_eq!(format!("{}", StopReason::UserRequested), "user requested");
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::ToggleCell {
            pos: Position::new(2, 5),
        };

        let serialized = bincode::serialize(&cmd).unwrap();
        let deserialized: Command = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Command::ToggleCell { pos } => assert_eq!(pos, Position::new(2, 5)),
            _ => panic!("Wrong command type"),
        }
    }

    #[test]
    fn test_app_event_serialization() {
        let event = AppEvent::SimulationStopped {
            reason: StopReason::Stabilized,
        };

        let serialized = bincode::serialize(&event).unwrap();
        let deserialized: AppEvent = bincode::deserialize(&serialized).unwrap();

        assert!(matches!(
            deserialized,
            AppEvent::SimulationStopped {
                reason: StopReason::Stabilized
            }
        ));
    }
}
