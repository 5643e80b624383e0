//! lifegrid core
//!
//! Domain model for a Conway's Game of Life simulator embedded in a desktop
//! GUI: the grid state container, the pure transition rule, preset
//! persistence, and the typed command/notification protocol the GUI shell
//! speaks with the engine. The orchestration (controller, engine task, tick
//! scheduler) lives in the `lifegrid-runtime` crate.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod config;
pub mod errors;
pub mod grid;
pub mod message;
pub mod preset;
pub mod rules;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use config::{ChannelConfig, SimulationConfig};
pub use errors::{ControlError, GridError, LifeError, PresetError, Result};
pub use grid::{CellState, Grid, Position};
pub use message::{
    create_app_event_channel, create_command_channel, AppEvent, AppEventReceiver, AppEventSender,
    Command, CommandReceiver, CommandSender, StopReason,
};
pub use preset::{FsPresetStore, GridSnapshot, MemPresetStore, PresetStore};
pub use rules::StepDelta;
