//! lifegrid runtime
//!
//! Orchestration for the lifegrid simulator: the [`SimulationController`]
//! that owns all grid mutation, the [`EngineTask`] actor that serializes GUI
//! commands, the [`TickScheduler`] background worker driving autonomous
//! steps, and the [`LifeRuntime`] wiring them into a start/stop lifecycle.
//!
//! The GUI shell interacts with a started runtime through two handles:
//!
//! ```rust,no_run
//! use lifegrid_core::{Command, Position, SimulationConfig};
//! use lifegrid_runtime::LifeRuntime;
//!
//! # #[tokio::main]
//! # async fn main() -> lifegrid_core::Result<()> {
//! let mut runtime = LifeRuntime::new(SimulationConfig::default());
//! runtime.start().await?;
//!
//! let commands = runtime.command_sender().cloned().expect("started");
//! let mut events = runtime.take_app_event_receiver().expect("started");
//!
//! commands
//!     .send(Command::ToggleCell { pos: Position::new(1, 1) })
//!     .await
//!     .ok();
//! if let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//!
//! runtime.stop().await?;
//! # Ok(())
//! # }
//! ```

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod controller;
pub mod engine;
pub mod runtime;
pub mod scheduler;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use controller::{SimulationController, StepOutcome};
pub use engine::EngineTask;
pub use runtime::LifeRuntime;
pub use scheduler::TickScheduler;
