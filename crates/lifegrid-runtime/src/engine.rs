//! Engine command task
//!
//! Actor loop that serializes all GUI commands onto the controller. Domain
//! errors are logged and reported back as [`AppEvent::CommandFailed`]; they
//! never terminate the loop. The loop ends on an explicit `Shutdown` command
//! or when the command channel closes.

use crate::controller::SimulationController;
use lifegrid_core::errors::LifeError;
use lifegrid_core::message::{AppEvent, AppEventSender, Command, CommandReceiver};
use lifegrid_core::preset::PresetStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

// ----------------------------------------------------------------------------
// Engine Task
// ----------------------------------------------------------------------------

/// Drains the command channel and dispatches onto the controller and the
/// preset store.
pub struct EngineTask {
    controller: Arc<Mutex<SimulationController>>,
    commands: CommandReceiver,
    events: AppEventSender,
    presets: Box<dyn PresetStore>,
}

impl EngineTask {
    pub fn new(
        controller: Arc<Mutex<SimulationController>>,
        commands: CommandReceiver,
        events: AppEventSender,
        presets: Box<dyn PresetStore>,
    ) -> Self {
        Self {
            controller,
            commands,
            events,
            presets,
        }
    }

    /// Run the command loop until shutdown or channel close.
    pub async fn run(mut self) {
        info!("engine task starting");
        while let Some(command) = self.commands.recv().await {
            if matches!(command, Command::Shutdown) {
                info!("shutdown command received");
                break;
            }
            if let Err(err) = self.dispatch(command).await {
                warn!(%err, "command rejected");
                self.send_event(AppEvent::CommandFailed {
                    description: err.to_string(),
                });
            }
        }
        info!("engine task stopped");
    }

    async fn dispatch(&mut self, command: Command) -> Result<(), LifeError> {
        match command {
            Command::SelectCell { pos } => self.controller.lock().await.select_cell(pos)?,
            Command::UnselectCell { pos } => self.controller.lock().await.unselect_cell(pos)?,
            Command::ToggleCell { pos } => self.controller.lock().await.toggle_cell(pos)?,
            Command::Resize { rows, cols } => self.controller.lock().await.resize(rows, cols)?,
            Command::Reset => self.controller.lock().await.reset(),
            Command::Step => {
                self.controller.lock().await.step();
            }
            Command::SetRunning { running } => self.controller.lock().await.set_running(running),
            Command::SetPeriod { period } => self.controller.lock().await.set_period(period)?,
            Command::SavePreset { name } => {
                let controller = self.controller.lock().await;
                self.presets.save(&name, controller.grid())?;
                drop(controller);
                self.send_event(AppEvent::PresetSaved { name });
            }
            Command::LoadPreset { name } => {
                let grid = self.presets.load(&name)?;
                let (rows, cols) = grid.size();
                let mut controller = self.controller.lock().await;
                // Loading a preset stops the simulation first.
                controller.set_running(false);
                controller.install_grid(grid);
                drop(controller);
                self.send_event(AppEvent::PresetLoaded { name, rows, cols });
            }
            Command::RemovePreset { name } => {
                // Removal failure never fails the caller's overall flow.
                match self.presets.remove(&name) {
                    Ok(()) => self.send_event(AppEvent::PresetRemoved { name }),
                    Err(err) => warn!(%err, %name, "preset removal failed"),
                }
            }
            Command::ListPresets => {
                let names = self.presets.list()?;
                self.send_event(AppEvent::PresetList { names });
            }
            // Intercepted in run() before dispatch.
            Command::Shutdown => {}
        }
        Ok(())
    }

    fn send_event(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            debug!("app event receiver dropped, notification discarded");
        }
    }
}
