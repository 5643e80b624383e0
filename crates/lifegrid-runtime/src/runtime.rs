//! Runtime lifecycle
//!
//! [`LifeRuntime`] wires the channels, the controller, the engine task, and
//! the tick scheduler into a start/stop lifecycle the embedding GUI shell
//! drives. The shell keeps the [`CommandSender`] for issuing commands and
//! takes the [`AppEventReceiver`] for consuming notifications.

use crate::controller::SimulationController;
use crate::engine::EngineTask;
use crate::scheduler::TickScheduler;
use lifegrid_core::errors::{LifeError, Result};
use lifegrid_core::message::{
    create_app_event_channel, create_command_channel, AppEventReceiver, Command, CommandSender,
};
use lifegrid_core::preset::{MemPresetStore, PresetStore};
use lifegrid_core::SimulationConfig;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

// ----------------------------------------------------------------------------
// Life Runtime
// ----------------------------------------------------------------------------

/// Coordinates the engine task and the tick scheduler
pub struct LifeRuntime {
    config: SimulationConfig,
    /// Storage backend handed to the engine on start (in-memory by default)
    presets: Option<Box<dyn PresetStore>>,
    controller: Option<Arc<Mutex<SimulationController>>>,
    scheduler: Option<TickScheduler>,
    engine_handle: Option<JoinHandle<()>>,
    command_sender: Option<CommandSender>,
    app_event_receiver: Option<AppEventReceiver>,
    running: bool,
}

impl LifeRuntime {
    /// Create a runtime with the given configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            presets: None,
            controller: None,
            scheduler: None,
            engine_handle: None,
            command_sender: None,
            app_event_receiver: None,
            running: false,
        }
    }

    /// Create a runtime optimized for testing
    pub fn for_testing() -> Self {
        Self::new(SimulationConfig::testing())
    }

    /// Inject a preset storage backend. Defaults to an in-memory store.
    pub fn with_preset_store(mut self, store: Box<dyn PresetStore>) -> Self {
        self.presets = Some(store);
        self
    }

    /// Start the engine task and the tick scheduler.
    pub async fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(LifeError::config_error("runtime already running"));
        }
        self.config
            .validate()
            .map_err(|reason| LifeError::Configuration { reason })?;

        let (command_sender, command_receiver) = create_command_channel(&self.config.channels);
        let (event_sender, app_event_receiver) = create_app_event_channel();

        let controller = Arc::new(Mutex::new(SimulationController::new(
            &self.config,
            event_sender.clone(),
        )?));

        let presets = self
            .presets
            .take()
            .unwrap_or_else(|| Box::new(MemPresetStore::new()));
        let engine = EngineTask::new(
            Arc::clone(&controller),
            command_receiver,
            event_sender,
            presets,
        );
        let engine_handle = tokio::spawn(engine.run());

        let mut scheduler = TickScheduler::new(Arc::clone(&controller));
        scheduler.start();

        self.controller = Some(controller);
        self.scheduler = Some(scheduler);
        self.engine_handle = Some(engine_handle);
        self.command_sender = Some(command_sender);
        self.app_event_receiver = Some(app_event_receiver);
        self.running = true;

        info!(
            rows = self.config.initial_rows,
            cols = self.config.initial_cols,
            period_ms = self.config.tick_period.as_millis() as u64,
            "lifegrid runtime started"
        );
        Ok(())
    }

    /// Stop the runtime: the scheduler first — after its `stop` returns no
    /// further tick can dispatch a step — then the engine task.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.running = false;

        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.stop().await;
        }
        if let Some(sender) = self.command_sender.take() {
            let _ = sender.send(Command::Shutdown).await;
        }
        if let Some(handle) = self.engine_handle.take() {
            let _ = handle.await;
        }
        self.controller = None;
        self.app_event_receiver = None;

        info!("lifegrid runtime stopped");
        Ok(())
    }

    /// Command sender for the GUI shell
    pub fn command_sender(&self) -> Option<&CommandSender> {
        self.command_sender.as_ref()
    }

    /// Take the app event receiver for the GUI shell
    pub fn take_app_event_receiver(&mut self) -> Option<AppEventReceiver> {
        self.app_event_receiver.take()
    }

    /// Shared controller handle for embedders needing synchronous access
    pub fn controller(&self) -> Option<Arc<Mutex<SimulationController>>> {
        self.controller.clone()
    }

    /// Whether the runtime is started
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Drop for LifeRuntime {
    fn drop(&mut self) {
        // The scheduler aborts its worker in its own Drop.
        if let Some(handle) = self.engine_handle.take() {
            handle.abort();
        }
    }
}
