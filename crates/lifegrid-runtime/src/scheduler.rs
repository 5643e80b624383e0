//! Tick scheduler
//!
//! Background periodic worker that drives the simulation. The scheduler
//! being active is distinct from the controller's running flag: an active
//! scheduler ticks once per period but only advances the simulation while
//! the controller reports `running`. Stopping the scheduler is immediate and
//! final — `stop` returns only after the worker has exited, so no further
//! step can be dispatched; a step already executing completes and is never
//! aborted mid-computation.

use crate::controller::SimulationController;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

// ----------------------------------------------------------------------------
// Tick Scheduler
// ----------------------------------------------------------------------------

/// Periodic worker asking the controller to step at the configured rate
pub struct TickScheduler {
    controller: Arc<Mutex<SimulationController>>,
    shutdown: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(controller: Arc<Mutex<SimulationController>>) -> Self {
        Self {
            controller,
            shutdown: None,
            handle: None,
        }
    }

    /// Whether the background worker is alive
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawn the periodic worker. No-op if already active.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let controller = Arc::clone(&self.controller);
        let handle = tokio::spawn(async move {
            debug!("tick scheduler started");
            loop {
                // Re-read the period every iteration so a SetPeriod takes
                // effect on the next tick without a restart.
                let period = controller.lock().await.period();
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = tokio::time::sleep(period) => {
                        let mut ctrl = controller.lock().await;
                        if ctrl.is_running() {
                            ctrl.step();
                        }
                    }
                }
            }
            debug!("tick scheduler stopped");
        });
        self.shutdown = Some(shutdown_tx);
        self.handle = Some(handle);
    }

    /// Stop the worker and wait for it to exit.
    pub async fn stop(&mut self) {
        let Some(shutdown) = self.shutdown.take() else {
            return;
        };
        let _ = shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        // A dropped scheduler must not leave a worker ticking.
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
