//! Simulation controller
//!
//! [`SimulationController`] is the single mutation authority for the grid.
//! Every state change (cell toggles, resizes, resets, applied generations)
//! goes through it, and every observable change is reported to the GUI shell
//! as an [`AppEvent`]. Concurrent access is serialized by the mutex the
//! runtime wraps around the controller; the controller itself is purely
//! synchronous.

use lifegrid_core::errors::{ControlError, GridError};
use lifegrid_core::grid::{CellState, Grid, Position};
use lifegrid_core::message::{AppEvent, AppEventSender, StopReason};
use lifegrid_core::rules::{self, StepDelta};
use lifegrid_core::SimulationConfig;
use std::time::Duration;
use tracing::{debug, warn};

// ----------------------------------------------------------------------------
// Step Outcome
// ----------------------------------------------------------------------------

/// Result of advancing one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The generation changed cells
    Advanced { born: usize, died: usize },
    /// Zero-change generation: the grid is at a fixed point (or an
    /// oscillation the engine cannot distinguish from stillness)
    Stable,
}

// ----------------------------------------------------------------------------
// Simulation Controller
// ----------------------------------------------------------------------------

/// Owns the grid and the running/period flags; applies the transition rule
/// and emits per-cell and lifecycle notifications.
pub struct SimulationController {
    grid: Grid,
    running: bool,
    period: Duration,
    events: AppEventSender,
}

impl SimulationController {
    /// Create a controller with the configured initial grid, stopped.
    pub fn new(config: &SimulationConfig, events: AppEventSender) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(config.initial_rows, config.initial_cols)?,
            running: false,
            period: config.tick_period,
            events,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whether ticks currently advance the simulation
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time between autonomous steps
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Set a cell alive. Re-selecting an already-alive cell is a warned
    /// no-op, not an error.
    pub fn select_cell(&mut self, pos: Position) -> Result<(), GridError> {
        if self.grid.get(pos)?.is_alive() {
            warn!(%pos, "cell already selected");
            return Ok(());
        }
        self.grid.set(pos, CellState::Alive)?;
        self.notify(AppEvent::CellBorn { pos });
        Ok(())
    }

    /// Set a cell dead. No-op if already dead.
    pub fn unselect_cell(&mut self, pos: Position) -> Result<(), GridError> {
        if !self.grid.get(pos)?.is_alive() {
            return Ok(());
        }
        self.grid.set(pos, CellState::Dead)?;
        self.notify(AppEvent::CellDied { pos });
        Ok(())
    }

    /// Flip a cell based on its current state.
    pub fn toggle_cell(&mut self, pos: Position) -> Result<(), GridError> {
        if self.grid.get(pos)?.is_alive() {
            self.unselect_cell(pos)
        } else {
            self.select_cell(pos)
        }
    }

    /// Replace the grid with an all-dead grid of the new size. Safe to call
    /// regardless of the running state.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), GridError> {
        self.grid.resize(rows, cols)?;
        self.notify(AppEvent::GridResized { rows, cols });
        Ok(())
    }

    /// Set every cell dead, size unchanged. Does not touch the running flag.
    pub fn reset(&mut self) {
        let live: Vec<Position> = self.grid.live_cells().collect();
        self.grid.clear();
        // Per-cell observers track each rectangle individually.
        for pos in live {
            self.notify(AppEvent::CellDied { pos });
        }
        self.notify(AppEvent::GridCleared);
    }

    /// Advance one generation.
    ///
    /// The delta is computed against the full current grid and then applied
    /// all at once. An empty delta means stability: a running simulation
    /// transitions to stopped and the auto-stop notification is emitted.
    /// Stability is a notification, never an error.
    pub fn step(&mut self) -> StepOutcome {
        let delta = rules::compute(&self.grid);
        if delta.is_empty() {
            if self.running {
                self.running = false;
                self.notify(AppEvent::SimulationStopped {
                    reason: StopReason::Stabilized,
                });
            }
            return StepOutcome::Stable;
        }
        let (born, died) = (delta.born.len(), delta.died.len());
        self.apply(&delta);
        StepOutcome::Advanced { born, died }
    }

    /// Start or stop autonomous stepping. Redundant transitions are no-ops.
    pub fn set_running(&mut self, running: bool) {
        if self.running == running {
            return;
        }
        self.running = running;
        if running {
            self.notify(AppEvent::SimulationStarted);
        } else {
            self.notify(AppEvent::SimulationStopped {
                reason: StopReason::UserRequested,
            });
        }
    }

    /// Change the tick period; the scheduler picks it up on the next tick.
    pub fn set_period(&mut self, period: Duration) -> Result<(), ControlError> {
        if period.is_zero() {
            return Err(ControlError::InvalidPeriod { period });
        }
        self.period = period;
        self.notify(AppEvent::PeriodChanged { period });
        Ok(())
    }

    /// Replace the grid wholesale (preset load path), announcing the new
    /// size and every live cell.
    pub fn install_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.notify(AppEvent::GridResized {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
        });
        let live: Vec<Position> = self.grid.live_cells().collect();
        for pos in live {
            self.notify(AppEvent::CellBorn { pos });
        }
    }

    fn apply(&mut self, delta: &StepDelta) {
        for &pos in &delta.died {
            if let Err(err) = self.grid.set(pos, CellState::Dead) {
                debug!(%err, "delta position no longer in bounds, skipped");
                continue;
            }
            self.notify(AppEvent::CellDied { pos });
        }
        for &pos in &delta.born {
            if let Err(err) = self.grid.set(pos, CellState::Alive) {
                debug!(%err, "delta position no longer in bounds, skipped");
                continue;
            }
            self.notify(AppEvent::CellBorn { pos });
        }
    }

    fn notify(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            debug!("app event receiver dropped, notification discarded");
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_core::message::{create_app_event_channel, AppEventReceiver};

    fn controller() -> (SimulationController, AppEventReceiver) {
        let (sender, receiver) = create_app_event_channel();
        let config = SimulationConfig::default();
        (SimulationController::new(&config, sender).unwrap(), receiver)
    }

    fn drain(receiver: &mut AppEventReceiver) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_select_then_get_alive() {
        let (mut ctrl, mut rx) = controller();
        let pos = Position::new(3, 4);
        ctrl.select_cell(pos).unwrap();
        assert!(ctrl.grid().get(pos).unwrap().is_alive());
        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::CellBorn { pos: p }) if p == pos
        ));
    }

    #[test]
    fn test_reselect_is_noop_without_event() {
        let (mut ctrl, mut rx) = controller();
        let pos = Position::new(0, 0);
        ctrl.select_cell(pos).unwrap();
        drain(&mut rx);
        ctrl.select_cell(pos).unwrap();
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_unselect_dead_cell_is_silent_noop() {
        let (mut ctrl, mut rx) = controller();
        ctrl.unselect_cell(Position::new(1, 1)).unwrap();
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let (mut ctrl, mut rx) = controller();
        let pos = Position::new(2, 2);
        ctrl.toggle_cell(pos).unwrap();
        assert!(ctrl.grid().get(pos).unwrap().is_alive());
        ctrl.toggle_cell(pos).unwrap();
        assert!(!ctrl.grid().get(pos).unwrap().is_alive());
        let events = drain(&mut rx);
        assert!(matches!(events[0], AppEvent::CellBorn { .. }));
        assert!(matches!(events[1], AppEvent::CellDied { .. }));
    }

    #[test]
    fn test_out_of_bounds_surfaced() {
        let (mut ctrl, _rx) = controller();
        assert!(matches!(
            ctrl.select_cell(Position::new(100, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_resize_emits_event_and_clears() {
        let (mut ctrl, mut rx) = controller();
        ctrl.select_cell(Position::new(1, 1)).unwrap();
        drain(&mut rx);
        ctrl.resize(4, 6).unwrap();
        assert_eq!(ctrl.grid().size(), (4, 6));
        assert_eq!(ctrl.grid().live_count(), 0);
        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::GridResized { rows: 4, cols: 6 })
        ));
    }

    #[test]
    fn test_reset_reports_each_cleared_cell() {
        let (mut ctrl, mut rx) = controller();
        ctrl.select_cell(Position::new(0, 0)).unwrap();
        ctrl.select_cell(Position::new(2, 3)).unwrap();
        ctrl.set_running(true);
        drain(&mut rx);

        ctrl.reset();
        let events = drain(&mut rx);
        let died = events
            .iter()
            .filter(|e| matches!(e, AppEvent::CellDied { .. }))
            .count();
        assert_eq!(died, 2);
        assert!(matches!(events.last(), Some(AppEvent::GridCleared)));
        // Reset does not change the running state.
        assert!(ctrl.is_running());
    }

    #[test]
    fn test_step_applies_blinker_delta() {
        let (sender, mut rx) = create_app_event_channel();
        let config = SimulationConfig {
            initial_rows: 3,
            initial_cols: 3,
            ..SimulationConfig::default()
        };
        let mut ctrl = SimulationController::new(&config, sender).unwrap();
        for col in 0..3 {
            ctrl.select_cell(Position::new(1, col)).unwrap();
        }
        drain(&mut rx);

        let outcome = ctrl.step();
        assert_eq!(outcome, StepOutcome::Advanced { born: 2, died: 2 });
        let alive: Vec<Position> = ctrl.grid().live_cells().collect();
        assert_eq!(
            alive,
            vec![Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)]
        );
        let events = drain(&mut rx);
        assert_eq!(events.len(), 4); // two births, two deaths
    }

    #[test]
    fn test_stable_step_auto_stops_running_simulation() {
        let (mut ctrl, mut rx) = controller();
        ctrl.set_running(true);
        drain(&mut rx);

        assert_eq!(ctrl.step(), StepOutcome::Stable);
        assert!(!ctrl.is_running());
        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::SimulationStopped {
                reason: StopReason::Stabilized
            })
        ));
    }

    #[test]
    fn test_stable_step_while_stopped_is_quiet() {
        let (mut ctrl, mut rx) = controller();
        assert_eq!(ctrl.step(), StepOutcome::Stable);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_lonely_cell_dies_then_stabilizes() {
        let (mut ctrl, mut rx) = controller();
        ctrl.select_cell(Position::new(5, 5)).unwrap();
        ctrl.set_running(true);
        drain(&mut rx);

        assert!(matches!(ctrl.step(), StepOutcome::Advanced { .. }));
        assert_eq!(ctrl.grid().live_count(), 0);
        assert_eq!(ctrl.step(), StepOutcome::Stable);
        assert!(!ctrl.is_running());
    }

    #[test]
    fn test_set_period_validation() {
        let (mut ctrl, mut rx) = controller();
        assert!(matches!(
            ctrl.set_period(Duration::ZERO),
            Err(ControlError::InvalidPeriod { .. })
        ));
        ctrl.set_period(Duration::from_millis(250)).unwrap();
        assert_eq!(ctrl.period(), Duration::from_millis(250));
        assert!(matches!(
            drain(&mut rx).last(),
            Some(AppEvent::PeriodChanged { .. })
        ));
    }

    #[test]
    fn test_set_running_transitions_only() {
        let (mut ctrl, mut rx) = controller();
        ctrl.set_running(false); // already stopped
        assert!(drain(&mut rx).is_empty());
        ctrl.set_running(true);
        ctrl.set_running(true); // redundant
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AppEvent::SimulationStarted));
    }

    #[test]
    fn test_install_grid_announces_live_cells() {
        let (mut ctrl, mut rx) = controller();
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(Position::new(0, 1), CellState::Alive).unwrap();
        grid.set(Position::new(3, 3), CellState::Alive).unwrap();
        ctrl.install_grid(grid);

        let events = drain(&mut rx);
        assert!(matches!(
            events[0],
            AppEvent::GridResized { rows: 4, cols: 4 }
        ));
        let born = events
            .iter()
            .filter(|e| matches!(e, AppEvent::CellBorn { .. }))
            .count();
        assert_eq!(born, 2);
    }
}
