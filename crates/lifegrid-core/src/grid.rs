//! Grid state model
//!
//! [`Grid`] is the rectangular cell-state container. It holds only semantic
//! state: rendering objects belong entirely to the GUI layer, which observes
//! per-cell change notifications instead of reaching into the grid.

use crate::errors::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ----------------------------------------------------------------------------
// Cell State and Position
// ----------------------------------------------------------------------------

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Dead => write!(f, "Dead"),
            CellState::Alive => write!(f, "Alive"),
        }
    }
}

/// A (row, column) cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

// ----------------------------------------------------------------------------
// Grid
// ----------------------------------------------------------------------------

/// Rectangular cell-state container
///
/// Invariant: `cells.len() == rows * cols` at all times. A resize rebuilds
/// the backing storage wholesale, so no index computed against the old
/// dimensions survives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid of the given size with every cell dead.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidSize { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Dead; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the position lies within the current bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Cell state at (row, col), or `None` outside the bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Cell state at `pos`; out-of-bounds coordinates are surfaced to the
    /// caller, never clamped.
    pub fn get(&self, pos: Position) -> Result<CellState, GridError> {
        self.cell(pos.row, pos.col)
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Set the cell state at `pos`.
    pub fn set(&mut self, pos: Position, state: CellState) -> Result<(), GridError> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos));
        }
        self.cells[pos.row * self.cols + pos.col] = state;
        Ok(())
    }

    /// Replace the grid with an all-dead grid of the new size.
    ///
    /// Existing content is discarded, not carried over.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidSize { rows, cols });
        }
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![CellState::Dead; rows * cols];
        Ok(())
    }

    /// Set every cell dead, size unchanged.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Iterate over the positions of all live cells, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_alive())
            .map(|(i, _)| Position::new(i / self.cols, i % self.cols))
    }

    /// Number of live cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_alive()).count()
    }

    fn out_of_bounds(&self, pos: Position) -> GridError {
        GridError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
