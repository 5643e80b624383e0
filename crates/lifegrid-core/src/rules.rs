//! Conway transition rule
//!
//! Pure next-generation computation. [`compute`] reads the grid and produces
//! a [`StepDelta`] describing the cells that change; the caller applies it.
//! Computing the whole generation before applying anything keeps neighbor
//! counts consistent (the classic all-at-once update) and lets the controller
//! detect a zero-change generation before committing.

use crate::grid::{Grid, Position};
use std::collections::BTreeSet;

// ----------------------------------------------------------------------------
// Step Delta
// ----------------------------------------------------------------------------

/// Cells changing state between one generation and the next
///
/// The two sets are disjoint by construction. Produced fresh per generation;
/// callers must not depend on iteration order beyond `BTreeSet` semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepDelta {
    pub born: BTreeSet<Position>,
    pub died: BTreeSet<Position>,
}

impl StepDelta {
    /// True when the generation changes nothing (stability)
    pub fn is_empty(&self) -> bool {
        self.born.is_empty() && self.died.is_empty()
    }

    /// Total number of cells changing state
    pub fn change_count(&self) -> usize {
        self.born.len() + self.died.len()
    }
}

// ----------------------------------------------------------------------------
// Rule
// ----------------------------------------------------------------------------

/// Compute the delta from `grid` to its next generation.
///
/// Moore neighborhood without wraparound: an edge cell counts only its
/// in-bounds neighbors. A live cell survives with 2 or 3 live neighbors; a
/// dead cell with exactly 3 live neighbors is born; everything else is
/// unchanged. Deterministic for a given grid content.
pub fn compute(grid: &Grid) -> StepDelta {
    let mut delta = StepDelta::default();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = Position::new(row, col);
            let alive = grid.cell(row, col).is_some_and(|s| s.is_alive());
            let neighbors = live_neighbors(grid, pos);
            if alive {
                if !(2..=3).contains(&neighbors) {
                    delta.died.insert(pos);
                }
            } else if neighbors == 3 {
                delta.born.insert(pos);
            }
        }
    }
    delta
}

/// Count live cells in the up-to-8 Moore neighborhood that exists in bounds.
fn live_neighbors(grid: &Grid, pos: Position) -> usize {
    let row_start = pos.row.saturating_sub(1);
    let col_start = pos.col.saturating_sub(1);
    let mut count = 0;
    for row in row_start..=(pos.row + 1).min(grid.rows().saturating_sub(1)) {
        for col in col_start..=(pos.col + 1).min(grid.cols().saturating_sub(1)) {
            if row == pos.row && col == pos.col {
                continue;
            }
            if grid.cell(row, col).is_some_and(|s| s.is_alive()) {
                count += 1;
            }
        }
    }
    count
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(row, col) in alive {
            grid.set(Position::new(row, col), CellState::Alive).unwrap();
        }
        grid
    }

    fn positions(cells: &[(usize, usize)]) -> BTreeSet<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_empty_grid_produces_empty_delta() {
        let grid = Grid::new(4, 4).unwrap();
        assert!(compute(&grid).is_empty());
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        let delta = compute(&grid);
        assert_eq!(delta.died, positions(&[(1, 1)]));
        assert!(delta.born.is_empty());
    }

    #[test]
    fn test_birth_on_exactly_three_neighbors() {
        // Three cells in an L around (1, 1).
        let grid = grid_with(3, 3, &[(0, 0), (0, 1), (1, 0)]);
        let delta = compute(&grid);
        assert!(delta.born.contains(&Position::new(1, 1)));
    }

    #[test]
    fn test_overcrowded_cell_dies() {
        // Center of a plus sign has 4 live neighbors.
        let grid = grid_with(3, 3, &[(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)]);
        let delta = compute(&grid);
        assert!(delta.died.contains(&Position::new(1, 1)));
    }

    #[test]
    fn test_edge_cells_count_only_in_bounds_neighbors() {
        // A corner cell with a single live neighbor starves; nothing wraps
        // around from the far edge.
        let grid = grid_with(3, 3, &[(0, 0), (0, 1), (2, 2)]);
        assert_eq!(live_neighbors(&grid, Position::new(0, 0)), 1);
        assert_eq!(live_neighbors(&grid, Position::new(2, 2)), 0);
    }

    #[test]
    fn test_single_row_grid() {
        let grid = grid_with(1, 5, &[(0, 1), (0, 2), (0, 3)]);
        let delta = compute(&grid);
        // Without a second row there is no cell with three neighbors.
        assert!(delta.born.is_empty());
        assert_eq!(delta.died, positions(&[(0, 1), (0, 3)]));
    }

    #[test]
    fn test_deterministic_for_same_content() {
        let grid = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (3, 3)]);
        assert_eq!(compute(&grid), compute(&grid));
    }

    #[test]
    fn test_delta_sets_are_disjoint() {
        let grid = grid_with(4, 4, &[(1, 0), (1, 1), (1, 2), (2, 2)]);
        let delta = compute(&grid);
        assert!(delta.born.is_disjoint(&delta.died));
    }
}
