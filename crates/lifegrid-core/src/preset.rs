//! Preset persistence
//!
//! A preset is a named snapshot of the grid dimensions plus its 0/1 cell
//! contents, one snapshot per storage unit. The storage backend is
//! injectable behind [`PresetStore`]: the application uses the filesystem
//! store, tests and embedders can use the in-memory store.

use crate::errors::PresetError;
use crate::grid::{CellState, Grid, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// File extension used by the filesystem store
pub const PRESET_EXTENSION: &str = "preset";

// ----------------------------------------------------------------------------
// Name Validation
// ----------------------------------------------------------------------------

/// Validate a preset name: non-empty, ASCII letters, digits, `.` and `_`
/// only, with at most one `.`.
pub fn validate_name(name: &str) -> Result<(), PresetError> {
    if name.is_empty() {
        return Err(PresetError::invalid_name(name, "name is empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
    {
        return Err(PresetError::invalid_name(
            name,
            "only letters, digits, '.' and '_' are allowed",
        ));
    }
    if name.matches('.').count() > 1 {
        return Err(PresetError::invalid_name(name, "at most one '.' is allowed"));
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Grid Snapshot
// ----------------------------------------------------------------------------

/// Serialized grid contents: dimensions plus rows of 0/1 cell values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<u8>>,
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        let cells = (0..grid.rows())
            .map(|row| {
                (0..grid.cols())
                    .map(|col| match grid.cell(row, col) {
                        Some(state) if state.is_alive() => 1,
                        _ => 0,
                    })
                    .collect()
            })
            .collect();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells,
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = PresetError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let mut grid =
            Grid::new(snapshot.rows, snapshot.cols).map_err(|err| PresetError::CorruptSnapshot {
                reason: err.to_string(),
            })?;
        if snapshot.cells.len() != snapshot.rows {
            return Err(PresetError::CorruptSnapshot {
                reason: format!(
                    "expected {} rows, found {}",
                    snapshot.rows,
                    snapshot.cells.len()
                ),
            });
        }
        for (row, values) in snapshot.cells.iter().enumerate() {
            if values.len() != snapshot.cols {
                return Err(PresetError::CorruptSnapshot {
                    reason: format!(
                        "row {} has {} columns, expected {}",
                        row,
                        values.len(),
                        snapshot.cols
                    ),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let state = match value {
                    0 => CellState::Dead,
                    1 => CellState::Alive,
                    other => {
                        return Err(PresetError::CorruptSnapshot {
                            reason: format!("cell ({row}, {col}) holds invalid value {other}"),
                        })
                    }
                };
                // In bounds by construction of the fresh grid.
                let _ = grid.set(Position::new(row, col), state);
            }
        }
        Ok(grid)
    }
}

// ----------------------------------------------------------------------------
// Preset Store Trait
// ----------------------------------------------------------------------------

/// Named snapshot storage
///
/// A validated name uniquely identifies one stored snapshot; overwriting
/// requires an explicit `remove` first.
pub trait PresetStore: Send + Sync {
    /// Persist the grid under `name`. Fails with `InvalidName` on a malformed
    /// name and `AlreadyExists` when the name is taken.
    fn save(&self, name: &str, grid: &Grid) -> Result<(), PresetError>;

    /// Reconstruct the grid stored under `name`, size and every cell state.
    fn load(&self, name: &str) -> Result<Grid, PresetError>;

    /// Delete the snapshot stored under `name`.
    fn remove(&self, name: &str) -> Result<(), PresetError>;

    /// Enumerate stored names; order is not guaranteed.
    fn list(&self) -> Result<Vec<String>, PresetError>;
}

// ----------------------------------------------------------------------------
// Filesystem Store
// ----------------------------------------------------------------------------

/// Filesystem-backed store: one bincode-encoded file per preset
pub struct FsPresetStore {
    dir: PathBuf,
}

impl FsPresetStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PresetError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{PRESET_EXTENSION}"))
    }
}

impl PresetStore for FsPresetStore {
    fn save(&self, name: &str, grid: &Grid) -> Result<(), PresetError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if path.exists() {
            return Err(PresetError::AlreadyExists {
                name: name.to_string(),
            });
        }
        let bytes = bincode::serialize(&GridSnapshot::from(grid))?;
        fs::write(&path, bytes)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Grid, PresetError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(PresetError::NotFound {
                name: name.to_string(),
            });
        }
        let snapshot: GridSnapshot = bincode::deserialize(&fs::read(&path)?)?;
        Grid::try_from(snapshot)
    }

    fn remove(&self, name: &str) -> Result<(), PresetError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(PresetError::NotFound {
                name: name.to_string(),
            });
        }
        fs::remove_file(&path)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, PresetError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        Ok(names)
    }
}

// ----------------------------------------------------------------------------
// In-Memory Store
// ----------------------------------------------------------------------------

/// In-memory store for tests and embedding
#[derive(Default)]
pub struct MemPresetStore {
    entries: Mutex<HashMap<String, GridSnapshot>>,
}

impl MemPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemPresetStore {
    fn save(&self, name: &str, grid: &Grid) -> Result<(), PresetError> {
        validate_name(name)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(name) {
            return Err(PresetError::AlreadyExists {
                name: name.to_string(),
            });
        }
        entries.insert(name.to_string(), GridSnapshot::from(grid));
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Grid, PresetError> {
        validate_name(name)?;
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = entries.get(name).cloned().ok_or_else(|| PresetError::NotFound {
            name: name.to_string(),
        })?;
        Grid::try_from(snapshot)
    }

    fn remove(&self, name: &str) -> Result<(), PresetError> {
        validate_name(name)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(name).is_none() {
            return Err(PresetError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, PresetError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
