//! Grid - Bounded 2D cell container for the Game of Life.
//!
//! A `Grid` is an immutable value: every update returns a new grid and leaves
//! the original untouched. Cells live in a shared row-major buffer, so cloning
//! a grid (e.g. to hand a snapshot to a renderer) never copies cell data.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default grid height in cells.
pub const DEFAULT_ROWS: usize = 50;

/// Default grid width in cells.
pub const DEFAULT_COLS: usize = 50;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    /// Check if the cell is alive.
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// Opposite state.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }

    /// Numeric representation (1 alive, 0 dead).
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Grid construction and access errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Grid dimensions must be non-zero (got {rows}x{cols})")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Declared {expected:?} grid does not match {found:?} cells")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Rectangular grid of cells, `rows x cols`, fixed at construction.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cells [row * cols + col].
    cells: Arc<[CellState]>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Dead; rows * cols].into(),
        })
    }

    /// Build a grid from rows of 0/1 values. Any non-zero value is alive.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.is_empty() || cols == 0 {
            return Err(GridError::InvalidDimension {
                rows: rows.len(),
                cols,
            });
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|&v| CellState::from(v != 0)));
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells: cells.into(),
        })
    }

    /// Build a grid directly from a row-major cell buffer.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self {
            rows,
            cols,
            cells: cells.into(),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// One row of cells.
    pub fn row(&self, row: usize) -> Option<&[CellState]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    #[inline]
    pub(crate) fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.idx(row, col))
    }

    /// Get the state at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.cells[idx])
    }

    /// Check whether (row, col) is alive. Out-of-bounds cells count as dead.
    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.idx(row, col)].is_alive()
    }

    /// Return a new grid with one cell replaced.
    pub fn with_cell_set(&self, row: usize, col: usize, state: CellState) -> Result<Self, GridError> {
        let idx = self.check_bounds(row, col)?;
        let mut cells = self.cells.to_vec();
        cells[idx] = state;
        Ok(Self::from_cells(self.rows, self.cols, cells))
    }

    /// Return a new grid with one cell flipped.
    pub fn with_cell_toggled(&self, row: usize, col: usize) -> Result<Self, GridError> {
        let current = self.get(row, col)?;
        self.with_cell_set(row, col, current.toggled())
    }

    /// Fresh all-dead grid with the same dimensions.
    pub fn cleared(&self) -> Self {
        Self::from_cells(self.rows, self.cols, vec![CellState::Dead; self.rows * self.cols])
    }

    /// Same-sized grid where each cell is independently alive with
    /// probability `density` (a uniform draw in [0, 1) below `density`).
    pub fn randomized<R: Rng + ?Sized>(&self, density: f64, rng: &mut R) -> Self {
        let cells = (0..self.rows * self.cols)
            .map(|_| CellState::from(rng.r#gen::<f64>() < density))
            .collect();
        Self::from_cells(self.rows, self.cols, cells)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// True when every cell is dead.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| !c.is_alive())
    }

    /// Rows of 0/1 values, e.g. for serialization to a renderer.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.as_u8()).collect())
            .collect()
    }

    /// Check whether two grids share the same cell buffer.
    pub fn shares_cells_with(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_cells(
            DEFAULT_ROWS,
            DEFAULT_COLS,
            vec![CellState::Dead; DEFAULT_ROWS * DEFAULT_COLS],
        )
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }
}

impl Eq for Grid {}

/// Plaintext picture: `O` alive, `.` dead, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                f.write_str(if cell.is_alive() { "O" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serializable view of a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<u8>>,
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            cells: grid.to_rows(),
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let grid = Grid::from_rows(&snapshot.cells)?;
        if grid.dimensions() != (snapshot.rows, snapshot.cols) {
            return Err(GridError::DimensionMismatch {
                expected: (snapshot.rows, snapshot.cols),
                found: grid.dimensions(),
            });
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_dead() {
        let grid = Grid::new(4, 7).unwrap();
        assert_eq!(grid.dimensions(), (4, 7));
        assert_eq!(grid.cells().len(), 28);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Grid::new(0, 5).unwrap_err(),
            GridError::InvalidDimension { rows: 0, cols: 5 }
        );
        assert!(matches!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_default_is_50x50() {
        let grid = Grid::default();
        assert_eq!(grid.dimensions(), (DEFAULT_ROWS, DEFAULT_COLS));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.get(2, 2).unwrap(), CellState::Dead);
        assert_eq!(
            grid.get(3, 0).unwrap_err(),
            GridError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 3
            }
        );
        assert!(grid.get(0, 3).is_err());
    }

    #[test]
    fn test_with_cell_set_leaves_input_untouched() {
        let grid = Grid::new(3, 3).unwrap();
        let updated = grid.with_cell_set(1, 2, CellState::Alive).unwrap();

        assert_eq!(grid.get(1, 2).unwrap(), CellState::Dead);
        assert_eq!(updated.get(1, 2).unwrap(), CellState::Alive);
        assert_eq!(updated.population(), 1);
        assert!(!grid.shares_cells_with(&updated));
    }

    #[test]
    fn test_with_cell_set_out_of_bounds() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(matches!(
            grid.with_cell_set(2, 2, CellState::Alive),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let grid = Grid::new(8, 8).unwrap();
        let snapshot = grid.clone();
        assert!(grid.shares_cells_with(&snapshot));
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[[0u8, 1, 0], [1, 1, 1]]).unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.population(), 4);
        assert_eq!(grid.to_rows(), vec![vec![0, 1, 0], vec![1, 1, 1]]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 1, 0], vec![1, 1]];
        assert_eq!(
            Grid::from_rows(&rows).unwrap_err(),
            GridError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_randomized_extremes() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let grid = Grid::new(20, 30).unwrap();

        assert!(grid.randomized(0.0, &mut rng).is_empty());
        assert_eq!(grid.randomized(1.0, &mut rng).population(), 600);

        let half = grid.randomized(0.5, &mut rng).population();
        assert!(half > 200 && half < 400, "population {}", half);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_rows(&[[1u8, 0], [0, 1]]).unwrap();
        assert_eq!(grid.to_string(), "O.\n.O\n");
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let grid = Grid::from_rows(&[[1u8, 0, 0], [0, 0, 1]]).unwrap();
        let json = serde_json::to_string(&GridSnapshot::from(&grid)).unwrap();
        let snapshot: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(Grid::try_from(snapshot).unwrap(), grid);
    }

    #[test]
    fn test_snapshot_dimension_mismatch() {
        let snapshot = GridSnapshot {
            rows: 3,
            cols: 3,
            cells: vec![vec![0, 1, 0], vec![1, 0, 1]],
        };
        assert_eq!(
            Grid::try_from(snapshot),
            Err(GridError::DimensionMismatch {
                expected: (3, 3),
                found: (2, 3),
            })
        );
    }
}
