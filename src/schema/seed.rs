//! Seed types for initializing the session grid.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::compute::{CellState, Grid, GridError, PatternError, PatternSource, stamp};

/// Complete seed specification for the initial grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

/// Initial grid contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// All cells dead.
    #[default]
    Empty,
    /// Uniform random fill.
    Random {
        /// Live-cell probability (0.0-1.0).
        density: f64,
        /// Random seed (None = entropy).
        seed: Option<u64>,
    },
    /// A stamp placed with its top-left corner at (top, left).
    Stamp {
        pattern: PatternSource,
        top: usize,
        left: usize,
    },
    /// Explicit live cells as (row, col); out-of-range entries are ignored.
    Custom { cells: Vec<(usize, usize)> },
}

/// Seed generation errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl Seed {
    /// Generate the initial grid.
    pub fn generate(&self, rows: usize, cols: usize) -> Result<Grid, SeedError> {
        let empty = Grid::new(rows, cols)?;

        let grid = match &self.pattern {
            Pattern::Empty => empty,
            Pattern::Random { density, seed } => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(*s),
                    None => StdRng::from_entropy(),
                };
                empty.randomized(*density, &mut rng)
            }
            Pattern::Stamp { pattern, top, left } => stamp(&empty, *top, *left, &pattern.resolve()?),
            Pattern::Custom { cells } => {
                let mut buffer = empty.cells().to_vec();
                for &(r, c) in cells {
                    if r < rows && c < cols {
                        buffer[r * cols + c] = CellState::Alive;
                    }
                }
                Grid::from_cells(rows, cols, buffer)
            }
        };

        Ok(grid)
    }
}
