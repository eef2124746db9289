//! Grid statistics for monitoring.

use serde::{Deserialize, Serialize};

use super::Grid;

/// Population summary of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub rows: usize,
    pub cols: usize,
    pub population: usize,
    /// Fraction of live cells (0.0-1.0).
    pub density: f32,
}

impl GridStats {
    /// Compute statistics from a grid.
    pub fn from_grid(grid: &Grid) -> Self {
        let population = grid.population();
        let total = grid.rows() * grid.cols();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            population,
            density: population as f32 / total as f32,
        }
    }
}
