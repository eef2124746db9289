//! Pattern stamps - fixed templates overlaid onto a grid.
//!
//! Stamping is a direct assignment over the overlapping region: dead template
//! cells overwrite live grid cells. Template cells that fall outside the grid
//! are clipped silently.

use serde::{Deserialize, Serialize};

use super::{CellState, Grid, GridError};

/// Name of the stamp placed by default in placement mode.
pub const DEFAULT_STAMP: &str = "gosper_glider_gun";

/// Built-in patterns in plaintext form (`O` alive, `.` dead).
static LIBRARY: &[(&str, &[&str])] = &[
    (
        "gosper_glider_gun",
        &[
            "........................O...........",
            "......................O.O...........",
            "............OO......OO............OO",
            "...........O...O....OO............OO",
            "OO........O.....O...OO..............",
            "OO........O...O.OO....O.O...........",
            "..........O.....O.......O...........",
            "...........O...O....................",
            "............OO......................",
        ],
    ),
    ("block", &["OO", "OO"]),
    ("beehive", &[".OO.", "O..O", ".OO."]),
    ("blinker", &["OOO"]),
    ("toad", &[".OOO", "OOO."]),
    ("beacon", &["OO..", "OO..", "..OO", "..OO"]),
    ("glider", &[".O.", "..O", "OOO"]),
    ("lwss", &[".O..O", "O....", "O...O", "OOOO."]),
    ("r_pentomino", &[".OO", "OO.", ".O."]),
];

/// Pattern parsing and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Pattern has no cells")]
    Empty,
    #[error("Pattern row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid pattern character {ch:?} at row {row}")]
    InvalidCell { row: usize, ch: char },
    #[error("Unknown pattern: {0}")]
    Unknown(String),
}

impl From<GridError> for PatternError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::RaggedRows {
                row,
                expected,
                found,
            } => PatternError::Ragged {
                row,
                expected,
                found,
            },
            _ => PatternError::Empty,
        }
    }
}

/// A named, read-only rectangular template of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternStamp {
    name: String,
    cells: Grid,
}

impl PatternStamp {
    /// Build from rows of 0/1 values.
    pub fn from_rows<R: AsRef<[u8]>>(name: impl Into<String>, rows: &[R]) -> Result<Self, PatternError> {
        Ok(Self {
            name: name.into(),
            cells: Grid::from_rows(rows)?,
        })
    }

    /// Parse plaintext: `O` or `*` alive, `.` dead. Lines starting with `!`
    /// are comments; blank lines are skipped.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, PatternError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in text.lines().map(str::trim_end) {
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            let row = line
                .chars()
                .map(|ch| match ch {
                    'O' | 'o' | '*' => Ok(1),
                    '.' => Ok(0),
                    _ => Err(PatternError::InvalidCell {
                        row: rows.len(),
                        ch,
                    }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(PatternError::Empty);
        }
        Self::from_rows(name, &rows)
    }

    /// Look up a built-in pattern by name.
    pub fn named(name: &str) -> Result<Self, PatternError> {
        let (name, lines) = LIBRARY
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| PatternError::Unknown(name.to_string()))?;
        Self::parse(*name, &lines.join("\n"))
    }

    /// Pattern name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template height.
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    /// Template width.
    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// Template cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        self.cells.get(row, col)
    }

    /// Template as a grid.
    pub fn as_grid(&self) -> &Grid {
        &self.cells
    }
}

/// Names of all built-in patterns.
pub fn library() -> impl Iterator<Item = &'static str> {
    LIBRARY.iter().map(|(name, _)| *name)
}

/// Overlay `pattern` onto `grid` with its top-left corner at (top, left).
///
/// The written region is `min(pattern.rows, grid.rows - top)` by
/// `min(pattern.cols, grid.cols - left)`; an origin past the grid edge writes
/// nothing.
pub fn stamp(grid: &Grid, top: usize, left: usize, pattern: &PatternStamp) -> Grid {
    let rows = pattern.rows().min(grid.rows().saturating_sub(top));
    let cols = pattern.cols().min(grid.cols().saturating_sub(left));
    if rows == 0 || cols == 0 {
        return grid.clone();
    }

    let mut cells = grid.cells().to_vec();
    let template = pattern.as_grid();
    for r in 0..rows {
        let src = &template.cells()[template.idx(r, 0)..template.idx(r, 0) + cols];
        let dst = grid.idx(top + r, left);
        cells[dst..dst + cols].copy_from_slice(src);
    }
    Grid::from_cells(grid.rows(), grid.cols(), cells)
}

/// Serializable reference to a pattern: a library name or inline rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSource {
    Named(String),
    Inline { name: String, cells: Vec<Vec<u8>> },
}

impl PatternSource {
    /// Resolve into a stamp.
    pub fn resolve(&self) -> Result<PatternStamp, PatternError> {
        match self {
            PatternSource::Named(name) => PatternStamp::named(name),
            PatternSource::Inline { name, cells } => PatternStamp::from_rows(name.clone(), cells),
        }
    }
}

impl Default for PatternSource {
    fn default() -> Self {
        PatternSource::Named(DEFAULT_STAMP.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_patterns_parse() {
        for name in library() {
            let pattern = PatternStamp::named(name).unwrap();
            assert_eq!(pattern.name(), name);
            assert!(pattern.as_grid().population() > 0, "{} is empty", name);
        }
    }

    #[test]
    fn test_gosper_gun_shape() {
        let gun = PatternStamp::named(DEFAULT_STAMP).unwrap();
        assert_eq!((gun.rows(), gun.cols()), (9, 36));
        assert_eq!(gun.as_grid().population(), 36);
    }

    #[test]
    fn test_unknown_pattern() {
        assert_eq!(
            PatternStamp::named("nope").unwrap_err(),
            PatternError::Unknown("nope".into())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(PatternStamp::parse("x", "!only a comment\n"), Err(PatternError::Empty));
        assert_eq!(
            PatternStamp::parse("x", "O.\nO"),
            Err(PatternError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            PatternStamp::parse("x", "O.\nOx"),
            Err(PatternError::InvalidCell { row: 1, ch: 'x' })
        );
    }

    #[test]
    fn test_stamp_fits_exactly() {
        let glider = PatternStamp::named("glider").unwrap();
        let grid = Grid::new(10, 10)
            .unwrap()
            .with_cell_set(9, 9, CellState::Alive)
            .unwrap();

        let stamped = stamp(&grid, 4, 5, &glider);

        for r in 0..10 {
            for c in 0..10 {
                let expected = if (4..7).contains(&r) && (5..8).contains(&c) {
                    glider.get(r - 4, c - 5).unwrap()
                } else {
                    grid.get(r, c).unwrap()
                };
                assert_eq!(stamped.get(r, c).unwrap(), expected, "cell ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_stamp_overwrites_with_dead() {
        let block = PatternStamp::from_rows("hollow", &[[1u8, 0], [0, 1]]).unwrap();
        let full = Grid::from_rows(&[[1u8, 1, 1], [1, 1, 1]]).unwrap();

        let stamped = stamp(&full, 0, 0, &block);
        assert_eq!(stamped.to_rows(), vec![vec![1, 0, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let gun = PatternStamp::named(DEFAULT_STAMP).unwrap();
        let grid = Grid::new(20, 20).unwrap();

        let stamped = stamp(&grid, 15, 10, &gun);
        assert_eq!(stamped.dimensions(), (20, 20));
        for r in 15..20 {
            for c in 10..20 {
                assert_eq!(stamped.get(r, c).unwrap(), gun.get(r - 15, c - 10).unwrap());
            }
        }
        for r in 0..15 {
            assert!(stamped.row(r).unwrap().iter().all(|c| !c.is_alive()));
        }
    }

    #[test]
    fn test_stamp_origin_outside_is_noop() {
        let glider = PatternStamp::named("glider").unwrap();
        let grid = Grid::new(5, 5).unwrap();
        assert_eq!(stamp(&grid, 5, 0, &glider), grid);
        assert_eq!(stamp(&grid, 0, 99, &glider), grid);
    }

    #[test]
    fn test_pattern_source_resolve() {
        let named: PatternSource = serde_json::from_str("\"blinker\"").unwrap();
        assert_eq!(named.resolve().unwrap().cols(), 3);

        let inline: PatternSource =
            serde_json::from_str(r#"{"name": "dot", "cells": [[1]]}"#).unwrap();
        assert_eq!(inline.resolve().unwrap().name(), "dot");
    }
}
