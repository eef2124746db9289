//! Transition rule for Conway's Game of Life (B3/S23).
//!
//! The grid is bounded: cells beyond the edge count as dead, there is no
//! wraparound. Every cell of the next generation is computed from the frozen
//! pre-step grid, never from partially updated cells.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::{CellState, Grid};

/// Relative offsets of the 8 Moore neighbours.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count live Moore neighbours of (row, col). Out-of-bounds neighbours are dead.
#[inline]
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dr, dc)| {
            match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                (Some(r), Some(c)) => grid.is_alive(r, c),
                _ => false,
            }
        })
        .count() as u8
}

/// Apply the B3/S23 rule to a single cell.
///
/// - Alive with 2 or 3 live neighbours survives
/// - Dead with exactly 3 live neighbours is born
/// - Everything else is dead
#[inline]
pub fn next_state(state: CellState, neighbors: u8) -> CellState {
    match (state, neighbors) {
        (CellState::Alive, 2 | 3) => CellState::Alive,
        (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}

fn next_row(grid: &Grid, row: usize) -> Vec<CellState> {
    let cells = grid.cells();
    (0..grid.cols())
        .map(|col| next_state(cells[grid.idx(row, col)], live_neighbors(grid, row, col)))
        .collect()
}

/// Compute the next generation.
pub fn step(grid: &Grid) -> Grid {
    let rows = grid.rows();
    let cols = grid.cols();

    // Native: rows evaluated in parallel, each reading the same frozen grid
    #[cfg(not(target_arch = "wasm32"))]
    let next: Vec<CellState> = (0..rows)
        .into_par_iter()
        .flat_map_iter(|row| next_row(grid, row))
        .collect();

    // WASM: sequential
    #[cfg(target_arch = "wasm32")]
    let next: Vec<CellState> = (0..rows).flat_map(|row| next_row(grid, row)).collect();

    Grid::from_cells(rows, cols, next)
}

/// Apply `step` `generations` times.
pub fn run(grid: &Grid, generations: u64) -> Grid {
    let mut current = grid.clone();
    for _ in 0..generations {
        current = step(&current);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        alive.iter().fold(Grid::new(rows, cols).unwrap(), |g, &(r, c)| {
            g.with_cell_set(r, c, CellState::Alive).unwrap()
        })
    }

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                if grid.is_alive(r, c) {
                    out.push((r, c));
                }
            }
        }
        out
    }

    #[test]
    fn test_empty_stays_empty() {
        let grid = Grid::new(50, 50).unwrap();
        assert!(step(&grid).is_empty());
    }

    #[test]
    fn test_next_state_table() {
        for n in 0..=8u8 {
            let born = next_state(CellState::Dead, n);
            assert_eq!(born.is_alive(), n == 3, "dead cell with {} neighbours", n);

            let survives = next_state(CellState::Alive, n);
            assert_eq!(
                survives.is_alive(),
                n == 2 || n == 3,
                "live cell with {} neighbours",
                n
            );
        }
    }

    #[test]
    fn test_neighbors_no_wraparound() {
        // Corner cell: only 3 in-bounds neighbours exist
        let grid = grid_with(4, 4, &[(0, 1), (1, 0), (1, 1), (3, 3), (0, 3), (3, 0)]);
        assert_eq!(live_neighbors(&grid, 0, 0), 3);
        // Opposite corners are not neighbours on a bounded grid
        assert_eq!(live_neighbors(&grid, 3, 3), 0);
    }

    #[test]
    fn test_block_is_fixed_point() {
        let block = grid_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(step(&block), block);
    }

    #[test]
    fn test_blinker_period_two() {
        let blinker = grid_with(7, 7, &[(3, 2), (3, 3), (3, 4)]);

        let once = step(&blinker);
        assert_eq!(alive_cells(&once), vec![(2, 3), (3, 3), (4, 3)]);

        let twice = step(&once);
        assert_eq!(twice, blinker);
    }

    #[test]
    fn test_glider_translates() {
        let glider = grid_with(12, 12, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
        let moved = run(&glider, 4);
        let expected: Vec<_> = alive_cells(&glider)
            .into_iter()
            .map(|(r, c)| (r + 1, c + 1))
            .collect();
        assert_eq!(alive_cells(&moved), expected);
    }

    #[test]
    fn test_step_does_not_modify_input() {
        let blinker = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let before = blinker.to_rows();
        let _ = step(&blinker);
        assert_eq!(blinker.to_rows(), before);
    }

    #[test]
    fn test_edge_blinker_clipped() {
        // Blinker against the top edge loses its out-of-bounds arm
        let blinker = grid_with(5, 5, &[(0, 1), (0, 2), (0, 3)]);
        let once = step(&blinker);
        assert_eq!(alive_cells(&once), vec![(0, 2), (1, 2)]);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| {
                Grid::from_cells(rows, cols, cells.into_iter().map(CellState::from).collect())
            })
        })
    }

    proptest! {
        #[test]
        fn prop_step_matches_rule(grid in arb_grid()) {
            let next = step(&grid);
            prop_assert_eq!(next.dimensions(), grid.dimensions());
            for r in 0..grid.rows() {
                for c in 0..grid.cols() {
                    let n = live_neighbors(&grid, r, c);
                    let state = grid.get(r, c).unwrap();
                    let expected = match (state, n) {
                        (CellState::Alive, 2) | (CellState::Alive, 3) | (CellState::Dead, 3) => CellState::Alive,
                        _ => CellState::Dead,
                    };
                    prop_assert_eq!(next.get(r, c).unwrap(), expected);
                }
            }
        }

        #[test]
        fn prop_empty_grid_stays_empty(rows in 1usize..40, cols in 1usize..40) {
            let grid = Grid::new(rows, cols).unwrap();
            prop_assert!(step(&grid).is_empty());
        }
    }
}
