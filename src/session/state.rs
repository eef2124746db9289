//! Session - Grid, loop state and generation counter for one simulation.
//!
//! `Session` is the single-threaded core. It never waits: `tick` performs one
//! step when running and is driven either by `Simulation` (native) or by a
//! host timer (wasm).

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::Command;
use crate::compute::{Grid, GridError, GridStats, PatternStamp, stamp, step};
use crate::schema::{ConfigError, SessionConfig};

/// Simulation loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// One running instance of grid + loop state + generation counter.
pub struct Session {
    grid: Grid,
    generation: u64,
    state: LoopState,
    /// Incremented on every Stopped -> Running transition.
    run_id: u64,
    placing: bool,
    density: f64,
    stamp: PatternStamp,
    rng: StdRng,
}

impl Session {
    /// Create a session with an empty grid.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        let grid = Grid::new(config.rows, config.cols).map_err(|_| ConfigError::InvalidDimensions)?;
        Self::with_grid(config, grid)
    }

    /// Create a session starting from `grid`.
    ///
    /// The grid's dimensions take precedence over the configured ones.
    pub fn with_grid(config: &SessionConfig, grid: Grid) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            grid,
            generation: 0,
            state: LoopState::Stopped,
            run_id: 0,
            placing: false,
            density: config.density,
            stamp: config.stamp_pattern()?,
            rng,
        })
    }

    /// Current grid snapshot.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations computed since the last clear/randomize.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Identifier of the current (or most recent) run.
    #[inline]
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Whether clicks place the stamp instead of toggling cells.
    #[inline]
    pub fn placing(&self) -> bool {
        self.placing
    }

    /// Switch clicks between toggling cells and placing the stamp.
    /// Returns the new mode.
    pub fn toggle_placement(&mut self) -> bool {
        self.placing = !self.placing;
        self.placing
    }

    /// Pattern placed by clicks in placement mode.
    pub fn stamp_pattern(&self) -> &PatternStamp {
        &self.stamp
    }

    /// Replace the pattern placed by clicks in placement mode.
    pub fn set_stamp_pattern(&mut self, pattern: PatternStamp) {
        self.stamp = pattern;
    }

    pub fn stats(&self) -> GridStats {
        GridStats::from_grid(&self.grid)
    }

    /// Enter `Running`. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running;
        self.run_id += 1;
        debug!("Run {} started at generation {}", self.run_id, self.generation);
        true
    }

    /// Enter `Stopped`. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = LoopState::Stopped;
        debug!("Run {} stopped at generation {}", self.run_id, self.generation);
        true
    }

    /// Perform one step if running. Returns whether a step happened.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.advance();
        true
    }

    /// Perform one step regardless of loop state.
    pub fn advance(&mut self) {
        self.grid = step(&self.grid);
        self.generation += 1;
    }

    /// Flip one cell. Loop state and counter are unaffected.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.grid = self.grid.with_cell_toggled(row, col)?;
        Ok(())
    }

    /// Randomize with the session's own random source.
    pub fn randomize(&mut self, density: f64) {
        let grid = self.grid.randomized(density, &mut self.rng);
        self.reset_to(grid);
    }

    /// Randomize with an injected random source.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        let grid = self.grid.randomized(density, rng);
        self.reset_to(grid);
    }

    /// Replace the grid with an all-dead one; stops and resets the counter.
    pub fn clear(&mut self) {
        let grid = self.grid.cleared();
        self.reset_to(grid);
    }

    /// Overlay `pattern` at (top, left), clipping at the edges.
    pub fn stamp(&mut self, top: usize, left: usize, pattern: &PatternStamp) {
        self.grid = stamp(&self.grid, top, left, pattern);
    }

    fn reset_to(&mut self, grid: Grid) {
        self.stop();
        self.grid = grid;
        self.generation = 0;
    }

    /// Dispatch a presentation-layer command.
    pub fn apply(&mut self, command: Command) -> Result<(), GridError> {
        debug!("Applying {:?}", command);
        match command {
            Command::PlayPause => {
                if !self.stop() {
                    self.start();
                }
            }
            Command::Start => {
                self.start();
            }
            Command::Stop => {
                self.stop();
            }
            Command::Randomize => self.randomize(self.density),
            Command::Clear => self.clear(),
            Command::TogglePlacement => {
                self.toggle_placement();
            }
            Command::Click { row, col } => {
                if self.placing {
                    self.grid.get(row, col)?;
                    self.grid = stamp(&self.grid, row, col, &self.stamp);
                } else {
                    self.toggle_cell(row, col)?;
                }
            }
        }
        Ok(())
    }
}
