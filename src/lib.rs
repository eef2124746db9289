//! Conway's Game of Life - bounded cellular automaton engine.
//!
//! This crate provides the engine behind an interactive Game of Life board:
//! an immutable grid value, the B3/S23 transition rule, pattern stamps, and a
//! session with play/pause, randomize, clear and a generation counter.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `compute`: Grid model, transition rule, pattern stamps and statistics
//! - `schema`: Configuration types and seeding for sessions
//! - `session`: Session state, commands and the timer-driven loop
//!
//! # Example
//!
//! ```rust,no_run
//! use conway_life::{
//!     compute::PatternStamp,
//!     schema::SessionConfig,
//!     session::Simulation,
//! };
//!
//! let config = SessionConfig::default();
//! let mut sim = Simulation::new(&config).unwrap();
//!
//! sim.stamp(1, 1, &PatternStamp::named("gosper_glider_gun").unwrap());
//! sim.start();
//! std::thread::sleep(config.interval() * 10);
//! sim.stop();
//!
//! println!("Generation {}: {} live cells", sim.generation(), sim.stats().population);
//! ```

pub mod compute;
pub mod schema;
pub mod session;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use compute::{CellState, Grid, GridError, GridStats, PatternStamp, stamp, step};
pub use schema::{Seed, SessionConfig};
pub use session::{Command, LoopState, Session};

#[cfg(not(target_arch = "wasm32"))]
pub use session::Simulation;
