//! Session module - Interactive simulation state and its timer-driven loop.

mod command;
mod state;

#[cfg(not(target_arch = "wasm32"))]
mod runner;

pub use command::*;
pub use state::*;

#[cfg(not(target_arch = "wasm32"))]
pub use runner::*;
