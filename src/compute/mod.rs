//! Compute module - Grid model and Game of Life evolution.

mod grid;
mod rule;
mod stamp;
mod stats;

pub use grid::*;
pub use rule::*;
pub use stamp::*;
pub use stats::*;
