//! Schema module - Configuration and seeding types for Game of Life sessions.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
