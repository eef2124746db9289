//! Commands issued by a presentation layer.

use serde::{Deserialize, Serialize};

/// User-level command dispatched onto a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Start when stopped, stop when running.
    PlayPause,
    Start,
    Stop,
    /// Randomize with the configured density.
    Randomize,
    Clear,
    /// Switch clicks between toggling cells and placing the stamp.
    TogglePlacement,
    /// Click on a cell: toggle it, or place the stamp in placement mode.
    Click { row: usize, col: usize },
}
