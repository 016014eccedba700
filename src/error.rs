//! Construction-time configuration errors
//!
//! A malformed level or tuning file is reported once, at load, and is fatal to
//! starting a level. The running simulation never produces errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("map has no rows or no columns")]
    EmptyMap,

    #[error("map row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, code: u8 },

    #[error("map contains no food")]
    NoFood,

    #[error("{actor} spawn ({col}, {row}) is outside the map")]
    SpawnOutOfBounds { actor: String, col: i32, row: i32 },

    #[error("{actor} spawn ({col}, {row}) is a wall")]
    SpawnOnWall { actor: String, col: i32, row: i32 },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
}
