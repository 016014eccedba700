//! Maze Chase - A tile-grid arcade chase simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, collisions, ghosts, game state)
//! - `level`: Level description and JSON loading
//! - `tuning`: Data-driven game balance
//! - `error`: Construction-time configuration errors

pub mod error;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::LevelError;
pub use level::{Level, SpawnPoint};
pub use tuning::Tuning;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native host (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 32.0;

    /// Protagonist speed (pixels/s)
    pub const PACMAN_SPEED: f32 = 16.0;
    /// Ghost speed (pixels/s)
    pub const GHOST_SPEED: f32 = 12.0;
    /// Protagonist animation rate (frames/s)
    pub const PACMAN_FRAME_RATE: f32 = 1.0;
    /// Frames per direction in the protagonist sprite strip
    pub const PACMAN_FRAME_COUNT: u32 = 3;

    /// Per-tick probability that a ghost rerolls its direction unprompted
    pub const GHOST_TURN_CHANCE: f64 = 0.02;

    /// Power mode duration (seconds)
    pub const POWER_DURATION: f32 = 7.0;
    /// Score for eating a ghost during power mode
    pub const GHOST_CAPTURE_BONUS: u32 = 200;

    /// Food scores
    pub const DOT_SCORE: u32 = 10;
    pub const POWER_PELLET_SCORE: u32 = 50;
    pub const SPECIAL_FOOD_SCORE: u32 = 100;

    pub const STARTING_LIVES: u8 = 3;

    /// Food pickup radius, as a fraction of the tile size
    pub const FOOD_CONTACT_FACTOR: f32 = 0.6;
    /// Ghost contact radius, as a fraction of the tile size
    pub const GHOST_CONTACT_FACTOR: f32 = 0.8;

    /// How far (pixels) a bounding box is pushed ahead before corner sampling
    pub const PROBE_DISTANCE: f32 = 1.0;
}

/// Pixel origin (top-left corner) of a tile
#[inline]
pub fn tile_to_pixel(tile: IVec2, tile_size: f32) -> Vec2 {
    tile.as_vec2() * tile_size
}

/// Nearest tile to a pixel position (rounds, so a half-way entity belongs to the tile ahead)
#[inline]
pub fn pixel_to_tile(pos: Vec2, tile_size: f32) -> IVec2 {
    (pos / tile_size).round().as_ivec2()
}

/// Tile containing a single pixel coordinate (floors)
#[inline]
pub fn containing_tile(coord: f32, tile_size: f32) -> i32 {
    (coord / tile_size).floor() as i32
}

/// Snap a coordinate onto the nearest tile boundary
#[inline]
pub fn snap_to_grid(coord: f32, tile_size: f32) -> f32 {
    (coord / tile_size).round() * tile_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_tile_conversions() {
        assert_eq!(tile_to_pixel(IVec2::new(2, 3), 32.0), Vec2::new(64.0, 96.0));
        assert_eq!(pixel_to_tile(Vec2::new(47.0, 49.0), 32.0), IVec2::new(1, 2));
        assert_eq!(containing_tile(63.9, 32.0), 1);
        assert_eq!(containing_tile(-0.5, 32.0), -1);
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(33.0, 32.0), 32.0);
        assert_eq!(snap_to_grid(50.0, 32.0), 64.0);
        assert_eq!(snap_to_grid(-3.0, 32.0), 0.0);
    }
}
