//! Gameplay tuning
//!
//! Data-driven balance values. Every field has a default, so a tuning file only
//! needs to list what it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LevelError;

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tile edge length in pixels
    pub tile_size: f32,

    // === Movement ===
    /// Protagonist speed (pixels/s)
    pub pacman_speed: f32,
    /// Ghost speed (pixels/s)
    pub ghost_speed: f32,
    /// Chance per tick that a ghost rerolls its direction while unobstructed
    pub ghost_turn_chance: f64,

    // === Power mode ===
    /// Seconds of power mode granted by a power pellet
    pub power_duration: f32,
    /// Score for eating a ghost in power mode
    pub ghost_capture_bonus: u32,

    // === Food ===
    pub dot_score: u32,
    pub power_pellet_score: u32,
    pub special_food_score: u32,

    // === Lives ===
    pub starting_lives: u8,

    // === Contact tolerances (fractions of tile_size) ===
    /// Food is eaten within this distance even when the tiles differ
    pub food_contact_factor: f32,
    /// Ghost and protagonist touch within this distance
    pub ghost_contact_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,

            pacman_speed: PACMAN_SPEED,
            ghost_speed: GHOST_SPEED,
            ghost_turn_chance: GHOST_TURN_CHANCE,

            power_duration: POWER_DURATION,
            ghost_capture_bonus: GHOST_CAPTURE_BONUS,

            dot_score: DOT_SCORE,
            power_pellet_score: POWER_PELLET_SCORE,
            special_food_score: SPECIAL_FOOD_SCORE,

            starting_lives: STARTING_LIVES,

            food_contact_factor: FOOD_CONTACT_FACTOR,
            ghost_contact_factor: GHOST_CONTACT_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), LevelError> {
        let invalid = |msg: &str| Err(LevelError::InvalidTuning(msg.to_string()));

        if !(self.tile_size.is_finite() && self.tile_size >= 2.0) {
            return invalid("tile_size must be at least 2 pixels");
        }
        if !(self.pacman_speed.is_finite() && self.pacman_speed >= 0.0) {
            return invalid("pacman_speed must be a non-negative number");
        }
        if !(self.ghost_speed.is_finite() && self.ghost_speed >= 0.0) {
            return invalid("ghost_speed must be a non-negative number");
        }
        if !(0.0..=1.0).contains(&self.ghost_turn_chance) {
            return invalid("ghost_turn_chance must be within [0, 1]");
        }
        if !(self.power_duration.is_finite() && self.power_duration > 0.0) {
            return invalid("power_duration must be positive");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives must be at least 1");
        }
        if !(self.food_contact_factor.is_finite() && self.food_contact_factor >= 0.0) {
            return invalid("food_contact_factor must be a non-negative number");
        }
        if !(self.ghost_contact_factor.is_finite() && self.ghost_contact_factor >= 0.0) {
            return invalid("ghost_contact_factor must be a non-negative number");
        }
        Ok(())
    }

    /// Food pickup radius in pixels
    pub fn food_contact_radius(&self) -> f32 {
        self.food_contact_factor * self.tile_size
    }

    /// Ghost contact radius in pixels
    pub fn ghost_contact_radius(&self) -> f32 {
        self.ghost_contact_factor * self.tile_size
    }
}
