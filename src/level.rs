//! Level description
//!
//! A level is a rectangular grid of tile codes plus spawn points:
//!
//! ```json
//! {
//!   "map": [[1, 1, 1], [1, 0, 1], [1, 1, 1]],
//!   "pacman": { "col": 1, "row": 1, "direction": "left" },
//!   "ghosts": [{ "col": 1, "row": 1, "direction": "up" }]
//! }
//! ```
//!
//! Codes: 0 = dot, 1 = wall, 2 = empty path, 3 = power pellet, 4 = special food.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::sim::entity::Direction;
use crate::sim::grid::{GridMap, Tile};

/// Where an entity starts and which way it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub col: i32,
    pub row: i32,
    pub direction: Direction,
}

impl SpawnPoint {
    pub fn new(col: i32, row: i32, direction: Direction) -> Self {
        Self { col, row, direction }
    }

    pub fn tile(&self) -> IVec2 {
        IVec2::new(self.col, self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub map: Vec<Vec<u8>>,
    pub pacman: SpawnPoint,
    #[serde(default)]
    pub ghosts: Vec<SpawnPoint>,
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.build_map()?;
        Ok(level)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the grid and check the level can be played
    pub fn build_map(&self) -> Result<GridMap, LevelError> {
        let map = GridMap::from_codes(&self.map)?;

        if !map.iter().any(|(_, tile)| !matches!(tile, Tile::Wall | Tile::Empty)) {
            return Err(LevelError::NoFood);
        }

        check_spawn(&map, "pacman", &self.pacman)?;
        for (i, ghost) in self.ghosts.iter().enumerate() {
            check_spawn(&map, &format!("ghost {i}"), ghost)?;
        }

        Ok(map)
    }

    /// Built-in maze with four ghosts in a central pen
    pub fn classic() -> Self {
        let map = vec![
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![1, 3, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 3, 1],
            vec![1, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 0, 1],
            vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
            vec![1, 0, 1, 1, 0, 1, 1, 2, 1, 1, 0, 1, 1, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 2, 2, 2, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1],
            vec![1, 0, 0, 1, 0, 0, 0, 4, 0, 0, 0, 1, 0, 0, 1],
            vec![1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1],
            vec![1, 3, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 3, 1],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ];

        Self {
            map,
            pacman: SpawnPoint::new(7, 9, Direction::Left),
            ghosts: vec![
                SpawnPoint::new(7, 4, Direction::Up),
                SpawnPoint::new(6, 5, Direction::Left),
                SpawnPoint::new(7, 5, Direction::Up),
                SpawnPoint::new(8, 5, Direction::Right),
            ],
        }
    }
}

fn check_spawn(map: &GridMap, actor: &str, spawn: &SpawnPoint) -> Result<(), LevelError> {
    if !map.in_bounds(spawn.col, spawn.row) {
        return Err(LevelError::SpawnOutOfBounds {
            actor: actor.to_string(),
            col: spawn.col,
            row: spawn.row,
        });
    }
    if map.is_wall(spawn.col, spawn.row) {
        return Err(LevelError::SpawnOnWall {
            actor: actor.to_string(),
            col: spawn.col,
            row: spawn.row,
        });
    }
    Ok(())
}
