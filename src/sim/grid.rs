//! Tile lattice for a level
//!
//! The map is fixed once a level loads. Consumables are tracked separately in
//! the live food list, so the grid itself is never mutated.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::tuning::Tuning;

/// Semantic tile code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Wall,
    Empty,
    Dot,
    PowerPellet,
    SpecialFood,
}

impl Tile {
    /// Decode a level-file tile code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Dot),
            1 => Some(Tile::Wall),
            2 => Some(Tile::Empty),
            3 => Some(Tile::PowerPellet),
            4 => Some(Tile::SpecialFood),
            _ => None,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }

    /// Score awarded for eating this tile, `None` if it is not food
    pub fn score(self, tuning: &Tuning) -> Option<u32> {
        match self {
            Tile::Dot => Some(tuning.dot_score),
            Tile::PowerPellet => Some(tuning.power_pellet_score),
            Tile::SpecialFood => Some(tuning.special_food_score),
            Tile::Wall | Tile::Empty => None,
        }
    }
}

/// Rectangular, row-major tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl GridMap {
    /// Build from rows of level-file codes; every row must have the same length
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, LevelError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(LevelError::EmptyMap);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, codes) in rows.iter().enumerate() {
            if codes.len() != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found: codes.len(),
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let tile = Tile::from_code(code).ok_or(LevelError::UnknownTile { row, col, code })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height
    }

    /// Tile at (col, row); anything outside the map is a wall
    #[inline]
    pub fn tile_at(&self, col: i32, row: i32) -> Tile {
        if !self.in_bounds(col, row) {
            return Tile::Wall;
        }
        self.tiles[row as usize * self.width + col as usize]
    }

    #[inline]
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.tile_at(col, row).is_wall()
    }

    /// All tiles with their coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &tile)| {
            let col = (i % self.width) as i32;
            let row = (i / self.width) as i32;
            (IVec2::new(col, row), tile)
        })
    }
}
