//! Collision detection on the tile grid
//!
//! Walls are tested by sampling all four corners of an entity's tile-sized
//! bounding box. Sampling only the center lets entities clip wall corners at
//! tile boundaries. Entity-vs-entity and entity-vs-food contacts use distance
//! tolerances so fast movers cannot skip past each other between ticks.

use glam::{IVec2, Vec2};

use super::entity::{Direction, MovingEntity};
use super::grid::GridMap;
use crate::consts::PROBE_DISTANCE;
use crate::{containing_tile, tile_to_pixel};

/// Tiles under the four corners of a box whose top-left is `top_left`
pub fn corner_tiles(top_left: Vec2, tile_size: f32) -> [IVec2; 4] {
    let left = top_left.x;
    let top = top_left.y;
    // Pixel-inclusive far edges: a box at x=32 spans pixels 32..=63
    let right = left + tile_size - 1.0;
    let bottom = top + tile_size - 1.0;

    let col = |x: f32| containing_tile(x, tile_size);
    let row = |y: f32| containing_tile(y, tile_size);

    [
        IVec2::new(col(left), row(top)),
        IVec2::new(col(right), row(top)),
        IVec2::new(col(left), row(bottom)),
        IVec2::new(col(right), row(bottom)),
    ]
}

/// True when any corner of the box lands on a wall or outside the map
#[inline]
pub fn overlaps_wall(top_left: Vec2, map: &GridMap, tile_size: f32) -> bool {
    corner_tiles(top_left, tile_size)
        .iter()
        .any(|t| map.is_wall(t.x, t.y))
}

/// Would moving `entity` one probe distance in `direction` touch a wall?
pub fn would_collide(
    entity: &MovingEntity,
    direction: Direction,
    map: &GridMap,
    tile_size: f32,
) -> bool {
    let probe = entity.pos + direction.unit() * PROBE_DISTANCE;
    overlaps_wall(probe, map, tile_size)
}

/// Two entities touch when their positions are closer than `radius` pixels
#[inline]
pub fn entities_overlap(a: &MovingEntity, b: &MovingEntity, radius: f32) -> bool {
    a.pos.distance(b.pos) < radius
}

/// Food is touched when it sits on the entity's tile or within `radius` pixels of it
pub fn food_touched(entity: &MovingEntity, food_tile: IVec2, radius: f32, tile_size: f32) -> bool {
    entity.tile == food_tile || entity.pos.distance(tile_to_pixel(food_tile, tile_size)) < radius
}
