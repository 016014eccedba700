//! Ghost steering
//!
//! Memoryless and local: a ghost keeps going until it is blocked or a small
//! random chance fires, then picks uniformly among the open directions.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::would_collide;
use super::entity::{Direction, Ghost, MovingEntity};
use super::grid::GridMap;

/// Directions `body` could move in right now, in [`Direction::ALL`] order
pub fn legal_directions(body: &MovingEntity, map: &GridMap, tile_size: f32) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| !would_collide(body, dir, map, tile_size))
        .collect()
}

/// Pick a new direction, or `None` to keep the current one.
///
/// The Bernoulli trial is drawn on every call, blocked or not.
pub fn choose_direction<R: Rng + ?Sized>(
    body: &MovingEntity,
    map: &GridMap,
    tile_size: f32,
    turn_chance: f64,
    rng: &mut R,
) -> Option<Direction> {
    let wants_turn = rng.random_bool(turn_chance);
    let blocked = would_collide(body, body.direction, map, tile_size);
    if !wants_turn && !blocked {
        return None;
    }

    // Boxed in: keep the current direction and try again next tick
    legal_directions(body, map, tile_size).choose(rng).copied()
}

/// Run the controller for one ghost and apply its choice
pub fn steer<R: Rng + ?Sized>(
    ghost: &mut Ghost,
    map: &GridMap,
    tile_size: f32,
    turn_chance: f64,
    rng: &mut R,
) {
    if let Some(dir) = choose_direction(&ghost.body, map, tile_size, turn_chance, rng) {
        if dir != ghost.body.direction {
            log::trace!("{} turns {:?} -> {:?}", ghost.name, ghost.body.direction, dir);
        }
        ghost.body.direction = dir;
    }
}
