//! Moving entities on the tile grid
//!
//! Positions are continuous (pixels, top-left of a tile-sized box) with a
//! rounded tile projection. Entities only ever travel along one axis, and the
//! other axis is kept exactly on a tile boundary.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::would_collide;
use super::grid::GridMap;
use crate::consts::{PACMAN_FRAME_COUNT, PACMAN_FRAME_RATE};
use crate::{pixel_to_tile, snap_to_grid, tile_to_pixel};

/// Cardinal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Fixed enumeration order, used wherever ghosts pick among directions
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Tile offset of one step (screen coordinates, y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }

    pub fn unit(self) -> Vec2 {
        self.delta().as_vec2()
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// +1 or -1 along the travel axis
    pub fn sign(self) -> f32 {
        match self {
            Direction::Right | Direction::Down => 1.0,
            Direction::Left | Direction::Up => -1.0,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Continuous-position actor with a discrete tile projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingEntity {
    pub pos: Vec2,
    pub tile: IVec2,
    pub direction: Direction,
    /// Pixels per second
    pub speed: f32,
}

impl MovingEntity {
    pub fn at_tile(tile: IVec2, direction: Direction, speed: f32, tile_size: f32) -> Self {
        Self {
            pos: tile_to_pixel(tile, tile_size),
            tile,
            direction,
            speed,
        }
    }

    /// Teleport onto a tile, exactly aligned
    pub fn place_at(&mut self, tile: IVec2, tile_size: f32) {
        self.pos = tile_to_pixel(tile, tile_size);
        self.tile = tile;
    }

    /// Displace by `speed * dt` along `direction`, snapping the other axis to the grid.
    ///
    /// No collision checks happen here; see [`MovingEntity::step`].
    pub fn advance(&mut self, dt: f32, direction: Direction, tile_size: f32) {
        self.displace(direction, self.speed * dt, tile_size);
    }

    /// Adopt `direction` if it is unobstructed from the current position
    pub fn try_turn(&mut self, direction: Direction, map: &GridMap, tile_size: f32) -> bool {
        if direction == self.direction {
            return true;
        }
        if would_collide(self, direction, map, tile_size) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Collision-gated forward motion for one tick. Returns false when blocked.
    pub fn step(&mut self, dt: f32, map: &GridMap, tile_size: f32) -> bool {
        self.step_turning(dt, map, tile_size, &mut None)
    }

    /// Forward motion that also takes a pending turn the moment it opens up.
    ///
    /// The displacement is spent one tile boundary at a time on the travel
    /// axis. `pending` is tried before the first piece and again at every
    /// boundary, and is cleared once taken. When the way ahead is blocked the
    /// entity settles on the nearest tile boundary and the rest of the tick
    /// is dropped.
    pub fn step_turning(
        &mut self,
        dt: f32,
        map: &GridMap,
        tile_size: f32,
        pending: &mut Option<Direction>,
    ) -> bool {
        let mut remaining = self.speed * dt;
        let mut moved = false;

        loop {
            if let Some(wanted) = *pending {
                if self.try_turn(wanted, map, tile_size) {
                    *pending = None;
                }
            }

            let direction = self.direction;
            if would_collide(self, direction, map, tile_size) {
                self.settle(direction, tile_size);
                break;
            }
            if !(remaining > 0.0) {
                break;
            }

            let travel = self.travel(direction);
            let boundary = next_boundary(travel, direction, tile_size);
            let gap = (boundary - travel).abs();
            let target = if remaining >= gap {
                boundary
            } else {
                travel + direction.sign() * remaining
            };
            remaining -= gap.min(remaining);

            self.move_travel(direction, target, tile_size);
            moved = true;
        }
        moved
    }

    fn displace(&mut self, direction: Direction, distance: f32, tile_size: f32) {
        let target = self.travel(direction) + direction.sign() * distance;
        self.move_travel(direction, target, tile_size);
    }

    fn travel(&self, direction: Direction) -> f32 {
        if direction.is_horizontal() {
            self.pos.x
        } else {
            self.pos.y
        }
    }

    /// Set the travel coordinate and snap the other axis to the grid
    fn move_travel(&mut self, direction: Direction, value: f32, tile_size: f32) {
        if direction.is_horizontal() {
            self.pos.x = value;
            self.pos.y = snap_to_grid(self.pos.y, tile_size);
        } else {
            self.pos.y = value;
            self.pos.x = snap_to_grid(self.pos.x, tile_size);
        }
        self.tile = pixel_to_tile(self.pos, tile_size);
    }

    /// Blocked within a pixel of a boundary: sit exactly on it
    fn settle(&mut self, direction: Direction, tile_size: f32) {
        let aligned = snap_to_grid(self.travel(direction), tile_size);
        self.move_travel(direction, aligned, tile_size);
    }
}

/// First tile boundary strictly ahead of `travel`
fn next_boundary(travel: f32, direction: Direction, tile_size: f32) -> f32 {
    match direction {
        Direction::Right | Direction::Down => ((travel / tile_size).floor() + 1.0) * tile_size,
        Direction::Left | Direction::Up => ((travel / tile_size).ceil() - 1.0) * tile_size,
    }
}

/// Something that moves on the grid and has a home tile
pub trait Actor {
    fn body(&self) -> &MovingEntity;
    fn body_mut(&mut self) -> &mut MovingEntity;
    fn spawn_tile(&self) -> IVec2;
    /// Return to the spawn tile
    fn respawn(&mut self, tile_size: f32);
}

/// The player-controlled protagonist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pacman {
    pub body: MovingEntity,
    pub spawn: IVec2,
    pub spawn_direction: Direction,
    /// Most recent requested direction, waiting for an opening
    pub buffered: Option<Direction>,
    /// Animation frame (renderer hint only)
    pub frame: f32,
}

impl Pacman {
    pub fn new(spawn: IVec2, direction: Direction, speed: f32, tile_size: f32) -> Self {
        Self {
            body: MovingEntity::at_tile(spawn, direction, speed, tile_size),
            spawn,
            spawn_direction: direction,
            buffered: None,
            frame: 0.0,
        }
    }

    /// Queue a direction change; newer requests replace older ones
    pub fn buffer(&mut self, direction: Direction) {
        self.buffered = Some(direction);
    }

    /// Try the buffered turn. It stays queued until the way opens up.
    pub fn honor_buffer(&mut self, map: &GridMap, tile_size: f32) -> bool {
        let Some(wanted) = self.buffered else {
            return false;
        };
        if self.body.try_turn(wanted, map, tile_size) {
            self.buffered = None;
            return true;
        }
        false
    }

    /// Move for one tick, turning into the buffered direction wherever along
    /// the way it becomes open
    pub fn walk(&mut self, dt: f32, map: &GridMap, tile_size: f32) -> bool {
        let moved = self.body.step_turning(dt, map, tile_size, &mut self.buffered);
        if moved {
            self.animate(dt);
        }
        moved
    }

    /// Advance the mouth animation
    pub fn animate(&mut self, dt: f32) {
        self.frame = (self.frame + PACMAN_FRAME_RATE * dt) % PACMAN_FRAME_COUNT as f32;
    }

    /// Sprite frame index
    pub fn frame_index(&self) -> u32 {
        (self.frame.floor() as u32).min(PACMAN_FRAME_COUNT - 1)
    }
}

impl Actor for Pacman {
    fn body(&self) -> &MovingEntity {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingEntity {
        &mut self.body
    }

    fn spawn_tile(&self) -> IVec2 {
        self.spawn
    }

    fn respawn(&mut self, tile_size: f32) {
        self.body.place_at(self.spawn, tile_size);
        self.body.direction = self.spawn_direction;
        self.buffered = None;
        self.frame = 0.0;
    }
}

/// Classic ghost roster; extra ghosts are numbered
pub const GHOST_NAMES: [&str; 4] = ["blinky", "pinky", "inky", "clyde"];

pub fn ghost_name(id: u32) -> String {
    GHOST_NAMES
        .get(id as usize)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("ghost-{id}"))
}

/// An adversary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    pub id: u32,
    /// Visual identifier for the renderer
    pub name: String,
    pub body: MovingEntity,
    pub spawn: IVec2,
}

impl Ghost {
    pub fn new(id: u32, spawn: IVec2, direction: Direction, speed: f32, tile_size: f32) -> Self {
        Self {
            id,
            name: ghost_name(id),
            body: MovingEntity::at_tile(spawn, direction, speed, tile_size),
            spawn,
        }
    }
}

impl Actor for Ghost {
    fn body(&self) -> &MovingEntity {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingEntity {
        &mut self.body
    }

    fn spawn_tile(&self) -> IVec2 {
        self.spawn
    }

    /// Back to the spawn tile; direction is kept
    fn respawn(&mut self, tile_size: f32) {
        self.body.place_at(self.spawn, tile_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::overlaps_wall;
    use proptest::prelude::*;

    const TS: f32 = 32.0;

    /// 5x5 ring: walls outside, an open cross in the middle
    fn cross_map() -> GridMap {
        GridMap::from_codes(&[
            vec![1, 1, 1, 1, 1],
            vec![1, 1, 2, 1, 1],
            vec![1, 2, 2, 2, 1],
            vec![1, 1, 2, 1, 1],
            vec![1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    fn open_map(w: usize, h: usize) -> GridMap {
        GridMap::from_codes(&vec![vec![2; w]; h]).unwrap()
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Up.delta(), IVec2::new(0, -1));
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
        assert_eq!(
            serde_json::to_string(&Direction::Left).unwrap(),
            "\"left\""
        );
    }

    #[test]
    fn test_advance_snaps_perpendicular_axis() {
        let mut e = MovingEntity::at_tile(IVec2::new(1, 1), Direction::Right, 16.0, TS);
        e.pos.y += 3.7; // drifted
        e.advance(0.5, Direction::Right, TS);
        assert_eq!(e.pos.x, 40.0);
        assert_eq!(e.pos.y, 32.0);
        assert_eq!(e.tile, IVec2::new(1, 1));
    }

    #[test]
    fn test_tile_projection_rounds() {
        let mut e = MovingEntity::at_tile(IVec2::new(1, 1), Direction::Right, 32.0, TS);
        e.advance(0.5, Direction::Right, TS); // x = 48, exactly half way
        assert_eq!(e.tile, IVec2::new(2, 1));
    }

    #[test]
    fn test_step_blocked_by_wall() {
        let map = cross_map();
        let mut e = MovingEntity::at_tile(IVec2::new(3, 2), Direction::Right, 16.0, TS);
        assert!(!e.step(1.0, &map, TS));
        assert_eq!(e.pos, Vec2::new(96.0, 64.0));
    }

    #[test]
    fn test_step_stops_flush_against_wall() {
        let map = cross_map();
        let mut e = MovingEntity::at_tile(IVec2::new(1, 2), Direction::Right, 16.0, TS);
        // 10 s at 16 px/s would be 160 px; open run is only 2 tiles
        assert!(e.step(10.0, &map, TS));
        assert_eq!(e.pos, Vec2::new(96.0, 64.0));
        assert_eq!(e.tile, IVec2::new(3, 2));
        assert!(!e.step(1.0, &map, TS));
    }

    #[test]
    fn test_step_left_stops_flush_against_wall() {
        let map = cross_map();
        let mut e = MovingEntity::at_tile(IVec2::new(3, 2), Direction::Left, 100.0, TS);
        assert!(e.step(1.0, &map, TS));
        assert_eq!(e.pos, Vec2::new(32.0, 64.0));
    }

    #[test]
    fn test_turn_only_when_open() {
        let map = cross_map();
        let mut e = MovingEntity::at_tile(IVec2::new(1, 2), Direction::Right, 16.0, TS);
        assert!(!e.try_turn(Direction::Up, &map, TS));
        assert_eq!(e.direction, Direction::Right);

        e.place_at(IVec2::new(2, 2), TS);
        assert!(e.try_turn(Direction::Up, &map, TS));
        assert_eq!(e.direction, Direction::Up);
    }

    #[test]
    fn test_buffered_turn_waits_for_intersection() {
        let map = cross_map();
        let mut pacman = Pacman::new(IVec2::new(1, 2), Direction::Right, 16.0, TS);
        pacman.buffer(Direction::Up);

        let dt = 1.0 / 60.0;
        let mut turned_at = None;
        for _ in 0..240 {
            if pacman.honor_buffer(&map, TS) {
                turned_at = Some(pacman.body.pos);
                break;
            }
            pacman.body.step(dt, &map, TS);
        }

        let at = turned_at.expect("turn should be honoured at the intersection");
        assert!(at.x >= 64.0 && at.x < 65.0, "turned at {at:?}");
        assert_eq!(pacman.body.direction, Direction::Up);
        assert_eq!(pacman.buffered, None);

        pacman.body.step(dt, &map, TS);
        assert_eq!(pacman.body.pos.x, 64.0);
    }

    #[test]
    fn test_walk_turns_at_boundary_crossed_mid_tick() {
        let map = cross_map();
        let mut pacman = Pacman::new(IVec2::new(1, 2), Direction::Right, 100.0, TS);
        pacman.buffer(Direction::Up);

        // 100 px in one tick: 32 to the junction, 32 up, then the wall
        assert!(pacman.walk(1.0, &map, TS));
        assert_eq!(pacman.body.direction, Direction::Up);
        assert_eq!(pacman.buffered, None);
        assert_eq!(pacman.body.pos, Vec2::new(64.0, 32.0));
        assert_eq!(pacman.body.tile, IVec2::new(2, 1));
    }

    #[test]
    fn test_walk_keeps_buffer_when_turn_never_opens() {
        let map = cross_map();
        let mut pacman = Pacman::new(IVec2::new(3, 2), Direction::Right, 100.0, TS);
        pacman.buffer(Direction::Down);

        assert!(!pacman.walk(1.0, &map, TS));
        assert_eq!(pacman.body.direction, Direction::Right);
        assert_eq!(pacman.buffered, Some(Direction::Down));
    }

    #[test]
    fn test_step_settles_on_boundary_at_dead_end() {
        let map = cross_map();
        let mut e = MovingEntity::at_tile(IVec2::new(3, 2), Direction::Left, 16.0, TS);
        for _ in 0..100 {
            e.step(0.13, &map, TS);
        }
        assert_eq!(e.pos, Vec2::new(32.0, 64.0));
        assert_eq!(e.tile, IVec2::new(1, 2));
    }

    #[test]
    fn test_respawn() {
        let map = cross_map();
        let mut pacman = Pacman::new(IVec2::new(1, 2), Direction::Right, 16.0, TS);
        pacman.body.step(1.0, &map, TS);
        pacman.buffer(Direction::Down);
        pacman.body.direction = Direction::Left;
        pacman.respawn(TS);
        assert_eq!(pacman.body.pos, Vec2::new(32.0, 64.0));
        assert_eq!(pacman.body.direction, Direction::Right);
        assert_eq!(pacman.buffered, None);

        let mut ghost = Ghost::new(0, IVec2::new(2, 1), Direction::Down, 12.0, TS);
        ghost.body.step(1.0, &map, TS);
        ghost.body.direction = Direction::Left;
        ghost.respawn(TS);
        assert_eq!(ghost.body.tile, IVec2::new(2, 1));
        assert_eq!(ghost.body.direction, Direction::Left);
    }

    #[test]
    fn test_ghost_names() {
        assert_eq!(ghost_name(0), "blinky");
        assert_eq!(ghost_name(3), "clyde");
        assert_eq!(ghost_name(4), "ghost-4");
    }

    #[test]
    fn test_animation_frames_wrap() {
        let mut pacman = Pacman::new(IVec2::ZERO, Direction::Right, 16.0, TS);
        pacman.animate(2.5);
        assert_eq!(pacman.frame_index(), 2);
        pacman.animate(1.0);
        assert_eq!(pacman.frame_index(), 0);
    }

    proptest! {
        #[test]
        fn prop_no_perpendicular_drift(
            col in 1i32..8,
            row in 1i32..8,
            dir_idx in 0usize..4,
            dts in proptest::collection::vec(0.0f32..0.1, 1..200),
        ) {
            let map = open_map(10, 10);
            let dir = Direction::ALL[dir_idx];
            let mut e = MovingEntity::at_tile(IVec2::new(col, row), dir, 16.0, TS);
            for dt in dts {
                e.step(dt, &map, TS);
                let (travel, perp) = if dir.is_horizontal() {
                    (e.pos.x, e.pos.y)
                } else {
                    (e.pos.y, e.pos.x)
                };
                prop_assert_eq!(perp % TS, 0.0);
                prop_assert!(!overlaps_wall(e.pos, &map, TS));
                if would_collide(&e, dir, &map, TS) {
                    prop_assert_eq!(travel % TS, 0.0);
                }
            }
        }

        #[test]
        fn prop_advance_aligns_perpendicular(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            dt in 0.0f32..2.0,
            dir_idx in 0usize..4,
        ) {
            let dir = Direction::ALL[dir_idx];
            let mut e = MovingEntity::at_tile(IVec2::ZERO, dir, 16.0, TS);
            e.pos = Vec2::new(x, y);
            e.advance(dt, dir, TS);
            let perp = if dir.is_horizontal() { e.pos.y } else { e.pos.x };
            prop_assert_eq!(perp % TS, 0.0);
            prop_assert_eq!(e.tile, crate::pixel_to_tile(e.pos, TS));
        }
    }
}
