//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (ghosts by id, food row-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod ghost;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{entities_overlap, food_touched, overlaps_wall, would_collide};
pub use entity::{Actor, Direction, Ghost, MovingEntity, Pacman};
pub use ghost::{choose_direction, legal_directions};
pub use grid::{GridMap, Tile};
pub use state::{ActorView, Food, GameEvent, GamePhase, GameState, PowerMode, Snapshot};
pub use tick::{TickInput, tick};
