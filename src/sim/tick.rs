//! Simulation tick
//!
//! Per-tick order: power timer, protagonist, ghosts, food, ghost contact.
//! Movement resolves before scoring.

use rand::seq::IndexedRandom;

use super::collision::{entities_overlap, food_touched};
use super::entity::{Actor, Direction};
use super::ghost;
use super::grid::Tile;
use super::state::{Food, GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest directional intent, buffered until it can be honoured
    pub direction: Option<Direction>,
    /// Start a new game (only honoured after game over or a win)
    pub restart: bool,
    /// Demo mode - a simple greedy pilot steers the protagonist
    pub autopilot: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart && state.phase.is_terminal() {
        state.restart();
        return;
    }

    if let Some(direction) = input.direction {
        state.queue_direction(direction);
    }

    // Terminal phases are frozen until a restart
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let ts = state.tuning.tile_size;
    state.time_ticks += 1;

    if state.power.tick(dt) {
        log::debug!("Power mode ended");
        state.events.push(GameEvent::PowerModeEnded);
    }

    if input.autopilot {
        autopilot(state);
    }
    state.pacman.walk(dt, &state.map, ts);

    let turn_chance = state.tuning.ghost_turn_chance;
    for ghost in state.ghosts.iter_mut() {
        ghost::steer(ghost, &state.map, ts, turn_chance, &mut state.rng);
        ghost.body.step(dt, &state.map, ts);
    }

    eat_food(state);
    if state.phase == GamePhase::Won {
        return;
    }

    resolve_ghost_contacts(state);
}

/// Remove touched food, score it, and detect the win
fn eat_food(state: &mut GameState) {
    let radius = state.tuning.food_contact_radius();
    let ts = state.tuning.tile_size;
    let body = &state.pacman.body;

    let mut eaten: Vec<Food> = Vec::new();
    state.food.retain(|food| {
        if food_touched(body, food.tile, radius, ts) {
            eaten.push(*food);
            false
        } else {
            true
        }
    });

    for food in &eaten {
        state.score += u64::from(food.score);
        state.events.push(GameEvent::FoodEaten {
            tile: food.tile,
            kind: food.kind,
            score: food.score,
        });

        if food.kind == Tile::PowerPellet {
            state.power.start(state.tuning.power_duration);
            state.events.push(GameEvent::PowerModeStarted);
            log::debug!("Power mode for {:.1}s", state.tuning.power_duration);
        }
    }

    if !eaten.is_empty() && state.food.is_empty() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Board cleared with score {}", state.score);
    }
}

/// Ghost contact: eat the ghost in power mode, otherwise lose a life
fn resolve_ghost_contacts(state: &mut GameState) {
    let radius = state.tuning.ghost_contact_radius();
    let ts = state.tuning.tile_size;
    let bonus = state.tuning.ghost_capture_bonus;

    for ghost in state.ghosts.iter_mut() {
        if !entities_overlap(&state.pacman.body, &ghost.body, radius) {
            continue;
        }

        if state.power.is_active() {
            ghost.respawn(ts);
            state.score += u64::from(bonus);
            state.events.push(GameEvent::GhostCaptured {
                ghost: ghost.id,
                bonus,
            });
            log::debug!("Ate {} (+{})", ghost.name, bonus);
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        log::debug!("Caught by {}, {} lives left", ghost.name, state.lives);

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
            log::info!("Game over with score {}", state.score);
            return;
        }

        // Only the protagonist goes home on a life loss
        state.pacman.respawn(ts);
    }
}

/// Greedy demo pilot: take an open turn that leads to food, keep going while
/// the way is clear, otherwise pick any open direction.
fn autopilot(state: &mut GameState) {
    let ts = state.tuning.tile_size;
    let body = &state.pacman.body;
    let open = ghost::legal_directions(body, &state.map, ts);
    if open.is_empty() {
        return;
    }

    let food = &state.food;
    let leads_to_food = |dir: Direction| {
        let next = body.tile + dir.delta();
        food.iter().any(|f| f.tile == next)
    };

    let choice = open
        .iter()
        .copied()
        .filter(|&dir| dir != body.direction.opposite())
        .find(|&dir| leads_to_food(dir))
        .or_else(|| {
            if open.contains(&body.direction) {
                None
            } else {
                open.choose(&mut state.rng).copied()
            }
        });

    if let Some(dir) = choice {
        state.pacman.buffer(dir);
    }
}
