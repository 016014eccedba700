//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. The host owns it
//! and passes it to [`super::tick`] once per frame.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Actor, Direction, Ghost, Pacman};
use super::grid::{GridMap, Tile};
use crate::error::LevelError;
use crate::level::Level;
use crate::tuning::Tuning;

/// Primary state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
    /// All food eaten
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Power mode countdown. Ghosts can be eaten while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerMode {
    /// Seconds left, 0 when inactive
    pub remaining: f32,
}

impl PowerMode {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// (Re)start at full duration; pellets never stack past this
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration;
    }

    /// Count down; returns true on the tick it runs out
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining == 0.0
    }
}

/// A consumable still on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub tile: IVec2,
    pub kind: Tile,
    pub score: u32,
}

/// State transitions, collected for the host between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { tile: IVec2, kind: Tile, score: u32 },
    PowerModeStarted,
    PowerModeEnded,
    GhostCaptured { ghost: u32, bonus: u32 },
    LifeLost { lives_left: u8 },
    GameOver,
    Won,
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub level: Level,
    pub map: GridMap,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source for ghost decisions and autopilot; replace it to script a run
    pub rng: Pcg32,
    pub pacman: Pacman,
    /// Sorted by id
    pub ghosts: Vec<Ghost>,
    /// Remaining consumables, row-major
    pub food: Vec<Food>,
    pub score: u64,
    pub lives: u8,
    pub power: PowerMode,
    pub phase: GamePhase,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    /// Pending transitions, see [`GameState::drain_events`]
    pub(crate) events: Vec<GameEvent>,
}

/// Entities and food for a fresh round
struct Round {
    pacman: Pacman,
    ghosts: Vec<Ghost>,
    food: Vec<Food>,
}

impl Round {
    fn new(level: &Level, map: &GridMap, tuning: &Tuning) -> Self {
        let ts = tuning.tile_size;
        let pacman = Pacman::new(
            level.pacman.tile(),
            level.pacman.direction,
            tuning.pacman_speed,
            ts,
        );
        let ghosts = level
            .ghosts
            .iter()
            .enumerate()
            .map(|(i, spawn)| Ghost::new(i as u32, spawn.tile(), spawn.direction, tuning.ghost_speed, ts))
            .collect();
        let food = map
            .iter()
            .filter_map(|(tile, kind)| {
                kind.score(tuning).map(|score| Food { tile, kind, score })
            })
            .collect();

        Self {
            pacman,
            ghosts,
            food,
        }
    }
}

impl GameState {
    /// Validate the level and tuning and set up the first round
    pub fn new(level: Level, tuning: Tuning, seed: u64) -> Result<Self, LevelError> {
        tuning.validate()?;
        let map = level.build_map()?;
        let round = Round::new(&level, &map, &tuning);

        log::info!(
            "Level {}x{} loaded: {} food, {} ghosts, seed {}",
            map.width(),
            map.height(),
            round.food.len(),
            round.ghosts.len(),
            seed
        );

        Ok(Self {
            lives: tuning.starting_lives,
            tuning,
            level,
            map,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            pacman: round.pacman,
            ghosts: round.ghosts,
            food: round.food,
            score: 0,
            power: PowerMode::default(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    /// Built-in maze with default tuning
    pub fn with_default_level(seed: u64) -> Result<Self, LevelError> {
        Self::new(Level::classic(), Tuning::default(), seed)
    }

    /// Buffer a direction request; it is applied at the next tick
    pub fn queue_direction(&mut self, direction: Direction) {
        self.pacman.buffer(direction);
    }

    /// Start over after a finished game. Ignored while playing.
    ///
    /// Entities, food, score, lives, power mode and phase are replaced
    /// together. The RNG stream carries on, and events not yet drained are
    /// kept ahead of [`GameEvent::Restarted`].
    pub fn restart(&mut self) -> bool {
        if !self.phase.is_terminal() {
            return false;
        }

        let Round {
            pacman,
            ghosts,
            food,
        } = Round::new(&self.level, &self.map, &self.tuning);
        self.pacman = pacman;
        self.ghosts = ghosts;
        self.food = food;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.power = PowerMode::default();
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.events.push(GameEvent::Restarted);

        log::info!("Game restarted");
        true
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Take the events emitted since the last call.
    ///
    /// Events accumulate until drained, so a host should call this once per
    /// frame even if it only renders snapshots.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let frightened = self.power.is_active();
        Snapshot {
            pacman: ActorView {
                name: "pacman".to_string(),
                frame: self.pacman.frame_index(),
                frightened: false,
                ..ActorView::of(&self.pacman)
            },
            ghosts: self
                .ghosts
                .iter()
                .map(|g| ActorView {
                    name: g.name.clone(),
                    frightened,
                    ..ActorView::of(g)
                })
                .collect(),
            food: self.food.clone(),
            score: self.score,
            lives: self.lives,
            power_mode: frightened,
            power_remaining: self.power.remaining,
            game_over: self.is_game_over(),
            game_won: self.is_won(),
            time_ticks: self.time_ticks,
        }
    }
}

/// Renderer-facing view of one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub name: String,
    pub pos: Vec2,
    pub tile: IVec2,
    pub direction: Direction,
    /// Animation frame (protagonist only)
    pub frame: u32,
    /// Drawn as a vulnerable ghost
    pub frightened: bool,
}

impl ActorView {
    fn of(actor: &impl Actor) -> Self {
        let body = actor.body();
        Self {
            name: String::new(),
            pos: body.pos,
            tile: body.tile,
            direction: body.direction,
            frame: 0,
            frightened: false,
        }
    }
}

/// Per-tick output for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub pacman: ActorView,
    pub ghosts: Vec<ActorView>,
    pub food: Vec<Food>,
    pub score: u64,
    pub lives: u8,
    pub power_mode: bool,
    pub power_remaining: f32,
    pub game_over: bool,
    pub game_won: bool,
    pub time_ticks: u64,
}
