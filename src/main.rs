//! Maze Chase entry point
//!
//! Headless runner: loads a level, drives the simulation on a fixed timestep
//! and prints the final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use maze_chase::consts::{MAX_SUBSTEPS, SIM_DT};
    use maze_chase::sim::{GameEvent, GameState, TickInput, tick};
    use maze_chase::{Level, LevelError, Tuning};

    /// Run a maze chase round without a display
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Level file (JSON); the built-in maze is used when omitted
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Tuning overrides (JSON)
        #[arg(short, long)]
        tuning: Option<PathBuf>,

        /// RNG seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,

        /// Simulated seconds to run before stopping
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,

        /// Host frame length in seconds
        #[arg(long, default_value_t = 1.0 / 30.0)]
        frame: f32,
    }

    /// Host-side driver holding the fixed-step accumulator
    struct Runner {
        state: GameState,
        accumulator: f32,
        input: TickInput,
    }

    impl Runner {
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot inputs
                self.input.direction = None;
                self.input.restart = false;
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::FoodEaten { .. } => log::debug!("{event:?}"),
                    _ => log::info!("{event:?}"),
                }
            }
        }
    }

    pub fn run(args: Args) -> Result<(), LevelError> {
        let level = match &args.level {
            Some(path) => Level::from_path(path)?,
            None => Level::classic(),
        };
        let tuning = match &args.tuning {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };

        let mut runner = Runner {
            state: GameState::new(level, tuning, args.seed)?,
            accumulator: 0.0,
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
        };

        let frame = if args.frame.is_finite() && args.frame > 0.0 {
            args.frame
        } else {
            SIM_DT
        };
        let mut elapsed = 0.0;
        while elapsed < args.seconds && !runner.state.phase.is_terminal() {
            runner.update(frame);
            elapsed += frame;
        }

        let snapshot = runner.state.snapshot();
        log::info!(
            "Stopped after {:.1}s: score {}, lives {}",
            elapsed,
            snapshot.score,
            snapshot.lives
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    if let Err(err) = headless::run(headless::Args::parse()) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host embeds the simulation directly
}
