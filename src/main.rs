//! Dash Runner entry point
//!
//! Native builds run a headless autopilot session and log the outcome.
//! The browser build is driven from JavaScript through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use dash_runner::driver::{Action, FixedStep, InputQueue};
    use dash_runner::sim::{GameEvent, GamePhase, GameSession, autopilot};
    use dash_runner::{Tuning, consts::SIM_DT};

    /// Run a headless Dash Runner session with the autopilot playing
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Obstacle seed; random when omitted
        pub seed: Option<u64>,
        /// Simulated seconds to play
        #[arg(default_value_t = 60.0)]
        pub seconds: f32,
        /// JSON tuning overrides
        pub tuning: Option<PathBuf>,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Tuning {
        let json = path.and_then(|path| match std::fs::read_to_string(path) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                None
            }
        });
        Tuning::load_or_default(json.as_deref())
    }

    pub fn run(args: Args) {
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!(
            "Dash Runner (native) starting: seed {seed}, {}s simulated",
            args.seconds
        );

        let mut session = GameSession::new(seed, load_tuning(args.tuning.as_ref()));
        let inputs = InputQueue::new();
        let sender = inputs.sender();
        let mut clock = FixedStep::new();

        let frames = (args.seconds.max(0.0) / SIM_DT).ceil() as u32;
        let mut runs = 0u32;
        for _ in 0..frames {
            let snap = session.snapshot();
            match snap.phase {
                GamePhase::GameOver => {
                    sender.send(Action::Restart);
                }
                _ if autopilot::wants_jump(&snap) => {
                    sender.send(Action::StartOrJump);
                }
                _ => {}
            }
            clock.advance(&mut session, &inputs, SIM_DT);

            for event in session.drain_events() {
                if let GameEvent::Crashed {
                    score,
                    new_high_score,
                } = event
                {
                    runs += 1;
                    let record = if new_high_score { " (record)" } else { "" };
                    log::info!("Run {runs} ended at {score}{record}");
                }
            }
        }

        let snap = session.snapshot();
        log::info!(
            "Finished: {runs} completed runs, current score {}, high score {}, speed {:.1}",
            snap.score,
            snap.high_score,
            snap.speed
        );
        for (rank, run) in session.leaderboard().entries.iter().enumerate() {
            log::info!(
                "#{:<2} {:>6} pts  {:>6} ticks  {:>4} obstacles",
                rank + 1,
                run.score,
                run.ticks,
                run.obstacles
            );
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    let args = native::Args::parse();
    env_logger::init();
    native::run(args);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is `platform::web::init` via wasm-bindgen
}
