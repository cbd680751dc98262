//! Dash Runner - an endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-process leaderboard of finished runs
//! - `driver`: Fixed-timestep clock and cross-thread input queue
//! - `platform`: Browser host bindings
//!
//! Rendering, audio and input-device wiring belong to the host. The host
//! drives [`driver::FixedStep`] (or calls [`sim::GameSession::tick`] itself
//! once per frame) and reads [`sim::GameSession::snapshot`] to draw.

pub mod driver;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use driver::{Action, FixedStep, InputQueue, InputSender};
pub use highscores::HighScores;
pub use sim::{GamePhase, GameSession, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (physics is tuned per tick at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 300.0;
    /// Top edge of the ground strip; bodies rest with their bottom edge here
    pub const GROUND_Y: f32 = 240.0;

    /// Width of one repeating ground stripe, used for the scroll offset
    pub const GROUND_STRIPE_SPACING: f32 = 40.0;
}

/// Create a session with the default tuning and a random seed.
pub fn new_session() -> sim::GameSession {
    sim::GameSession::new(rand::random(), tuning::Tuning::default())
}
