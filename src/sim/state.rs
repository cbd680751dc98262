//! Game session and phase state machine
//!
//! [`GameSession`] exclusively owns the player, the obstacle field and the
//! scoring counters. The host mutates it only through the entry points
//! below and [`GameSession::tick`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::obstacle::{ObstacleField, ObstacleKind};
use super::player::PlayerBody;
use super::scenery::Scenery;
use crate::highscores::HighScores;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first jump or start input
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; waits for restart
    GameOver,
}

/// Things that happened during a tick or input, for audio/UI hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped { jump_count: u8 },
    ObstacleSpawned { kind: ObstacleKind },
    SpeedUp { speed: f32 },
    Crashed { score: u64, new_high_score: bool },
    Restarted,
}

/// Events kept for the host between drains
pub const MAX_PENDING_EVENTS: usize = 64;

/// One endless-runner game instance
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) seed: u64,
    pub(crate) tuning: Tuning,
    pub(crate) phase: GamePhase,
    pub(crate) player: PlayerBody,
    pub(crate) field: ObstacleField,
    pub(crate) scenery: Scenery,
    pub(crate) score: u64,
    pub(crate) high_score: u64,
    pub(crate) speed: f32,
    /// Ticks since the last score point
    pub(crate) tick_counter: u32,
    /// Ticks spent in the current run
    pub(crate) run_ticks: u64,
    /// Cosmetic clock, advanced every tick in every phase
    pub(crate) frame: u64,
    pub(crate) leaderboard: HighScores,
    pub(crate) events: VecDeque<GameEvent>,
}

impl GameSession {
    /// Create an idle session; the seed drives obstacle generation
    ///
    /// Tuning that fails [`Tuning::validate`] is replaced by the defaults.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected session tuning, using defaults: {e}");
                Tuning::default()
            }
        };
        log::info!("New session (seed {seed}, max_jumps {})", tuning.max_jumps);
        Self {
            seed,
            player: PlayerBody::new(&tuning),
            field: ObstacleField::new(seed, tuning.spawn, tuning.ground_y),
            scenery: Scenery::default(),
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            speed: tuning.initial_speed,
            tick_counter: 0,
            run_ticks: 0,
            frame: 0,
            leaderboard: HighScores::new(),
            events: VecDeque::new(),
            tuning,
        }
    }

    /// Default tuning with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    /// Jump input. Starts the run when idle; ignored after game over.
    pub fn start_or_jump(&mut self) {
        match self.phase {
            GamePhase::Idle => {
                self.begin_run();
                self.jump();
            }
            GamePhase::Running => self.jump(),
            GamePhase::GameOver => {}
        }
    }

    /// Explicit start without jumping
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.begin_run();
        }
    }

    /// Restart after a game over. Keeps the high score; ignored in other phases.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.tick_counter = 0;
        self.run_ticks = 0;
        self.field.reset();
        self.player.reset();
        self.scenery = Scenery::default();
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Restarted);
        log::info!("Restarted (high score {})", self.high_score);
    }

    /// Single-button binding: restart when over, otherwise start or jump
    pub fn primary_action(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.restart();
        } else {
            self.start_or_jump();
        }
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Queue an event, dropping the oldest once the queue is full
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn begin_run(&mut self) {
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Started);
        log::info!("Run started");
    }

    fn jump(&mut self) {
        if self.player.request_jump() {
            self.push_event(GameEvent::Jumped {
                jump_count: self.player.jump_count,
            });
            log::trace!("Jump {}", self.player.jump_count);
        }
    }

    /// Enter game over, recording the run
    pub(crate) fn crash(&mut self) {
        let new_high_score = self.score > self.high_score;
        self.high_score = self.high_score.max(self.score);
        self.leaderboard
            .add_run(self.score, self.run_ticks, self.field.spawned());
        self.phase = GamePhase::GameOver;
        self.push_event(GameEvent::Crashed {
            score: self.score,
            new_high_score,
        });
        log::info!(
            "Game over: score {} (high score {}{})",
            self.score,
            self.high_score,
            if new_high_score { ", new record" } else { "" }
        );
    }
}
