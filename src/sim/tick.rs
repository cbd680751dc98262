//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically by one frame.

use super::collision::overlaps;
use super::state::{GameEvent, GamePhase, GameSession};

impl GameSession {
    /// Advance the game by one frame
    ///
    /// Only `Running` moves the world. `Idle` just counts frames, and
    /// `GameOver` lets an airborne player fall back to the ground.
    pub fn tick(&mut self) {
        self.frame += 1;

        match self.phase {
            GamePhase::Idle => return,
            GamePhase::GameOver => {
                if !self.player.on_ground {
                    self.player.integrate();
                }
                return;
            }
            GamePhase::Running => {}
        }

        self.run_ticks += 1;

        // Score advances once every `ticks_per_point` frames
        self.tick_counter += 1;
        if self.tick_counter >= self.tuning.ticks_per_point {
            self.score += 1;
            self.tick_counter = 0;
        }

        let speed = self.tuning.speed_for_score(self.score);
        if speed > self.speed {
            log::debug!("Speed up to {speed:.1} at score {}", self.score);
            self.push_event(GameEvent::SpeedUp { speed });
        }
        self.speed = speed;

        self.player.integrate();
        self.scenery.scroll(speed);

        self.field.advance(speed);
        if let Some(kind) = self.field.maybe_spawn(self.score) {
            self.push_event(GameEvent::ObstacleSpawned { kind });
        }

        let margin = self.tuning.hitbox_margin;
        let player = &self.player;
        if self.field.obstacles().iter().any(|o| overlaps(player, o, margin)) {
            self.crash();
        }

        log::trace!(
            "tick {} score={} y={:.1} vy={:.2} obstacles={}",
            self.run_ticks,
            self.score,
            self.player.pos.y,
            self.player.vy,
            self.field.obstacles().len()
        );
    }
}
