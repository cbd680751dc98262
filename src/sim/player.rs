//! The runner's body: vertical physics and the jump budget

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Per-tick physics parameters the body needs, copied out of [`Tuning`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPhysics {
    pub gravity: f32,
    pub jump_force: f32,
    pub max_jumps: u8,
    pub ground_y: f32,
}

impl From<&Tuning> for BodyPhysics {
    fn from(tuning: &Tuning) -> Self {
        Self {
            gravity: tuning.gravity,
            jump_force: tuning.jump_force,
            max_jumps: tuning.max_jumps,
            ground_y: tuning.ground_y,
        }
    }
}

/// The player character
///
/// `pos` is the top-left corner of the hitbox. The body only moves
/// vertically; obstacles scroll toward it instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    pub pos: Vec2,
    pub vy: f32,
    pub size: Vec2,
    pub on_ground: bool,
    /// Jumps used since the last ground contact
    pub jump_count: u8,
    /// Gait animation counter (cosmetic)
    pub anim_frame: u32,
    physics: BodyPhysics,
}

impl PlayerBody {
    /// Create a body standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        let physics = BodyPhysics::from(tuning);
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(tuning.player_x, physics.ground_y - size.y),
            vy: 0.0,
            size,
            on_ground: true,
            jump_count: 0,
            anim_frame: 0,
            physics,
        }
    }

    /// Y coordinate of the top edge when standing
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.physics.ground_y - self.size.y
    }

    pub fn physics(&self) -> &BodyPhysics {
        &self.physics
    }

    /// Spend one jump from the budget. Returns false (and changes nothing)
    /// once the budget is exhausted.
    pub fn request_jump(&mut self) -> bool {
        if self.jump_count >= self.physics.max_jumps {
            return false;
        }
        self.vy = self.physics.jump_force;
        self.on_ground = false;
        self.jump_count += 1;
        true
    }

    /// Advance one tick of gravity and ground contact
    pub fn integrate(&mut self) {
        self.vy += self.physics.gravity;
        self.pos.y += self.vy;

        let rest = self.rest_y();
        if self.pos.y >= rest {
            self.pos.y = rest;
            self.vy = 0.0;
            self.on_ground = true;
            self.jump_count = 0;
        } else {
            self.on_ground = false;
        }

        if self.on_ground {
            self.anim_frame = self.anim_frame.wrapping_add(1);
        }
    }

    /// Return to the standing pose (used on restart)
    pub fn reset(&mut self) {
        self.pos.y = self.rest_y();
        self.vy = 0.0;
        self.on_ground = true;
        self.jump_count = 0;
        self.anim_frame = 0;
    }

    pub fn hitbox(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body() -> PlayerBody {
        PlayerBody::new(&Tuning::default())
    }

    #[test]
    fn test_starts_at_rest() {
        let p = body();
        assert_eq!(p.pos, Vec2::new(80.0, 190.0));
        assert_eq!(p.vy, 0.0);
        assert!(p.on_ground);
        assert_eq!(p.jump_count, 0);
    }

    #[test]
    fn test_jump_budget() {
        let mut p = body();
        assert!(p.request_jump());
        assert_eq!(p.vy, -13.0);
        assert_eq!(p.jump_count, 1);
        assert!(!p.on_ground);

        p.integrate();
        assert!(p.request_jump());
        assert_eq!(p.vy, -13.0);
        assert_eq!(p.jump_count, 2);

        p.integrate();
        let vy = p.vy;
        assert!(!p.request_jump());
        assert_eq!(p.vy, vy);
        assert_eq!(p.jump_count, 2);
    }

    #[test]
    fn test_single_jump_budget() {
        let mut p = PlayerBody::new(&Tuning::single_jump());
        assert!(p.request_jump());
        assert!(!p.request_jump());
        assert_eq!(p.jump_count, 1);
    }

    #[test]
    fn test_landing_resets_budget_same_tick() {
        let mut p = body();
        p.request_jump();
        p.request_jump();
        let mut ticks = 0;
        loop {
            p.integrate();
            ticks += 1;
            if p.on_ground {
                break;
            }
            assert_eq!(p.jump_count, 2);
            assert!(ticks < 1000, "never landed");
        }
        assert_eq!(p.jump_count, 0);
        assert_eq!(p.vy, 0.0);
        assert_eq!(p.pos.y, p.rest_y());
    }

    #[test]
    fn test_gait_animates_only_on_ground() {
        let mut p = body();
        p.integrate();
        assert_eq!(p.anim_frame, 1);
        p.request_jump();
        p.integrate();
        p.integrate();
        assert_eq!(p.anim_frame, 1);
    }

    #[test]
    fn test_reset_restores_rest_pose() {
        let mut p = body();
        p.request_jump();
        p.integrate();
        p.reset();
        assert_eq!(p.pos.y, 190.0);
        assert!(p.on_ground);
        assert_eq!(p.jump_count, 0);
    }

    proptest! {
        #[test]
        fn prop_never_sinks_below_ground(
            jumps in proptest::collection::vec(any::<bool>(), 1..400)
        ) {
            let mut p = body();
            for jump in jumps {
                if jump {
                    p.request_jump();
                }
                p.integrate();
                prop_assert!(p.pos.y <= p.rest_y());
                prop_assert!(p.jump_count <= 2);
                if p.on_ground {
                    prop_assert_eq!(p.pos.y, p.rest_y());
                    prop_assert_eq!(p.jump_count, 0);
                }
            }
        }
    }
}
