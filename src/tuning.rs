//! Gameplay tuning
//!
//! Every balance constant of the runner lives here so alternative rule
//! sets (single jump, no birds) are data rather than separate code paths.
//! Hosts may ship overrides as JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GROUND_Y, WORLD_WIDTH};

/// Errors produced while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Inclusive uniform range for randomized spawn dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Obstacle spawn policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    /// X coordinate where new obstacles appear
    pub spawn_x: f32,
    /// Countdown used for the very first obstacle of a run
    pub initial_delay: u32,
    /// Base countdown between spawns (ticks)
    pub base_delay: u32,
    /// Random extra delay, drawn uniformly from `[0, delay_jitter)`
    pub delay_jitter: f32,
    /// Delay removed for every `delay_step_points` of score
    pub delay_step: u32,
    pub delay_step_points: u32,
    /// Spawns never come closer together than this
    pub min_delay: u32,
    /// Birds appear only once score is strictly above this
    pub bird_min_score: u32,
    /// Chance a spawn is a bird once birds are unlocked (0 disables birds)
    pub bird_chance: f64,
    pub cactus_width: Span,
    pub cactus_height: Span,
    pub bird_width: f32,
    pub bird_height: f32,
    /// Bird top edge, measured as distance above the ground line
    pub bird_altitude: Span,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            spawn_x: WORLD_WIDTH,
            initial_delay: 80,
            base_delay: 80,
            delay_jitter: 100.0,
            delay_step: 10,
            delay_step_points: 300,
            min_delay: 50,
            bird_min_score: 100,
            bird_chance: 0.35,
            cactus_width: Span::new(30.0, 50.0),
            cactus_height: Span::new(30.0, 60.0),
            bird_width: 42.0,
            bird_height: 30.0,
            bird_altitude: Span::new(60.0, 100.0),
        }
    }
}

/// Complete rule set for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/tick²)
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_force: f32,
    /// Jumps allowed before the player must touch the ground again
    pub max_jumps: u8,
    /// Ground line the player and cacti rest on
    pub ground_y: f32,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Inward shrink applied to hitboxes so grazes are forgiven
    pub hitbox_margin: f32,
    /// Ticks per score point
    pub ticks_per_point: u32,
    pub initial_speed: f32,
    /// Speed added every `speed_step_points` points
    pub speed_step: f32,
    pub speed_step_points: u32,
    pub spawn: SpawnRules,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_force: -13.0,
            max_jumps: 2,
            ground_y: GROUND_Y,
            player_x: 80.0,
            player_width: 40.0,
            player_height: 50.0,
            hitbox_margin: 6.0,
            ticks_per_point: 6,
            initial_speed: 5.0,
            speed_step: 0.5,
            speed_step_points: 200,
            spawn: SpawnRules::default(),
        }
    }
}

impl Tuning {
    /// The simpler rule set: one jump, cacti only
    pub fn single_jump() -> Self {
        Self {
            max_jumps: 1,
            spawn: SpawnRules {
                bird_chance: 0.0,
                ..SpawnRules::default()
            },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load host-provided tuning, falling back to defaults on any problem
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default tuning");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning (max_jumps={})", tuning.max_jumps);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {e}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason })
            }
        }

        let spawn = &self.spawn;
        check(self.max_jumps > 0, "max_jumps", "must allow at least one jump")?;
        check(self.gravity > 0.0, "gravity", "must pull downward")?;
        check(self.jump_force < 0.0, "jump_force", "must push upward")?;
        check(
            self.player_width > 0.0 && self.player_height > 0.0,
            "player_width/player_height",
            "must be positive",
        )?;
        check(self.hitbox_margin >= 0.0, "hitbox_margin", "must not be negative")?;
        check(self.ticks_per_point > 0, "ticks_per_point", "must be positive")?;
        check(self.initial_speed > 0.0, "initial_speed", "must be positive")?;
        check(self.speed_step >= 0.0, "speed_step", "must not slow the game down")?;
        check(self.speed_step_points > 0, "speed_step_points", "must be positive")?;
        check(spawn.min_delay > 0, "spawn.min_delay", "must be positive")?;
        check(spawn.delay_step_points > 0, "spawn.delay_step_points", "must be positive")?;
        check(spawn.delay_jitter >= 0.0, "spawn.delay_jitter", "must not be negative")?;
        check(
            (0.0..=1.0).contains(&spawn.bird_chance),
            "spawn.bird_chance",
            "must be a probability",
        )?;
        check(spawn.cactus_width.is_ordered(), "spawn.cactus_width", "min exceeds max")?;
        check(spawn.cactus_height.is_ordered(), "spawn.cactus_height", "min exceeds max")?;
        check(spawn.bird_altitude.is_ordered(), "spawn.bird_altitude", "min exceeds max")?;
        check(spawn.spawn_x > 0.0, "spawn.spawn_x", "must be on the right of the screen edge")?;
        check(spawn.cactus_width.min > 0.0, "spawn.cactus_width", "min must be positive")?;
        check(spawn.cactus_height.min > 0.0, "spawn.cactus_height", "min must be positive")?;
        check(
            spawn.bird_width > 0.0 && spawn.bird_height > 0.0,
            "spawn.bird_width/spawn.bird_height",
            "must be positive",
        )?;
        Ok(())
    }

    /// Scroll speed for a given score: a staircase rising every `speed_step_points`
    pub fn speed_for_score(&self, score: u64) -> f32 {
        let steps = score / u64::from(self.speed_step_points);
        self.initial_speed + steps as f32 * self.speed_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!(Tuning::single_jump().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_jumps": 3, "spawn": { "min_delay": 70 } }"#)
            .expect("valid tuning");
        assert_eq!(tuning.max_jumps, 3);
        assert_eq!(tuning.spawn.min_delay, 70);
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.spawn.base_delay, 80);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "max_jumps": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_jumps", .. }));

        let err = Tuning::from_json(r#"{ "spawn": { "bird_chance": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn.bird_chance", .. }));

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_negative_speed_step_rejected() {
        let err = Tuning::from_json(r#"{ "speed_step": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "speed_step", .. }));
        // A flat speed curve is fine
        assert!(Tuning::from_json(r#"{ "speed_step": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_obstacle_sizes_must_be_positive() {
        let cases = [
            (r#"{ "spawn": { "spawn_x": 0.0 } }"#, "spawn.spawn_x"),
            (
                r#"{ "spawn": { "cactus_width": { "min": 0.0, "max": 50.0 } } }"#,
                "spawn.cactus_width",
            ),
            (
                r#"{ "spawn": { "cactus_height": { "min": -5.0, "max": 60.0 } } }"#,
                "spawn.cactus_height",
            ),
            (r#"{ "spawn": { "bird_width": 0.0 } }"#, "spawn.bird_width/spawn.bird_height"),
            (r#"{ "spawn": { "bird_height": -30.0 } }"#, "spawn.bird_width/spawn.bird_height"),
        ];
        for (json, expected) in cases {
            match Tuning::from_json(json) {
                Err(TuningError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("{json} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(Tuning::load_or_default(None), Tuning::default());
        assert_eq!(
            Tuning::load_or_default(Some(r#"{ "gravity": -1.0 }"#)),
            Tuning::default()
        );
        assert_eq!(Tuning::load_or_default(Some(r#"{ "max_jumps": 1 }"#)).max_jumps, 1);
    }

    #[test]
    fn test_speed_staircase() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_for_score(0), 5.0);
        assert_eq!(tuning.speed_for_score(199), 5.0);
        assert_eq!(tuning.speed_for_score(200), 5.5);
        assert_eq!(tuning.speed_for_score(399), 5.5);
        assert_eq!(tuning.speed_for_score(400), 6.0);
    }
}
