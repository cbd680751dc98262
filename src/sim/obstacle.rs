//! Obstacles and the field that spawns and scrolls them
//!
//! Spawning is the only randomized part of the simulation. The field owns
//! its own seeded generator so a run is reproducible from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::SpawnRules;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground obstacle of random size
    Cactus,
    /// Fixed-size flyer at a random altitude
    Bird,
}

impl ObstacleKind {
    /// Roll the kind for the next spawn at the given score
    pub fn choose(rng: &mut impl Rng, rules: &SpawnRules, score: u64) -> Self {
        let birds_unlocked = score > u64::from(rules.bird_min_score) && rules.bird_chance > 0.0;
        if birds_unlocked && rng.random_bool(rules.bird_chance) {
            ObstacleKind::Bird
        } else {
            ObstacleKind::Cactus
        }
    }

    /// Roll a hitbox for this kind with its left edge at `x`
    pub fn roll_hitbox(
        self,
        rng: &mut impl Rng,
        rules: &SpawnRules,
        x: f32,
        ground_y: f32,
    ) -> Rect {
        match self {
            ObstacleKind::Cactus => {
                let h = rng.random_range(rules.cactus_height.min..=rules.cactus_height.max);
                let w = rng.random_range(rules.cactus_width.min..=rules.cactus_width.max);
                Rect::new(x, ground_y - h, w, h)
            }
            ObstacleKind::Bird => {
                let altitude = rng.random_range(rules.bird_altitude.min..=rules.bird_altitude.max);
                Rect::new(x, ground_y - altitude, rules.bird_width, rules.bird_height)
            }
        }
    }
}

/// A single obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, hitbox: Rect) -> Self {
        Self {
            id,
            kind,
            pos: hitbox.pos,
            size: hitbox.size,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// True once the right edge has scrolled past the left side of the screen
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Countdown until the next spawn, given the current score
///
/// Base delay plus jitter, tightened by `delay_step` for every
/// `delay_step_points` of score, never below `min_delay`.
pub fn next_spawn_delay(rng: &mut impl Rng, rules: &SpawnRules, score: u64) -> u32 {
    let jitter = if rules.delay_jitter > 0.0 {
        rng.random_range(0.0..rules.delay_jitter)
    } else {
        0.0
    };
    let steps = (score / u64::from(rules.delay_step_points)) as i64;
    let delay = i64::from(rules.base_delay) + jitter.floor() as i64
        - steps * i64::from(rules.delay_step);
    delay.max(i64::from(rules.min_delay)) as u32
}

/// Live obstacles plus the spawn timer
#[derive(Debug, Clone)]
pub struct ObstacleField {
    /// Active obstacles in spawn order
    obstacles: Vec<Obstacle>,
    ticks_until_next_spawn: u32,
    rules: SpawnRules,
    ground_y: f32,
    rng: Pcg32,
    next_id: u32,
    spawned: u32,
}

impl ObstacleField {
    /// Create an empty field seeded for reproducible spawns
    pub fn new(seed: u64, rules: SpawnRules, ground_y: f32) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), rules, ground_y)
    }

    /// Create an empty field around an existing generator
    pub fn with_rng(rng: Pcg32, rules: SpawnRules, ground_y: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            ticks_until_next_spawn: rules.initial_delay,
            rules,
            ground_y,
            rng,
            next_id: 1,
            spawned: 0,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn ticks_until_next_spawn(&self) -> u32 {
        self.ticks_until_next_spawn
    }

    /// Obstacles spawned since the last reset
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Scroll every obstacle left by `speed` and drop the ones that left the screen
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= speed;
        }
        self.obstacles.retain(|o| !o.is_off_screen());
    }

    /// Tick the spawn timer, spawning one obstacle when it runs out.
    /// Returns the kind spawned, if any.
    pub fn maybe_spawn(&mut self, score: u64) -> Option<ObstacleKind> {
        self.ticks_until_next_spawn = self.ticks_until_next_spawn.saturating_sub(1);
        if self.ticks_until_next_spawn > 0 {
            return None;
        }

        let kind = ObstacleKind::choose(&mut self.rng, &self.rules, score);
        let hitbox =
            kind.roll_hitbox(&mut self.rng, &self.rules, self.rules.spawn_x, self.ground_y);
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, kind, hitbox));
        self.spawned += 1;

        self.ticks_until_next_spawn = next_spawn_delay(&mut self.rng, &self.rules, score);
        log::debug!(
            "Spawned {:?} #{} at y={:.1} (next in {} ticks)",
            kind,
            id,
            hitbox.pos.y,
            self.ticks_until_next_spawn
        );
        Some(kind)
    }

    /// Insert a pre-built obstacle, assigning it the next id
    pub fn push(&mut self, kind: ObstacleKind, hitbox: Rect) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, kind, hitbox));
        id
    }

    /// Clear all obstacles and restart the spawn countdown.
    /// The generator keeps its stream so the next run differs.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.ticks_until_next_spawn = self.rules.initial_delay;
        self.spawned = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_Y;
    use proptest::prelude::*;

    fn field(seed: u64) -> ObstacleField {
        ObstacleField::new(seed, SpawnRules::default(), GROUND_Y)
    }

    #[test]
    fn test_off_screen_cleanup_timing() {
        let mut f = field(1);
        f.push(ObstacleKind::Cactus, Rect::new(800.0, 200.0, 30.0, 40.0));
        for tick in 1..166 {
            f.advance(5.0);
            assert_eq!(f.obstacles().len(), 1, "removed early at tick {tick}");
        }
        f.advance(5.0);
        assert!(f.obstacles().is_empty());
    }

    #[test]
    fn test_advance_moves_independently() {
        let mut f = field(1);
        f.push(ObstacleKind::Cactus, Rect::new(2.0, 200.0, 1.0, 40.0));
        f.push(ObstacleKind::Bird, Rect::new(400.0, 150.0, 42.0, 30.0));
        f.advance(5.0);
        assert_eq!(f.obstacles().len(), 1);
        assert_eq!(f.obstacles()[0].pos.x, 395.0);
        assert_eq!(f.obstacles()[0].kind, ObstacleKind::Bird);
    }

    #[test]
    fn test_first_spawn_after_initial_delay() {
        let mut f = field(7);
        for _ in 0..79 {
            assert_eq!(f.maybe_spawn(0), None);
        }
        assert_eq!(f.maybe_spawn(0), Some(ObstacleKind::Cactus));
        assert_eq!(f.obstacles().len(), 1);
        assert!(f.ticks_until_next_spawn() >= 80);
        assert!(f.ticks_until_next_spawn() < 180);
    }

    #[test]
    fn test_cactus_dimensions() {
        let rules = SpawnRules::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let r = ObstacleKind::Cactus.roll_hitbox(&mut rng, &rules, 800.0, GROUND_Y);
            assert!((30.0..=60.0).contains(&r.size.y));
            assert!((30.0..=50.0).contains(&r.size.x));
            assert_eq!(r.bottom(), GROUND_Y);
        }
    }

    #[test]
    fn test_bird_dimensions() {
        let rules = SpawnRules::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let r = ObstacleKind::Bird.roll_hitbox(&mut rng, &rules, 800.0, GROUND_Y);
            assert_eq!(r.size, Vec2::new(42.0, 30.0));
            assert!(r.top() >= GROUND_Y - 100.0 && r.top() <= GROUND_Y - 60.0);
        }
    }

    #[test]
    fn test_birds_only_above_threshold() {
        let rules = SpawnRules::default();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            assert_eq!(ObstacleKind::choose(&mut rng, &rules, 100), ObstacleKind::Cactus);
        }
        let birds = (0..2000)
            .filter(|_| ObstacleKind::choose(&mut rng, &rules, 101) == ObstacleKind::Bird)
            .count();
        // 35% of 2000 = 700
        assert!((550..850).contains(&birds), "got {birds} birds");
    }

    #[test]
    fn test_no_birds_when_disabled() {
        let rules = SpawnRules {
            bird_chance: 0.0,
            ..SpawnRules::default()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            assert_eq!(ObstacleKind::choose(&mut rng, &rules, 10_000), ObstacleKind::Cactus);
        }
    }

    #[test]
    fn test_delay_tightens_with_score() {
        let rules = SpawnRules {
            delay_jitter: 0.0,
            ..SpawnRules::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(next_spawn_delay(&mut rng, &rules, 0), 80);
        assert_eq!(next_spawn_delay(&mut rng, &rules, 299), 80);
        assert_eq!(next_spawn_delay(&mut rng, &rules, 300), 70);
        assert_eq!(next_spawn_delay(&mut rng, &rules, 900), 50);
        assert_eq!(next_spawn_delay(&mut rng, &rules, 100_000), 50);
    }

    #[test]
    fn test_reset_clears_field() {
        let mut f = field(5);
        f.push(ObstacleKind::Cactus, Rect::new(100.0, 200.0, 30.0, 40.0));
        f.maybe_spawn(0);
        f.reset();
        assert!(f.obstacles().is_empty());
        assert_eq!(f.ticks_until_next_spawn(), 80);
        assert_eq!(f.spawned(), 0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = field(42);
        let mut b = field(42);
        for _ in 0..1000 {
            assert_eq!(a.maybe_spawn(500), b.maybe_spawn(500));
        }
        let ys_a: Vec<_> = a.obstacles().iter().map(|o| o.pos.y).collect();
        let ys_b: Vec<_> = b.obstacles().iter().map(|o| o.pos.y).collect();
        assert_eq!(ys_a, ys_b);
    }

    proptest! {
        #[test]
        fn prop_spawn_delay_floor(seed in any::<u64>(), score in 0u64..1_000_000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let delay = next_spawn_delay(&mut rng, &SpawnRules::default(), score);
            prop_assert!(delay >= 50);
            prop_assert!(delay < 180);
        }
    }
}
