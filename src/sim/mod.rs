//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed-size step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod scenery;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps, rects_overlap};
pub use obstacle::{Obstacle, ObstacleField, ObstacleKind, next_spawn_delay};
pub use player::{BodyPhysics, PlayerBody};
pub use scenery::{Cloud, Scenery};
pub use snapshot::{ObstacleView, PlayerPose, Snapshot};
pub use state::{GameEvent, GamePhase, GameSession, MAX_PENDING_EVENTS};
