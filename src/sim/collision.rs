//! Axis-aligned hitbox tests
//!
//! Both the runner and every obstacle are plain rectangles. The check
//! shrinks them by a margin first so near misses that only graze a corner
//! don't end the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::PlayerBody;

/// Rectangle anchored at its top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Overlap test with an inward margin
///
/// Horizontally both rectangles shrink by `margin` on each side. Vertically
/// the runner shrinks top and bottom while the obstacle keeps its full
/// height, so landing on a cactus top is still a hit.
pub fn rects_overlap(runner: Rect, obstacle: Rect, margin: f32) -> bool {
    runner.left() + margin < obstacle.right() - margin
        && runner.right() - margin > obstacle.left() + margin
        && runner.top() + margin < obstacle.bottom()
        && runner.bottom() - margin > obstacle.top()
}

/// Check whether the player is touching an obstacle
#[inline]
pub fn overlaps(player: &PlayerBody, obstacle: &Obstacle, margin: f32) -> bool {
    rects_overlap(player.hitbox(), obstacle.hitbox(), margin)
}
