//! Background parallax (clouds and ground stripes)
//!
//! Purely cosmetic. Nothing here feeds back into physics, spawning or
//! collisions; the renderer just reads it from the snapshot.

use serde::{Deserialize, Serialize};

use crate::consts::{GROUND_STRIPE_SPACING, WORLD_WIDTH};

/// Clouds drift at a quarter of the scroll speed
const CLOUD_PARALLAX: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub w: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    /// Horizontal offset of the ground stripe pattern, in `(-40, 0]`
    pub ground_offset: f32,
}

impl Default for Scenery {
    fn default() -> Self {
        Self {
            clouds: vec![
                Cloud {
                    x: 200.0,
                    y: 40.0,
                    w: 80.0,
                },
                Cloud {
                    x: 480.0,
                    y: 60.0,
                    w: 60.0,
                },
                Cloud {
                    x: 680.0,
                    y: 30.0,
                    w: 100.0,
                },
            ],
            ground_offset: 0.0,
        }
    }
}

impl Scenery {
    /// Scroll the background by one tick at `speed`
    pub fn scroll(&mut self, speed: f32) {
        self.ground_offset = (self.ground_offset - speed) % GROUND_STRIPE_SPACING;
        for cloud in &mut self.clouds {
            cloud.x -= speed * CLOUD_PARALLAX;
            if cloud.x + cloud.w < 0.0 {
                cloud.x = WORLD_WIDTH + 20.0;
            }
        }
    }
}
