//! Read-only view of a session for the render layer

use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use super::scenery::Scenery;
use super::state::{GamePhase, GameSession};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub on_ground: bool,
    pub jump_count: u8,
    pub anim_frame: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub speed: f32,
    pub frame: u64,
    pub player: PlayerPose,
    pub obstacles: Vec<ObstacleView>,
    pub scenery: Scenery,
}

impl GameSession {
    pub fn snapshot(&self) -> Snapshot {
        let p = &self.player;
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            speed: self.speed,
            frame: self.frame,
            player: PlayerPose {
                x: p.pos.x,
                y: p.pos.y,
                w: p.size.x,
                h: p.size.y,
                on_ground: p.on_ground,
                jump_count: p.jump_count,
                anim_frame: p.anim_frame,
            },
            obstacles: self
                .field
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    x: o.pos.x,
                    y: o.pos.y,
                    w: o.size.x,
                    h: o.size.y,
                })
                .collect(),
            scenery: self.scenery.clone(),
        }
    }
}
