//! Demo-mode player
//!
//! Used by the headless runner and the browser idle screen. It only looks
//! at the snapshot, like a human would.

use super::obstacle::ObstacleKind;
use super::snapshot::Snapshot;
use super::state::GamePhase;

/// Horizontal lead, in ticks of travel, at which a ground jump is triggered
const JUMP_LEAD_TICKS: f32 = 12.0;

/// Decide whether to press jump this frame
///
/// Jumps from the ground when a cactus (or a bird low enough to clip the
/// runner) is about to arrive. Never spends the second jump.
pub fn wants_jump(snap: &Snapshot) -> bool {
    match snap.phase {
        GamePhase::Idle => return true,
        GamePhase::GameOver => return false,
        GamePhase::Running => {}
    }
    if !snap.player.on_ground {
        return false;
    }

    let runner_front = snap.player.x + snap.player.w;
    let runner_top = snap.player.y;
    let trigger = snap.speed * JUMP_LEAD_TICKS;

    snap.obstacles.iter().any(|o| {
        let gap = o.x - runner_front;
        let blocks_path = match o.kind {
            ObstacleKind::Cactus => true,
            ObstacleKind::Bird => o.y + o.h > runner_top,
        };
        blocks_path && gap >= 0.0 && gap <= trigger
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameSession;

    #[test]
    fn test_idle_starts() {
        let snap = GameSession::with_seed(1).snapshot();
        assert!(wants_jump(&snap));
    }

    #[test]
    fn test_autopilot_outlives_standing_still() {
        let mut idle = GameSession::with_seed(21);
        idle.start();
        let mut pilot = GameSession::with_seed(21);

        for _ in 0..3000 {
            if idle.phase() == GamePhase::Running {
                idle.tick();
            }
            if pilot.phase() != GamePhase::GameOver {
                if wants_jump(&pilot.snapshot()) {
                    pilot.start_or_jump();
                }
                pilot.tick();
            }
        }
        assert_eq!(idle.phase(), GamePhase::GameOver);
        assert!(pilot.score() > idle.score());
    }
}
