//! Chasing obstacles
//!
//! Naive pursuit: each tick a chaser steps straight at the player's current
//! position. No inertia, no avoidance.

use glam::Vec2;

use super::state::RaceState;
use crate::consts::*;

/// Move every active chasing obstacle one step toward the player
pub fn chase_player(state: &mut RaceState) {
    let Some(target) = state.player().map(|p| p.pos) else {
        return;
    };
    let max_x = (state.canvas_width - LATERAL_MARGIN).max(LATERAL_MARGIN);
    let max_y = state.track_length;

    for obstacle in state.obstacles.iter_mut().filter(|o| o.active && o.is_chasing) {
        let to_target = target - obstacle.pos;
        if to_target.length() <= 0.0 {
            continue;
        }
        let step = to_target.normalize() * CHASE_SPEED;
        let next = obstacle.pos + step;
        obstacle.pos = Vec2::new(next.x.clamp(LATERAL_MARGIN, max_x), next.y.clamp(0.0, max_y));
        obstacle.vel = step;
    }
}
