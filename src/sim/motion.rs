//! Racer movement and finish detection
//!
//! Everyone swims up the track at `base_speed x speed_multiplier`. The
//! player steers sideways from input; AI racers home in on the nearest
//! power-up ahead or wander.

use rand::Rng;

use super::state::{RacePhase, RaceState, Racer};
use crate::consts::*;
use crate::settings::Settings;

/// How far ahead AI racers look for power-ups
const AI_LOOKAHEAD: f32 = 400.0;
/// Per-frame damping of bounce velocity
const BOUNCE_DAMPING: f32 = 0.9;

/// Lateral intent in [-1, 1] for an AI racer
fn ai_steer<R: Rng + ?Sized>(racer: &Racer, state: &RaceState, wander: f32, rng: &mut R) -> f32 {
    let target = state
        .power_ups
        .iter()
        .filter(|p| p.active)
        .filter(|p| {
            let ahead = p.pos.y - racer.pos.y;
            ahead > 0.0 && ahead < AI_LOOKAHEAD
        })
        .min_by(|a, b| a.pos.distance(racer.pos).total_cmp(&b.pos.distance(racer.pos)));

    match target {
        Some(p) => ((p.pos.x - racer.pos.x) / LATERAL_MARGIN).clamp(-1.0, 1.0),
        None if wander > 0.0 => rng.random_range(-1.0..=1.0f32) * wander,
        None => 0.0,
    }
}

/// Move every racer by one frame of `delta` ms
pub fn move_racers<R: Rng + ?Sized>(state: &mut RaceState, settings: &Settings, player_steer: f32, rng: &mut R, delta: f32) {
    let delta = delta.max(0.0);
    let max_x = (state.canvas_width - LATERAL_MARGIN).max(LATERAL_MARGIN);

    let steering: Vec<f32> = state
        .racers
        .iter()
        .map(|r| {
            if r.is_player {
                player_steer.clamp(-1.0, 1.0)
            } else {
                ai_steer(r, state, settings.ai_wander, rng)
            }
        })
        .collect();

    for (racer, steer) in state.racers.iter_mut().zip(steering) {
        racer.pos.x += steer * settings.steer_speed * delta + racer.vel.x;
        racer.vel.x *= BOUNCE_DAMPING;
        racer.pos.x = racer.pos.x.clamp(LATERAL_MARGIN, max_x);

        racer.pos.y = (racer.pos.y + settings.base_speed * racer.speed_multiplier * delta).min(state.track_length);
    }
}

/// End the race once somebody reaches the line. Returns the winner's id.
pub fn check_finish(state: &mut RaceState) -> Option<String> {
    if state.phase != RacePhase::Racing {
        return None;
    }
    let winner = state
        .racers
        .iter()
        .filter(|r| r.pos.y >= state.track_length)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?
        .id
        .clone();

    state.phase = RacePhase::Finished;
    state.winner = Some(winner.clone());
    Some(winner)
}
