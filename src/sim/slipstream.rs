//! Slipstream (drafting)
//!
//! A follower 80-120 units behind a leader and within 50 units sideways gets
//! a short x1.2 bonus. Power-ups, slowdowns and the player's voice boost all
//! take precedence: while one is running the bonus is neither granted nor
//! removed here.

use super::effects::{self, EffectKind};
use super::state::{RaceState, Racer};
use crate::consts::*;

fn in_draft(follower: &Racer, leader: &Racer) -> bool {
    let gap = leader.pos.y - follower.pos.y;
    let lateral = (leader.pos.x - follower.pos.x).abs();
    gap > SLIPSTREAM_MIN_GAP && gap < SLIPSTREAM_MAX_GAP && lateral < SLIPSTREAM_MAX_LATERAL
}

/// True while something stronger than the draft owns the multiplier
fn overridden(racer: &Racer, voice_boost_active: bool) -> bool {
    racer.power_up.is_some() || racer.is_slowed() || (racer.is_player && voice_boost_active)
}

/// Evaluate every (follower, leader) pair once
pub fn run_slipstream(state: &mut RaceState) {
    let voice = state.voice_boost_active;

    for f in 0..state.racers.len() {
        let mut drafting = false;

        for l in 0..state.racers.len() {
            if f == l || !in_draft(&state.racers[f], &state.racers[l]) {
                continue;
            }
            drafting = true;

            let follower = &mut state.racers[f];
            if follower.slipstream_timer == 0.0 && !overridden(follower, voice) {
                follower.speed_multiplier = SLIPSTREAM_MULTIPLIER;
                follower.slipstream_timer = SLIPSTREAM_DURATION;
                if follower.is_player {
                    let message = effects::slipstream_message(state.racers[l].display_name());
                    state.add_effect(EffectKind::Slipstream, message, SLIPSTREAM_DURATION);
                }
            }
        }

        let follower = &mut state.racers[f];
        if !drafting
            && follower.slipstream_timer <= 0.0
            && !overridden(follower, voice)
            && follower.speed_multiplier != 1.0
        {
            follower.speed_multiplier = 1.0;
        }
    }
}
