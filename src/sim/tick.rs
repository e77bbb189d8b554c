//! Per-tick simulation advance
//!
//! Order is fixed: timers -> chasing hazards -> particles -> due delayed
//! events. Collisions and slipstream run after this so they see the
//! already-decayed timers of the same tick.

use rand::Rng;

use super::actions;
use super::hazard;
use super::mystery;
use super::particles;
use super::schedule::{DelayedEvent, Scheduler};
use super::state::RaceState;
use crate::consts::*;

/// Decay every timer by `delta` ms
///
/// Slowdown and power-up expiry both look at the racer's flags from before
/// this pass: a slowdown running out doesn't reset speed while a power-up
/// is held, but a power-up running out always resets it, slowdown or not.
pub fn advance_timers(state: &mut RaceState, delta: f32) {
    let delta = delta.max(0.0);

    for racer in state.racers.iter_mut() {
        let had_power_up = racer.power_up.is_some();

        if racer.slowdown_timer > 0.0 {
            racer.slowdown_timer = (racer.slowdown_timer - delta).max(0.0);
            if racer.slowdown_timer == 0.0 && !had_power_up {
                racer.speed_multiplier = 1.0;
            }
        }

        if racer.power_up_timer > 0.0 {
            racer.power_up_timer = (racer.power_up_timer - delta).max(0.0);
            if racer.power_up_timer == 0.0 {
                racer.speed_multiplier = 1.0;
                racer.power_up = None;
            }
        }

        if racer.slipstream_timer > 0.0 {
            racer.slipstream_timer = (racer.slipstream_timer - delta).max(0.0);
        }
    }

    for effect in state.active_effects.iter_mut() {
        effect.timer = (effect.timer - delta).max(0.0);
    }
    state.active_effects.retain(|e| e.timer > 0.0);

    state.voice_boost_cooldown = (state.voice_boost_cooldown - delta).max(0.0);
    state.screen_shake = (state.screen_shake - delta * SHAKE_DECAY_PER_MS).max(0.0);
}

/// Advance the race by one frame of `delta` ms
pub fn tick<R: Rng + ?Sized>(state: &mut RaceState, scheduler: &mut Scheduler, rng: &mut R, delta: f32) {
    state.tick_index += 1;

    advance_timers(state, delta);
    hazard::chase_player(state);
    particles::integrate(state, delta);

    scheduler.advance(delta);
    for event in scheduler.drain_due() {
        fire(state, rng, event);
    }
}

fn fire<R: Rng + ?Sized>(state: &mut RaceState, rng: &mut R, event: DelayedEvent) {
    match event {
        DelayedEvent::RevealEgg { egg_id, racer_id, stamp } => {
            mystery::reveal(state, rng, &egg_id, &racer_id, stamp);
        }
        DelayedEvent::EndVoiceBoost { stamp } => {
            actions::end_voice_boost(state, stamp);
        }
    }
}
