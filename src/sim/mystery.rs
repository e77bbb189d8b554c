//! Mystery eggs
//!
//! Touching an egg only starts it opening. The reveal fires from the
//! scheduler after a fixed delay and re-checks the egg by id: if the egg is
//! no longer opening under the same stamp (a reset happened in between) the
//! reveal is dropped without side effects.

use rand::Rng;

use super::collision::{apply_obstacle, apply_power_up};
use super::effects::{EggContents, Source};
use super::particles;
use super::schedule::{DelayedEvent, Scheduler};
use super::state::{Opening, RaceState};
use crate::consts::*;

/// idle -> opening. Returns false if the egg or racer is missing, the egg
/// is spent, or it is already opening.
pub fn begin_opening(state: &mut RaceState, scheduler: &mut Scheduler, egg_id: &str, racer_id: &str) -> bool {
    if state.racer(racer_id).is_none() {
        return false;
    }
    let now = scheduler.now();
    let Some(egg) = state.egg_mut(egg_id) else {
        return false;
    };
    if !egg.active || egg.is_opening() {
        return false;
    }

    let stamp = scheduler.next_stamp();
    egg.opening = Some(Opening { started_at: now, stamp });
    scheduler.schedule(
        EGG_REVEAL_DELAY,
        DelayedEvent::RevealEgg {
            egg_id: egg_id.to_owned(),
            racer_id: racer_id.to_owned(),
            stamp,
        },
    );
    log::debug!("{} is opening {}", racer_id, egg_id);
    true
}

/// opening -> resolved. Returns false when the reveal was stale.
pub fn reveal<R: Rng + ?Sized>(state: &mut RaceState, rng: &mut R, egg_id: &str, racer_id: &str, stamp: u64) -> bool {
    let Some(egg) = state.egg(egg_id) else {
        log::trace!("Reveal for missing egg {} dropped", egg_id);
        return false;
    };
    let current = egg.opening.map(|o| o.stamp);
    if !egg.active || current != Some(stamp) {
        log::trace!("Stale reveal for {} dropped (stamp {} vs {:?})", egg_id, stamp, current);
        return false;
    }
    let (pos, contents) = (egg.pos, egg.contents);

    particles::spawn_burst(state, pos, EGG_PARTICLE_COLOR, EGG_PARTICLE_COUNT, rng);

    let message = match contents {
        EggContents::PowerUp(kind) => apply_power_up(state, racer_id, kind, Source::Mystery),
        EggContents::Obstacle(kind) => {
            state.screen_shake = EGG_SHAKE;
            apply_obstacle(state, racer_id, kind, Source::Mystery)
        }
    };
    if let Some(message) = message {
        state.last_event_message = message;
    }

    if let Some(egg) = state.egg_mut(egg_id) {
        egg.active = false;
        egg.opening = None;
    }
    log::debug!("{} revealed {:?} for {}", egg_id, contents, racer_id);
    true
}
