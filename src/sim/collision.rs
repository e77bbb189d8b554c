//! Collision detection and response
//!
//! Proximity is a plain radius test. Each pass checks every racer against
//! every active entity, then every racer pair for bumps and power-up steals.
//! Activity flags are re-read per hit, so two racers touching the same
//! pickup in one pass only trigger it once.

use super::effects::{self, EffectKind, ObstacleKind, PowerUpKind, Source};
use super::mystery;
use super::schedule::Scheduler;
use super::state::{DroppedHazard, RaceState, RacerUpdate};
use crate::consts::*;
use crate::within;

/// Give `racer_id` a power-up and post the notice. None if the racer is gone.
pub fn apply_power_up(state: &mut RaceState, racer_id: &str, kind: PowerUpKind, source: Source) -> Option<String> {
    let name = state.racer(racer_id)?.display_name().to_owned();
    state.update_racer(racer_id, RacerUpdate::power_up(kind));
    let message = effects::power_up_message(&name, kind, source);
    state.add_effect(EffectKind::PowerUp(kind), message.clone(), kind.duration());
    log::debug!("{} picked up {:?}", racer_id, kind);
    Some(message)
}

/// Slow `racer_id` down and post the notice. None if the racer is gone.
pub fn apply_obstacle(state: &mut RaceState, racer_id: &str, kind: ObstacleKind, source: Source) -> Option<String> {
    let name = state.racer(racer_id)?.display_name().to_owned();
    state.update_racer(racer_id, RacerUpdate::slowdown(kind));
    let message = effects::obstacle_message(&name, kind, source);
    state.add_effect(EffectKind::Obstacle(kind), message.clone(), kind.slowdown());
    log::debug!("{} hit {:?}", racer_id, kind);
    Some(message)
}

/// Pick up a track power-up (no-op if it's already gone)
pub fn collect_power_up(state: &mut RaceState, racer_id: &str, power_up_id: &str) {
    if let Some(kind) = state.take_power_up(power_up_id) {
        apply_power_up(state, racer_id, kind, Source::Track);
    }
}

/// Run into a track obstacle (no-op if it's already gone)
pub fn hit_obstacle(state: &mut RaceState, racer_id: &str, obstacle_id: &str) {
    if let Some(kind) = state.take_obstacle(obstacle_id) {
        apply_obstacle(state, racer_id, kind, Source::Track);
    }
}

/// Run into a dropped hazard; the dropper is not immune
pub fn hit_dropped_hazard(state: &mut RaceState, racer_id: &str, hazard_id: &str) {
    if state.take_dropped_hazard(hazard_id) {
        apply_obstacle(state, racer_id, DroppedHazard::PROFILE, Source::Track);
    }
}

/// Full collision pass: entities first, then racer pairs
pub fn run_collisions(state: &mut RaceState, scheduler: &mut Scheduler) {
    for i in 0..state.racers.len() {
        check_entities(state, scheduler, i);
    }
    check_racer_pairs(state);
}

fn check_entities(state: &mut RaceState, scheduler: &mut Scheduler, index: usize) {
    let racer_id = state.racers[index].id.clone();
    let pos = state.racers[index].pos;

    let touched: Vec<String> = state
        .power_ups
        .iter()
        .filter(|p| p.active && within(pos, p.pos, PICKUP_RADIUS))
        .map(|p| p.id.clone())
        .collect();
    for id in touched {
        collect_power_up(state, &racer_id, &id);
    }

    let touched: Vec<String> = state
        .obstacles
        .iter()
        .filter(|o| o.active && within(pos, o.pos, PICKUP_RADIUS))
        .map(|o| o.id.clone())
        .collect();
    for id in touched {
        hit_obstacle(state, &racer_id, &id);
    }

    let touched: Vec<String> = state
        .mystery_eggs
        .iter()
        .filter(|e| e.active && !e.is_opening() && within(pos, e.pos, EGG_RADIUS))
        .map(|e| e.id.clone())
        .collect();
    for id in touched {
        mystery::begin_opening(state, scheduler, &id, &racer_id);
    }

    let touched: Vec<String> = state
        .dropped_hazards
        .iter()
        .filter(|h| h.active && within(pos, h.pos, PICKUP_RADIUS))
        .map(|h| h.id.clone())
        .collect();
    for id in touched {
        hit_dropped_hazard(state, &racer_id, &id);
    }
}

fn check_racer_pairs(state: &mut RaceState) {
    if state.steal_tick != state.tick_index {
        state.steal_checked.clear();
        state.steal_tick = state.tick_index;
    }

    let n = state.racers.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let offset = state.racers[i].pos - state.racers[j].pos;
            if offset.length() >= RACER_CONTACT_RADIUS {
                continue;
            }
            bump(state, i, j, offset.y.atan2(offset.x));

            let key = (state.racers[i].id.clone(), state.racers[j].id.clone());
            if state.steal_checked.contains(&key) {
                continue;
            }
            state.steal_checked.push(key);
            try_steal(state, i, j);
        }
    }
}

/// Shove both racers apart sideways along the contact angle
fn bump(state: &mut RaceState, i: usize, j: usize, angle: f32) {
    let push = angle.cos() * BUMP_PUSH;

    let a = &mut state.racers[i];
    a.pos.x += push;
    a.vel.x = push;

    let b = &mut state.racers[j];
    b.pos.x -= push;
    b.vel.x = -push;
}

/// Move a power-up from the holder to an empty-handed racer
fn try_steal(state: &mut RaceState, i: usize, j: usize) {
    let (a, b) = (&state.racers[i], &state.racers[j]);
    let (victim, thief) = if a.has_stealable_power_up() && b.power_up.is_none() {
        (i, j)
    } else if b.has_stealable_power_up() && a.power_up.is_none() {
        (j, i)
    } else {
        return;
    };

    let loot = RacerUpdate {
        speed_multiplier: Some(state.racers[victim].speed_multiplier),
        power_up: Some(state.racers[victim].power_up),
        power_up_timer: Some(state.racers[victim].power_up_timer),
        ..Default::default()
    };
    loot.apply(&mut state.racers[thief]);
    state.racers[victim].clear_power_up();

    let message = effects::steal_message(
        state.racers[thief].display_name(),
        state.racers[victim].display_name(),
    );
    log::debug!("{}", message);
    state.add_effect(EffectKind::Steal, message, STEAL_NOTICE_MS);
}
