//! Player-triggered effects: dropped hazards and the voice boost

use glam::Vec2;

use super::effects::{self, EffectKind};
use super::schedule::{DelayedEvent, Scheduler};
use super::state::{DroppedHazard, RaceState};
use crate::consts::*;

/// Drop a hazard just behind `racer_id`. Returns the new hazard's id.
pub fn drop_hazard(state: &mut RaceState, racer_id: &str) -> Option<String> {
    let pos = state.racer(racer_id)?.pos;
    let id = format!("dropped-hazard-{}", state.next_entity_id());
    state.dropped_hazards.push(DroppedHazard {
        id: id.clone(),
        pos: pos - Vec2::new(0.0, DROP_OFFSET),
        active: true,
        dropped_by: racer_id.to_owned(),
    });
    log::debug!("{} dropped {} at ({:.0}, {:.0})", racer_id, id, pos.x, pos.y - DROP_OFFSET);
    Some(id)
}

/// Double the player's speed for a while. No-op during cooldown.
pub fn activate_voice_boost(state: &mut RaceState, scheduler: &mut Scheduler) -> bool {
    if state.voice_boost_cooldown > 0.0 {
        return false;
    }
    let Some(player) = state.racers.iter_mut().find(|r| r.is_player) else {
        return false;
    };
    player.speed_multiplier = VOICE_BOOST_MULTIPLIER;
    let message = effects::voice_boost_message(player.display_name());

    let stamp = scheduler.next_stamp();
    state.voice_boost_active = true;
    state.voice_boost_cooldown = VOICE_BOOST_COOLDOWN;
    state.voice_boost_stamp = Some(stamp);
    state.add_effect(EffectKind::VoiceBoost, message, VOICE_BOOST_DURATION);
    scheduler.schedule(VOICE_BOOST_DURATION, DelayedEvent::EndVoiceBoost { stamp });
    log::debug!("Voice boost on (stamp {})", stamp);
    true
}

/// Scheduled end of a voice boost; ignored unless `stamp` is still current
pub fn end_voice_boost(state: &mut RaceState, stamp: u64) {
    if state.voice_boost_stamp != Some(stamp) {
        log::trace!("Stale voice boost end {} dropped", stamp);
        return;
    }
    state.voice_boost_active = false;
    state.voice_boost_stamp = None;
    if let Some(player) = state.racers.iter_mut().find(|r| r.is_player) {
        // Anything picked up meanwhile keeps its own multiplier
        if player.power_up.is_none() && !player.is_slowed() {
            player.speed_multiplier = 1.0;
        }
    }
    log::debug!("Voice boost off");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::effects::PowerUpKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> RaceState {
        RaceState::new(&Settings::default(), &mut Pcg32::seed_from_u64(2))
    }

    #[test]
    fn test_drop_behind_player() {
        let mut s = state();
        let a = drop_hazard(&mut s, "player").unwrap();
        let b = drop_hazard(&mut s, "player").unwrap();
        assert_ne!(a, b);
        let h = &s.dropped_hazards[0];
        assert_eq!(h.pos, Vec2::new(640.0, 50.0));
        assert!(h.active);
        assert!(drop_hazard(&mut s, "nobody").is_none());
        assert_eq!(s.dropped_hazards.len(), 2);
    }

    #[test]
    fn test_voice_boost_and_cooldown() {
        let mut s = state();
        let mut sched = Scheduler::new();
        assert!(activate_voice_boost(&mut s, &mut sched));
        assert_eq!(s.player().unwrap().speed_multiplier, 2.0);
        assert!(s.voice_boost_active);
        assert_eq!(s.voice_boost_cooldown, 10000.0);
        assert_eq!(s.active_effects[0].duration, 3000.0);

        assert!(!activate_voice_boost(&mut s, &mut sched));
        assert_eq!(sched.pending_len(), 1);
    }

    #[test]
    fn test_voice_boost_end() {
        let mut s = state();
        let mut sched = Scheduler::new();
        activate_voice_boost(&mut s, &mut sched);
        let stamp = s.voice_boost_stamp.unwrap();

        end_voice_boost(&mut s, stamp + 100);
        assert!(s.voice_boost_active);

        end_voice_boost(&mut s, stamp);
        assert!(!s.voice_boost_active);
        assert_eq!(s.player().unwrap().speed_multiplier, 1.0);
    }

    #[test]
    fn test_voice_boost_end_keeps_power_up() {
        let mut s = state();
        let mut sched = Scheduler::new();
        activate_voice_boost(&mut s, &mut sched);
        let stamp = s.voice_boost_stamp.unwrap();
        let p = &mut s.racers[0];
        p.power_up = Some(PowerUpKind::Rocket);
        p.power_up_timer = 2000.0;
        p.speed_multiplier = 1.7;

        end_voice_boost(&mut s, stamp);
        assert_eq!(s.player().unwrap().speed_multiplier, 1.7);
    }
}
