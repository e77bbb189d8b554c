//! Race state and core simulation types
//!
//! The single source of truth every tick phase reads and mutates. Entities
//! only ever go active -> inactive; the whole state is rebuilt on reset.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::{EffectKind, EggContents, ObstacleKind, PowerUpKind};
use super::track;
use crate::consts::*;
use crate::settings::{RacerProfile, Settings};

/// Current phase of the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RacePhase {
    /// Waiting on the start line
    #[default]
    Ready,
    /// Active racing
    Racing,
    /// Someone crossed the line
    Finished,
}

/// A racer (player or AI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Racer {
    pub id: String,
    pub name: String,
    /// Shown in notices instead of `name` when set
    #[serde(default)]
    pub nickname: Option<String>,
    pub color: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed_multiplier: f32,
    pub slowdown_timer: f32,
    pub slipstream_timer: f32,
    pub power_up: Option<PowerUpKind>,
    pub power_up_timer: f32,
    pub is_player: bool,
}

impl Racer {
    /// Build a racer on the start line
    pub fn from_profile(profile: &RacerProfile, canvas_width: f32, nickname: Option<&str>) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            nickname: if profile.is_player {
                nickname.map(str::to_owned)
            } else {
                None
            },
            color: profile.color.clone(),
            pos: Vec2::new(canvas_width / 2.0 + profile.lane_offset, START_LINE_Y),
            vel: Vec2::ZERO,
            speed_multiplier: 1.0,
            slowdown_timer: 0.0,
            slipstream_timer: 0.0,
            power_up: None,
            power_up_timer: 0.0,
            is_player: profile.is_player,
        }
    }

    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }

    pub fn is_slowed(&self) -> bool {
        self.slowdown_timer > 0.0
    }

    /// Holding a power-up that is still worth stealing
    pub fn has_stealable_power_up(&self) -> bool {
        self.power_up.is_some() && self.power_up_timer > STEAL_MIN_REMAINING
    }

    /// Drop any power-up and return to base speed
    pub fn clear_power_up(&mut self) {
        self.speed_multiplier = 1.0;
        self.power_up = None;
        self.power_up_timer = 0.0;
    }
}

/// Partial racer update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RacerUpdate {
    pub pos: Option<Vec2>,
    pub vel: Option<Vec2>,
    pub speed_multiplier: Option<f32>,
    pub slowdown_timer: Option<f32>,
    pub slipstream_timer: Option<f32>,
    pub power_up: Option<Option<PowerUpKind>>,
    pub power_up_timer: Option<f32>,
}

impl RacerUpdate {
    /// Merge into `racer`. Timers are floored at zero.
    pub fn apply(self, racer: &mut Racer) {
        if let Some(pos) = self.pos {
            racer.pos = pos;
        }
        if let Some(vel) = self.vel {
            racer.vel = vel;
        }
        if let Some(m) = self.speed_multiplier {
            racer.speed_multiplier = m;
        }
        if let Some(t) = self.slowdown_timer {
            racer.slowdown_timer = t.max(0.0);
        }
        if let Some(t) = self.slipstream_timer {
            racer.slipstream_timer = t.max(0.0);
        }
        if let Some(kind) = self.power_up {
            racer.power_up = kind;
        }
        if let Some(t) = self.power_up_timer {
            racer.power_up_timer = t.max(0.0);
        }
    }

    /// Grant a power-up at full strength
    pub fn power_up(kind: PowerUpKind) -> Self {
        Self {
            speed_multiplier: Some(kind.multiplier()),
            power_up: Some(Some(kind)),
            power_up_timer: Some(kind.duration()),
            ..Default::default()
        }
    }

    /// Apply an obstacle's slowdown
    pub fn slowdown(kind: ObstacleKind) -> Self {
        Self {
            speed_multiplier: Some(kind.multiplier()),
            slowdown_timer: Some(kind.slowdown()),
            ..Default::default()
        }
    }
}

/// A power-up lying on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: String,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub active: bool,
}

/// A track obstacle, possibly hunting the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub active: bool,
    pub is_chasing: bool,
    /// Last pursuit step, kept for display only
    pub vel: Vec2,
}

/// Stamp captured when an egg starts opening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    /// Simulation clock when the egg was touched
    pub started_at: f64,
    /// Unique across resets; the pending reveal must present the same one
    pub stamp: u64,
}

/// Mystery egg: idle -> opening -> resolved (inactive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MysteryEgg {
    pub id: String,
    pub pos: Vec2,
    pub active: bool,
    pub contents: EggContents,
    pub opening: Option<Opening>,
}

impl MysteryEgg {
    pub fn is_opening(&self) -> bool {
        self.opening.is_some()
    }

    /// Opening progress in [0, 1] for renderers
    pub fn opening_progress(&self, now: f64) -> f32 {
        match self.opening {
            Some(o) => (((now - o.started_at) as f32) / EGG_REVEAL_DELAY).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

/// A hazard the player dropped behind themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedHazard {
    pub id: String,
    pub pos: Vec2,
    pub active: bool,
    pub dropped_by: String,
}

impl DroppedHazard {
    /// Dropped hazards always hit like a barrier
    pub const PROFILE: ObstacleKind = ObstacleKind::Barrier;
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: String,
    pub size: f32,
}

/// A timed, user-facing effect description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub id: u32,
    pub kind: EffectKind,
    pub message: String,
    pub duration: f32,
    pub timer: f32,
}

/// Complete race state (serializable snapshot for renderers)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceState {
    pub phase: RacePhase,
    pub track_length: f32,
    pub canvas_width: f32,
    pub camera_y: f32,
    /// Roster order; never reordered during a race
    pub racers: Vec<Racer>,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub mystery_eggs: Vec<MysteryEgg>,
    pub dropped_hazards: Vec<DroppedHazard>,
    pub particles: Vec<Particle>,
    pub active_effects: Vec<ActiveEffect>,
    pub screen_shake: f32,
    pub voice_boost_active: bool,
    pub voice_boost_cooldown: f32,
    /// Stamp of the voice boost currently running, if any
    pub voice_boost_stamp: Option<u64>,
    /// One-slot mailbox for commentary
    pub last_event_message: String,
    /// Id of the first racer across the line
    pub winner: Option<String>,
    /// Number of `tick` calls since reset
    pub tick_index: u64,
    /// Racer pairs whose steal check already ran during `steal_tick`
    #[serde(skip)]
    pub(crate) steal_checked: Vec<(String, String)>,
    #[serde(skip)]
    pub(crate) steal_tick: u64,
    next_id: u32,
}

impl RaceState {
    /// Racers on the start line with freshly generated track content
    pub fn new<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let racers = settings
            .roster
            .iter()
            .map(|p| Racer::from_profile(p, settings.canvas_width, settings.player_nickname.as_deref()))
            .collect();
        let layout = track::generate(settings.track_length, settings.canvas_width, rng);

        Self {
            phase: RacePhase::Ready,
            track_length: settings.track_length,
            canvas_width: settings.canvas_width,
            camera_y: 0.0,
            racers,
            power_ups: layout.power_ups,
            obstacles: layout.obstacles,
            mystery_eggs: layout.mystery_eggs,
            dropped_hazards: Vec::new(),
            particles: Vec::new(),
            active_effects: Vec::new(),
            screen_shake: 0.0,
            voice_boost_active: false,
            voice_boost_cooldown: 0.0,
            voice_boost_stamp: None,
            last_event_message: String::new(),
            winner: None,
            tick_index: 0,
            steal_checked: Vec::new(),
            steal_tick: 0,
            next_id: 1,
        }
    }

    /// Allocate a new id for particles, notices and dropped hazards
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn racer(&self, id: &str) -> Option<&Racer> {
        self.racers.iter().find(|r| r.id == id)
    }

    pub fn racer_mut(&mut self, id: &str) -> Option<&mut Racer> {
        self.racers.iter_mut().find(|r| r.id == id)
    }

    pub fn player(&self) -> Option<&Racer> {
        self.racers.iter().find(|r| r.is_player)
    }

    /// Merge `update` into the racer with `id`. Returns false if not found.
    pub fn update_racer(&mut self, id: &str, update: RacerUpdate) -> bool {
        match self.racer_mut(id) {
            Some(racer) => {
                update.apply(racer);
                true
            }
            None => false,
        }
    }

    /// Append an effect notice
    pub fn add_effect(&mut self, kind: EffectKind, message: String, duration: f32) {
        let id = self.next_entity_id();
        self.active_effects.push(ActiveEffect {
            id,
            kind,
            message,
            duration,
            timer: duration,
        });
    }

    /// Deactivate an active power-up, returning its kind
    pub fn take_power_up(&mut self, id: &str) -> Option<PowerUpKind> {
        let p = self.power_ups.iter_mut().find(|p| p.id == id && p.active)?;
        p.active = false;
        Some(p.kind)
    }

    /// Deactivate an active obstacle, returning its kind
    pub fn take_obstacle(&mut self, id: &str) -> Option<ObstacleKind> {
        let o = self.obstacles.iter_mut().find(|o| o.id == id && o.active)?;
        o.active = false;
        Some(o.kind)
    }

    /// Deactivate an active dropped hazard
    pub fn take_dropped_hazard(&mut self, id: &str) -> bool {
        match self.dropped_hazards.iter_mut().find(|h| h.id == id && h.active) {
            Some(h) => {
                h.active = false;
                true
            }
            None => false,
        }
    }

    pub fn egg(&self, id: &str) -> Option<&MysteryEgg> {
        self.mystery_eggs.iter().find(|e| e.id == id)
    }

    pub fn egg_mut(&mut self, id: &str) -> Option<&mut MysteryEgg> {
        self.mystery_eggs.iter_mut().find(|e| e.id == id)
    }
}
