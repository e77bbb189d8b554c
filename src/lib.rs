//! Swim Rush - simulation core for a vertical arcade racer
//!
//! Core modules:
//! - `sim`: Race state, per-tick timers, collisions, mystery eggs, hazard AI
//! - `race`: The owned simulation object hosts drive once per frame
//! - `settings`: Data-driven track/roster/motion configuration
//! - `standings`: Leaderboard and finish ranking
//! - `commentary`: Commentary line selection for a speech layer
//! - `voice`: Voice trigger phrase matching

pub mod commentary;
pub mod race;
pub mod settings;
pub mod sim;
pub mod standings;
pub mod voice;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use race::{Race, RaceInput};
pub use settings::{RacerProfile, Settings};
pub use standings::Standings;

use glam::Vec2;

/// Gameplay constants (times in milliseconds, distances in track units)
pub mod consts {
    /// Power-up pickup, obstacle and dropped hazard proximity radius
    pub const PICKUP_RADIUS: f32 = 40.0;
    /// Mystery egg proximity radius
    pub const EGG_RADIUS: f32 = 45.0;
    /// Racer-vs-racer proximity radius
    pub const RACER_CONTACT_RADIUS: f32 = 50.0;

    /// Bounce push applied to both racers on contact
    pub const BUMP_PUSH: f32 = 3.0;
    /// A power-up must have more than this left to be stolen
    pub const STEAL_MIN_REMAINING: f32 = 100.0;
    pub const STEAL_NOTICE_MS: f32 = 2000.0;

    /// Power-up boost duration
    pub const POWER_UP_DURATION: f32 = 3000.0;
    /// Multiplier applied while slowed
    pub const SLOWDOWN_MULTIPLIER: f32 = 0.5;

    /// Slipstream window (follower must trail the leader by this much)
    pub const SLIPSTREAM_MIN_GAP: f32 = 80.0;
    pub const SLIPSTREAM_MAX_GAP: f32 = 120.0;
    pub const SLIPSTREAM_MAX_LATERAL: f32 = 50.0;
    pub const SLIPSTREAM_MULTIPLIER: f32 = 1.2;
    pub const SLIPSTREAM_DURATION: f32 = 500.0;

    /// Voice boost
    pub const VOICE_BOOST_MULTIPLIER: f32 = 2.0;
    pub const VOICE_BOOST_DURATION: f32 = 3000.0;
    pub const VOICE_BOOST_COOLDOWN: f32 = 10000.0;

    /// Mystery egg reveal delay after first touch
    pub const EGG_REVEAL_DELAY: f32 = 800.0;
    pub const EGG_PARTICLE_COUNT: usize = 20;
    pub const EGG_PARTICLE_COLOR: &str = "#FFD700";
    /// Screen shake impulse when an egg turns out to be an obstacle
    pub const EGG_SHAKE: f32 = 5.0;
    /// Screen shake decay per millisecond
    pub const SHAKE_DECAY_PER_MS: f32 = 0.02;

    /// Chasing obstacle speed (units per tick)
    pub const CHASE_SPEED: f32 = 2.0;
    /// Lateral margin used for hazard and racer clamping
    pub const LATERAL_MARGIN: f32 = 50.0;

    /// Track layout
    pub const POWER_UP_START: u32 = 500;
    pub const POWER_UP_SPACING: u32 = 400;
    pub const OBSTACLE_START: u32 = 800;
    pub const OBSTACLE_SPACING: u32 = 600;
    pub const EGG_START: u32 = 1200;
    pub const EGG_SPACING: u32 = 800;
    /// Lateral spawn margin for generated entities
    pub const SPAWN_MARGIN: f32 = 100.0;
    pub const CHASE_PROBABILITY: f64 = 0.3;
    pub const EGG_POWER_UP_PROBABILITY: f64 = 0.6;

    /// Particles
    pub const PARTICLE_LIFE: f32 = 1000.0;
    pub const PARTICLE_GRAVITY: f32 = 0.1;

    /// Racers start here
    pub const START_LINE_Y: f32 = 100.0;
    /// Dropped hazards land this far behind the player
    pub const DROP_OFFSET: f32 = 50.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// True when `a` and `b` are strictly closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance(a, b) < radius
}
