//! Race simulation module
//!
//! All gameplay logic lives here. Hosts mutate the state only through these
//! functions (or the `Race` wrapper), one phase at a time:
//! - Timers, chasing hazards, particles, due delayed events (`tick`)
//! - Collisions: pickups, hits, egg openings, bumps, steals
//! - Slipstream
//!
//! No rendering or platform dependencies.

pub mod actions;
pub mod collision;
pub mod effects;
pub mod hazard;
pub mod motion;
pub mod mystery;
pub mod particles;
pub mod schedule;
pub mod slipstream;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::run_collisions;
pub use effects::{EffectKind, EggContents, ObstacleKind, PowerUpKind};
pub use schedule::{DelayedEvent, Scheduler};
pub use slipstream::run_slipstream;
pub use state::{
    ActiveEffect, DroppedHazard, MysteryEgg, Obstacle, Opening, Particle, PowerUp, RacePhase, RaceState, Racer,
    RacerUpdate,
};
pub use tick::{advance_timers, tick};
pub use track::{TrackLayout, generate as generate_track};
