//! Closed kind enumerations and their effect tables
//!
//! Every kind that can touch a racer maps to exactly one multiplier and
//! duration here, so adding a kind fails to compile until it is priced.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Power-up pickups (speed multiplier above 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Glide,
    Mutation,
    Rocket,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Glide, PowerUpKind::Mutation, PowerUpKind::Rocket];

    pub fn multiplier(self) -> f32 {
        match self {
            PowerUpKind::Glide => 1.5,
            PowerUpKind::Mutation => 1.3,
            PowerUpKind::Rocket => 1.7,
        }
    }

    pub fn duration(self) -> f32 {
        POWER_UP_DURATION
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Glide => "Glide",
            PowerUpKind::Mutation => "Mutation",
            PowerUpKind::Rocket => "Rocket",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            PowerUpKind::Glide => "💧",
            PowerUpKind::Mutation => "🧬",
            PowerUpKind::Rocket => "🚀",
        }
    }
}

/// Obstacles (multiplier below 1 for a kind-dependent time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Barrier,
    Pill,
    Antibody,
    Infection,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Barrier,
        ObstacleKind::Pill,
        ObstacleKind::Antibody,
        ObstacleKind::Infection,
    ];

    pub fn slowdown(self) -> f32 {
        match self {
            ObstacleKind::Barrier => 2000.0,
            ObstacleKind::Pill => 1500.0,
            ObstacleKind::Antibody | ObstacleKind::Infection => 3000.0,
        }
    }

    pub fn multiplier(self) -> f32 {
        SLOWDOWN_MULTIPLIER
    }

    /// Only some obstacle kinds are allowed to hunt the player
    pub fn can_chase(self) -> bool {
        !matches!(self, ObstacleKind::Antibody)
    }

    pub fn label(self) -> &'static str {
        match self {
            ObstacleKind::Barrier => "Barrier",
            ObstacleKind::Pill => "Pill",
            ObstacleKind::Antibody => "Antibody",
            ObstacleKind::Infection => "Infection",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ObstacleKind::Barrier => "🚫",
            ObstacleKind::Pill => "💊",
            ObstacleKind::Antibody | ObstacleKind::Infection => "🦠",
        }
    }
}

/// What a mystery egg turns out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EggContents {
    PowerUp(PowerUpKind),
    Obstacle(ObstacleKind),
}

impl EggContents {
    pub fn is_obstacle(self) -> bool {
        matches!(self, EggContents::Obstacle(_))
    }
}

/// Type tag of an active effect notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    PowerUp(PowerUpKind),
    Obstacle(ObstacleKind),
    Steal,
    Slipstream,
    VoiceBoost,
}

/// How a racer came by an effect; only changes the notice wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Track,
    Mystery,
}

pub fn power_up_message(name: &str, kind: PowerUpKind, source: Source) -> String {
    match source {
        Source::Track => format!("{} {} got {} Boost!", kind.icon(), name, kind.label()),
        Source::Mystery => format!("✨ {} got Mystery {}!", name, kind.label()),
    }
}

pub fn obstacle_message(name: &str, kind: ObstacleKind, source: Source) -> String {
    match source {
        Source::Track => format!("{} {} hit {}!", kind.icon(), name, kind.label()),
        Source::Mystery => format!("💥 {} got Mystery {}!", name, kind.label()),
    }
}

pub fn steal_message(thief: &str, victim: &str) -> String {
    format!("{thief} stole {victim}'s power-up!")
}

pub fn slipstream_message(leader: &str) -> String {
    format!("⚡ SLIPSTREAM! Following {leader}!")
}

pub fn voice_boost_message(name: &str) -> String {
    format!("🎤 {name} activated Voice Boost!")
}
