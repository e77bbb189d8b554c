//! Decorative particles
//!
//! Bursts from reveals and impacts. Never collide with anything.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, RaceState};
use crate::consts::*;

/// Spawn `count` particles at `pos` flying out in random directions
pub fn spawn_burst<R: Rng + ?Sized>(state: &mut RaceState, pos: Vec2, color: &str, count: usize, rng: &mut R) {
    state.particles.reserve(count);
    for _ in 0..count {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random_range(2.0..=5.0f32);
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos,
            vel: Vec2::from_angle(angle) * speed,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            color: color.to_owned(),
            size: rng.random_range(2.0..=6.0f32),
        });
    }
}

/// Integrate one tick: velocity is per tick, life drains by `delta` ms
pub fn integrate(state: &mut RaceState, delta: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life -= delta;
    }
    state.particles.retain(|p| p.life > 0.0);
}
