//! Procedural track content
//!
//! Entities sit at fixed longitudinal intervals; lateral offset and kind are
//! random. Ids derive from the collection and the longitudinal slot, so they
//! are unique within a race.

use glam::Vec2;
use rand::Rng;

use super::effects::{EggContents, ObstacleKind, PowerUpKind};
use super::state::{MysteryEgg, Obstacle, PowerUp};
use crate::consts::*;

/// Everything placed on a fresh track
#[derive(Debug, Clone, Default)]
pub struct TrackLayout {
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub mystery_eggs: Vec<MysteryEgg>,
}

/// Generate all three collections for a track
pub fn generate<R: Rng + ?Sized>(track_length: f32, canvas_width: f32, rng: &mut R) -> TrackLayout {
    let layout = TrackLayout {
        power_ups: generate_power_ups(track_length, canvas_width, rng),
        obstacles: generate_obstacles(track_length, canvas_width, rng),
        mystery_eggs: generate_mystery_eggs(track_length, canvas_width, rng),
    };
    log::info!(
        "Track {}: {} power-ups, {} obstacles ({} chasing), {} eggs",
        track_length,
        layout.power_ups.len(),
        layout.obstacles.len(),
        layout.obstacles.iter().filter(|o| o.is_chasing).count(),
        layout.mystery_eggs.len()
    );
    layout
}

/// Longitudinal slots `start, start + spacing, ...` strictly below the track end
fn slots(start: u32, spacing: u32, track_length: f32) -> impl Iterator<Item = u32> {
    (start..)
        .step_by(spacing as usize)
        .take_while(move |&y| (y as f32) < track_length)
}

/// Uniform in [margin, width - margin]
fn lateral<R: Rng + ?Sized>(canvas_width: f32, rng: &mut R) -> f32 {
    let span = (canvas_width - 2.0 * SPAWN_MARGIN).max(0.0);
    SPAWN_MARGIN + rng.random::<f32>() * span
}

fn pick_power_up<R: Rng + ?Sized>(rng: &mut R) -> PowerUpKind {
    PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())]
}

fn pick_obstacle<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
}

pub fn generate_power_ups<R: Rng + ?Sized>(track_length: f32, canvas_width: f32, rng: &mut R) -> Vec<PowerUp> {
    slots(POWER_UP_START, POWER_UP_SPACING, track_length)
        .map(|y| PowerUp {
            id: format!("powerup-{y}"),
            kind: pick_power_up(rng),
            pos: Vec2::new(lateral(canvas_width, rng), y as f32),
            active: true,
        })
        .collect()
}

pub fn generate_obstacles<R: Rng + ?Sized>(track_length: f32, canvas_width: f32, rng: &mut R) -> Vec<Obstacle> {
    slots(OBSTACLE_START, OBSTACLE_SPACING, track_length)
        .map(|y| {
            let kind = pick_obstacle(rng);
            // Roll first so the draw count doesn't depend on the kind
            let chase_roll = rng.random_bool(CHASE_PROBABILITY);
            Obstacle {
                id: format!("obstacle-{y}"),
                kind,
                pos: Vec2::new(lateral(canvas_width, rng), y as f32),
                active: true,
                is_chasing: chase_roll && kind.can_chase(),
                vel: Vec2::ZERO,
            }
        })
        .collect()
}

pub fn generate_mystery_eggs<R: Rng + ?Sized>(track_length: f32, canvas_width: f32, rng: &mut R) -> Vec<MysteryEgg> {
    slots(EGG_START, EGG_SPACING, track_length)
        .map(|y| {
            let contents = if rng.random_bool(EGG_POWER_UP_PROBABILITY) {
                EggContents::PowerUp(pick_power_up(rng))
            } else {
                EggContents::Obstacle(pick_obstacle(rng))
            };
            MysteryEgg {
                id: format!("egg-{y}"),
                pos: Vec2::new(lateral(canvas_width, rng), y as f32),
                active: true,
                contents,
                opening: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_slot_positions() {
        let mut rng = Pcg32::seed_from_u64(1);
        let layout = generate(3000.0, 800.0, &mut rng);

        let ys: Vec<f32> = layout.power_ups.iter().map(|p| p.pos.y).collect();
        assert_eq!(ys, vec![500.0, 900.0, 1300.0, 1700.0, 2100.0, 2500.0, 2900.0]);
        let ys: Vec<f32> = layout.obstacles.iter().map(|o| o.pos.y).collect();
        assert_eq!(ys, vec![800.0, 1400.0, 2000.0, 2600.0]);
        let ys: Vec<f32> = layout.mystery_eggs.iter().map(|e| e.pos.y).collect();
        assert_eq!(ys, vec![1200.0, 2000.0, 2800.0]);
    }

    #[test]
    fn test_track_end_is_exclusive() {
        let mut rng = Pcg32::seed_from_u64(1);
        let power_ups = generate_power_ups(900.0, 800.0, &mut rng);
        assert_eq!(power_ups.len(), 1);
    }

    #[test]
    fn test_lateral_bounds() {
        let mut rng = Pcg32::seed_from_u64(2);
        let layout = generate(40_000.0, 640.0, &mut rng);
        let xs = layout
            .power_ups
            .iter()
            .map(|p| p.pos.x)
            .chain(layout.obstacles.iter().map(|o| o.pos.x))
            .chain(layout.mystery_eggs.iter().map(|e| e.pos.x));
        for x in xs {
            assert!((100.0..=540.0).contains(&x), "x out of bounds: {x}");
        }
    }

    #[test]
    fn test_ids_unique() {
        let mut rng = Pcg32::seed_from_u64(3);
        let layout = generate(40_000.0, 1280.0, &mut rng);
        let mut seen = HashSet::new();
        for id in layout
            .power_ups
            .iter()
            .map(|p| &p.id)
            .chain(layout.obstacles.iter().map(|o| &o.id))
            .chain(layout.mystery_eggs.iter().map(|e| &e.id))
        {
            assert!(seen.insert(id.clone()), "duplicate id {id}");
        }
    }

    #[test]
    fn test_antibodies_never_chase() {
        let mut rng = Pcg32::seed_from_u64(4);
        let obstacles = generate_obstacles(600_000.0, 1280.0, &mut rng);
        assert!(obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Antibody)
            .all(|o| !o.is_chasing));
        // 0.3 * 3/4 of slots chase on average
        let rate = obstacles.iter().filter(|o| o.is_chasing).count() as f64 / obstacles.len() as f64;
        assert!((0.18..0.27).contains(&rate), "chase rate {rate}");
    }

    #[test]
    fn test_egg_content_distribution() {
        let mut rng = Pcg32::seed_from_u64(5);
        let eggs = generate_mystery_eggs(1_600_000.0, 1280.0, &mut rng);
        let power_ups = eggs.iter().filter(|e| !e.contents.is_obstacle()).count();
        let rate = power_ups as f64 / eggs.len() as f64;
        assert!((0.55..0.65).contains(&rate), "power-up rate {rate}");
    }

    #[test]
    fn test_same_seed_same_track() {
        let a = generate(10_000.0, 1280.0, &mut Pcg32::seed_from_u64(9));
        let b = generate(10_000.0, 1280.0, &mut Pcg32::seed_from_u64(9));
        assert_eq!(a.power_ups, b.power_ups);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.mystery_eggs, b.mystery_eggs);
    }
}
