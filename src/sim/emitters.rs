//! Cosmetic particle emitters (no gameplay coupling)

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::pools::{Color, Particle};
use super::state::GameState;

/// Ember tint used by the ultimate: red fixed, green 0-99, no blue
fn ember_color(rng: &mut impl Rng, min_alpha: f32, alpha_span: f32) -> Color {
    Color::rgba(
        255,
        rng.random_range(0..100),
        0,
        min_alpha + rng.random::<f32>() * alpha_span,
    )
}

/// Ten sparks scattered over a destroyed obstacle's rect
pub fn hit_sparks(state: &mut GameState, top_left: Vec2, width: f32, height: f32) {
    if !state.particles_enabled {
        return;
    }
    let rng = &mut state.rng;
    for _ in 0..state.tuning.coils.hit_particles {
        let pos = top_left + Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 6.0;
        let color = Color::rgba(
            255,
            rng.random_range(100..=254),
            rng.random_range(0..100),
            0.3 + rng.random::<f32>() * 0.7,
        );
        state.pools.particles.push(Particle {
            pos,
            vel,
            size: 2.0 + rng.random::<f32>() * 4.0,
            color,
            life: rng.random_range(10..30),
        });
    }
}

/// One particle on a ring of radius 50-100 around `center`, drifting upward
pub fn ultimate_ring_particle(state: &mut GameState, center: Vec2) {
    if !state.particles_enabled {
        return;
    }
    let rng = &mut state.rng;
    let radius = 50.0 + rng.random::<f32>() * 50.0;
    let angle = rng.random::<f32>() * TAU;
    let particle = Particle {
        pos: center + Vec2::from_angle(angle) * radius,
        vel: Vec2::new((rng.random::<f32>() - 0.5) * 2.0, -rng.random::<f32>() * 2.0 - 1.0),
        size: 2.0 + rng.random::<f32>() * 4.0,
        color: ember_color(rng, 0.3, 0.7),
        life: rng.random_range(10..30),
    };
    state.pools.particles.push(particle);
}

/// Embers falling off the player sprite while the ultimate is active
pub fn ultimate_embers(state: &mut GameState, top_left: Vec2, size: f32) {
    if !state.particles_enabled {
        return;
    }
    let rng = &mut state.rng;
    for _ in 0..state.tuning.ultimate.embers_per_tick {
        let pos = top_left + Vec2::new(rng.random::<f32>() * size, rng.random::<f32>() * size);
        state.pools.particles.push(Particle {
            pos,
            vel: Vec2::new((rng.random::<f32>() - 0.5) * 3.0, rng.random::<f32>() * 3.0 + 1.0),
            size: 3.0 + rng.random::<f32>() * 5.0,
            color: ember_color(rng, 0.3, 0.7),
            life: rng.random_range(10..40),
        });
    }
}

/// The requiem burst: particles thrown radially outward from a ring
pub fn requiem_explosion(state: &mut GameState, center: Vec2) {
    if !state.particles_enabled {
        return;
    }
    let rng = &mut state.rng;
    for _ in 0..state.tuning.ultimate.explosion_particles {
        let dir = Vec2::from_angle(rng.random::<f32>() * TAU);
        let distance = 100.0 + rng.random::<f32>() * 300.0;
        let speed = 3.0 + rng.random::<f32>() * 5.0;
        state.pools.particles.push(Particle {
            pos: center + dir * distance,
            vel: dir * speed,
            size: 5.0 + rng.random::<f32>() * 10.0,
            color: ember_color(rng, 0.5, 0.5),
            life: rng.random_range(30..80),
        });
    }
}
