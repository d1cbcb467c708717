use std::f32::consts::{PI, TAU};

use bevy::math::Vec3;
use rand::Rng;

use constants::palette::WHITE;
use constants::shape::FIREWORKS_RADIUS;

use super::{ParticleRole, ShapeSample};

/// Filled sphere with density pushed toward the shell by a square-root radius
/// transform.
pub fn generate(budget: usize, rng: &mut impl Rng) -> ShapeSample {
    let mut sample = ShapeSample::with_capacity(budget);

    for _ in 0..budget {
        let r = rng.random::<f32>().sqrt() * FIREWORKS_RADIUS;
        let theta = rng.random::<f32>() * TAU;
        let phi = rng.random::<f32>() * PI;

        sample.push(
            Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ),
            WHITE,
            ParticleRole::Body,
        );
    }

    sample
}
