use std::f32::consts::{PI, TAU};

use bevy::math::Vec3;
use rand::Rng;

use constants::palette::WHITE;
use constants::shape::{FLOWER_AMPLITUDE, FLOWER_BASE_RADIUS, FLOWER_LOBES};

use super::{ParticleRole, ShapeSample};

/// Five-lobed polar rose over spherical angles: the radius swells and shrinks
/// with `cos(5u) sin(v)` around a base sphere.
pub fn generate(budget: usize, rng: &mut impl Rng) -> ShapeSample {
    let mut sample = ShapeSample::with_capacity(budget);

    for _ in 0..budget {
        let u = rng.random::<f32>() * TAU;
        let v = rng.random::<f32>() * PI;
        let radius = FLOWER_BASE_RADIUS + FLOWER_AMPLITUDE * (FLOWER_LOBES * u).cos() * v.sin();

        sample.push(
            Vec3::new(
                radius * v.sin() * u.cos(),
                radius * v.sin() * u.sin(),
                radius * v.cos(),
            ),
            WHITE,
            ParticleRole::Body,
        );
    }

    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flower_radius_band() {
        let mut rng = rand::rng();
        let sample = generate(2000, &mut rng);
        let min = FLOWER_BASE_RADIUS - FLOWER_AMPLITUDE;
        let max = FLOWER_BASE_RADIUS + FLOWER_AMPLITUDE;
        for position in &sample.positions {
            let r = position.length();
            assert!(r >= min - 1e-3 && r <= max + 1e-3, "radius {r} outside lobe band");
        }
    }
}
