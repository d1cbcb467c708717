use std::f32::consts::TAU;

use bevy::math::Vec3;
use rand::Rng;

use constants::palette::WHITE;
use constants::shape::{
    SATURN_RING_FRACTION, SATURN_RING_INNER_RADIUS, SATURN_RING_THICKNESS, SATURN_RING_WIDTH,
    SATURN_SHELL_BIAS, SATURN_SPHERE_RADIUS,
};

use super::{ParticleRole, ShapeSample};

/// Shell-biased sphere plus a flat annular ring with slight vertical jitter.
pub fn generate(budget: usize, rng: &mut impl Rng) -> ShapeSample {
    let mut sample = ShapeSample::with_capacity(budget);

    let ring_count = (budget as f32 * SATURN_RING_FRACTION) as usize;
    let sphere_count = budget - ring_count;

    for _ in 0..sphere_count {
        let r = SATURN_SPHERE_RADIUS
            * (SATURN_SHELL_BIAS + (1.0 - SATURN_SHELL_BIAS) * rng.random::<f32>());
        let theta = rng.random::<f32>() * TAU;
        let phi = (2.0 * rng.random::<f32>() - 1.0).acos();

        sample.push(
            Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ),
            WHITE,
            ParticleRole::Core,
        );
    }

    for _ in 0..ring_count {
        let r = SATURN_RING_INNER_RADIUS + rng.random::<f32>() * SATURN_RING_WIDTH;
        let theta = rng.random::<f32>() * TAU;

        sample.push(
            Vec3::new(
                r * theta.cos(),
                (rng.random::<f32>() - 0.5) * SATURN_RING_THICKNESS,
                r * theta.sin(),
            ),
            WHITE,
            ParticleRole::Ring,
        );
    }

    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturn_split_and_radius_bands() {
        let mut rng = rand::rng();
        let budget = 10_000;
        let sample = generate(budget, &mut rng);

        let ring_count = sample
            .roles
            .iter()
            .filter(|r| matches!(r, ParticleRole::Ring))
            .count();
        let core_count = budget - ring_count;
        assert_eq!(ring_count, (budget as f32 * SATURN_RING_FRACTION) as usize);
        assert_eq!(
            core_count,
            sample
                .roles
                .iter()
                .filter(|r| matches!(r, ParticleRole::Core))
                .count()
        );

        for (position, role) in sample.positions.iter().zip(&sample.roles) {
            match role {
                ParticleRole::Core => {
                    let r = position.length();
                    assert!(r >= SATURN_SPHERE_RADIUS * SATURN_SHELL_BIAS - 1e-3);
                    assert!(r <= SATURN_SPHERE_RADIUS + 1e-3);
                }
                ParticleRole::Ring => {
                    let planar = (position.x * position.x + position.z * position.z).sqrt();
                    assert!(planar >= SATURN_RING_INNER_RADIUS - 1e-3);
                    assert!(planar <= SATURN_RING_INNER_RADIUS + SATURN_RING_WIDTH + 1e-3);
                    assert!(position.y.abs() <= SATURN_RING_THICKNESS / 2.0 + 1e-3);
                }
                other => panic!("unexpected role {other:?} in saturn sample"),
            }
        }
    }
}
