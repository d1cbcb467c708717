use std::f32::consts::TAU;

use bevy::math::Vec3;
use rand::Rng;

use constants::palette::WHITE;
use constants::shape::{HEART_DEPTH_JITTER, HEART_SCALE};

use super::{ParticleRole, ShapeSample};

/// Classic heart curve `x = 16 sin^3 t`, `y = 13 cos t - 5 cos 2t - 2 cos 3t
/// - cos 4t`, sampled uniformly in parameter and jittered in depth.
pub fn generate(budget: usize, rng: &mut impl Rng) -> ShapeSample {
    let mut sample = ShapeSample::with_capacity(budget);

    for _ in 0..budget {
        let t = rng.random::<f32>() * TAU;
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let z = (rng.random::<f32>() - 0.5) * HEART_DEPTH_JITTER;

        sample.push(
            Vec3::new(x * HEART_SCALE, y * HEART_SCALE, z),
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
    fn test_heart_bounding_box() {
        let mut rng = rand::rng();
        let sample = generate(2000, &mut rng);
        for position in &sample.positions {
            assert!(position.x.abs() <= 16.0 * HEART_SCALE + 1e-3);
            // Curve extrema: y_max = 5 at t = 0, y_min = -17 at t = pi.
            assert!(position.y <= 5.0 * HEART_SCALE + 1e-3);
            assert!(position.y >= -17.0 * HEART_SCALE - 1e-3);
            assert!(position.z.abs() <= HEART_DEPTH_JITTER / 2.0 + 1e-3);
        }
    }

    #[test]
    fn test_heart_points_lie_on_the_curve() {
        // Every generated point must sit near a dense polyline of the curve
        // in the xy plane; depth jitter is orthogonal.
        let polyline: Vec<(f32, f32)> = (0..4096)
            .map(|i| {
                let t = i as f32 / 4096.0 * TAU;
                let x = 16.0 * t.sin().powi(3);
                let y = 13.0 * t.cos()
                    - 5.0 * (2.0 * t).cos()
                    - 2.0 * (3.0 * t).cos()
                    - (4.0 * t).cos();
                (x * HEART_SCALE, y * HEART_SCALE)
            })
            .collect();

        let mut rng = rand::rng();
        let sample = generate(500, &mut rng);
        for position in &sample.positions {
            let nearest = polyline
                .iter()
                .map(|(x, y)| {
                    let dx = position.x - x;
                    let dy = position.y - y;
                    dx * dx + dy * dy
                })
                .fold(f32::INFINITY, f32::min)
                .sqrt();
            assert!(nearest < 0.3, "point {position:?} is off the heart curve");
        }
    }
}
