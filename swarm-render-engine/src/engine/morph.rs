use bevy::prelude::*;

use constants::morph::{
    COLOR_CONVERGENCE_RATE, DEFAULT_SCALE, POSITION_CONVERGENCE_RATE, SCALE_CONVERGENCE_RATE,
    SHIMMER_AMPLITUDE,
};

use crate::engine::buffer::ParticleBuffer;

/// Uniform swarm scale. Applied at composition time while smoothing, never
/// baked into the stored targets, so gesture-driven resizing and shape
/// morphing stay independent.
#[derive(Resource)]
pub struct ScaleState {
    pub live: f32,
    pub target: f32,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self {
            live: DEFAULT_SCALE,
            target: DEFAULT_SCALE,
        }
    }
}

/// Per-second convergence rates and shimmer amplitude.
#[derive(Resource)]
pub struct MorphSettings {
    pub scale_rate: f32,
    pub position_rate: f32,
    pub color_rate: f32,
    pub shimmer_amplitude: f32,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            scale_rate: SCALE_CONVERGENCE_RATE,
            position_rate: POSITION_CONVERGENCE_RATE,
            color_rate: COLOR_CONVERGENCE_RATE,
            shimmer_amplitude: SHIMMER_AMPLITUDE,
        }
    }
}

/// One smoothing step over the working range. Scale, position, and color all
/// approach their targets by the same exponential law with independent rates;
/// a target may change mid-transition with no discontinuity. The shimmer is a
/// fresh displacement each tick, never integrated.
pub fn advance(
    buffer: &mut ParticleBuffer,
    scale: &mut ScaleState,
    settings: &MorphSettings,
    dt: f32,
    elapsed: f32,
) {
    // A step above 1.0 would overshoot and oscillate; clamp for stalls.
    let scale_step = (settings.scale_rate * dt).min(1.0);
    let position_step = (settings.position_rate * dt).min(1.0);
    let color_step = (settings.color_rate * dt).min(1.0);

    scale.live += (scale.target - scale.live) * scale_step;

    for i in 0..buffer.active() {
        let target = buffer.target_positions[i] * scale.live;
        let position = &mut buffer.positions[i];
        *position += (target - *position) * position_step;
        position.x += (elapsed + i as f32).sin() * settings.shimmer_amplitude;
        position.y += (elapsed + i as f32 * 0.5).cos() * settings.shimmer_amplitude;

        let target_color = buffer.target_colors[i];
        let color = &mut buffer.colors[i];
        *color += (target_color - *color) * color_step;
    }
}

/// Runs once per render frame; the mesh upload reads the mutated arrays
/// afterwards.
pub fn morph_tick(
    time: Res<Time>,
    settings: Res<MorphSettings>,
    mut buffer: ResMut<ParticleBuffer>,
    mut scale: ResMut<ScaleState>,
) {
    advance(
        &mut buffer,
        &mut scale,
        &settings,
        time.delta_secs(),
        time.elapsed_secs(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::color_policy::{self, ColorPolicy};
    use crate::engine::shapes::{ShapeKind, generate};

    const DT: f32 = 1.0 / 60.0;

    fn quiet_settings() -> MorphSettings {
        MorphSettings {
            shimmer_amplitude: 0.0,
            ..MorphSettings::default()
        }
    }

    fn heart_buffer(budget: usize) -> ParticleBuffer {
        let mut rng = rand::rng();
        let mut buffer = ParticleBuffer::new(budget, &mut rng);
        let sample = generate(ShapeKind::Heart, budget, &mut rng);
        buffer.store_targets(&sample);
        color_policy::resolve(&ColorPolicy::default(), &mut buffer, &mut rng);
        buffer
    }

    #[test]
    fn test_scale_converges_monotonically_without_overshoot() {
        let mut buffer = heart_buffer(10);
        let settings = quiet_settings();
        let mut scale = ScaleState {
            live: 0.9,
            target: 1.0,
        };

        let mut previous_error = (scale.target - scale.live).abs();
        for _ in 0..200 {
            advance(&mut buffer, &mut scale, &settings, DT, 0.0);
            let error = (scale.target - scale.live).abs();
            assert!(error <= previous_error, "scale error grew");
            assert!(scale.live <= scale.target, "scale overshot its target");
            previous_error = error;
        }
        assert!(previous_error < 1e-3);
    }

    #[test]
    fn test_position_and_color_converge_without_overshoot() {
        let mut buffer = heart_buffer(50);
        let settings = quiet_settings();
        // Pin scale so the effective position target is constant, and give
        // the white live colors a non-trivial target to chase.
        let mut scale = ScaleState {
            live: 1.0,
            target: 1.0,
        };
        for target in &mut buffer.target_colors {
            *target = Vec3::new(0.9, 0.1, 0.2);
        }

        let initial_signs: Vec<Vec3> = (0..buffer.active())
            .map(|i| (buffer.target_positions[i] - buffer.positions[i]).signum())
            .collect();

        let mut previous_position_error = f32::INFINITY;
        let mut previous_color_error = f32::INFINITY;
        for _ in 0..400 {
            advance(&mut buffer, &mut scale, &settings, DT, 0.0);

            let position_error = (0..buffer.active())
                .map(|i| (buffer.target_positions[i] - buffer.positions[i]).length())
                .fold(0.0, f32::max);
            let color_error = (0..buffer.active())
                .map(|i| (buffer.target_colors[i] - buffer.colors[i]).length())
                .fold(0.0, f32::max);

            assert!(position_error <= previous_position_error + 1e-6);
            assert!(color_error <= previous_color_error + 1e-6);

            // Exponential decay never crosses the target on any axis.
            for (i, signs) in initial_signs.iter().enumerate() {
                let remaining = buffer.target_positions[i] - buffer.positions[i];
                for axis in 0..3 {
                    assert!(remaining[axis] * signs[axis] >= -1e-4);
                }
            }

            previous_position_error = position_error;
            previous_color_error = color_error;
        }
    }

    #[test]
    fn test_shimmer_does_not_accumulate() {
        // With equal live and target positions, the displacement stays
        // bounded by the per-tick amplitude envelope.
        let mut rng = rand::rng();
        let mut buffer = ParticleBuffer::new(4, &mut rng);
        let sample = generate(ShapeKind::Fireworks, 4, &mut rng);
        buffer.store_targets(&sample);
        for i in 0..buffer.active() {
            buffer.positions[i] = buffer.target_positions[i];
        }

        let settings = MorphSettings::default();
        let mut scale = ScaleState {
            live: 1.0,
            target: 1.0,
        };

        let mut elapsed = 0.0;
        for _ in 0..1000 {
            advance(&mut buffer, &mut scale, &settings, DT, elapsed);
            elapsed += DT;
        }

        // One tick contributes at most the amplitude; smoothing pulls the
        // rest back, so total drift stays within a few amplitudes.
        for i in 0..buffer.active() {
            let drift = (buffer.positions[i] - buffer.target_positions[i]).length();
            assert!(drift < settings.shimmer_amplitude * 60.0, "shimmer accumulated: {drift}");
        }
    }

    #[test]
    fn test_end_to_end_heart_scenario() {
        // setModel(heart) + budget 1000, then tick at 60 Hz from scale 0.9
        // toward 1.0.
        let mut buffer = heart_buffer(1000);
        let settings = quiet_settings();
        let mut scale = ScaleState {
            live: 0.9,
            target: 1.0,
        };

        let mut elapsed = 0.0;
        for _ in 0..100 {
            advance(&mut buffer, &mut scale, &settings, DT, elapsed);
            elapsed += DT;
        }
        assert!((scale.live - 1.0).abs() < 1e-3);

        // Keep ticking until the slower position law has fully settled.
        for _ in 0..1400 {
            advance(&mut buffer, &mut scale, &settings, DT, elapsed);
            elapsed += DT;
        }
        for i in 0..buffer.active() {
            let target = buffer.target_positions[i] * 1.0;
            assert!(
                (buffer.positions[i] - target).length() < 1e-2,
                "particle {i} did not settle"
            );
        }
    }
}
