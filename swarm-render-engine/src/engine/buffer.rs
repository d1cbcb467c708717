use bevy::prelude::*;
use rand::Rng;

use constants::morph::{SIZE_MIN, SIZE_RANGE, SPAWN_EXTENT};
use constants::palette::WHITE;

use crate::engine::shapes::{ParticleRole, ShapeSample};

/// Marker component for the swarm's render entity.
#[derive(Component)]
pub struct SwarmPoints;

/// Live and target per-particle attributes, allocated once at capacity.
///
/// `active` is the working range; particles beyond it are inert, not
/// destroyed, so budget changes never lose a particle's persistent size or
/// identity. The live arrays are written only by the morph tick; targets are
/// rewritten wholesale on model, budget, or color-policy changes.
#[derive(Resource)]
pub struct ParticleBuffer {
    capacity: usize,
    active: usize,
    pub positions: Vec<Vec3>,
    pub target_positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub target_colors: Vec<Vec3>,
    pub original_colors: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub roles: Vec<ParticleRole>,
}

impl ParticleBuffer {
    /// Allocate at full capacity: sizes drawn once per index, live positions
    /// scattered through a cube so the first morph visibly gathers the cloud.
    pub fn new(capacity: usize, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(capacity);
        let mut sizes = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            positions.push(Vec3::new(
                (rng.random::<f32>() - 0.5) * SPAWN_EXTENT,
                (rng.random::<f32>() - 0.5) * SPAWN_EXTENT,
                (rng.random::<f32>() - 0.5) * SPAWN_EXTENT,
            ));
            sizes.push(SIZE_MIN + rng.random::<f32>() * SIZE_RANGE);
        }

        Self {
            capacity,
            active: capacity,
            positions,
            target_positions: vec![Vec3::ZERO; capacity],
            colors: vec![WHITE; capacity],
            target_colors: vec![WHITE; capacity],
            original_colors: vec![WHITE; capacity],
            sizes,
            roles: vec![ParticleRole::Body; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Resize the working range. Callers clamp user input first; exceeding
    /// capacity here is a programmer error.
    pub fn set_active(&mut self, count: usize) {
        assert!(
            count <= self.capacity,
            "active count {count} exceeds capacity {}",
            self.capacity
        );
        self.active = count;
    }

    /// Install freshly generated targets for the working range. Live arrays
    /// are untouched so the morph animates from wherever particles currently
    /// are. Target colors are written separately by the color policy.
    pub fn store_targets(&mut self, sample: &ShapeSample) {
        assert_eq!(
            sample.positions.len(),
            self.active,
            "generated positions do not match the active count"
        );
        assert_eq!(
            sample.colors.len(),
            self.active,
            "generated colors do not match the active count"
        );
        assert_eq!(
            sample.roles.len(),
            self.active,
            "generated roles do not match the active count"
        );

        self.target_positions[..self.active].copy_from_slice(&sample.positions);
        self.original_colors[..self.active].copy_from_slice(&sample.colors);
        self.roles[..self.active].copy_from_slice(&sample.roles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::shapes::{ShapeKind, generate};

    #[test]
    fn test_new_buffer_invariants() {
        let mut rng = rand::rng();
        let buffer = ParticleBuffer::new(128, &mut rng);
        assert_eq!(buffer.active(), 128);
        assert_eq!(buffer.capacity(), 128);
        for size in &buffer.sizes {
            assert!(*size >= SIZE_MIN && *size < SIZE_MIN + SIZE_RANGE);
        }
        for position in &buffer.positions {
            assert!(position.abs().max_element() <= SPAWN_EXTENT / 2.0);
        }
    }

    #[test]
    fn test_set_active_keeps_sizes_stable() {
        let mut rng = rand::rng();
        let mut buffer = ParticleBuffer::new(64, &mut rng);
        let sizes = buffer.sizes.clone();
        buffer.set_active(10);
        buffer.set_active(64);
        assert_eq!(buffer.sizes, sizes);
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn test_set_active_beyond_capacity_panics() {
        let mut rng = rand::rng();
        let mut buffer = ParticleBuffer::new(8, &mut rng);
        buffer.set_active(9);
    }

    #[test]
    #[should_panic(expected = "do not match the active count")]
    fn test_store_targets_length_mismatch_panics() {
        let mut rng = rand::rng();
        let mut buffer = ParticleBuffer::new(16, &mut rng);
        let sample = generate(ShapeKind::Heart, 8, &mut rng);
        buffer.store_targets(&sample);
    }

    #[test]
    fn test_store_targets_leaves_live_arrays_alone() {
        let mut rng = rand::rng();
        let mut buffer = ParticleBuffer::new(32, &mut rng);
        let live_positions = buffer.positions.clone();
        let live_colors = buffer.colors.clone();

        let sample = generate(ShapeKind::Saturn, 32, &mut rng);
        buffer.store_targets(&sample);

        assert_eq!(buffer.positions, live_positions);
        assert_eq!(buffer.colors, live_colors);
        assert_eq!(buffer.target_positions, sample.positions);
        assert_eq!(buffer.original_colors, sample.colors);
    }
}
