pub mod fireworks;
pub mod flower;
pub mod heart;
pub mod saturn;
pub mod tree;

use bevy::math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed set of generator strategies. Every variant implements the same
/// `(budget) -> targets` contract; adding a shape means adding a variant and
/// a submodule, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Tree,
    Heart,
    Flower,
    Saturn,
    Fireworks,
}

impl ShapeKind {
    /// Convert string identifier to shape kind for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tree" => Some(Self::Tree),
            "heart" => Some(Self::Heart),
            "flower" => Some(Self::Flower),
            "saturn" => Some(Self::Saturn),
            "fireworks" => Some(Self::Fireworks),
            _ => None,
        }
    }

    /// String identifier for frontend communication.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Heart => "heart",
            Self::Flower => "flower",
            Self::Saturn => "saturn",
            Self::Fireworks => "fireworks",
        }
    }
}

/// Structural role a particle was generated with. Assigned once per
/// generation and stable until the next one; segment coloring reads it
/// instead of recomputing roles from positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleRole {
    Body,
    Trunk,
    Foliage(u8),
    Star,
    Core,
    Ring,
}

/// The two groups segment coloring distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Base,
    Tip,
}

impl ParticleRole {
    pub fn segment(&self) -> Segment {
        match self {
            ParticleRole::Star | ParticleRole::Ring => Segment::Tip,
            _ => Segment::Base,
        }
    }
}

/// Target attributes for one generated shape. All three arrays hold exactly
/// the requested budget of entries.
pub struct ShapeSample {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub roles: Vec<ParticleRole>,
}

impl ShapeSample {
    pub(crate) fn with_capacity(budget: usize) -> Self {
        Self {
            positions: Vec::with_capacity(budget),
            colors: Vec::with_capacity(budget),
            roles: Vec::with_capacity(budget),
        }
    }

    pub(crate) fn push(&mut self, position: Vec3, color: Vec3, role: ParticleRole) {
        self.positions.push(position);
        self.colors.push(color);
        self.roles.push(role);
    }
}

/// Generate target attributes for `budget` particles of the given shape.
/// Structure is deterministic, placement is stochastic: repeated calls sample
/// the same distribution but never the same points.
pub fn generate(kind: ShapeKind, budget: usize, rng: &mut impl Rng) -> ShapeSample {
    match kind {
        ShapeKind::Tree => tree::generate(budget, rng),
        ShapeKind::Heart => heart::generate(budget, rng),
        ShapeKind::Flower => flower::generate(budget, rng),
        ShapeKind::Saturn => saturn::generate(budget, rng),
        ShapeKind::Fireworks => fireworks::generate(budget, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ShapeKind; 5] = [
        ShapeKind::Tree,
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Saturn,
        ShapeKind::Fireworks,
    ];

    #[test]
    fn test_generate_returns_exact_budget() {
        let mut rng = rand::rng();
        for kind in ALL_KINDS {
            for budget in [0usize, 1, 7, 1000, 50_000] {
                let sample = generate(kind, budget, &mut rng);
                assert_eq!(sample.positions.len(), budget, "{kind:?} positions");
                assert_eq!(sample.colors.len(), budget, "{kind:?} colors");
                assert_eq!(sample.roles.len(), budget, "{kind:?} roles");
            }
        }
    }

    #[test]
    fn test_zero_budget_is_empty() {
        let mut rng = rand::rng();
        for kind in ALL_KINDS {
            assert!(generate(kind, 0, &mut rng).positions.is_empty());
        }
    }

    #[test]
    fn test_regeneration_matches_distribution_not_points() {
        // Two runs of the same shape agree in aggregate statistics while the
        // individual points differ.
        let mut rng = rand::rng();
        let a = generate(ShapeKind::Fireworks, 5000, &mut rng);
        let b = generate(ShapeKind::Fireworks, 5000, &mut rng);

        let mean_radius = |sample: &ShapeSample| {
            sample.positions.iter().map(|p| p.length()).sum::<f32>()
                / sample.positions.len() as f32
        };
        assert!((mean_radius(&a) - mean_radius(&b)).abs() < 1.5);
        assert_ne!(a.positions, b.positions);
    }

    #[test]
    fn test_shape_kind_string_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(ShapeKind::from_string(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::from_string("cube"), None);
    }

    #[test]
    fn test_segment_grouping() {
        assert_eq!(ParticleRole::Star.segment(), Segment::Tip);
        assert_eq!(ParticleRole::Ring.segment(), Segment::Tip);
        assert_eq!(ParticleRole::Body.segment(), Segment::Base);
        assert_eq!(ParticleRole::Trunk.segment(), Segment::Base);
        assert_eq!(ParticleRole::Foliage(2).segment(), Segment::Base);
    }
}
