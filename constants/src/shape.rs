/// Conical foliage tier: a frustum between two heights, plus the fraction of
/// the foliage particle pool it receives.
pub struct TierSpec {
    pub bottom_y: f32,
    pub top_y: f32,
    pub bottom_radius: f32,
    pub top_radius: f32,
    pub share: f32,
}

/// Tiers overlap in height so the silhouette has no bald gaps; radii stay
/// distinct so the three cones read separately. Shares are fractions of the
/// foliage pool; the last tier absorbs the rounding remainder.
pub const TREE_TIERS: &[TierSpec] = &[
    TierSpec {
        bottom_y: -15.0,
        top_y: 2.0,
        bottom_radius: 22.0,
        top_radius: 8.0,
        share: 0.45,
    },
    TierSpec {
        bottom_y: 0.0,
        top_y: 12.0,
        bottom_radius: 18.0,
        top_radius: 5.0,
        share: 0.33,
    },
    TierSpec {
        bottom_y: 10.0,
        top_y: 22.0,
        bottom_radius: 12.0,
        top_radius: 1.0,
        share: 0.22,
    },
];

pub const TREE_TRUNK_FRACTION: f32 = 0.10;
pub const TREE_STAR_FRACTION: f32 = 0.05;

pub const TRUNK_HEIGHT: f32 = 10.0;
pub const TRUNK_RADIUS: f32 = 4.0;
pub const TRUNK_BASE_Y: f32 = -25.0;

/// Foliage radius is drawn in [0.6, 1.0) of the frustum radius at the sampled
/// height, concentrating particles near the shell.
pub const FOLIAGE_SHELL_BIAS: f32 = 0.6;

/// Scalloped lower edge of each tier: applied to the bottom 15% of heights.
pub const SCALLOP_BAND: f32 = 0.15;
pub const SCALLOP_FREQUENCY: f32 = 10.0;
pub const SCALLOP_AMPLITUDE: f32 = 0.8;

pub const ORNAMENT_PROBABILITY: f32 = 0.05;

/// Garland spiral test: |(y * PITCH + angle) mod PERIOD| < WIDTH on the outer
/// shell only.
pub const GARLAND_PITCH: f32 = 0.3;
pub const GARLAND_PERIOD: f32 = 2.5;
pub const GARLAND_WIDTH: f32 = 0.25;
pub const GARLAND_SHELL_FRACTION: f32 = 0.85;

pub const STAR_CENTER_Y: f32 = 23.0;
pub const STAR_OUTER_RADIUS: f32 = 4.0;
pub const STAR_INNER_RADIUS: f32 = 1.5;
pub const STAR_POINTS: u32 = 5;
/// Sharpens the arms of the star boundary; 1.0 gives straight valleys.
pub const STAR_SHARPNESS: f32 = 2.0;
pub const STAR_SLAB_DEPTH: f32 = 1.5;
pub const STAR_SPARKLE_PROBABILITY: f32 = 0.08;

pub const HEART_SCALE: f32 = 1.5;
pub const HEART_DEPTH_JITTER: f32 = 10.0;

pub const FLOWER_BASE_RADIUS: f32 = 15.0;
pub const FLOWER_AMPLITUDE: f32 = 8.0;
pub const FLOWER_LOBES: f32 = 5.0;

pub const SATURN_RING_FRACTION: f32 = 0.4;
pub const SATURN_SPHERE_RADIUS: f32 = 12.0;
/// Sphere radius is drawn in [0.8, 1.0) of the full radius.
pub const SATURN_SHELL_BIAS: f32 = 0.8;
pub const SATURN_RING_INNER_RADIUS: f32 = 20.0;
pub const SATURN_RING_WIDTH: f32 = 8.0;
pub const SATURN_RING_THICKNESS: f32 = 1.0;

pub const FIREWORKS_RADIUS: f32 = 40.0;
