use bevy::math::Vec3;

pub const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

pub const FOLIAGE_GREEN: Vec3 = Vec3::new(0.2, 0.9, 0.3);
pub const TRUNK_BROWN: Vec3 = Vec3::new(0.6, 0.3, 0.1);
pub const STAR_GOLD: Vec3 = Vec3::new(1.0, 1.0, 0.2);
pub const GARLAND_YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.5);

/// Ornament colors scattered through the foliage.
pub const ORNAMENT_PALETTE: &[Vec3] = &[
    Vec3::new(1.0, 0.2, 0.2), // red
    Vec3::new(1.0, 0.9, 0.2), // gold
    Vec3::new(0.2, 0.6, 1.0), // blue
    Vec3::new(1.0, 1.0, 1.0), // white
];

/// Per-emotion target palettes. Neutral is intentionally absent: it restores
/// the generator's original colors instead of tinting.
pub const HAPPY_PALETTE: &[Vec3] = &[
    Vec3::new(1.0, 0.84, 0.0),  // gold
    Vec3::new(0.87, 0.19, 0.39), // cherry red
];

pub const SURPRISE_PALETTE: &[Vec3] = &[
    Vec3::new(0.2, 1.0, 0.0), // lime green
    Vec3::new(1.0, 0.0, 1.0), // magenta
];

pub const ANGRY_PALETTE: &[Vec3] = &[
    Vec3::new(1.0, 0.0, 0.0), // red
    Vec3::new(1.0, 0.5, 0.0), // orange
];

pub const SAD_PALETTE: &[Vec3] = &[
    Vec3::new(0.1, 0.1, 0.5), // deep blue
    Vec3::new(0.7, 0.8, 0.9), // pale blue grey
];
