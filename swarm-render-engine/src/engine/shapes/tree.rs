use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::math::Vec3;
use rand::Rng;

use constants::palette::{
    FOLIAGE_GREEN, GARLAND_YELLOW, ORNAMENT_PALETTE, STAR_GOLD, TRUNK_BROWN, WHITE,
};
use constants::shape::{
    FOLIAGE_SHELL_BIAS, GARLAND_PERIOD, GARLAND_PITCH, GARLAND_SHELL_FRACTION, GARLAND_WIDTH,
    ORNAMENT_PROBABILITY, SCALLOP_AMPLITUDE, SCALLOP_BAND, SCALLOP_FREQUENCY, STAR_CENTER_Y,
    STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS, STAR_SHARPNESS, STAR_SLAB_DEPTH,
    STAR_SPARKLE_PROBABILITY, TREE_STAR_FRACTION, TREE_TIERS, TREE_TRUNK_FRACTION, TRUNK_BASE_Y,
    TRUNK_HEIGHT, TRUNK_RADIUS,
};

use super::{ParticleRole, ShapeSample};

/// Trunk cylinder, three overlapping foliage cones, and a star tip.
pub fn generate(budget: usize, rng: &mut impl Rng) -> ShapeSample {
    let mut sample = ShapeSample::with_capacity(budget);
    let (trunk_count, star_count, tier_counts) = partition(budget);

    for _ in 0..trunk_count {
        push_trunk_point(&mut sample, rng);
    }

    for (tier_index, count) in tier_counts.iter().enumerate() {
        for _ in 0..*count {
            push_foliage_point(&mut sample, tier_index, rng);
        }
    }

    for _ in 0..star_count {
        push_star_point(&mut sample, rng);
    }

    sample
}

/// Split the budget into trunk / per-tier / star counts that sum exactly to
/// it. Trunk and star take fixed floor fractions; tier shares split the rest,
/// with the last tier absorbing the rounding remainder.
pub(crate) fn partition(budget: usize) -> (usize, usize, Vec<usize>) {
    let trunk = (budget as f32 * TREE_TRUNK_FRACTION) as usize;
    let star = (budget as f32 * TREE_STAR_FRACTION) as usize;
    let foliage = budget - trunk - star;

    let mut tiers = Vec::with_capacity(TREE_TIERS.len());
    let mut assigned = 0usize;
    for spec in &TREE_TIERS[..TREE_TIERS.len() - 1] {
        let count = (foliage as f32 * spec.share) as usize;
        tiers.push(count);
        assigned += count;
    }
    tiers.push(foliage - assigned);

    (trunk, star, tiers)
}

fn push_trunk_point(sample: &mut ShapeSample, rng: &mut impl Rng) {
    let h = rng.random::<f32>() * TRUNK_HEIGHT;
    let theta = rng.random::<f32>() * TAU;
    // Concentrate on the surface so the cylinder reads as a solid outline.
    let r = TRUNK_RADIUS * (0.8 + 0.2 * rng.random::<f32>());

    sample.push(
        Vec3::new(r * theta.cos(), TRUNK_BASE_Y + h, r * theta.sin()),
        TRUNK_BROWN,
        ParticleRole::Trunk,
    );
}

fn push_foliage_point(sample: &mut ShapeSample, tier_index: usize, rng: &mut impl Rng) {
    let spec = &TREE_TIERS[tier_index];

    let t = rng.random::<f32>();
    let y = spec.bottom_y + t * (spec.top_y - spec.bottom_y);
    let max_r = spec.bottom_radius + t * (spec.top_radius - spec.bottom_radius);
    let r = max_r * (FOLIAGE_SHELL_BIAS + (1.0 - FOLIAGE_SHELL_BIAS) * rng.random::<f32>());
    let angle = rng.random::<f32>() * TAU;

    // Scalloped lower edge of each tier.
    let y = if t < SCALLOP_BAND {
        y + (angle * SCALLOP_FREQUENCY).sin() * SCALLOP_AMPLITUDE
    } else {
        y
    };

    let mut color = FOLIAGE_GREEN;
    if rng.random::<f32>() < ORNAMENT_PROBABILITY {
        color = ORNAMENT_PALETTE[rng.random_range(0..ORNAMENT_PALETTE.len())];
    } else if garland_hit(y, angle, r, max_r) {
        color = GARLAND_YELLOW;
    }

    sample.push(
        Vec3::new(r * angle.cos(), y, r * angle.sin()),
        color,
        ParticleRole::Foliage(tier_index as u8),
    );
}

/// A bright spiral band winding up the outer shell of the foliage.
fn garland_hit(y: f32, angle: f32, r: f32, max_r: f32) -> bool {
    ((y * GARLAND_PITCH + angle) % GARLAND_PERIOD).abs() < GARLAND_WIDTH
        && r > max_r * GARLAND_SHELL_FRACTION
}

/// Rejection-sample the tip: uniform draws from the bounding square are kept
/// when they fall inside the 5-pointed star boundary, then extruded into a
/// thin slab.
fn push_star_point(sample: &mut ShapeSample, rng: &mut impl Rng) {
    loop {
        let x = (rng.random::<f32>() - 0.5) * 2.0 * STAR_OUTER_RADIUS;
        let y = (rng.random::<f32>() - 0.5) * 2.0 * STAR_OUTER_RADIUS;
        let dist = (x * x + y * y).sqrt();
        // Rotate so one arm points straight up.
        let angle = y.atan2(x) - FRAC_PI_2;

        if dist > star_boundary_radius(angle) {
            continue;
        }

        let z = (rng.random::<f32>() - 0.5) * STAR_SLAB_DEPTH;
        let color = if rng.random::<f32>() < STAR_SPARKLE_PROBABILITY {
            WHITE
        } else {
            STAR_GOLD
        };
        sample.push(
            Vec3::new(x, STAR_CENTER_Y + y, z),
            color,
            ParticleRole::Star,
        );
        return;
    }
}

/// Maximum radius of the star outline at the given angle: full radius on the
/// arms, inner radius in the valleys between them, sharpened by the
/// configured exponent.
fn star_boundary_radius(angle: f32) -> f32 {
    let step = TAU / STAR_POINTS as f32;
    let phase = angle.rem_euclid(step) / step;
    // 1.0 on an arm, 0.0 in the middle of a valley.
    let arm_weight = ((phase - 0.5).abs() * 2.0).powf(STAR_SHARPNESS);
    STAR_INNER_RADIUS + (STAR_OUTER_RADIUS - STAR_INNER_RADIUS) * arm_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_sums_exactly_to_budget() {
        for budget in [0usize, 1, 2, 13, 1000, 50_000] {
            let (trunk, star, tiers) = partition(budget);
            let total = trunk + star + tiers.iter().sum::<usize>();
            assert_eq!(total, budget, "partition lost particles at budget {budget}");
            assert_eq!(tiers.len(), TREE_TIERS.len());
        }
    }

    #[test]
    fn test_partition_fractions() {
        let (trunk, star, _) = partition(10_000);
        assert_eq!(trunk, 1000);
        assert_eq!(star, 500);
    }

    #[test]
    fn test_star_boundary_between_inner_and_outer() {
        for i in 0..100 {
            let angle = i as f32 * 0.1;
            let r = star_boundary_radius(angle);
            assert!(r >= STAR_INNER_RADIUS && r <= STAR_OUTER_RADIUS);
        }
        // Arms reach the full radius.
        assert!((star_boundary_radius(0.0) - STAR_OUTER_RADIUS).abs() < 1e-4);
    }

    #[test]
    fn test_generated_roles_partition_the_tree() {
        let mut rng = rand::rng();
        let budget = 10_000;
        let sample = generate(budget, &mut rng);
        let (trunk, star, tiers) = partition(budget);

        let count_role = |pred: &dyn Fn(&ParticleRole) -> bool| {
            sample.roles.iter().filter(|r| pred(r)).count()
        };
        assert_eq!(count_role(&|r| matches!(r, ParticleRole::Trunk)), trunk);
        assert_eq!(count_role(&|r| matches!(r, ParticleRole::Star)), star);
        for (tier, expected) in tiers.iter().enumerate() {
            let tier = tier as u8;
            assert_eq!(
                count_role(&|r| matches!(r, ParticleRole::Foliage(t) if *t == tier)),
                *expected
            );
        }
    }

    #[test]
    fn test_star_points_sit_in_the_tip_slab() {
        let mut rng = rand::rng();
        let sample = generate(4000, &mut rng);
        for (position, role) in sample.positions.iter().zip(&sample.roles) {
            if matches!(role, ParticleRole::Star) {
                assert!(position.z.abs() <= STAR_SLAB_DEPTH / 2.0 + 1e-4);
                assert!((position.y - STAR_CENTER_Y).abs() <= STAR_OUTER_RADIUS + 1e-4);
            }
        }
    }
}
