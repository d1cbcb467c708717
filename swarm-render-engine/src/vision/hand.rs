use bevy::math::Vec3;

use constants::vision::{
    CLOSED_HAND_RATIO, FINGERTIPS, HAND_LANDMARK_COUNT, MIDDLE_FINGER_MCP, OPEN_HAND_RATIO, WRIST,
};

/// One frame of hand landmarks, MediaPipe Hands topology: 21 points in
/// normalized image coordinates.
#[derive(Debug, Clone)]
pub struct HandLandmarks {
    points: Vec<Vec3>,
}

impl HandLandmarks {
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        (points.len() == HAND_LANDMARK_COUNT).then_some(Self { points })
    }

    fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }
}

/// Gesture openness in [0, 1] from the ratio of mean wrist-to-fingertip
/// distance to the wrist-to-middle-MCP reference scale. Curled fingertips
/// pull the ratio toward the closed boundary, spread fingers toward the open
/// one.
///
/// No detection returns the fixed default 1.0 (fully open) rather than any
/// previous value, so losing hand tracking never freezes the swarm at an
/// arbitrary size.
pub fn hand_openness(landmarks: Option<&HandLandmarks>) -> f32 {
    let Some(hand) = landmarks else {
        return 1.0;
    };

    let wrist = hand.point(WRIST);
    let scale_ref = wrist.distance(hand.point(MIDDLE_FINGER_MCP));
    if scale_ref <= f32::EPSILON {
        // Degenerate hand geometry, treat as no detection.
        return 1.0;
    }

    let avg_tip_dist = FINGERTIPS
        .iter()
        .map(|&tip| wrist.distance(hand.point(tip)))
        .sum::<f32>()
        / FINGERTIPS.len() as f32;

    let ratio = avg_tip_dist / scale_ref;
    ((ratio - CLOSED_HAND_RATIO) / (OPEN_HAND_RATIO - CLOSED_HAND_RATIO)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic hand: wrist at the origin, middle MCP one unit up, all four
    /// tracked fingertips at `tip_distance` from the wrist.
    fn synthetic_hand(tip_distance: f32) -> HandLandmarks {
        let mut points = vec![Vec3::ZERO; HAND_LANDMARK_COUNT];
        points[MIDDLE_FINGER_MCP] = Vec3::new(0.0, 1.0, 0.0);
        for &tip in &FINGERTIPS {
            points[tip] = Vec3::new(0.0, tip_distance, 0.0);
        }
        HandLandmarks::new(points).unwrap()
    }

    #[test]
    fn test_closed_boundary_maps_to_zero() {
        let hand = synthetic_hand(CLOSED_HAND_RATIO);
        assert!(hand_openness(Some(&hand)).abs() < 1e-5);
    }

    #[test]
    fn test_open_boundary_maps_to_one() {
        let hand = synthetic_hand(OPEN_HAND_RATIO);
        assert!((hand_openness(Some(&hand)) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_midpoint_ratio_maps_between() {
        let hand = synthetic_hand((CLOSED_HAND_RATIO + OPEN_HAND_RATIO) / 2.0);
        assert!((hand_openness(Some(&hand)) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_range_ratios_clamp() {
        assert_eq!(hand_openness(Some(&synthetic_hand(0.5))), 0.0);
        assert_eq!(hand_openness(Some(&synthetic_hand(3.0))), 1.0);
    }

    #[test]
    fn test_no_detection_defaults_to_open() {
        assert_eq!(hand_openness(None), 1.0);
    }

    #[test]
    fn test_wrong_landmark_count_is_rejected() {
        assert!(HandLandmarks::new(vec![Vec3::ZERO; 5]).is_none());
    }
}
