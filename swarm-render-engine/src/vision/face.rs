use bevy::math::Vec3;

use constants::vision::{
    BROW_SQUEEZE_THRESHOLD, FACE_LANDMARK_COUNT, FROWN_THRESHOLD, LEFT_BROW_INNER, LEFT_CHEEK,
    LEFT_MOUTH_CORNER, LOWER_LIP_BOTTOM, MOUTH_OPEN_THRESHOLD, RIGHT_BROW_INNER, RIGHT_CHEEK,
    RIGHT_MOUTH_CORNER, SMILE_THRESHOLD, UPPER_LIP_TOP,
};

use super::sample::Emotion;

/// One frame of face landmarks, MediaPipe Face Mesh topology: 468 points in
/// normalized image coordinates, Y growing downward.
#[derive(Debug, Clone)]
pub struct FaceLandmarks {
    points: Vec<Vec3>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        (points.len() == FACE_LANDMARK_COUNT).then_some(Self { points })
    }

    fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }
}

fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Fixed-priority decision list over face-geometry ratios, all normalized by
/// the inter-cheek face width. Mouth opening dominates smiling by design: a
/// surprised-open mouth with slightly raised corners still reads as surprise.
///
/// Screen Y grows downward, so raised mouth corners have *smaller* Y than the
/// lip center and `smile_val` comes out positive for a smile, negative for a
/// frown. No detection returns `Neutral`.
pub fn face_emotion(landmarks: Option<&FaceLandmarks>) -> Emotion {
    let Some(face) = landmarks else {
        return Emotion::Neutral;
    };

    let face_width = planar_distance(face.point(LEFT_CHEEK), face.point(RIGHT_CHEEK));
    if face_width <= f32::EPSILON {
        return Emotion::Neutral;
    }

    let upper_lip = face.point(UPPER_LIP_TOP);
    let mouth_open_ratio =
        planar_distance(upper_lip, face.point(LOWER_LIP_BOTTOM)) / face_width;

    let corner_y =
        (face.point(LEFT_MOUTH_CORNER).y + face.point(RIGHT_MOUTH_CORNER).y) / 2.0;
    let smile_val = (upper_lip.y - corner_y) / face_width;

    let brow_ratio =
        planar_distance(face.point(LEFT_BROW_INNER), face.point(RIGHT_BROW_INNER)) / face_width;

    if mouth_open_ratio > MOUTH_OPEN_THRESHOLD {
        Emotion::Surprise
    } else if smile_val > SMILE_THRESHOLD {
        Emotion::Happy
    } else if brow_ratio < BROW_SQUEEZE_THRESHOLD {
        Emotion::Angry
    } else if smile_val < FROWN_THRESHOLD {
        Emotion::Sad
    } else {
        Emotion::Neutral
    }
}
