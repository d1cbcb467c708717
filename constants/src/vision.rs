//! Landmark indexing and classifier thresholds.
//!
//! Indices follow the MediaPipe Hands (21 points) and Face Mesh (468 points)
//! topologies the capture collaborator produces. Thresholds are tuning
//! defaults; the classifier contract is their precedence order, not the exact
//! numbers.

pub const HAND_LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const MIDDLE_FINGER_MCP: usize = 9;
/// Index, middle, ring, pinky fingertips.
pub const FINGERTIPS: [usize; 4] = [8, 12, 16, 20];

/// Empirical openness ratio of a closed fist and a fully spread hand.
pub const CLOSED_HAND_RATIO: f32 = 1.2;
pub const OPEN_HAND_RATIO: f32 = 1.9;

/// Gesture openness [0, 1] maps linearly onto this target-scale range.
pub const SCALE_AT_CLOSED: f32 = 0.2;
pub const SCALE_AT_OPEN: f32 = 1.1;

pub const FACE_LANDMARK_COUNT: usize = 468;
pub const LEFT_CHEEK: usize = 234;
pub const RIGHT_CHEEK: usize = 454;
pub const UPPER_LIP_TOP: usize = 13;
pub const LOWER_LIP_BOTTOM: usize = 14;
pub const LEFT_MOUTH_CORNER: usize = 61;
pub const RIGHT_MOUTH_CORNER: usize = 291;
pub const LEFT_BROW_INNER: usize = 66;
pub const RIGHT_BROW_INNER: usize = 296;

/// Decision-list thresholds, checked in this order; first match wins.
pub const MOUTH_OPEN_THRESHOLD: f32 = 0.12;
pub const SMILE_THRESHOLD: f32 = 0.03;
pub const BROW_SQUEEZE_THRESHOLD: f32 = 0.25;
pub const FROWN_THRESHOLD: f32 = -0.02;
