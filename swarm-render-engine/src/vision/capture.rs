use bevy::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use constants::vision::{
    CLOSED_HAND_RATIO, FACE_LANDMARK_COUNT, FINGERTIPS, HAND_LANDMARK_COUNT, LEFT_BROW_INNER,
    LEFT_CHEEK, LEFT_MOUTH_CORNER, LOWER_LIP_BOTTOM, MIDDLE_FINGER_MCP, OPEN_HAND_RATIO,
    RIGHT_BROW_INNER, RIGHT_CHEEK, RIGHT_MOUTH_CORNER, UPPER_LIP_TOP,
};

#[cfg(not(target_arch = "wasm32"))]
use super::face::FaceLandmarks;
#[cfg(not(target_arch = "wasm32"))]
use super::hand::HandLandmarks;
#[cfg(not(target_arch = "wasm32"))]
use super::sample::SampleInbox;
use super::sample::VisionStatus;
#[cfg(not(target_arch = "wasm32"))]
use super::{LandmarkFrame, classify_frame};

/// Start the capture stream (native builds).
///
/// A deployment with a camera wires its landmark inference here: classify
/// each frame with [`classify_frame`] and push the result through
/// [`super::sample::SamplePublisher`]. This build ships a simulation driver
/// instead (no camera hardware required) that synthesizes landmark frames on
/// its own thread at its own cadence, exactly the hand-off a live inference
/// stream uses.
#[cfg(not(target_arch = "wasm32"))]
pub fn start_capture(inbox: Res<SampleInbox>, mut status: ResMut<VisionStatus>) {
    // Headless and CI runs skip the stream; the engine degrades to default
    // samples and keeps rendering.
    if std::env::var_os("SWARM_DISABLE_CAPTURE").is_some() {
        status.mark_degraded();
        return;
    }

    let publisher = inbox.publisher();
    std::thread::spawn(move || {
        let started = std::time::Instant::now();
        loop {
            let t = started.elapsed().as_secs_f32();
            let frame = synthesize_frame(t);
            publisher.publish(classify_frame(&frame));
            // Inference cadence, deliberately slower than render.
            std::thread::sleep(std::time::Duration::from_millis(33));
        }
    });
    info!("Simulated capture stream started");
}

/// On WASM the embedding page owns the camera and publishes samples over the
/// `publish_vision_sample` RPC method. Until one arrives the engine runs in
/// degraded mode on default samples.
#[cfg(target_arch = "wasm32")]
pub fn start_capture(mut status: ResMut<VisionStatus>) {
    status.mark_degraded();
}

/// Landmarks for a slowly waving hand and a face that drifts through
/// expressions, driven by the elapsed time.
#[cfg(not(target_arch = "wasm32"))]
fn synthesize_frame(t: f32) -> LandmarkFrame {
    LandmarkFrame {
        hand: synthetic_hand(t),
        face: synthetic_face(t),
    }
}

/// Wrist at the origin, middle MCP one unit away, fingertips sweeping between
/// the closed and open ratio boundaries.
#[cfg(not(target_arch = "wasm32"))]
fn synthetic_hand(t: f32) -> Option<HandLandmarks> {
    let sweep = (t * 0.4).sin() * 0.5 + 0.5;
    let tip_distance = CLOSED_HAND_RATIO + (OPEN_HAND_RATIO - CLOSED_HAND_RATIO) * sweep;

    let mut points = vec![Vec3::ZERO; HAND_LANDMARK_COUNT];
    points[MIDDLE_FINGER_MCP] = Vec3::new(0.0, 1.0, 0.0);
    for &tip in &FINGERTIPS {
        points[tip] = Vec3::new(0.0, tip_distance, 0.0);
    }
    HandLandmarks::new(points)
}

/// Unit-width face whose mouth corners rise and fall slowly, wandering
/// between happy, neutral, and sad.
#[cfg(not(target_arch = "wasm32"))]
fn synthetic_face(t: f32) -> Option<FaceLandmarks> {
    let corner_lift = (t * 0.17).sin() * 0.05;

    let mut points = vec![Vec3::ZERO; FACE_LANDMARK_COUNT];
    points[LEFT_CHEEK] = Vec3::new(-0.5, 0.0, 0.0);
    points[RIGHT_CHEEK] = Vec3::new(0.5, 0.0, 0.0);

    let lip_y = 0.5;
    points[UPPER_LIP_TOP] = Vec3::new(0.0, lip_y, 0.0);
    points[LOWER_LIP_BOTTOM] = Vec3::new(0.0, lip_y + 0.02, 0.0);
    points[LEFT_MOUTH_CORNER] = Vec3::new(-0.2, lip_y - corner_lift, 0.0);
    points[RIGHT_MOUTH_CORNER] = Vec3::new(0.2, lip_y - corner_lift, 0.0);

    points[LEFT_BROW_INNER] = Vec3::new(-0.2, 0.2, 0.0);
    points[RIGHT_BROW_INNER] = Vec3::new(0.2, 0.2, 0.0);

    FaceLandmarks::new(points)
}
