use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::vision::{SCALE_AT_CLOSED, SCALE_AT_OPEN};

use crate::engine::buffer::ParticleBuffer;
use crate::engine::color_policy::{self, ColorPolicy};
use crate::engine::morph::ScaleState;

/// Discrete facial-expression classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Surprise,
    Angry,
    Sad,
}

impl Emotion {
    /// String identifier for frontend communication.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Surprise => "surprise",
            Self::Angry => "angry",
            Self::Sad => "sad",
        }
    }
}

/// One classification snapshot. Replaced wholesale by the capture side and
/// read at the start of the next tick; readers always see a complete,
/// self-consistent pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionSample {
    pub openness: f32,
    pub emotion: Emotion,
}

impl Default for VisionSample {
    fn default() -> Self {
        Self {
            openness: 1.0,
            emotion: Emotion::Neutral,
        }
    }
}

/// Latest-sample slot shared with the asynchronously scheduled capture
/// stream. Thread-safe single-slot mailbox; publishing overwrites any
/// unconsumed sample.
#[derive(Resource, Default, Clone)]
pub struct SampleInbox(Arc<Mutex<Option<VisionSample>>>);

impl SampleInbox {
    /// Handle for the capture collaborator to publish through.
    pub fn publisher(&self) -> SamplePublisher {
        SamplePublisher(self.0.clone())
    }

    pub fn take(&self) -> Option<VisionSample> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Cloneable publisher handle for the capture thread.
#[derive(Clone)]
pub struct SamplePublisher(Arc<Mutex<Option<VisionSample>>>);

impl SamplePublisher {
    pub fn publish(&self, sample: VisionSample) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(sample);
        }
    }
}

/// Per-channel enable switches. A disabled channel pins its signal to a
/// fixed value instead of consuming live samples.
#[derive(Resource)]
pub struct VisionToggles {
    pub gesture_enabled: bool,
    pub emotion_enabled: bool,
}

impl Default for VisionToggles {
    fn default() -> Self {
        Self {
            gesture_enabled: true,
            emotion_enabled: true,
        }
    }
}

/// Capture/inference availability. An unrecoverable startup failure is
/// reported once; the swarm keeps running on default samples.
#[derive(Resource, Default)]
pub struct VisionStatus {
    degraded: bool,
    reported: bool,
}

impl VisionStatus {
    pub fn mark_degraded(&mut self) {
        self.degraded = true;
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Last sample the render side acted on. Stale samples stay in effect while
/// the capture stream is slow, paused, or gone.
#[derive(Resource, Default)]
pub struct VisionState {
    pub last: VisionSample,
}

/// Map gesture openness [0, 1] onto the swarm's target scale range.
pub fn map_openness_to_scale(openness: f32) -> f32 {
    SCALE_AT_CLOSED + (SCALE_AT_OPEN - SCALE_AT_CLOSED) * openness.clamp(0.0, 1.0)
}

/// Consume the latest published sample at a fixed point in the frame, before
/// any command handling or morphing. Never blocks: with no fresh sample the
/// previous one stays in effect.
pub fn drain_vision_samples(
    inbox: Res<SampleInbox>,
    toggles: Res<VisionToggles>,
    mut status: ResMut<VisionStatus>,
    mut state: ResMut<VisionState>,
    mut scale: ResMut<ScaleState>,
    mut policy: ResMut<ColorPolicy>,
    mut buffer: ResMut<ParticleBuffer>,
) {
    if status.degraded && !status.reported {
        warn!("Vision capture unavailable; continuing with default samples");
        status.reported = true;
    }

    if let Some(sample) = inbox.take() {
        state.last = sample;
    }

    let openness = if toggles.gesture_enabled {
        state.last.openness
    } else {
        1.0
    };
    scale.target = map_openness_to_scale(openness);

    let emotion = if toggles.emotion_enabled {
        state.last.emotion
    } else {
        Emotion::Happy
    };
    if policy.observe_emotion(emotion) {
        let mut rng = rand::rng();
        color_policy::resolve(&policy, &mut buffer, &mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sample_is_open_and_neutral() {
        let sample = VisionSample::default();
        assert_eq!(sample.openness, 1.0);
        assert_eq!(sample.emotion, Emotion::Neutral);
    }

    #[test]
    fn test_inbox_is_latest_wins_and_consumed_once() {
        let inbox = SampleInbox::default();
        let publisher = inbox.publisher();

        assert_eq!(inbox.take(), None);

        publisher.publish(VisionSample {
            openness: 0.2,
            emotion: Emotion::Sad,
        });
        publisher.publish(VisionSample {
            openness: 0.7,
            emotion: Emotion::Happy,
        });

        let sample = inbox.take();
        assert_eq!(
            sample,
            Some(VisionSample {
                openness: 0.7,
                emotion: Emotion::Happy,
            })
        );
        assert_eq!(inbox.take(), None);
    }

    #[test]
    fn test_openness_to_scale_mapping() {
        assert!((map_openness_to_scale(0.0) - SCALE_AT_CLOSED).abs() < 1e-6);
        assert!((map_openness_to_scale(1.0) - SCALE_AT_OPEN).abs() < 1e-6);
        // Out-of-range estimates clamp instead of extrapolating.
        assert!((map_openness_to_scale(2.0) - SCALE_AT_OPEN).abs() < 1e-6);
        assert!((map_openness_to_scale(-1.0) - SCALE_AT_CLOSED).abs() < 1e-6);
    }
}
