use bevy::prelude::*;
use rand::Rng;

use constants::palette::{ANGRY_PALETTE, HAPPY_PALETTE, SAD_PALETTE, SURPRISE_PALETTE};

use crate::engine::buffer::ParticleBuffer;
use crate::engine::shapes::Segment;
use crate::vision::sample::Emotion;

/// Manual color override. While one is set, emotion updates are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOverride {
    /// One color for every particle.
    Flat(Vec3),
    /// Two colors split by the particle's structural segment.
    Segment { base: Vec3, tip: Vec3 },
}

/// Decides target colors. Override beats emotion, and `Neutral` restores the
/// generator's natural palette instead of tinting. All precedence lives here;
/// callers invoke [`resolve`] after anything that invalidates target colors.
#[derive(Resource, Debug, Default)]
pub struct ColorPolicy {
    pub override_mode: Option<ColorOverride>,
    pub last_emotion: Emotion,
}

impl ColorPolicy {
    /// Record a newly classified emotion. Returns whether target colors need
    /// re-resolving; a manual override swallows emotion changes entirely.
    pub fn observe_emotion(&mut self, emotion: Emotion) -> bool {
        if self.override_mode.is_some() {
            return false;
        }
        if self.last_emotion == emotion {
            return false;
        }
        self.last_emotion = emotion;
        true
    }
}

/// Rewrite the buffer's target colors from the current policy. Emotion
/// palettes are drawn per particle independently, giving a speckled mix
/// rather than a flat tint; re-resolving the same emotion re-randomizes the
/// assignment, which is visually stable at steady state.
pub fn resolve(policy: &ColorPolicy, buffer: &mut ParticleBuffer, rng: &mut impl Rng) {
    let active = buffer.active();

    match policy.override_mode {
        Some(ColorOverride::Flat(color)) => {
            for target in &mut buffer.target_colors[..active] {
                *target = color;
            }
        }
        Some(ColorOverride::Segment { base, tip }) => {
            for i in 0..active {
                buffer.target_colors[i] = match buffer.roles[i].segment() {
                    Segment::Base => base,
                    Segment::Tip => tip,
                };
            }
        }
        None => match emotion_palette(policy.last_emotion) {
            None => {
                for i in 0..active {
                    buffer.target_colors[i] = buffer.original_colors[i];
                }
            }
            Some(palette) => {
                for target in &mut buffer.target_colors[..active] {
                    *target = palette[rng.random_range(0..palette.len())];
                }
            }
        },
    }
}

/// Emotion to palette table. Total over the enum; `Neutral` maps to `None`,
/// the restore-originals behavior.
fn emotion_palette(emotion: Emotion) -> Option<&'static [Vec3]> {
    match emotion {
        Emotion::Neutral => None,
        Emotion::Happy => Some(HAPPY_PALETTE),
        Emotion::Surprise => Some(SURPRISE_PALETTE),
        Emotion::Angry => Some(ANGRY_PALETTE),
        Emotion::Sad => Some(SAD_PALETTE),
    }
}
