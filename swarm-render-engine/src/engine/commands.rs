use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::engine::buffer::ParticleBuffer;
use crate::engine::color_policy::{self, ColorOverride, ColorPolicy};
use crate::engine::shapes::{self, ShapeKind};
use crate::vision::sample::VisionToggles;

/// Where a command came from, for logging and conditional behavior.
#[derive(Debug, Clone, Copy)]
pub enum CommandSource {
    Rpc,
    Keyboard,
    Settings,
}

/// Errors rejected at the command boundary. Rejection leaves prior state
/// unchanged; nothing is partially applied.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Model string does not name a shape kind
    #[error("unknown model type: {0}")]
    UnknownModel(String),

    /// Particle count was negative, fractional, or not a number
    #[error("particle count must be a non-negative integer")]
    InvalidParticleCount,

    /// Color string was not #rrggbb hex
    #[error("malformed color {0:?} (expected #rrggbb)")]
    MalformedColor(String),
}

/// Currently selected model.
#[derive(Resource)]
pub struct CurrentModel(pub ShapeKind);

impl Default for CurrentModel {
    fn default() -> Self {
        Self(ShapeKind::Tree)
    }
}

#[derive(Event)]
pub struct ModelSelectionEvent {
    pub kind: ShapeKind,
    pub source: CommandSource,
}

#[derive(Event)]
pub struct ParticleBudgetEvent {
    pub count: usize,
}

#[derive(Event)]
pub struct BaseColorEvent {
    pub color: Vec3,
}

#[derive(Event)]
pub struct SegmentColorsEvent {
    pub base: Vec3,
    pub tip: Vec3,
}

#[derive(Event)]
pub struct ClearColorOverrideEvent;

#[derive(Event)]
pub struct GestureToggleEvent {
    pub enabled: bool,
}

#[derive(Event)]
pub struct EmotionToggleEvent {
    pub enabled: bool,
}

/// Parse a `#rrggbb` hex color into [0, 1] channels.
pub fn parse_hex_color(hex: &str) -> Result<Vec3, CommandError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CommandError::MalformedColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|value| value as f32 / 255.0)
            .map_err(|_| CommandError::MalformedColor(hex.to_string()))
    };

    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Regenerate all targets for the given model at the buffer's current active
/// count, then re-resolve target colors under the current policy. Live
/// arrays are untouched; the morph carries particles into the new shape from
/// wherever they are.
pub fn regenerate(
    model: ShapeKind,
    buffer: &mut ParticleBuffer,
    policy: &ColorPolicy,
    rng: &mut impl Rng,
) {
    let sample = shapes::generate(model, buffer.active(), rng);
    buffer.store_targets(&sample);
    color_policy::resolve(policy, buffer, rng);
}

pub fn handle_model_selection(
    mut events: EventReader<ModelSelectionEvent>,
    mut current: ResMut<CurrentModel>,
    mut buffer: ResMut<ParticleBuffer>,
    policy: Res<ColorPolicy>,
) {
    for event in events.read() {
        current.0 = event.kind;
        let mut rng = rand::rng();
        regenerate(event.kind, &mut buffer, &policy, &mut rng);
        info!("Model switched to {} via {:?}", event.kind.as_str(), event.source);
    }
}

pub fn handle_particle_budget(
    mut events: EventReader<ParticleBudgetEvent>,
    current: Res<CurrentModel>,
    mut buffer: ResMut<ParticleBuffer>,
    policy: Res<ColorPolicy>,
) {
    for event in events.read() {
        let clamped = event.count.min(buffer.capacity());
        if clamped != event.count {
            warn!(
                "Particle count {} clamped to capacity {}",
                event.count, clamped
            );
        }
        buffer.set_active(clamped);
        let mut rng = rand::rng();
        regenerate(current.0, &mut buffer, &policy, &mut rng);
        info!("Particle budget set to {clamped}");
    }
}

/// All three override events funnel through one handler so the resolver runs
/// once per frame at most.
pub fn handle_color_overrides(
    mut base_events: EventReader<BaseColorEvent>,
    mut segment_events: EventReader<SegmentColorsEvent>,
    mut clear_events: EventReader<ClearColorOverrideEvent>,
    mut policy: ResMut<ColorPolicy>,
    mut buffer: ResMut<ParticleBuffer>,
) {
    let mut changed = false;

    for event in base_events.read() {
        policy.override_mode = Some(ColorOverride::Flat(event.color));
        changed = true;
    }
    for event in segment_events.read() {
        policy.override_mode = Some(ColorOverride::Segment {
            base: event.base,
            tip: event.tip,
        });
        changed = true;
    }
    for _ in clear_events.read() {
        policy.override_mode = None;
        info!("Manual color override cleared");
        changed = true;
    }

    if changed {
        let mut rng = rand::rng();
        color_policy::resolve(&policy, &mut buffer, &mut rng);
    }
}

pub fn handle_vision_toggles(
    mut gesture_events: EventReader<GestureToggleEvent>,
    mut emotion_events: EventReader<EmotionToggleEvent>,
    mut toggles: ResMut<VisionToggles>,
) {
    for event in gesture_events.read() {
        toggles.gesture_enabled = event.enabled;
        info!(
            "Gesture control {}",
            if event.enabled { "enabled" } else { "disabled" }
        );
    }
    for event in emotion_events.read() {
        toggles.emotion_enabled = event.enabled;
        info!(
            "Emotion control {}",
            if event.enabled { "enabled" } else { "disabled" }
        );
    }
}

/// Keyboard shortcuts for native builds; WASM builds are driven over RPC.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut auto_rotate: ResMut<crate::engine::camera::AutoRotate>,
    mut model_events: EventWriter<ModelSelectionEvent>,
    mut clear_events: EventWriter<ClearColorOverrideEvent>,
) {
    let shortcuts = [
        (KeyCode::Digit1, ShapeKind::Tree),
        (KeyCode::Digit2, ShapeKind::Heart),
        (KeyCode::Digit3, ShapeKind::Flower),
        (KeyCode::Digit4, ShapeKind::Saturn),
        (KeyCode::Digit5, ShapeKind::Fireworks),
    ];
    for (key, kind) in shortcuts {
        if keyboard.just_pressed(key) {
            model_events.write(ModelSelectionEvent {
                kind,
                source: CommandSource::Keyboard,
            });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        clear_events.write(ClearColorOverrideEvent);
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        auto_rotate.0 = !auto_rotate.0;
        info!("Auto rotate {}", if auto_rotate.0 { "on" } else { "off" });
    }
}

/// Placeholder for WASM builds where shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_keyboard_shortcuts() {}
