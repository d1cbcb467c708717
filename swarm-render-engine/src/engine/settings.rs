use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::commands::{
    CommandSource, EmotionToggleEvent, GestureToggleEvent, ModelSelectionEvent,
    ParticleBudgetEvent,
};
use crate::engine::shapes::ShapeKind;

pub const SETTINGS_PATH: &str = "swarm.settings.json";

/// Startup settings, loaded as a JSON asset. Until (and unless) the file
/// arrives, the constants defaults stay in effect; a missing or malformed
/// file is not an error.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
pub struct SwarmSettings {
    pub model: String,
    pub particle_count: usize,
    #[serde(default = "enabled_by_default")]
    pub gesture_enabled: bool,
    #[serde(default = "enabled_by_default")]
    pub emotion_enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<SwarmSettings>>,
    applied: bool,
}

pub fn start_settings_load(
    mut loader: ResMut<SettingsLoader>,
    asset_server: Res<AssetServer>,
) {
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Apply the settings once the asset arrives, by dispatching the same command
/// events the RPC boundary uses, so validation and clamping are identical.
pub fn apply_settings_when_loaded(
    mut loader: ResMut<SettingsLoader>,
    settings_assets: Res<Assets<SwarmSettings>>,
    mut model_events: EventWriter<ModelSelectionEvent>,
    mut budget_events: EventWriter<ParticleBudgetEvent>,
    mut gesture_events: EventWriter<GestureToggleEvent>,
    mut emotion_events: EventWriter<EmotionToggleEvent>,
) {
    if loader.applied {
        return;
    }
    let Some(ref handle) = loader.handle else {
        return;
    };
    let Some(settings) = settings_assets.get(handle) else {
        return;
    };

    match ShapeKind::from_string(&settings.model) {
        Some(kind) => {
            model_events.write(ModelSelectionEvent {
                kind,
                source: CommandSource::Settings,
            });
        }
        None => warn!(
            "Settings model {:?} is unknown; keeping the default",
            settings.model
        ),
    }
    budget_events.write(ParticleBudgetEvent {
        count: settings.particle_count,
    });
    gesture_events.write(GestureToggleEvent {
        enabled: settings.gesture_enabled,
    });
    emotion_events.write(EmotionToggleEvent {
        enabled: settings.emotion_enabled,
    });

    info!("Startup settings applied");
    loader.applied = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: SwarmSettings =
            serde_json::from_str(r#"{ "model": "saturn", "particle_count": 2000 }"#)
                .expect("minimal settings parse");
        assert_eq!(settings.model, "saturn");
        assert_eq!(settings.particle_count, 2000);
        assert!(settings.gesture_enabled);
        assert!(settings.emotion_enabled);
    }

    #[test]
    fn test_negative_particle_count_fails_to_parse() {
        let result: Result<SwarmSettings, _> =
            serde_json::from_str(r#"{ "model": "tree", "particle_count": -5 }"#);
        assert!(result.is_err());
    }
}
