use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy_common_assets::json::JsonAssetPlugin;

mod engine;
mod rpc;
mod vision;

use engine::{
    buffer::{ParticleBuffer, SwarmPoints},
    camera::{AutoRotate, OrbitCamera, auto_rotate_swarm, camera_controller},
    color_policy::ColorPolicy,
    commands::{
        BaseColorEvent, ClearColorOverrideEvent, CurrentModel, EmotionToggleEvent,
        GestureToggleEvent, ModelSelectionEvent, ParticleBudgetEvent, SegmentColorsEvent,
        handle_color_overrides, handle_keyboard_shortcuts, handle_model_selection,
        handle_particle_budget, handle_vision_toggles, regenerate,
    },
    mesh::{create_swarm_mesh, upload_swarm_mesh},
    morph::{MorphSettings, ScaleState, morph_tick},
    settings::{SettingsLoader, SwarmSettings, apply_settings_when_loaded, start_settings_load},
};
use rpc::web_rpc::WebRpcPlugin;
use vision::capture::start_capture;
use vision::sample::{
    SampleInbox, VisionState, VisionStatus, VisionToggles, drain_vision_samples,
};

use constants::morph::MAX_PARTICLES;

fn main() {
    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}

/// Create the application: one fixed-capacity particle buffer, the morph
/// loop, vision sample intake, and the RPC command boundary.
fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(JsonAssetPlugin::<SwarmSettings>::new(&["settings.json"]))
        .add_plugins(WebRpcPlugin);

    app.add_event::<ModelSelectionEvent>()
        .add_event::<ParticleBudgetEvent>()
        .add_event::<BaseColorEvent>()
        .add_event::<SegmentColorsEvent>()
        .add_event::<ClearColorOverrideEvent>()
        .add_event::<GestureToggleEvent>()
        .add_event::<EmotionToggleEvent>();

    app.init_resource::<CurrentModel>()
        .init_resource::<ColorPolicy>()
        .init_resource::<ScaleState>()
        .init_resource::<MorphSettings>()
        .init_resource::<SampleInbox>()
        .init_resource::<VisionState>()
        .init_resource::<VisionStatus>()
        .init_resource::<VisionToggles>()
        .init_resource::<SettingsLoader>()
        .init_resource::<OrbitCamera>()
        .init_resource::<AutoRotate>()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.02)))
        .insert_resource(ParticleBuffer::new(MAX_PARTICLES, &mut rand::rng()))
        .add_systems(Startup, (setup, start_settings_load, start_capture))
        .add_systems(
            Update,
            (
                apply_settings_when_loaded,
                handle_keyboard_shortcuts,
                drain_vision_samples,
                handle_model_selection,
                handle_particle_budget,
                handle_color_overrides,
                handle_vision_toggles,
                morph_tick,
                upload_swarm_mesh,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (camera_controller, auto_rotate_swarm, fps_text_update_system),
        );

    app
}

/// Spawn the swarm entity, camera, and overlay, and generate the initial
/// model so the first frames already morph toward a shape.
fn setup(
    mut commands: Commands,
    mut buffer: ResMut<ParticleBuffer>,
    current: Res<CurrentModel>,
    policy: Res<ColorPolicy>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("=== MORPHING PARTICLE SWARM ===");

    let mut rng = rand::rng();
    regenerate(current.0, &mut buffer, &policy, &mut rng);

    let mesh = meshes.add(create_swarm_mesh(&buffer));
    let material = materials.add(StandardMaterial {
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
        SwarmPoints,
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 80.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_ui(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#swarm".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

#[derive(Component)]
struct FpsText;

fn spawn_ui(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}
