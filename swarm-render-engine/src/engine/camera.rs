use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use constants::morph::AUTO_ROTATE_RATE;

use crate::engine::buffer::SwarmPoints;

/// Orbit-style viewport camera: left-drag orbits, scroll dollies. The
/// transform chases the orbit state with the same smoothed approach the
/// particles use, so view changes never snap.
#[derive(Resource)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub focus: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: -0.15,
            distance: 80.0,
            focus: Vec3::ZERO,
        }
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        orbit.yaw -= mouse_delta.x * yaw_sens;
        orbit.pitch -= mouse_delta.y * pitch_sens;
        orbit.pitch = orbit.pitch.clamp(-1.55, 1.55);
    }

    // Mouse wheel scroll accumulation (pixel and line scroll)
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        let dolly_speed = (orbit.distance * 0.1).clamp(0.5, 40.0);
        orbit.distance = (orbit.distance - scroll_accum * dolly_speed).clamp(15.0, 300.0);
    }

    let target_rot = Quat::from_euler(EulerRot::YXZ, orbit.yaw, orbit.pitch, 0.0);
    let target_pos = orbit.focus + target_rot * (Vec3::Z * orbit.distance);

    let lerp_speed = 12.0 * time.delta_secs();
    camera_transform.translation = camera_transform
        .translation
        .lerp(target_pos, lerp_speed.min(1.0));
    camera_transform.rotation = camera_transform
        .rotation
        .slerp(target_rot, lerp_speed.min(1.0));
}

/// Idle spin of the swarm entity, matching the presentation default.
#[derive(Resource)]
pub struct AutoRotate(pub bool);

impl Default for AutoRotate {
    fn default() -> Self {
        Self(true)
    }
}

pub fn auto_rotate_swarm(
    time: Res<Time>,
    auto_rotate: Res<AutoRotate>,
    mut swarm_query: Query<&mut Transform, With<SwarmPoints>>,
) {
    if !auto_rotate.0 {
        return;
    }
    for mut transform in &mut swarm_query {
        transform.rotate_y(AUTO_ROTATE_RATE * time.delta_secs());
    }
}
