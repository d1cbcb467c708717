use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

use crate::engine::buffer::{ParticleBuffer, SwarmPoints};

/// Create the point-list mesh the live buffer is uploaded into. Attributes
/// are refreshed in place every frame; the working range can shrink or grow
/// within capacity without reallocating GPU-side storage.
pub fn create_swarm_mesh(buffer: &ParticleBuffer) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::default(), // kept in main world for per-frame rewrites
    );
    write_attributes(&mut mesh, buffer);
    mesh
}

fn write_attributes(mesh: &mut Mesh, buffer: &ParticleBuffer) {
    let active = buffer.active();

    let positions: Vec<[f32; 3]> = buffer.positions[..active]
        .iter()
        .map(|p| p.to_array())
        .collect();
    let colors: Vec<[f32; 4]> = buffer.colors[..active]
        .iter()
        .map(|c| [c.x, c.y, c.z, 1.0])
        .collect();

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
}

/// Push the mutated live arrays to the render mesh, once per frame after the
/// morph tick.
pub fn upload_swarm_mesh(
    buffer: Res<ParticleBuffer>,
    swarm_query: Query<&Mesh3d, With<SwarmPoints>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Ok(mesh_handle) = swarm_query.single() else {
        return;
    };
    let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
        return;
    };
    write_attributes(mesh, &buffer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::shapes::{ShapeKind, generate};

    #[test]
    fn test_mesh_carries_the_working_range() {
        let mut rng = rand::rng();
        let mut buffer = ParticleBuffer::new(64, &mut rng);
        buffer.set_active(20);
        let sample = generate(ShapeKind::Heart, 20, &mut rng);
        buffer.store_targets(&sample);

        let mesh = create_swarm_mesh(&buffer);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .expect("position attribute present");
        assert_eq!(positions.len(), 20);
    }
}
