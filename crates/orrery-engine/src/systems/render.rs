use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

fn opacity(entity: &Entity) -> f32 {
    entity
        .mesh
        .as_ref()
        .map(|m| m.opacity)
        .or_else(|| entity.path.as_ref().map(|p| p.opacity))
        .unwrap_or(1.0)
}

/// Build the render buffer from the scene: one instance per entity, in scene
/// order, carrying the composed world matrix and inherited visibility.
/// Returns the number of entities that did not fit.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) -> usize {
    buffer.clear();
    let mut dropped = 0;

    for entity in scene.iter() {
        let Some(model) = scene.world_matrix(entity.id) else {
            continue;
        };
        let instance = RenderInstance {
            model: model.to_cols_array(),
            id: entity.id.0 as f32,
            kind: entity.kind.code(),
            opacity: opacity(entity),
            visible: if scene.is_visible(entity.id) { 1.0 } else { 0.0 },
        };
        if !buffer.push(instance) {
            dropped += 1;
        }
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::types::EntityId;
    use crate::components::entity::ObjectKind;
    use crate::components::mesh::{Color, MeshComponent};

    #[test]
    fn children_inherit_transform_and_visibility() {
        let mut scene = Scene::new();
        let mut planet = Entity::new(EntityId(1))
            .with_pos(Vec3::new(10.0, 0.0, 0.0))
            .with_mesh(MeshComponent::sphere(1.0, Color::WHITE));
        planet.visible = false;
        scene.spawn(planet);
        scene.spawn(
            Entity::new(EntityId(2))
                .with_parent(EntityId(1))
                .with_pos(Vec3::new(0.0, 2.0, 0.0))
                .with_mesh(MeshComponent::sphere(1.0, Color::WHITE).with_opacity(0.3)),
        );

        let mut buffer = RenderBuffer::new();
        assert_eq!(build_render_buffer(&scene, &mut buffer), 0);
        assert_eq!(buffer.instance_count(), 2);

        let child = buffer.instances[1];
        assert_eq!(child.id, 2.0);
        assert_eq!(child.kind, ObjectKind::Mesh.code());
        assert!((child.opacity - 0.3).abs() < 1e-6);
        assert_eq!(child.visible, 0.0);
        // Column-major: translation lives in elements 12..15.
        assert!((child.model[12] - 10.0).abs() < 1e-5);
        assert!((child.model[13] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn overflow_is_counted() {
        let mut scene = Scene::new();
        for i in 0..3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        let mut buffer = RenderBuffer::with_capacity(2);
        assert_eq!(build_render_buffer(&scene, &mut buffer), 1);
    }
}
