use glam::{Mat4, Vec3};
use serde::Serialize;
use crate::api::types::EntityId;
use crate::components::entity::{Entity, ObjectKind};
use crate::components::instances::InstancesComponent;
use crate::components::label::LabelComponent;
use crate::components::mesh::MeshComponent;
use crate::components::path::PathComponent;

/// Parent chains deeper than this are treated as cycles and cut off.
const MAX_DEPTH: usize = 16;

/// Simple entity storage using a flat Vec.
/// Designed for small-to-medium entity counts (hundreds, not millions).
pub struct Scene {
    entities: Vec<Entity>,
    /// Bumped on every spawn/despawn so renderers know to rebuild geometry.
    revision: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
            revision: 0,
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Remove an entity by ID, along with every entity parented to it.
    /// Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        let removed = self.entities.remove(idx);
        self.revision = self.revision.wrapping_add(1);

        let children: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| e.parent == Some(id))
            .map(|e| e.id)
            .collect();
        for child in children {
            self.despawn(child);
        }
        Some(removed)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Children of an entity, in spawn order.
    pub fn children(&self, id: EntityId) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.parent == Some(id))
    }

    /// World transform of an entity: the parent chain composed with its local transform.
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        let mut entity = self.get(id)?;
        let mut matrix = entity.local_matrix();
        for _ in 0..MAX_DEPTH {
            let Some(parent_id) = entity.parent else { break };
            let Some(parent) = self.get(parent_id) else { break };
            matrix = parent.local_matrix() * matrix;
            entity = parent;
        }
        Some(matrix)
    }

    /// World-space origin of an entity.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Whether the entity and all of its ancestors are visible.
    pub fn is_visible(&self, id: EntityId) -> bool {
        let mut current = self.get(id);
        for _ in 0..MAX_DEPTH {
            match current {
                Some(e) if !e.visible => return false,
                Some(e) => match e.parent {
                    Some(p) => current = self.get(p),
                    None => return true,
                },
                None => return true,
            }
        }
        true
    }

    /// Change counter for structural edits (spawn/despawn).
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Static description of the scene graph for the renderer, in scene order.
    /// Per-frame transforms travel separately through the render buffer.
    pub fn describe(&self) -> SceneDescription<'_> {
        SceneDescription {
            revision: self.revision,
            nodes: self
                .entities
                .iter()
                .map(|e| SceneNode {
                    id: e.id.0,
                    tag: &e.tag,
                    kind: e.kind,
                    parent: e.parent.map(|p| p.0),
                    mesh: e.mesh.as_ref(),
                    path: e.path.as_ref(),
                    label: e.label.as_ref(),
                    instances: e.instances.as_ref(),
                })
                .collect(),
        }
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of the scene graph.
#[derive(Debug, Serialize)]
pub struct SceneDescription<'a> {
    pub revision: u32,
    pub nodes: Vec<SceneNode<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SceneNode<'a> {
    pub id: u32,
    pub tag: &'a str,
    pub kind: ObjectKind,
    pub parent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<&'a MeshComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a PathComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a LabelComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<&'a InstancesComponent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(10.0, 20.0, 30.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(scene.revision(), 1);
    }

    #[test]
    fn despawn_takes_children_along() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("Earth"));
        scene.spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)));
        scene.spawn(Entity::new(EntityId(3)));
        scene.despawn(EntityId(1));
        assert_eq!(scene.len(), 1);
        assert!(scene.get(EntityId(3)).is_some());
    }

    #[test]
    fn world_position_follows_parent() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_pos(Vec3::new(24.0, 0.0, 0.0))
                .with_scale(Vec3::splat(0.5)),
        );
        scene.spawn(
            Entity::new(EntityId(2))
                .with_parent(EntityId(1))
                .with_pos(Vec3::new(0.0, 2.0, 0.0)),
        );
        let p = scene.world_position(EntityId(2)).unwrap();
        assert!((p - Vec3::new(24.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn hidden_parent_hides_child() {
        let mut scene = Scene::new();
        let mut parent = Entity::new(EntityId(1));
        parent.visible = false;
        scene.spawn(parent);
        scene.spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)));
        assert!(!scene.is_visible(EntityId(2)));
    }

    #[test]
    fn describe_lists_every_node() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("SUN"));
        let json = serde_json::to_string(&scene.describe()).unwrap();
        assert!(json.contains("\"tag\":\"SUN\""));
    }
}
