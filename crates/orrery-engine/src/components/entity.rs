use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::instances::InstancesComponent;
use crate::components::label::LabelComponent;
use crate::components::mesh::MeshComponent;
use crate::components::path::PathComponent;

/// What kind of scene object an entity is. Picking only considers meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Solid geometry (spheres, rings).
    #[default]
    Mesh,
    /// Line loops such as orbit paths.
    Line,
    /// Camera-facing billboards such as labels.
    Sprite,
    /// Many copies of one small mesh (particle-like belts).
    Instanced,
}

impl ObjectKind {
    /// Numeric id written into the render instance buffer.
    pub fn code(self) -> f32 {
        match self {
            ObjectKind::Mesh => 0.0,
            ObjectKind::Line => 1.0,
            ObjectKind::Sprite => 2.0,
            ObjectKind::Instanced => 3.0,
        }
    }
}

/// Fat entity: one struct with optional components.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Identity tag. Body meshes carry their body name; decorations leave it empty.
    pub tag: String,
    pub kind: ObjectKind,
    /// Whether this entity is drawn. A hidden parent hides its children.
    pub visible: bool,
    /// Position relative to the parent (or world if no parent).
    pub pos: Vec3,
    /// XYZ Euler rotation in radians, relative to the parent.
    pub rotation: Vec3,
    /// Scale relative to the parent.
    pub scale: Vec3,
    /// Scene-graph parent. Children inherit its transform and visibility.
    pub parent: Option<EntityId>,
    pub mesh: Option<MeshComponent>,
    pub path: Option<PathComponent>,
    pub label: Option<LabelComponent>,
    pub instances: Option<InstancesComponent>,
}

impl Entity {
    /// Create a new mesh entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            kind: ObjectKind::Mesh,
            visible: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            parent: None,
            mesh: None,
            path: None,
            label: None,
            instances: None,
        }
    }

    /// Local transform matrix (translation · rotation · scale).
    pub fn local_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rot, self.pos)
    }

    /// Whether the entity carries a non-empty identity tag.
    pub fn has_identity(&self) -> bool {
        !self.tag.is_empty()
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.kind = ObjectKind::Mesh;
        self.mesh = Some(mesh);
        self
    }

    pub fn with_path(mut self, path: PathComponent) -> Self {
        self.kind = ObjectKind::Line;
        self.path = Some(path);
        self
    }

    pub fn with_label(mut self, label: LabelComponent) -> Self {
        self.kind = ObjectKind::Sprite;
        self.label = Some(label);
        self
    }

    pub fn with_instances(mut self, instances: InstancesComponent) -> Self {
        self.kind = ObjectKind::Instanced;
        self.instances = Some(instances);
        self
    }
}
