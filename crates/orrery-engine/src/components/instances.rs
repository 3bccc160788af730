use glam::Vec3;
use serde::Serialize;
use crate::components::mesh::MeshComponent;

/// One copy of an instanced mesh, relative to the owning entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub pos: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

/// Many copies of one mesh sharing the entity transform (asteroid belts).
#[derive(Debug, Clone)]
pub struct InstancesComponent {
    pub mesh: MeshComponent,
    pub transforms: Vec<InstanceTransform>,
}

impl InstancesComponent {
    pub fn new(mesh: MeshComponent, transforms: Vec<InstanceTransform>) -> Self {
        Self { mesh, transforms }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Serialize for InstancesComponent {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        // Flattened as [x, y, z, rx, ry, rz, scale] per instance.
        let flat: Vec<f32> = self
            .transforms
            .iter()
            .flat_map(|t| [t.pos.x, t.pos.y, t.pos.z, t.rotation.x, t.rotation.y, t.rotation.z, t.scale])
            .collect();
        let mut st = s.serialize_struct("InstancesComponent", 2)?;
        st.serialize_field("mesh", &self.mesh)?;
        st.serialize_field("transforms", &flat)?;
        st.end()
    }
}
