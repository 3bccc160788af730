use bytemuck::{Pod, Zeroable};

/// Per-entity render data read by the JavaScript renderer from linear memory.
/// Must match the renderer's layout: 20 floats = 80 bytes stride.
///
/// Geometry and materials arrive once per scene revision through the scene
/// description; this record only carries what changes every frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderInstance {
    /// Column-major world matrix.
    pub model: [f32; 16],
    /// Entity id, so the renderer can match the record to its geometry.
    pub id: f32,
    /// `ObjectKind::code()`.
    pub kind: f32,
    /// Material opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// 1.0 if the entity and all its ancestors are visible.
    pub visible: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array(),
            id: 0.0,
            kind: 0.0,
            opacity: 1.0,
            visible: 1.0,
        }
    }
}

/// Render buffer containing one instance per scene entity, in scene order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    /// Hard cap on instances per frame; extra entities are not drawn.
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false once the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for linear-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
