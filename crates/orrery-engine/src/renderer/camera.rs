use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::renderer::ray::Ray;

/// Perspective camera with an explicit look-at point.
/// The renderer reads it through `CameraUniform`; game code moves `position`
/// directly or through `OrbitControls` and tweens.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera: 36 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// xyz = eye position, w unused.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 100.0, 180.0),
            look_at: Vec3::ZERO,
            fov_deg: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100_000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            ..Default::default()
        }
    }

    /// Right-handed view matrix, Y up.
    pub fn view_matrix(&self) -> Mat4 {
        // A degenerate eye == target would produce NaNs; nudge the target.
        let target = if (self.look_at - self.position).length_squared() < 1e-12 {
            self.position - Vec3::Z
        } else {
            self.look_at
        };
        Mat4::look_at_rh(self.position, target, Vec3::Y)
    }

    /// Right-handed projection with clip depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Unproject normalized device coordinates (x, y in [-1, 1], y up) into a
    /// world-space ray starting at the eye.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - near)
    }

    /// Direction the camera is facing.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }
}
