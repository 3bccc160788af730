use std::f32::consts::PI;
use glam::Vec3;
use crate::renderer::camera::PerspectiveCamera;

/// Deltas smaller than this are considered settled.
const SETTLE_EPS: f32 = 1e-5;
/// Keeps the polar angle off the poles so the view matrix never flips.
const POLE_EPS: f32 = 1e-3;

/// Tuning for `OrbitControls`.
#[derive(Debug, Clone, Copy)]
pub struct ControlsConfig {
    /// Fraction of the pending motion applied per update.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of pointer drag.
    pub rotate_speed: f32,
    /// Log-distance change per wheel unit.
    pub zoom_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            min_distance: 1.5,
            max_distance: 5000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.001,
        }
    }
}

/// Damped orbit controls around a mutable look-at target.
///
/// User input accumulates into pending deltas; `update` bleeds a `damping`
/// fraction of them into the camera each frame, so motion eases out instead
/// of snapping. With nothing pending the camera position is left alone,
/// which lets scripted camera moves own the position.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub config: ControlsConfig,
    pub enabled: bool,
    pending_theta: f32,
    pending_phi: f32,
    pending_dolly: f32,
}

impl OrbitControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            config,
            enabled: true,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_dolly: 0.0,
        }
    }

    /// Queue a rotation from a pointer drag, in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        self.pending_theta -= dx * self.config.rotate_speed;
        self.pending_phi -= dy * self.config.rotate_speed;
    }

    /// Queue a zoom. Positive deltas move away from the target.
    pub fn dolly(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        self.pending_dolly += delta * self.config.zoom_speed;
    }

    /// Drop any queued motion.
    pub fn stop(&mut self) {
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_dolly = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.pending_theta.abs() < SETTLE_EPS
            && self.pending_phi.abs() < SETTLE_EPS
            && self.pending_dolly.abs() < SETTLE_EPS
    }

    /// Apply one damped step and aim the camera at the target.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if !self.is_settled() {
            let k = self.config.damping;
            let offset = camera.position - self.target;
            let radius = offset.length().max(self.config.min_distance);
            let mut theta = offset.x.atan2(offset.z);
            let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

            theta += self.pending_theta * k;
            phi = (phi + self.pending_phi * k).clamp(POLE_EPS, PI - POLE_EPS);
            let radius = (radius * (self.pending_dolly * k).exp())
                .clamp(self.config.min_distance, self.config.max_distance);

            camera.position = self.target
                + Vec3::new(
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.cos(),
                );

            let decay = 1.0 - k;
            self.pending_theta *= decay;
            self.pending_phi *= decay;
            self.pending_dolly *= decay;
            if self.is_settled() {
                self.stop();
            }
        }
        camera.look_at = self.target;
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_update_only_aims() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        controls.target = Vec3::new(24.0, 0.0, 0.0);
        let before = cam.position;
        controls.update(&mut cam);
        assert_eq!(cam.position, before);
        assert_eq!(cam.look_at, Vec3::new(24.0, 0.0, 0.0));
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        let start = cam.position.length();
        controls.rotate(120.0, 0.0);
        for _ in 0..30 {
            controls.update(&mut cam);
        }
        assert!((cam.position.length() - start).abs() < 1e-2);
        assert!(cam.position.x.abs() > 1.0);
    }

    #[test]
    fn damping_eases_out() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        controls.rotate(200.0, 0.0);
        let p0 = cam.position;
        controls.update(&mut cam);
        let first = (cam.position - p0).length();
        let p1 = cam.position;
        controls.update(&mut cam);
        let second = (cam.position - p1).length();
        assert!(second < first);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        controls.dolly(-1_000_000.0);
        for _ in 0..200 {
            controls.update(&mut cam);
        }
        assert!(cam.position.length() >= 1.5 - 1e-4);

        controls.dolly(1_000_000.0);
        for _ in 0..200 {
            controls.update(&mut cam);
        }
        assert!(cam.position.length() <= 5000.0 + 1e-2);
    }

    #[test]
    fn disabled_ignores_input() {
        let mut controls = OrbitControls::default();
        controls.enabled = false;
        controls.rotate(10.0, 10.0);
        assert!(controls.is_settled());
    }
}
