/// Focus & Scale controller: which body the camera follows, the Earth-sized
/// comparison sphere, and the artistic / true-scale switch.

use glam::Vec3;
use orrery_engine::{Color, EngineContext, Entity, MeshComponent, Scene};

use crate::bodies::{BodyKind, STAR_TRUE_SCALE, TRUE_DISTANCE_RATIO, TRUE_RADIUS_RATIO};
use crate::state::{BodyIndex, SimulationState, SolarBodies};

/// Radius of the reference (Earth) sphere at artistic scale.
const REFERENCE_RADIUS: f32 = 1.0;
/// Gap between the focused body's surface and the reference sphere.
const OVERLAY_GAP: f32 = 2.0;
const OVERLAY_COLOR: u32 = 0x00ffff;
const OVERLAY_OPACITY: f32 = 0.3;

impl SimulationState {
    /// Scale factor of the reference sphere in the current mode.
    pub fn reference_scale(&self) -> f32 {
        if self.is_true_scale {
            TRUE_RADIUS_RATIO
        } else {
            1.0
        }
    }

    /// Change focus. Clearing focus also discards the comparison overlay.
    pub fn set_focus(&mut self, body: Option<BodyIndex>, scene: &mut Scene) {
        self.focused = body;
        if body.is_none() {
            self.discard_overlay(scene);
        }
    }

    /// Remove the comparison overlay if present. Returns whether one existed.
    pub fn discard_overlay(&mut self, scene: &mut Scene) -> bool {
        match self.comparison_overlay.take() {
            Some(id) => {
                scene.despawn(id);
                true
            }
            None => false,
        }
    }

    /// Show or hide the reference sphere next to the focused body. Without a
    /// focused body this is a no-op. Returns whether the overlay now exists.
    pub fn toggle_comparison_overlay(&mut self, bodies: &SolarBodies, ctx: &mut EngineContext) -> bool {
        if self.discard_overlay(&mut ctx.scene) {
            return false;
        }
        let Some(focused) = self.focused.filter(|&i| bodies.get(i).is_some()) else {
            return false;
        };

        let id = ctx.next_id();
        let mesh = MeshComponent::sphere(REFERENCE_RADIUS, Color::from_hex(OVERLAY_COLOR))
            .with_wireframe()
            .with_opacity(OVERLAY_OPACITY);
        ctx.scene.spawn(Entity::new(id).with_mesh(mesh));
        self.comparison_overlay = Some(id);
        self.update_overlay(bodies, &mut ctx.scene);
        log::debug!("comparison overlay shown for {focused:?}");
        true
    }

    /// Flip between artistic and true-scale rendering.
    ///
    /// Every value is recomputed from the stored artistic figures, so any
    /// number of toggles returns to exactly the original sizes and distances.
    pub fn toggle_true_scale(&mut self, bodies: &mut SolarBodies, scene: &mut Scene) {
        self.is_true_scale = !self.is_true_scale;
        let on = self.is_true_scale;

        for (_, body) in bodies.iter_mut() {
            let (scale, distance) = match (body.kind, on) {
                (BodyKind::Star, true) => (STAR_TRUE_SCALE, 0.0),
                (BodyKind::Star, false) => (1.0, 0.0),
                (_, true) => (TRUE_RADIUS_RATIO, body.artistic_distance * TRUE_DISTANCE_RATIO),
                (_, false) => (1.0, body.artistic_distance),
            };
            body.scale = scale;
            body.distance = distance;

            if let Some(entity) = scene.get_mut(body.id) {
                entity.scale = Vec3::splat(scale);
            }
            if let Some(path) = body.orbit_path.and_then(|id| scene.get_mut(id)) {
                path.scale = Vec3::splat(if on { TRUE_DISTANCE_RATIO } else { 1.0 });
            }
            if let Some(label) = body.label.and_then(|id| scene.get_mut(id)) {
                label.visible = !on;
            }
        }
        if let Some(belt) = bodies.belt.and_then(|id| scene.get_mut(id)) {
            belt.visible = !on;
        }
        self.discard_overlay(scene);
        log::info!("true scale {}", if on { "on" } else { "off" });
    }

    /// Keep the overlay beside the focused body, sized for the current mode.
    pub fn update_overlay(&self, bodies: &SolarBodies, scene: &mut Scene) {
        let Some(overlay) = self.comparison_overlay else {
            return;
        };
        let Some(body) = self.focused.and_then(|i| bodies.get(i)) else {
            return;
        };
        let Some(center) = scene.world_position(body.id) else {
            return;
        };
        let scale = self.reference_scale();
        let offset = body.rendered_radius() + REFERENCE_RADIUS * scale + OVERLAY_GAP;
        if let Some(entity) = scene.get_mut(overlay) {
            entity.pos = center + Vec3::new(offset, 0.0, 0.0);
            entity.scale = Vec3::splat(scale);
        }
    }

    /// World position the camera should look at, if a live body is focused.
    pub fn focus_target(&self, bodies: &SolarBodies, scene: &Scene) -> Option<Vec3> {
        bodies.world_position(self.focused?, scene)
    }
}
