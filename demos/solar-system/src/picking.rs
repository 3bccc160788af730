/// Pointer picking: ray-cast the meshes under the pointer and resolve the
/// nearest hit to a named body.

use orrery_engine::{button, EngineContext, Entity, ObjectKind, Ray, Scene, Shape};

use crate::facts::Encyclopedia;
use crate::hud;
use crate::state::{BodyIndex, SimulationState, SolarBodies};

/// Vantage distance for a middle-click jump: `radius × FACTOR + PAD`.
const VANTAGE_FACTOR: f32 = 5.0;
const VANTAGE_PAD: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub body: BodyIndex,
    /// Distance along the (normalized) pick ray.
    pub distance: f32,
}

/// What a pointer press did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Primary press on empty space: focus cleared.
    Cleared,
    /// Primary press on a body: focused.
    Focused(BodyIndex),
    /// Middle press on a body: focused and the camera jumped to it.
    Jumped(BodyIndex),
    Ignored,
}

fn ray_distance(ray: &Ray, entity: &Entity, scene: &Scene) -> Option<f32> {
    let mesh = entity.mesh.as_ref()?;
    let world = scene.world_matrix(entity.id)?;
    // The world matrix is affine and the direction is not renormalized, so
    // `t` names the same point in both spaces even under scale.
    let local = ray.transformed(&world.inverse());
    match mesh.shape {
        Shape::Sphere { radius } => local.intersect_sphere(glam::Vec3::ZERO, radius),
        Shape::Ring { inner, outer } => local.intersect_annulus(inner, outer),
    }
}

/// The body an entity stands for: itself when tagged, else its immediate
/// parent when that is tagged.
fn identity(entity: &Entity, scene: &Scene, bodies: &SolarBodies) -> Option<BodyIndex> {
    if entity.has_identity() {
        return bodies.find(&entity.tag);
    }
    let parent = scene.get(entity.parent?)?;
    if parent.has_identity() {
        bodies.find(&parent.tag)
    } else {
        None
    }
}

/// Nearest hit that resolves to a body. Labels, paths and instanced scenery
/// are skipped, as are hidden meshes and hits with no identity.
pub fn pick_body(ray: &Ray, scene: &Scene, bodies: &SolarBodies) -> Option<PickHit> {
    scene
        .iter()
        .filter(|e| e.kind == ObjectKind::Mesh && scene.is_visible(e.id))
        .filter_map(|e| {
            let distance = ray_distance(ray, e, scene)?;
            let body = identity(e, scene, bodies)?;
            Some(PickHit { body, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Handle a pointer press at CSS pixel `(x, y)`. Presses over page UI are
/// filtered out before they reach the game.
pub fn handle_pointer_down(
    x: f32,
    y: f32,
    pressed: u8,
    ctx: &mut EngineContext,
    state: &mut SimulationState,
    bodies: &SolarBodies,
    facts: &Encyclopedia,
) -> PointerOutcome {
    let ray = ctx.pick_ray(x, y);
    let hit = pick_body(&ray, &ctx.scene, bodies);

    match (hit, pressed) {
        (None, button::PRIMARY) => {
            state.set_focus(None, &mut ctx.scene);
            hud::hide_info(&mut ctx.ui);
            hud::set_target(&mut ctx.ui, hud::FREE_FLIGHT);
            PointerOutcome::Cleared
        }
        (Some(hit), button::PRIMARY) => {
            focus_body(hit.body, ctx, state, bodies, facts);
            PointerOutcome::Focused(hit.body)
        }
        (Some(hit), button::MIDDLE) => {
            let Some(body) = bodies.get(hit.body) else {
                return PointerOutcome::Ignored;
            };
            let Some(center) = ctx.scene.world_position(body.id) else {
                return PointerOutcome::Ignored;
            };
            let d = body.rendered_radius() * VANTAGE_FACTOR + VANTAGE_PAD;
            ctx.controls.stop();
            ctx.camera.position = center + glam::Vec3::new(d, d / 2.0, d);
            ctx.controls.target = center;
            focus_body(hit.body, ctx, state, bodies, facts);
            PointerOutcome::Jumped(hit.body)
        }
        _ => PointerOutcome::Ignored,
    }
}

fn focus_body(
    index: BodyIndex,
    ctx: &mut EngineContext,
    state: &mut SimulationState,
    bodies: &SolarBodies,
    facts: &Encyclopedia,
) {
    state.set_focus(Some(index), &mut ctx.scene);
    if let Some(body) = bodies.get(index) {
        log::debug!("focused {}", body.name);
        hud::show_info(&mut ctx.ui, &body.name, facts);
    }
}

/// Close the info panel and drop the overlay. The camera keeps following the
/// focused body.
pub fn close_info(ctx: &mut EngineContext, state: &mut SimulationState) {
    state.discard_overlay(&mut ctx.scene);
    hud::hide_info(&mut ctx.ui);
    hud::set_target(&mut ctx.ui, hud::FREE_FLIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::{Color, EntityId, MeshComponent, UiCommand};
    use crate::bodies::SystemCatalog;
    use crate::factory::build_system;

    fn built() -> (EngineContext, SolarBodies, SimulationState, Encyclopedia) {
        let mut ctx = EngineContext::new();
        let bodies = build_system(&SystemCatalog::default(), &mut ctx).unwrap();
        (ctx, bodies, SimulationState::default(), Encyclopedia::builtin().unwrap())
    }

    /// Pointer position over a world point, in CSS pixels.
    fn screen_of(ctx: &EngineContext, world: Vec3) -> (f32, f32) {
        let clip = ctx.camera.projection_matrix() * ctx.camera.view_matrix() * world.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        (
            (ndc.x + 1.0) * 0.5 * ctx.viewport.width,
            (1.0 - ndc.y) * 0.5 * ctx.viewport.height,
        )
    }

    fn aim_at(ctx: &mut EngineContext, target: Vec3, offset: Vec3) {
        ctx.camera.position = target + offset;
        ctx.camera.look_at = target;
        ctx.controls.target = target;
    }

    #[test]
    fn ray_through_center_hits_body() {
        let (mut ctx, bodies, _, _) = built();
        let earth = bodies.find("Earth").unwrap();
        let center = bodies.world_position(earth, &ctx.scene).unwrap();
        aim_at(&mut ctx, center, Vec3::new(0.0, 3.0, 6.0));

        let (x, y) = screen_of(&ctx, center);
        let hit = pick_body(&ctx.pick_ray(x, y), &ctx.scene, &bodies).unwrap();
        assert_eq!(hit.body, earth);
        // Nearest surface hit is the atmosphere shell, which resolves to Earth.
        assert!(hit.distance < 45.0_f32.sqrt() - 1.0 + 1e-3);
    }

    #[test]
    fn nearest_named_hit_wins_over_unnamed() {
        let mut scene = Scene::new();
        let mut bodies = SolarBodies::new();
        // Unnamed sphere in front, named sphere behind it.
        scene.spawn(
            Entity::new(EntityId(1))
                .with_pos(Vec3::new(0.0, 0.0, 5.0))
                .with_mesh(MeshComponent::sphere(1.0, Color::WHITE)),
        );
        scene.spawn(
            Entity::new(EntityId(2))
                .with_tag("Mars")
                .with_mesh(MeshComponent::sphere(1.0, Color::WHITE)),
        );
        let mars = bodies.push(crate::state::TrackedBody::new(
            "Mars",
            crate::bodies::BodyKind::Planet,
            EntityId(2),
            1.0,
            32.0,
        ));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z);
        let hit = pick_body(&ray, &scene, &bodies).unwrap();
        assert_eq!(hit.body, mars);
        assert!((hit.distance - 19.0).abs() < 1e-4);
    }

    #[test]
    fn scaled_body_reports_world_distance() {
        let mut scene = Scene::new();
        let mut bodies = SolarBodies::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_tag("Mars")
                .with_pos(Vec3::new(4.0, 0.0, 0.0))
                .with_scale(Vec3::splat(0.3))
                .with_mesh(MeshComponent::sphere(2.0, Color::WHITE)),
        );
        let mars = bodies.push(crate::state::TrackedBody::new(
            "Mars",
            crate::bodies::BodyKind::Planet,
            EntityId(1),
            2.0,
            4.0,
        ));
        // Rendered radius is 0.6, so the front face sits at z = 0.6.
        let ray = Ray::new(Vec3::new(4.0, 0.0, 20.0), -Vec3::Z);
        let hit = pick_body(&ray, &scene, &bodies).unwrap();
        assert_eq!(hit.body, mars);
        assert!((hit.distance - 19.4).abs() < 1e-4);
    }

    #[test]
    fn hidden_and_label_hits_are_ignored() {
        let (mut ctx, bodies, _, _) = built();
        let mars = bodies.find("Mars").unwrap();
        let center = bodies.world_position(mars, &ctx.scene).unwrap();
        aim_at(&mut ctx, center, Vec3::new(0.0, 0.0, 6.0));
        let (x, y) = screen_of(&ctx, center);

        let id = bodies.get(mars).unwrap().id;
        ctx.scene.get_mut(id).unwrap().visible = false;
        let hit = pick_body(&ctx.pick_ray(x, y), &ctx.scene, &bodies);
        assert!(hit.map_or(true, |h| h.body != mars));
    }

    #[test]
    fn primary_miss_clears_focus() {
        let (mut ctx, bodies, mut state, facts) = built();
        state.set_focus(bodies.find("Venus"), &mut ctx.scene);
        // Straight up from above the system hits nothing.
        aim_at(&mut ctx, Vec3::new(0.0, 500.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        ctx.camera.look_at = Vec3::new(0.0, 1000.0, 0.0);

        let outcome = handle_pointer_down(640.0, 360.0, button::PRIMARY, &mut ctx, &mut state, &bodies, &facts);
        assert_eq!(outcome, PointerOutcome::Cleared);
        assert!(state.focused.is_none());
        let commands = ctx.ui.drain();
        assert!(commands.iter().any(|c| matches!(c, UiCommand::HidePanel { .. })));
        assert!(commands
            .iter()
            .any(|c| matches!(c, UiCommand::SetText { text, .. } if text == hud::FREE_FLIGHT)));
    }

    #[test]
    fn secondary_miss_keeps_focus() {
        let (mut ctx, bodies, mut state, facts) = built();
        let venus = bodies.find("Venus");
        state.set_focus(venus, &mut ctx.scene);
        aim_at(&mut ctx, Vec3::new(0.0, 500.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        ctx.camera.look_at = Vec3::new(0.0, 1000.0, 0.0);

        let outcome = handle_pointer_down(640.0, 360.0, button::SECONDARY, &mut ctx, &mut state, &bodies, &facts);
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert_eq!(state.focused, venus);
    }

    #[test]
    fn primary_hit_focuses_and_shows_info() {
        let (mut ctx, bodies, mut state, facts) = built();
        let jupiter = bodies.find("Jupiter").unwrap();
        let center = bodies.world_position(jupiter, &ctx.scene).unwrap();
        aim_at(&mut ctx, center, Vec3::new(0.0, 10.0, 20.0));
        let (x, y) = screen_of(&ctx, center);

        let outcome = handle_pointer_down(x, y, button::PRIMARY, &mut ctx, &mut state, &bodies, &facts);
        assert_eq!(outcome, PointerOutcome::Focused(jupiter));
        assert_eq!(state.focused, Some(jupiter));
        let commands = ctx.ui.drain();
        assert!(commands.iter().any(|c| matches!(c, UiCommand::ShowPanel { data, .. } if data["name"] == "Jupiter")));
    }

    #[test]
    fn middle_hit_jumps_to_vantage() {
        let (mut ctx, bodies, mut state, facts) = built();
        let earth = bodies.find("Earth").unwrap();
        let center = bodies.world_position(earth, &ctx.scene).unwrap();
        aim_at(&mut ctx, center, Vec3::new(0.0, 10.0, 20.0));
        let (x, y) = screen_of(&ctx, center);

        let outcome = handle_pointer_down(x, y, button::MIDDLE, &mut ctx, &mut state, &bodies, &facts);
        assert_eq!(outcome, PointerOutcome::Jumped(earth));
        // r = 1: d = 7.
        assert!((ctx.camera.position - (center + Vec3::new(7.0, 3.5, 7.0))).length() < 1e-4);
        assert!((ctx.controls.target - center).length() < 1e-4);
        assert_eq!(state.focused, Some(earth));
    }

    #[test]
    fn close_info_drops_overlay_but_keeps_focus() {
        let (mut ctx, bodies, mut state, _) = built();
        let mars = bodies.find("Mars");
        state.set_focus(mars, &mut ctx.scene);
        state.toggle_comparison_overlay(&bodies, &mut ctx);
        close_info(&mut ctx, &mut state);
        assert_eq!(state.focused, mars);
        assert!(state.comparison_overlay.is_none());
        let commands = ctx.ui.drain();
        assert!(commands
            .iter()
            .any(|c| matches!(c, UiCommand::SetText { text, .. } if text == hud::FREE_FLIGHT)));
    }
}
