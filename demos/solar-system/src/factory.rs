/// Body factory: turns a [`SystemCatalog`] into scene entities and the
/// tracked-body list.
///
/// The catalog is validated as a whole before anything is spawned, so a bad
/// catalog leaves the scene untouched.

use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use orrery_engine::{
    Color, EngineContext, Entity, EntityId, InstanceTransform, InstancesComponent,
    LabelComponent, MeshComponent, ObjectKind, PathComponent, Rng,
};

use crate::bodies::{BeltConfig, BodyConfig, BodyKind, MoonConfig, SystemCatalog};
use crate::orbit;
use crate::state::{BodyIndex, SolarBodies, TrackedBody};

// ── Decorations ──────────────────────────────────────────────────────

const ORBIT_SEGMENTS: usize = 360;
const PLANET_PATH_COLOR: u32 = 0x44aaff;
const PLANET_PATH_OPACITY: f32 = 0.12;
const DWARF_PATH_COLOR: u32 = 0x888888;
const DWARF_PATH_OPACITY: f32 = 0.1;

const LABEL_SCALE: Vec3 = Vec3::new(4.0, 1.0, 1.0);
const DWARF_LABEL_SCALE: Vec3 = Vec3::new(3.0, 0.75, 1.0);
/// Label height above the surface.
const STAR_LABEL_LIFT: f32 = 1.0;
const PLANET_LABEL_LIFT: f32 = 0.8;
const DWARF_LABEL_LIFT: f32 = 0.5;

const STAR_EMISSIVE: f32 = 1.0;
const PLANET_EMISSIVE: f32 = 0.07;
const RING_OPACITY: f32 = 0.9;
const CLOUD_LIFT: f32 = 0.02;
const CLOUD_OPACITY: f32 = 0.8;
const ATMOSPHERE_LIFT: f32 = 0.15;
const ATMOSPHERE_COLOR: u32 = 0x4d9bff;
const ATMOSPHERE_OPACITY: f32 = 0.6;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FactoryError {
    #[error("body with an empty name")]
    EmptyName,
    #[error("duplicate body name {0:?}")]
    DuplicateName(String),
    #[error("{name}: radius {radius} must be positive and finite")]
    InvalidRadius { name: String, radius: f32 },
    #[error("{name}: orbit distance {distance} / speed {speed} must be finite, distance positive")]
    InvalidOrbit { name: String, distance: f32, speed: f32 },
    #[error("{name}: ring radii {inner}..{outer} are not an increasing positive range")]
    InvalidRing { name: String, inner: f32, outer: f32 },
    #[error("{0}: moons must be listed under their parent body")]
    OrphanMoon(String),
    #[error("asteroid belt: {0}")]
    InvalidBelt(String),
}

pub type FactoryResult<T> = Result<T, FactoryError>;

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn check_radius(name: &str, radius: f32) -> FactoryResult<()> {
    if positive(radius) {
        Ok(())
    } else {
        Err(FactoryError::InvalidRadius { name: name.to_string(), radius })
    }
}

fn check_name<'a>(name: &'a str, seen: &mut HashSet<&'a str>) -> FactoryResult<()> {
    if name.is_empty() {
        return Err(FactoryError::EmptyName);
    }
    if !seen.insert(name) {
        return Err(FactoryError::DuplicateName(name.to_string()));
    }
    Ok(())
}

/// Check a catalog without touching any scene.
pub fn validate(catalog: &SystemCatalog) -> FactoryResult<()> {
    let mut seen = HashSet::new();
    for body in &catalog.bodies {
        check_name(&body.name, &mut seen)?;
        check_radius(&body.name, body.radius)?;
        if body.kind == BodyKind::Moon {
            return Err(FactoryError::OrphanMoon(body.name.clone()));
        }
        if body.kind.orbits_star() && (!positive(body.distance) || !body.speed.is_finite()) {
            return Err(FactoryError::InvalidOrbit {
                name: body.name.clone(),
                distance: body.distance,
                speed: body.speed,
            });
        }
        if let Some(ring) = &body.ring {
            if !positive(ring.inner) || !ring.outer.is_finite() || ring.outer <= ring.inner {
                return Err(FactoryError::InvalidRing {
                    name: body.name.clone(),
                    inner: ring.inner,
                    outer: ring.outer,
                });
            }
        }
        for moon in &body.moons {
            check_name(&moon.name, &mut seen)?;
            check_radius(&moon.name, moon.radius)?;
            if !positive(moon.distance) {
                return Err(FactoryError::InvalidOrbit {
                    name: moon.name.clone(),
                    distance: moon.distance,
                    speed: 0.0,
                });
            }
        }
    }
    if let Some(belt) = &catalog.belt {
        validate_belt(belt)?;
    }
    Ok(())
}

fn validate_belt(belt: &BeltConfig) -> FactoryResult<()> {
    if !positive(belt.inner) || !belt.outer.is_finite() || belt.outer < belt.inner {
        return Err(FactoryError::InvalidBelt(format!(
            "radii {}..{} are not a positive range",
            belt.inner, belt.outer
        )));
    }
    if !positive(belt.min_scale) || !belt.max_scale.is_finite() || belt.max_scale < belt.min_scale {
        return Err(FactoryError::InvalidBelt(format!(
            "scales {}..{} are not a positive range",
            belt.min_scale, belt.max_scale
        )));
    }
    if !positive(belt.rock_radius) || !belt.thickness.is_finite() || belt.thickness < 0.0 {
        return Err(FactoryError::InvalidBelt("rock size or thickness out of range".to_string()));
    }
    Ok(())
}

/// Validate the catalog, then spawn every body, decoration and the belt.
pub fn build_system(catalog: &SystemCatalog, ctx: &mut EngineContext) -> FactoryResult<SolarBodies> {
    validate(catalog)?;

    let mut bodies = SolarBodies::new();
    for config in &catalog.bodies {
        let index = match config.kind {
            BodyKind::Star => spawn_star(catalog, config, ctx, &mut bodies),
            _ => spawn_orbiter(catalog, config, ctx, &mut bodies),
        };
        for moon in &config.moons {
            spawn_moon(catalog, moon, index, ctx, &mut bodies);
        }
    }
    if let Some(belt) = &catalog.belt {
        bodies.belt = Some(spawn_belt(belt, ctx));
    }

    log::info!(
        "built {} bodies, {} entities",
        bodies.len(),
        ctx.scene.len()
    );
    Ok(bodies)
}

fn body_mesh(catalog: &SystemCatalog, radius: f32, color: u32, texture: Option<&str>, ctx: &mut EngineContext) -> MeshComponent {
    let mesh = MeshComponent::sphere(radius, Color::from_hex(color));
    match texture {
        Some(file) => mesh.with_texture(ctx.textures.load(&catalog.texture_path(file))),
        None => mesh,
    }
}

fn spawn_label(ctx: &mut EngineContext, parent: EntityId, text: &str, lift: f32, scale: Vec3) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_kind(ObjectKind::Sprite)
            .with_parent(parent)
            .with_pos(Vec3::new(0.0, lift, 0.0))
            .with_scale(scale)
            .with_label(LabelComponent::new(text)),
    );
    id
}

fn spawn_star(catalog: &SystemCatalog, config: &BodyConfig, ctx: &mut EngineContext, bodies: &mut SolarBodies) -> BodyIndex {
    let mesh = body_mesh(catalog, config.radius, config.color, config.texture.as_deref(), ctx)
        .with_emissive(STAR_EMISSIVE);
    let id = ctx.next_id();
    ctx.scene.spawn(Entity::new(id).with_tag(config.name.as_str()).with_mesh(mesh));

    let mut body = TrackedBody::new(&config.name, BodyKind::Star, id, config.radius, 0.0);
    body.label = Some(spawn_label(ctx, id, &config.name, config.radius + STAR_LABEL_LIFT, LABEL_SCALE));
    bodies.push(body)
}

fn spawn_orbiter(catalog: &SystemCatalog, config: &BodyConfig, ctx: &mut EngineContext, bodies: &mut SolarBodies) -> BodyIndex {
    let dwarf = config.kind == BodyKind::DwarfPlanet;
    let mesh = body_mesh(catalog, config.radius, config.color, config.texture.as_deref(), ctx)
        .with_emissive(if dwarf { 0.0 } else { PLANET_EMISSIVE });
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(config.name.as_str())
            .with_pos(orbit::body_position(0.0, config.distance, config.speed, config.tilt))
            .with_mesh(mesh),
    );

    let mut body = TrackedBody::new(&config.name, config.kind, id, config.radius, config.distance);
    body.speed = config.speed;
    body.tilt = config.tilt;
    body.label = Some(if dwarf {
        spawn_label(ctx, id, &config.name, config.radius + DWARF_LABEL_LIFT, DWARF_LABEL_SCALE)
    } else {
        spawn_label(ctx, id, &config.name, config.radius + PLANET_LABEL_LIFT, LABEL_SCALE)
    });

    // Orbit path: a world-level loop, scaled as a whole in true-scale mode.
    let tilt = config.tilt;
    let points = PathComponent::circle(config.distance, ORBIT_SEGMENTS, |p| match tilt {
        Some(tilt) => orbit::tilt_point(p, tilt),
        None => p,
    });
    let (color, opacity) = if dwarf {
        (DWARF_PATH_COLOR, DWARF_PATH_OPACITY)
    } else {
        (PLANET_PATH_COLOR, PLANET_PATH_OPACITY)
    };
    let path_id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(path_id)
            .with_kind(ObjectKind::Line)
            .with_path(PathComponent::new(points, Color::from_hex(color), opacity)),
    );
    body.orbit_path = Some(path_id);

    if let Some(ring) = &config.ring {
        let mut mesh = MeshComponent::ring(ring.inner, ring.outer, Color::WHITE).with_opacity(RING_OPACITY);
        if let Some(file) = &ring.texture {
            mesh = mesh.with_texture(ctx.textures.load(&catalog.texture_path(file)));
        }
        let ring_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(ring_id)
                .with_parent(id)
                .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
                .with_mesh(mesh),
        );
    }

    if let Some(file) = &config.clouds {
        let mesh = MeshComponent::sphere(config.radius + CLOUD_LIFT, Color::WHITE)
            .with_texture(ctx.textures.load(&catalog.texture_path(file)))
            .with_opacity(CLOUD_OPACITY);
        let clouds_id = ctx.next_id();
        ctx.scene.spawn(Entity::new(clouds_id).with_parent(id).with_mesh(mesh));
        body.clouds = Some(clouds_id);
    }

    if config.atmosphere {
        let mesh = MeshComponent::sphere(config.radius + ATMOSPHERE_LIFT, Color::from_hex(ATMOSPHERE_COLOR))
            .with_opacity(ATMOSPHERE_OPACITY)
            .with_back_side();
        let atmosphere_id = ctx.next_id();
        ctx.scene.spawn(Entity::new(atmosphere_id).with_parent(id).with_mesh(mesh));
    }

    bodies.push(body)
}

fn spawn_moon(catalog: &SystemCatalog, config: &MoonConfig, parent: BodyIndex, ctx: &mut EngineContext, bodies: &mut SolarBodies) -> BodyIndex {
    let parent_pos = bodies
        .world_position(parent, &ctx.scene)
        .unwrap_or(Vec3::ZERO);
    let mesh = body_mesh(catalog, config.radius, config.color, config.texture.as_deref(), ctx);
    let id = ctx.next_id();
    // Moons are top-level so the parent's spin does not drag them around.
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(config.name.as_str())
            .with_pos(orbit::moon_position(parent_pos, 0.0, config.distance))
            .with_mesh(mesh),
    );

    let mut body = TrackedBody::new(&config.name, BodyKind::Moon, id, config.radius, config.distance);
    body.parent = Some(parent);
    bodies.push(body)
}

/// Scatter rocks uniformly in angle across an annulus, with a thin vertical
/// jitter and random orientation.
pub fn belt_transforms(belt: &BeltConfig) -> Vec<InstanceTransform> {
    let mut rng = Rng::new(belt.seed);
    (0..belt.count)
        .map(|_| {
            let angle = rng.range(0.0, TAU);
            let r = rng.range(belt.inner, belt.outer);
            let y = rng.range(-0.5, 0.5) * belt.thickness;
            InstanceTransform {
                pos: Vec3::new(angle.cos() * r, y, angle.sin() * r),
                rotation: Vec3::new(rng.range(0.0, PI), rng.range(0.0, PI), 0.0),
                scale: rng.range(belt.min_scale, belt.max_scale),
            }
        })
        .collect()
}

fn spawn_belt(belt: &BeltConfig, ctx: &mut EngineContext) -> EntityId {
    let rock = MeshComponent::sphere(belt.rock_radius, Color::from_hex(belt.color));
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_kind(ObjectKind::Instanced)
            .with_instances(InstancesComponent::new(rock, belt_transforms(belt))),
    );
    id
}
