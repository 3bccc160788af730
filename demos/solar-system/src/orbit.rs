/// Orbital motion: circular heliocentric orbits, tilted dwarf-planet planes,
/// moons riding on their parents, and the per-frame spin rates.

use glam::Vec3;
use orrery_engine::Scene;

use crate::bodies::{
    BodyKind, OrbitTilt, ANGLE_RATE, BELT_SPIN, CLOUD_SPIN, MOON_ANGULAR_RATE, MOON_SPIN,
    PLANET_SPIN, STAR_SPIN, TIME_STEP,
};
use crate::state::{SimulationState, SolarBodies};

/// Orbital angle in radians at simulated time `t`.
pub fn orbital_angle(t: f32, speed: f32) -> f32 {
    t * speed * ANGLE_RATE
}

/// Point on a circle of radius `distance` in the XZ plane.
pub fn planar_position(angle: f32, distance: f32) -> Vec3 {
    Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Rotate a point about X by `tilt.x`, then about Z by `tilt.z`.
/// A flat orbit (`y = 0`) reduces to:
///   y1 = -z·sin(rx), z1 = z·cos(rx),
///   x2 = x·cos(rz) - y1·sin(rz), y2 = x·sin(rz) + y1·cos(rz).
pub fn tilt_point(p: Vec3, tilt: OrbitTilt) -> Vec3 {
    let (sx, cx) = tilt.x.sin_cos();
    let (sz, cz) = tilt.z.sin_cos();
    let y1 = p.y * cx - p.z * sx;
    let z1 = p.y * sx + p.z * cx;
    let x2 = p.x * cz - y1 * sz;
    let y2 = p.x * sz + y1 * cz;
    Vec3::new(x2, y2, z1)
}

/// Heliocentric position of a body at simulated time `t`.
pub fn body_position(t: f32, distance: f32, speed: f32, tilt: Option<OrbitTilt>) -> Vec3 {
    let flat = planar_position(orbital_angle(t, speed), distance);
    match tilt {
        Some(tilt) => tilt_point(flat, tilt),
        None => flat,
    }
}

/// Moon position: a flat circle around the parent.
pub fn moon_position(parent: Vec3, angle: f32, distance: f32) -> Vec3 {
    Vec3::new(
        parent.x + angle.cos() * distance,
        parent.y,
        parent.z + angle.sin() * distance,
    )
}

/// Advance simulated time by one frame. Returns false while paused.
pub fn advance_time(state: &mut SimulationState) -> bool {
    if state.is_paused {
        return false;
    }
    state.absolute_time += TIME_STEP * state.time_scale;
    true
}

/// Recompute every body's position from the current state and, when not
/// paused, advance spins and moon angles by one frame.
///
/// Planets and dwarf planets are placed first so moons read their parent's
/// position from this frame. A moon whose parent is gone keeps its last
/// position.
pub fn update_bodies(state: &SimulationState, bodies: &mut SolarBodies, scene: &mut Scene) {
    let t = state.absolute_time;
    let ts = if state.is_paused { 0.0 } else { state.time_scale };

    for (_, body) in bodies.iter_mut() {
        let Some(entity) = scene.get_mut(body.id) else {
            continue;
        };
        match body.kind {
            BodyKind::Star => entity.rotation.y += STAR_SPIN * ts,
            BodyKind::Planet | BodyKind::DwarfPlanet => {
                entity.pos = body_position(t, body.distance, body.speed, body.tilt);
                entity.rotation.y += PLANET_SPIN * ts;
            }
            BodyKind::Moon => {}
        }
        if let Some(clouds) = body.clouds.and_then(|id| scene.get_mut(id)) {
            clouds.rotation.y += CLOUD_SPIN * ts;
        }
    }

    let moons: Vec<_> = bodies
        .iter()
        .filter(|(_, b)| b.kind == BodyKind::Moon)
        .filter_map(|(i, b)| Some((i, bodies.get(b.parent?)?.id)))
        .collect();
    for (index, parent_id) in moons {
        let Some(parent_pos) = scene.world_position(parent_id) else {
            continue;
        };
        let Some(moon) = bodies.get_mut(index) else {
            continue;
        };
        moon.moon_angle += MOON_ANGULAR_RATE * ts;
        if let Some(entity) = scene.get_mut(moon.id) {
            entity.pos = moon_position(parent_pos, moon.moon_angle, moon.distance);
            entity.rotation.y += MOON_SPIN * ts;
        }
    }

    if let Some(belt) = bodies.belt.and_then(|id| scene.get_mut(id)) {
        belt.rotation.y += BELT_SPIN * ts;
    }
}
