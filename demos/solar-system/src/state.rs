/// Live simulation state and the arena of tracked bodies.

use orrery_engine::{EntityId, Scene};

use crate::bodies::{BodyKind, OrbitTilt};

/// Stable index of a body in the live list. Slots are never reused, so an
/// index stays dangling (and resolves to `None`) after its body is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyIndex(pub usize);

/// A body that participates in motion, picking and the tour.
#[derive(Debug, Clone)]
pub struct TrackedBody {
    pub name: String,
    pub kind: BodyKind,
    /// Scene entity carrying the body mesh; its tag is `name`.
    pub id: EntityId,
    pub artistic_radius: f32,
    pub artistic_distance: f32,
    pub speed: f32,
    pub tilt: Option<OrbitTilt>,
    /// Moons only: the body they circle.
    pub parent: Option<BodyIndex>,
    /// Moons only: accumulated orbital angle.
    pub moon_angle: f32,
    /// Current orbital distance (artistic or true-scale).
    pub distance: f32,
    /// Current uniform mesh scale relative to the artistic radius.
    pub scale: f32,
    pub label: Option<EntityId>,
    pub orbit_path: Option<EntityId>,
    pub clouds: Option<EntityId>,
}

impl TrackedBody {
    pub fn new(name: &str, kind: BodyKind, id: EntityId, radius: f32, distance: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            id,
            artistic_radius: radius,
            artistic_distance: distance,
            speed: 0.0,
            tilt: None,
            parent: None,
            moon_angle: 0.0,
            distance,
            scale: 1.0,
            label: None,
            orbit_path: None,
            clouds: None,
        }
    }

    /// Radius as currently drawn.
    pub fn rendered_radius(&self) -> f32 {
        self.artistic_radius * self.scale
    }
}

/// Ordered list of tracked bodies plus the scenery that toggles with them.
#[derive(Debug, Default)]
pub struct SolarBodies {
    slots: Vec<Option<TrackedBody>>,
    /// Instanced asteroid field, if one was built.
    pub belt: Option<EntityId>,
}

impl SolarBodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, body: TrackedBody) -> BodyIndex {
        self.slots.push(Some(body));
        BodyIndex(self.slots.len() - 1)
    }

    pub fn get(&self, index: BodyIndex) -> Option<&TrackedBody> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: BodyIndex) -> Option<&mut TrackedBody> {
        self.slots.get_mut(index.0).and_then(Option::as_mut)
    }

    /// Exact, case-sensitive name lookup.
    pub fn find(&self, name: &str) -> Option<BodyIndex> {
        self.iter().find(|(_, b)| b.name == name).map(|(i, _)| i)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyIndex, &TrackedBody)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|b| (BodyIndex(i), b)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyIndex, &mut TrackedBody)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|b| (BodyIndex(i), b)))
    }

    /// Remove a body and despawn its mesh (with children) and orbit path.
    /// Moons of the removed body stay in the list and stop moving.
    pub fn remove(&mut self, name: &str, scene: &mut Scene) -> Option<TrackedBody> {
        let index = self.find(name)?;
        let body = self.slots.get_mut(index.0)?.take()?;
        scene.despawn(body.id);
        if let Some(path) = body.orbit_path {
            scene.despawn(path);
        }
        log::info!("removed body {}", body.name);
        Some(body)
    }

    /// Current world position of a body's mesh.
    pub fn world_position(&self, index: BodyIndex, scene: &Scene) -> Option<glam::Vec3> {
        let body = self.get(index)?;
        scene.world_position(body.id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

/// Process-wide simulation record.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub is_paused: bool,
    /// Multiplier for every time-dependent rate. Non-negative.
    pub time_scale: f32,
    /// Simulated time; grows by `TIME_STEP × time_scale` per unpaused frame.
    pub absolute_time: f32,
    pub focused: Option<BodyIndex>,
    /// The reference sphere entity, present only while shown.
    pub comparison_overlay: Option<EntityId>,
    pub is_true_scale: bool,
    /// Real seconds since start, copied from the engine clock. Independent of
    /// pause and time scale.
    pub wall_elapsed: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            is_paused: false,
            time_scale: 1.0,
            absolute_time: 0.0,
            focused: None,
            comparison_overlay: None,
            is_true_scale: false,
            wall_elapsed: 0.0,
        }
    }
}

impl SimulationState {
    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        self.is_paused
    }

    /// Non-finite or negative values are rejected and leave the scale unchanged.
    pub fn set_time_scale(&mut self, scale: f32) -> bool {
        if !scale.is_finite() || scale < 0.0 {
            log::warn!("ignoring time scale {scale}");
            return false;
        }
        self.time_scale = scale;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::Entity;

    fn body(scene: &mut Scene, name: &str, id: u32) -> TrackedBody {
        let id = EntityId(id);
        scene.spawn(Entity::new(id).with_tag(name));
        TrackedBody::new(name, BodyKind::Planet, id, 1.0, 10.0)
    }

    #[test]
    fn find_is_exact() {
        let mut scene = Scene::new();
        let mut bodies = SolarBodies::new();
        let earth = bodies.push(body(&mut scene, "Earth", 1));
        assert_eq!(bodies.find("Earth"), Some(earth));
        assert_eq!(bodies.find("EARTH"), None);
    }

    #[test]
    fn remove_keeps_other_indices_stable() {
        let mut scene = Scene::new();
        let mut bodies = SolarBodies::new();
        let mars = bodies.push(body(&mut scene, "Mars", 1));
        let venus = bodies.push(body(&mut scene, "Venus", 2));

        let removed = bodies.remove("Mars", &mut scene).unwrap();
        assert_eq!(removed.name, "Mars");
        assert!(bodies.get(mars).is_none());
        assert_eq!(bodies.get(venus).unwrap().name, "Venus");
        assert_eq!(bodies.len(), 1);
        assert!(scene.get(EntityId(1)).is_none());
        assert!(bodies.remove("Mars", &mut scene).is_none());
    }

    #[test]
    fn time_scale_rejects_bad_values() {
        let mut state = SimulationState::default();
        assert!(state.set_time_scale(2.5));
        assert!(!state.set_time_scale(-1.0));
        assert!(!state.set_time_scale(f32::NAN));
        assert!((state.time_scale - 2.5).abs() < 1e-6);
        assert!(state.set_time_scale(0.0));
    }

    #[test]
    fn pause_toggles() {
        let mut state = SimulationState::default();
        assert!(state.toggle_pause());
        assert!(!state.toggle_pause());
    }
}
