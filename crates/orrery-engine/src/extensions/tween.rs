// extensions/tween.rs
//
// Tween system: animated camera moves.
// Drives the camera eye and the orbit-controls target without knowing why.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(Tween::new(TweenTarget::CameraPosition, from, to, 4.0, Easing::CubicInOut));
//   tweens.tick(dt, &mut camera, &mut controls);

use std::collections::HashMap;
use glam::Vec3;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::controls::OrbitControls;
use super::easing::{Easing, ease_vec3};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// Animate `PerspectiveCamera::position`.
    CameraPosition,
    /// Animate `OrbitControls::target`.
    ControlsTarget,
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    pub from: Vec3,
    pub to: Vec3,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    pub easing: Easing,
    /// Optional event id reported through `drain_completed`.
    pub on_complete: Option<u32>,
}

impl Tween {
    pub fn new(target: TweenTarget, from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
            on_complete: None,
        }
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> Vec3 {
        ease_vec3(self.from, self.to, self.progress(), self.easing)
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, Tween>,
    next_id: u32,
    /// Completed tween events to be polled.
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween. An existing tween on the same target is replaced, so two
    /// moves never fight over one property.
    pub fn add(&mut self, tween: Tween) -> TweenId {
        self.tweens.retain(|_, t| t.target != tween.target);
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, tween);
        id
    }

    /// Whether something is currently animating the given property.
    pub fn is_animating(&self, target: TweenTarget) -> bool {
        self.tweens.values().any(|t| t.target == target)
    }

    /// Advance all tweens and write their values.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(
        &mut self,
        dt: f32,
        camera: &mut PerspectiveCamera,
        controls: &mut OrbitControls,
    ) -> usize {
        let mut completed = Vec::new();

        for (&id, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            let value = tween.value();
            match tween.target {
                TweenTarget::CameraPosition => camera.position = value,
                TweenTarget::ControlsTarget => controls.target = value,
            }
            if tween.is_complete() {
                if let Some(event_id) = tween.on_complete {
                    self.completed_events.push(event_id);
                }
                completed.push(id);
            }
        }

        let count = completed.len();
        for id in completed {
            self.tweens.remove(&id);
        }
        count
    }

    /// Drain completed tween events.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Kill every tween immediately. No further writes happen.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.completed_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> (PerspectiveCamera, OrbitControls) {
        (PerspectiveCamera::default(), OrbitControls::default())
    }

    #[test]
    fn tween_camera_position() {
        let (mut cam, mut controls) = rig();
        let mut tweens = TweenState::new();
        tweens.add(Tween::new(
            TweenTarget::CameraPosition,
            Vec3::ZERO,
            Vec3::new(100.0, 0.0, 0.0),
            1.0,
            Easing::Linear,
        ));

        tweens.tick(0.5, &mut cam, &mut controls);
        assert!((cam.position.x - 50.0).abs() < 0.01);

        tweens.tick(0.5, &mut cam, &mut controls);
        assert!((cam.position.x - 100.0).abs() < 0.01);
        assert!(tweens.is_empty());
    }

    #[test]
    fn completion_event_is_reported() {
        let (mut cam, mut controls) = rig();
        let mut tweens = TweenState::new();
        tweens.add(
            Tween::new(TweenTarget::ControlsTarget, Vec3::ONE, Vec3::ZERO, 0.25, Easing::CubicInOut)
                .with_on_complete(9),
        );
        tweens.tick(1.0, &mut cam, &mut controls);
        assert_eq!(controls.target, Vec3::ZERO);
        assert_eq!(tweens.drain_completed().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn same_target_replaces() {
        let mut tweens = TweenState::new();
        tweens.add(Tween::new(TweenTarget::CameraPosition, Vec3::ZERO, Vec3::X, 1.0, Easing::Linear));
        tweens.add(Tween::new(TweenTarget::CameraPosition, Vec3::ZERO, Vec3::Y, 1.0, Easing::Linear));
        tweens.add(Tween::new(TweenTarget::ControlsTarget, Vec3::ZERO, Vec3::Z, 1.0, Easing::Linear));
        assert_eq!(tweens.len(), 2);
    }

    #[test]
    fn clear_stops_writes() {
        let (mut cam, mut controls) = rig();
        let mut tweens = TweenState::new();
        tweens.add(Tween::new(TweenTarget::CameraPosition, Vec3::ZERO, Vec3::X, 1.0, Easing::Linear));
        tweens.tick(0.1, &mut cam, &mut controls);
        let frozen = cam.position;
        tweens.clear();
        tweens.tick(0.1, &mut cam, &mut controls);
        assert_eq!(cam.position, frozen);
        assert!(!tweens.is_animating(TweenTarget::CameraPosition));
    }
}
