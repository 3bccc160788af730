/// Cinematic tour: a scripted camera that visits each body in turn.
///
/// Every leg runs four phases back to back (approach, orbit, elevate,
/// depart). The director is ticked with the frame delta; time left over when
/// a phase ends flows into the next one, so a tour takes the same wall time
/// at any frame rate. Body positions are re-read every tick, so the camera
/// tracks bodies that keep moving while it flies.

use std::f32::consts::PI;

use glam::Vec3;
use orrery_engine::{
    ease, ease_vec3, lerp_vec3, Easing, EngineContext, OrbitControls, PerspectiveCamera, Scene,
    Tween, TweenState, TweenTarget, UiQueue,
};

use crate::bodies::BodyKind;
use crate::facts::Encyclopedia;
use crate::hud;
use crate::state::{BodyIndex, SolarBodies};

/// Default visiting order.
pub const ITINERARY: [&str; 10] = [
    "SUN", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto",
];

/// Completion id carried by the return-to-overview camera tween.
pub const RETURN_COMPLETE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Approach,
    Orbit,
    Elevate,
    Depart,
}

impl PhaseKind {
    fn next(self) -> Option<Self> {
        match self {
            PhaseKind::Approach => Some(PhaseKind::Orbit),
            PhaseKind::Orbit => Some(PhaseKind::Elevate),
            PhaseKind::Elevate => Some(PhaseKind::Depart),
            PhaseKind::Depart => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TourEvent {
    Started,
    PhaseStarted { body: String, phase: PhaseKind },
    /// The body was not in the scene when its leg came up.
    Skipped { body: String },
    Finished,
    Stopped,
}

/// Viewing distance from the body and height above it for the orbit sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub distance: f32,
    pub height: f32,
}

/// Size-tiered viewing geometry, from the body's artistic radius.
pub fn view_params(kind: BodyKind, radius: f32) -> ViewParams {
    let (distance, height) = if kind == BodyKind::Star {
        (radius * 3.5, radius * 0.6)
    } else if radius < 1.0 {
        ((radius * 6.0).max(5.0), 2.5)
    } else if radius > 3.0 {
        (radius * 2.8, radius * 0.6)
    } else {
        (radius * 3.2, radius * 0.8)
    };
    ViewParams { distance, height }
}

#[derive(Debug, Clone)]
pub struct TourConfig {
    pub itinerary: Vec<String>,
    /// Pause between the start announcement and the first approach.
    pub startup_delay: f32,
    /// Approach time is travel distance / this, clamped to the range below.
    pub approach_speed: f32,
    pub approach_min: f32,
    pub approach_max: f32,
    /// Per-tick fraction the look target closes toward the body while flying in.
    pub approach_chase: f32,
    pub approach_easing: Easing,
    pub orbit_duration: f32,
    /// Angle swept around the body during the orbit phase.
    pub orbit_sweep: f32,
    pub orbit_easing: Easing,
    pub elevate_duration: f32,
    pub elevate_rise: f32,
    pub elevate_easing: Easing,
    pub depart_duration: f32,
    pub depart_rise: f32,
    pub depart_chase: f32,
    pub depart_easing: Easing,
    /// Where the camera settles once the itinerary is done.
    pub overview_position: Vec3,
    pub overview_target: Vec3,
    pub return_duration: f32,
    pub return_easing: Easing,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            itinerary: ITINERARY.iter().map(|s| s.to_string()).collect(),
            startup_delay: 0.8,
            approach_speed: 50.0,
            approach_min: 2.5,
            approach_max: 5.0,
            approach_chase: 0.08,
            approach_easing: Easing::CubicInOut,
            orbit_duration: 6.0,
            orbit_sweep: PI,
            orbit_easing: Easing::CubicInOut,
            elevate_duration: 2.0,
            elevate_rise: 15.0,
            elevate_easing: Easing::SineInOut,
            depart_duration: 1.5,
            depart_rise: 20.0,
            depart_chase: 0.1,
            depart_easing: Easing::QuadOut,
            overview_position: Vec3::new(0.0, 150.0, 250.0),
            overview_target: Vec3::ZERO,
            return_duration: 4.0,
            return_easing: Easing::CubicInOut,
        }
    }
}

/// Everything a tour tick reads or drives.
pub struct TourRig<'a> {
    pub scene: &'a Scene,
    pub bodies: &'a SolarBodies,
    pub facts: &'a Encyclopedia,
    pub camera: &'a mut PerspectiveCamera,
    pub controls: &'a mut OrbitControls,
    pub tweens: &'a mut TweenState,
    pub ui: &'a mut UiQueue,
}

impl<'a> TourRig<'a> {
    pub fn new(ctx: &'a mut EngineContext, bodies: &'a SolarBodies, facts: &'a Encyclopedia) -> Self {
        Self {
            scene: &ctx.scene,
            bodies,
            facts,
            camera: &mut ctx.camera,
            controls: &mut ctx.controls,
            tweens: &mut ctx.tweens,
            ui: &mut ctx.ui,
        }
    }

    fn center_of(&self, body: BodyIndex) -> Option<Vec3> {
        self.bodies.world_position(body, self.scene)
    }
}

/// One body's visit.
#[derive(Debug, Clone)]
struct Leg {
    body: BodyIndex,
    name: String,
    view: ViewParams,
    /// Bearing of the camera from the body when the leg began (XZ plane).
    entry_angle: f32,
    /// Last known body center; held if the body vanishes mid-leg.
    anchor: Vec3,
    phase: PhaseKind,
    elapsed: f32,
    duration: f32,
    /// Camera position when the current phase began.
    from: Vec3,
}

impl Leg {
    /// Orbit-sweep camera position at `angle` around `center`.
    fn ring_point(&self, center: Vec3, angle: f32) -> Vec3 {
        center + Vec3::new(angle.cos() * self.view.distance, self.view.height, angle.sin() * self.view.distance)
    }

    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone)]
enum Stage {
    Idle,
    Warmup { remaining: f32 },
    Visiting(Leg),
}

pub struct TourDirector {
    config: TourConfig,
    active: bool,
    /// Position in the itinerary.
    index: usize,
    stage: Stage,
}

impl TourDirector {
    pub fn new(config: TourConfig) -> Self {
        Self {
            config,
            active: false,
            index: 0,
            stage: Stage::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Body and phase currently playing, if a leg is under way.
    pub fn current(&self) -> Option<(&str, PhaseKind)> {
        match &self.stage {
            Stage::Visiting(leg) => Some((leg.name.as_str(), leg.phase)),
            _ => None,
        }
    }

    /// Start when idle, stop when running.
    pub fn toggle(&mut self, rig: &mut TourRig) -> Vec<TourEvent> {
        if self.active {
            self.stop(rig.ui).into_iter().collect()
        } else {
            self.start(rig)
        }
    }

    /// Begin from the first itinerary entry. No-op while already running.
    pub fn start(&mut self, rig: &mut TourRig) -> Vec<TourEvent> {
        if self.active {
            return Vec::new();
        }
        self.active = true;
        self.index = 0;
        self.stage = Stage::Warmup { remaining: self.config.startup_delay };
        // A previous tour's return flight must not fight the new one.
        rig.tweens.clear();
        rig.controls.stop();
        hud::set_target(rig.ui, hud::TOUR_BEGINS);
        hud::hide_info(rig.ui);
        log::info!("tour started ({} stops)", self.config.itinerary.len());
        vec![TourEvent::Started]
    }

    /// Halt immediately. The camera stays wherever it is.
    pub fn stop(&mut self, ui: &mut UiQueue) -> Option<TourEvent> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.stage = Stage::Idle;
        hud::hide_info(ui);
        log::info!("tour stopped at stop {}", self.index);
        Some(TourEvent::Stopped)
    }

    /// Advance by `dt` seconds, crossing as many phase boundaries as fit.
    pub fn tick(&mut self, dt: f32, rig: &mut TourRig) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if !self.active || !dt.is_finite() || dt <= 0.0 {
            return events;
        }

        let mut budget = dt;
        while self.active {
            match std::mem::replace(&mut self.stage, Stage::Idle) {
                Stage::Idle => break,
                Stage::Warmup { remaining } => {
                    if budget < remaining {
                        self.stage = Stage::Warmup { remaining: remaining - budget };
                        break;
                    }
                    budget -= remaining;
                    self.begin_leg(rig, &mut events);
                }
                Stage::Visiting(mut leg) => {
                    let left = leg.duration - leg.elapsed;
                    if budget >= left {
                        leg.elapsed = leg.duration;
                        budget -= left;
                    } else {
                        leg.elapsed += budget;
                        budget = 0.0;
                    }
                    self.apply(&mut leg, rig);

                    if leg.elapsed < leg.duration {
                        self.stage = Stage::Visiting(leg);
                        break;
                    }
                    match leg.phase.next() {
                        Some(next) => {
                            self.enter_phase(&mut leg, next, rig, &mut events);
                            self.stage = Stage::Visiting(leg);
                        }
                        None => {
                            self.index += 1;
                            self.begin_leg(rig, &mut events);
                        }
                    }
                    if budget <= 0.0 {
                        break;
                    }
                }
            }
        }
        events
    }

    /// Set up the leg for the current itinerary entry, skipping entries that
    /// are not in the scene. Finishes the tour past the last entry.
    fn begin_leg(&mut self, rig: &mut TourRig, events: &mut Vec<TourEvent>) {
        while let Some(name) = self.config.itinerary.get(self.index).cloned() {
            let found = rig.bodies.find(&name).and_then(|index| {
                let body = rig.bodies.get(index)?;
                Some((index, body.kind, body.artistic_radius, rig.center_of(index)?))
            });
            let Some((body, kind, radius, center)) = found else {
                log::warn!("tour: {name} is not in the scene, skipping");
                events.push(TourEvent::Skipped { body: name });
                self.index += 1;
                continue;
            };

            let offset = rig.camera.position - center;
            let mut leg = Leg {
                body,
                name,
                view: view_params(kind, radius),
                entry_angle: offset.z.atan2(offset.x),
                anchor: center,
                phase: PhaseKind::Approach,
                elapsed: 0.0,
                duration: 0.0,
                from: rig.camera.position,
            };
            self.enter_phase(&mut leg, PhaseKind::Approach, rig, events);
            self.stage = Stage::Visiting(leg);
            return;
        }
        self.finish(rig, events);
    }

    fn enter_phase(&self, leg: &mut Leg, phase: PhaseKind, rig: &mut TourRig, events: &mut Vec<TourEvent>) {
        let c = &self.config;
        leg.phase = phase;
        leg.elapsed = 0.0;
        leg.from = rig.camera.position;
        leg.duration = match phase {
            PhaseKind::Approach => {
                let travel = leg.from.distance(leg.ring_point(leg.anchor, leg.entry_angle));
                (travel / c.approach_speed).clamp(c.approach_min, c.approach_max)
            }
            PhaseKind::Orbit => c.orbit_duration,
            PhaseKind::Elevate => c.elevate_duration,
            PhaseKind::Depart => c.depart_duration,
        };

        match phase {
            PhaseKind::Approach => hud::set_target(rig.ui, hud::approach_label(&leg.name)),
            PhaseKind::Orbit => {
                hud::show_info(rig.ui, &leg.name, rig.facts);
                hud::set_target(rig.ui, hud::visit_label(&leg.name));
            }
            PhaseKind::Elevate => {}
            PhaseKind::Depart => hud::hide_info(rig.ui),
        }
        log::debug!("tour: {} {:?} for {:.2}s", leg.name, phase, leg.duration);
        events.push(TourEvent::PhaseStarted { body: leg.name.clone(), phase });
    }

    /// Write the camera pose for the leg's current progress.
    fn apply(&self, leg: &mut Leg, rig: &mut TourRig) {
        let c = &self.config;
        let center = rig.center_of(leg.body).unwrap_or(leg.anchor);
        leg.anchor = center;
        let t = leg.progress();

        match leg.phase {
            PhaseKind::Approach => {
                let arrival = leg.ring_point(center, leg.entry_angle);
                rig.camera.position = ease_vec3(leg.from, arrival, t, c.approach_easing);
                rig.controls.target = lerp_vec3(rig.controls.target, center, c.approach_chase);
            }
            PhaseKind::Orbit => {
                let angle = leg.entry_angle + c.orbit_sweep * c.orbit_easing.apply(t);
                rig.camera.position = leg.ring_point(center, angle);
                rig.controls.target = center;
            }
            PhaseKind::Elevate => {
                rig.camera.position.y = ease(leg.from.y, leg.from.y + c.elevate_rise, t, c.elevate_easing);
                rig.controls.target = center;
            }
            PhaseKind::Depart => {
                rig.camera.position.y = ease(leg.from.y, leg.from.y + c.depart_rise, t, c.depart_easing);
                rig.controls.target = lerp_vec3(rig.controls.target, center, c.depart_chase);
            }
        }
        rig.camera.look_at = rig.controls.target;
    }

    fn finish(&mut self, rig: &mut TourRig, events: &mut Vec<TourEvent>) {
        let c = &self.config;
        self.active = false;
        self.stage = Stage::Idle;
        hud::set_target(rig.ui, hud::TOUR_FREE_FLIGHT);
        hud::hide_info(rig.ui);
        rig.tweens.add(
            Tween::new(
                TweenTarget::CameraPosition,
                rig.camera.position,
                c.overview_position,
                c.return_duration,
                c.return_easing,
            )
            .with_on_complete(RETURN_COMPLETE),
        );
        rig.tweens.add(Tween::new(
            TweenTarget::ControlsTarget,
            rig.controls.target,
            c.overview_target,
            c.return_duration,
            c.return_easing,
        ));
        log::info!("tour finished, returning to overview");
        events.push(TourEvent::Finished);
    }
}

impl Default for TourDirector {
    fn default() -> Self {
        Self::new(TourConfig::default())
    }
}
