/// Solar System: an interactive 3D orrery with click-to-focus, an Earth-size
/// comparison sphere, a true-scale switch and a cinematic camera tour.
///
/// One `update` is one animation frame: input, time, motion, camera, HUD.

use glam::Vec2;
use orrery_engine::{
    button, EngineContext, Game, GameConfig, GameEvent, InputEvent, InputQueue, TweenTarget,
};

use crate::bodies::SystemCatalog;
use crate::facts::Encyclopedia;
use crate::factory;
use crate::hud::{self, ids};
use crate::orbit;
use crate::picking;
use crate::state::{SimulationState, SolarBodies};
use crate::tour::{self, TourDirector, TourEvent, TourRig};

const FIXED_DT: f32 = 1.0 / 60.0;

// ── Custom event kinds from the page ─────────────────────────────────

const CUSTOM_TOGGLE_PAUSE: u32 = 1;
/// a = new time scale.
const CUSTOM_SET_SPEED: u32 = 2;
const CUSTOM_TOGGLE_TRUE_SCALE: u32 = 3;
const CUSTOM_TOGGLE_TOUR: u32 = 4;
const CUSTOM_TOGGLE_COMPARISON: u32 = 5;
const CUSTOM_CLOSE_INFO: u32 = 6;

// ── Game event kinds to the page ─────────────────────────────────────

/// a = focused entity id (-1 for none), b = tour running, c = true scale.
const EVENT_STATUS: f32 = 1.0;

pub struct SolarSystem {
    catalog: SystemCatalog,
    state: SimulationState,
    bodies: SolarBodies,
    tour: TourDirector,
    facts: Encyclopedia,
    /// Last pointer position while a primary drag is orbiting the camera.
    drag: Option<Vec2>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_catalog(SystemCatalog::default())
    }

    pub fn with_catalog(catalog: SystemCatalog) -> Self {
        Self {
            catalog,
            state: SimulationState::default(),
            bodies: SolarBodies::new(),
            tour: TourDirector::default(),
            facts: Encyclopedia::default(),
            drag: None,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn bodies(&self) -> &SolarBodies {
        &self.bodies
    }

    pub fn tour(&self) -> &TourDirector {
        &self.tour
    }

    /// Take a body out of the live system. Focus on it is dropped and a tour
    /// that has not reached it yet skips it.
    pub fn remove_body(&mut self, ctx: &mut EngineContext, name: &str) -> bool {
        let Some(index) = self.bodies.find(name) else {
            return false;
        };
        if self.state.focused == Some(index) {
            self.state.set_focus(None, &mut ctx.scene);
            hud::hide_info(&mut ctx.ui);
            hud::set_target(&mut ctx.ui, hud::FREE_FLIGHT);
        }
        self.bodies.remove(name, &mut ctx.scene).is_some()
    }

    /// Whether a script owns the camera (tour legs or the return flight).
    fn camera_scripted(&self, ctx: &EngineContext) -> bool {
        self.tour.is_active() || ctx.tweens.is_animating(TweenTarget::CameraPosition)
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                picking::handle_pointer_down(x, y, button, ctx, &mut self.state, &self.bodies, &self.facts);
                if button == button::PRIMARY && !self.camera_scripted(ctx) {
                    self.drag = Some(Vec2::new(x, y));
                }
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(last) = self.drag {
                    ctx.controls.rotate(x - last.x, y - last.y);
                    self.drag = Some(Vec2::new(x, y));
                }
            }
            InputEvent::PointerUp { .. } => self.drag = None,
            InputEvent::Wheel { delta } => {
                if !self.camera_scripted(ctx) {
                    ctx.controls.dolly(delta);
                }
            }
            InputEvent::Custom { kind, a, .. } => self.handle_custom(ctx, kind, a),
            _ => {}
        }
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            CUSTOM_TOGGLE_PAUSE => {
                let paused = self.state.toggle_pause();
                ctx.ui.set_text(ids::PAUSE_BUTTON, hud::pause_label(paused));
            }
            CUSTOM_SET_SPEED => {
                if self.state.set_time_scale(a) {
                    ctx.ui.set_text(ids::SPEED_VALUE, hud::format_speed(self.state.time_scale));
                }
            }
            CUSTOM_TOGGLE_TRUE_SCALE => {
                if self.tour.is_active() {
                    log::debug!("true-scale toggle ignored during the tour");
                    return;
                }
                self.state.toggle_true_scale(&mut self.bodies, &mut ctx.scene);
                let on = self.state.is_true_scale;
                ctx.ui.set_active(ids::SCALE_BUTTON, on);
                ctx.ui.set_text(ids::SCALE_BUTTON, hud::scale_label(on));
            }
            CUSTOM_TOGGLE_TOUR => {
                if !self.tour.is_active() {
                    self.state.set_focus(None, &mut ctx.scene);
                    self.drag = None;
                }
                let events = self.tour.toggle(&mut TourRig::new(ctx, &self.bodies, &self.facts));
                self.report_tour(ctx, &events);
            }
            CUSTOM_TOGGLE_COMPARISON => {
                self.state.toggle_comparison_overlay(&self.bodies, ctx);
            }
            CUSTOM_CLOSE_INFO => picking::close_info(ctx, &mut self.state),
            other => log::debug!("unknown custom event {other}"),
        }
    }

    fn report_tour(&self, ctx: &mut EngineContext, events: &[TourEvent]) {
        let changed = events
            .iter()
            .any(|e| matches!(e, TourEvent::Started | TourEvent::Stopped | TourEvent::Finished));
        if changed {
            let active = self.tour.is_active();
            ctx.ui.set_active(ids::TOUR_BUTTON, active);
            ctx.ui.set_text(ids::TOUR_BUTTON, hud::tour_label(active));
        }
    }

    fn emit_status(&self, ctx: &mut EngineContext) {
        let focused = self
            .state
            .focused
            .and_then(|i| self.bodies.get(i))
            .map_or(-1.0, |b| b.id.0 as f32);
        ctx.emit_event(GameEvent::new(
            EVENT_STATUS,
            focused,
            if self.tour.is_active() { 1.0 } else { 0.0 },
            if self.state.is_true_scale { 1.0 } else { 0.0 },
        ));
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.facts = Encyclopedia::builtin().unwrap_or_else(|e| {
            log::error!("encyclopedia unreadable, info panel disabled: {e}");
            Encyclopedia::default()
        });
        if self.facts.is_empty() {
            log::warn!("encyclopedia has no entries");
        } else {
            log::info!("encyclopedia: {} entries", self.facts.len());
        }
        match factory::build_system(&self.catalog, ctx) {
            Ok(bodies) => self.bodies = bodies,
            Err(e) => log::error!("solar system not built: {e}"),
        }

        ctx.ui.set_text(ids::PAUSE_BUTTON, hud::pause_label(self.state.is_paused));
        ctx.ui.set_text(ids::SPEED_VALUE, hud::format_speed(self.state.time_scale));
        ctx.ui.set_text(ids::SCALE_BUTTON, hud::scale_label(self.state.is_true_scale));
        ctx.ui.set_text(ids::TOUR_BUTTON, hud::tour_label(false));
        hud::set_target(&mut ctx.ui, hud::FREE_FLIGHT);
        hud::refresh(&mut ctx.ui, ctx.camera.position, &self.state);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        // ── Time and motion ──────────────────────────────────────────
        self.state.wall_elapsed = ctx.clock;
        orbit::advance_time(&mut self.state);
        orbit::update_bodies(&self.state, &mut self.bodies, &mut ctx.scene);

        // ── Camera ───────────────────────────────────────────────────
        if self.tour.is_active() {
            let events = self.tour.tick(FIXED_DT, &mut TourRig::new(ctx, &self.bodies, &self.facts));
            self.report_tour(ctx, &events);
        } else if let Some(target) = self.state.focus_target(&self.bodies, &ctx.scene) {
            ctx.controls.target = target;
        }
        self.state.update_overlay(&self.bodies, &mut ctx.scene);
        ctx.step_camera(FIXED_DT);
        if ctx.tweens.drain_completed().any(|id| id == tour::RETURN_COMPLETE) {
            log::info!("camera back at overview");
        }

        // ── HUD ──────────────────────────────────────────────────────
        hud::refresh(&mut ctx.ui, ctx.camera.position, &self.state);
        self.emit_status(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::UiCommand;
    use orrery_web::GameRunner;

    fn started() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::with_config(&game.config());
        game.init(&mut ctx);
        ctx.ui.drain();
        (game, ctx)
    }

    fn frame(game: &mut SolarSystem, ctx: &mut EngineContext, events: &[InputEvent]) {
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        ctx.advance_clock(FIXED_DT);
        game.update(ctx, &input);
    }

    fn custom(kind: u32, a: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }

    fn texts(ctx: &mut EngineContext) -> Vec<(String, String)> {
        ctx.ui
            .drain()
            .into_iter()
            .filter_map(|c| match c {
                UiCommand::SetText { element, text } => Some((element, text)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn frames_advance_time_and_move_planets() {
        let (mut game, mut ctx) = started();
        let earth = game.bodies().find("Earth").unwrap();
        let before = game.bodies().world_position(earth, &ctx.scene).unwrap();
        for _ in 0..60 {
            frame(&mut game, &mut ctx, &[]);
        }
        assert!((game.state().absolute_time - 0.6).abs() < 1e-4);
        let after = game.bodies().world_position(earth, &ctx.scene).unwrap();
        assert!((before - after).length() > 0.1);
        assert!((game.state().wall_elapsed - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pause_stops_simulated_time_but_not_the_clock() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_PAUSE, 0.0)]);
        let t = game.state().absolute_time;
        for _ in 0..30 {
            frame(&mut game, &mut ctx, &[]);
        }
        assert_eq!(game.state().absolute_time, t);
        assert!(game.state().wall_elapsed > 0.5);
        let labels = texts(&mut ctx);
        assert!(labels.contains(&(ids::PAUSE_BUTTON.to_string(), "Resume ▶️".to_string())));
    }

    #[test]
    fn speed_event_updates_scale_and_label() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SET_SPEED, 2.5)]);
        assert!((game.state().time_scale - 2.5).abs() < 1e-6);
        let labels = texts(&mut ctx);
        assert!(labels.contains(&(ids::SPEED_VALUE.to_string(), "2.5x".to_string())));
        assert!(labels.contains(&(ids::HUD_SPEED.to_string(), "⚡ 2.5x".to_string())));

        frame(&mut game, &mut ctx, &[custom(CUSTOM_SET_SPEED, -3.0)]);
        assert!((game.state().time_scale - 2.5).abs() < 1e-6);
    }

    #[test]
    fn focus_follow_tracks_body() {
        let (mut game, mut ctx) = started();
        let mercury = game.bodies().find("Mercury");
        game.state.set_focus(mercury, &mut ctx.scene);
        for _ in 0..10 {
            frame(&mut game, &mut ctx, &[]);
        }
        let center = game.bodies().world_position(mercury.unwrap(), &ctx.scene).unwrap();
        assert!((ctx.controls.target - center).length() < 1e-4);
        assert!((ctx.camera.look_at - center).length() < 1e-4);
    }

    #[test]
    fn tour_start_clears_focus_and_blocks_true_scale() {
        let (mut game, mut ctx) = started();
        let venus = game.bodies().find("Venus");
        game.state.set_focus(venus, &mut ctx.scene);

        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_TOUR, 0.0)]);
        assert!(game.tour().is_active());
        assert!(game.state().focused.is_none());

        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_TRUE_SCALE, 0.0)]);
        assert!(!game.state().is_true_scale);

        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_TOUR, 0.0)]);
        assert!(!game.tour().is_active());
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_TRUE_SCALE, 0.0)]);
        assert!(game.state().is_true_scale);
    }

    #[test]
    fn drag_rotates_camera() {
        let (mut game, mut ctx) = started();
        let start = ctx.camera.position;
        frame(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 10.0, y: 10.0, button: button::PRIMARY },
                InputEvent::PointerMove { x: 110.0, y: 10.0 },
                InputEvent::PointerUp { x: 110.0, y: 10.0, button: button::PRIMARY },
            ],
        );
        for _ in 0..30 {
            frame(&mut game, &mut ctx, &[]);
        }
        let end = ctx.camera.position;
        assert!((start - end).length() > 1.0);
        // Orbiting keeps the distance to the target.
        assert!((start.length() - end.length()).abs() < 1e-2);
        assert_eq!(ctx.controls.target, Vec3::ZERO);
    }

    #[test]
    fn status_event_reports_focus() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, &[]);
        assert_eq!(ctx.events.last().unwrap().a, -1.0);

        let earth = game.bodies().find("Earth");
        game.state.set_focus(earth, &mut ctx.scene);
        frame(&mut game, &mut ctx, &[]);
        let id = game.bodies().get(earth.unwrap()).unwrap().id;
        assert_eq!(ctx.events.last().unwrap().a, id.0 as f32);
    }

    #[test]
    fn init_writes_the_hud() {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::with_config(&game.config());
        game.init(&mut ctx);
        let labels = texts(&mut ctx);
        for expected in [
            (ids::HUD_X, "X: 0.0"),
            (ids::HUD_Y, "Y: 100.0"),
            (ids::HUD_Z, "Z: 180.0"),
            (ids::HUD_ELAPSED, "⏱ 00:00:00"),
            (ids::TARGET_NAME, hud::FREE_FLIGHT),
            (ids::PAUSE_BUTTON, "Pause ⏸️"),
        ] {
            assert!(
                labels.contains(&(expected.0.to_string(), expected.1.to_string())),
                "missing {expected:?}"
            );
        }
    }

    #[test]
    fn stalled_frame_still_counts_on_the_clock() {
        let mut runner = GameRunner::new(SolarSystem::new());
        runner.init();
        for _ in 0..60 {
            runner.tick(FIXED_DT);
        }
        runner.tick(5.0);
        assert!((runner.game().state().wall_elapsed - 6.0).abs() < 1e-3);
    }

    #[test]
    fn removing_the_focused_body_drops_focus() {
        let (mut game, mut ctx) = started();
        let mars = game.bodies().find("Mars");
        game.state.set_focus(mars, &mut ctx.scene);
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_COMPARISON, 0.0)]);
        assert!(game.state().comparison_overlay.is_some());

        let entities = ctx.scene.len();
        assert!(game.remove_body(&mut ctx, "Mars"));
        assert!(game.state().focused.is_none());
        assert!(game.state().comparison_overlay.is_none());
        assert!(game.bodies().find("Mars").is_none());
        assert!(ctx.scene.len() < entities);
        assert!(!game.remove_body(&mut ctx, "Mars"));

        for _ in 0..5 {
            frame(&mut game, &mut ctx, &[]);
        }
        assert!(game.bodies().find("Earth").is_some());
    }

    #[test]
    fn elapsed_clock_ticks_in_whole_seconds() {
        let (mut game, mut ctx) = started();
        for _ in 0..61 {
            frame(&mut game, &mut ctx, &[]);
        }
        let labels = texts(&mut ctx);
        assert!(labels.contains(&(ids::HUD_ELAPSED.to_string(), "⏱ 00:00:01".to_string())));
    }
}
