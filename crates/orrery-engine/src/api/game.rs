use glam::Vec2;
use crate::api::types::{EntityId, GameEvent, Viewport};
use crate::api::ui::UiQueue;
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::controls::{ControlsConfig, OrbitControls};
use crate::renderer::instance::RenderBuffer;
use crate::renderer::ray::Ray;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound on fixed steps run for one frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Initial viewport in CSS pixels.
    pub viewport: Viewport,
    /// Orbit-controls tuning.
    pub controls: ControlsConfig,
    /// Maximum number of render instances (default: 4096).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            viewport: Viewport::default(),
            controls: ControlsConfig::default(),
            max_instances: 4096,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, place the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One simulated frame. Input is delivered on the first step of a frame only.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only pass after the render buffer is built.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub tweens: TweenState,
    pub textures: TextureRegistry,
    pub ui: UiQueue,
    pub events: Vec<GameEvent>,
    pub viewport: Viewport,
    /// Real seconds since the loop started, advanced by whole frame deltas.
    /// Keeps counting when the fixed-step cap drops simulation steps.
    pub clock: f64,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            camera: PerspectiveCamera::new(config.viewport.aspect()),
            controls: OrbitControls::new(config.controls),
            tweens: TweenState::new(),
            textures: TextureRegistry::new(),
            ui: UiQueue::new(),
            events: Vec::new(),
            viewport: config.viewport,
            clock: 0.0,
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to JavaScript. Extra events in one
    /// frame beyond the configured cap are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Add one frame's real duration to `clock`. Non-finite or negative
    /// deltas are ignored.
    pub fn advance_clock(&mut self, frame_dt: f32) {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.clock += frame_dt as f64;
        }
    }

    /// Track a new viewport size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Viewport::new(width, height);
            self.camera.resize(width, height);
        }
    }

    /// Pointer position in CSS pixels to normalized device coordinates.
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        self.viewport.to_ndc(x, y)
    }

    /// World-space pick ray under a pointer position.
    pub fn pick_ray(&self, x: f32, y: f32) -> Ray {
        self.camera.ray_from_ndc(self.to_ndc(x, y))
    }

    /// Run scripted camera tweens, then let the controls damp and aim.
    pub fn step_camera(&mut self, dt: f32) {
        self.tweens.tick(dt, &mut self.camera, &mut self.controls);
        self.controls.update(&mut self.camera);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub camera: &'a PerspectiveCamera,
}
