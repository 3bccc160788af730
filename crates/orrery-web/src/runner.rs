use orrery_engine::{
    build_render_buffer, AssetManifest, CameraUniform, EngineContext, FixedTimestep, FrameData,
    Game, GameConfig, InputEvent, InputQueue, RenderBuffer, RenderContext, RenderSurface,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    camera_uniform: CameraUniform,
    initialized: bool,
    /// Scene revision last handed to a `RenderSurface`.
    presented_revision: Option<u32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let ctx = EngineContext::with_config(&config);
        let camera_uniform = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            timestep: FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame),
            config,
            camera_uniform,
            initialized: false,
            presented_revision: None,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_frame();
    }

    /// Push an input event into the queue. Resizes also update the viewport
    /// and camera aspect immediately.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            self.ctx.resize(width, height);
        }
        self.input.push(event);
    }

    /// Queue a pointer press unless it landed on UI chrome.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: u8, over_ui: bool) {
        if over_ui {
            log::trace!("pointer down over UI dropped");
            return;
        }
        self.push_input(InputEvent::PointerDown { x, y, button });
    }

    /// Run one frame tick: fixed steps of game logic, then rebuild render data.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.advance_clock(dt);

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            if step == 0 {
                // Input belongs to the first step only.
                self.input.drain();
            }
        }

        self.rebuild_frame();
    }

    fn rebuild_frame(&mut self) {
        let dropped = build_render_buffer(&self.ctx.scene, &mut self.render_buffer);
        if dropped > 0 {
            log::warn!("render buffer full: {} entities not drawn", dropped);
        }
        self.camera_uniform = self.ctx.camera.uniform();

        let mut render_ctx = RenderContext {
            render_buffer: &mut self.render_buffer,
            camera: &self.ctx.camera,
        };
        self.game.render(&mut render_ctx);
    }

    /// Hand the current frame to a native or test surface.
    pub fn present(&mut self, surface: &mut impl RenderSurface) {
        let revision = self.ctx.scene.revision();
        let changed = self.presented_revision != Some(revision);
        let frame = FrameData {
            instances: &self.render_buffer.instances,
            camera: self.camera_uniform,
            revision,
            scene: changed.then(|| self.ctx.scene.describe()),
        };
        surface.render(&frame);
        self.presented_revision = Some(revision);
    }

    /// Parse and install an asset manifest. Rejected manifests are logged and
    /// the previous one stays in effect.
    pub fn load_manifest(&mut self, json: &str) -> bool {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                log::info!("asset manifest loaded: {} textures", manifest.textures.len());
                self.ctx.textures.set_manifest(manifest);
                true
            }
            Err(e) => {
                log::warn!("asset manifest rejected: {}", e);
                false
            }
        }
    }

    /// Record which DOM element ids exist, from a JSON array of strings.
    pub fn bind_ui(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Vec<String>>(json) {
            Ok(ids) => {
                log::debug!("binding {} UI elements", ids.len());
                self.ctx.ui.bind_elements(ids);
                true
            }
            Err(e) => {
                log::warn!("UI element list rejected: {}", e);
                false
            }
        }
    }

    // ---- Accessors read by JavaScript via wasm_bindgen exports ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn camera_uniform(&self) -> &[f32] {
        bytemuck_floats(&self.camera_uniform)
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    /// Drain UI commands as JSON. Serialization failures are logged and yield `[]`.
    pub fn ui_json(&mut self) -> String {
        self.ctx.ui.drain_json().unwrap_or_else(|e| {
            log::error!("UI commands dropped: {}", e);
            "[]".to_string()
        })
    }

    /// Drain texture loads queued since the last call, as JSON.
    pub fn pending_textures_json(&mut self) -> String {
        let pending = self.ctx.textures.drain_pending();
        serde_json::to_string(&pending).unwrap_or_else(|e| {
            log::error!("texture requests dropped: {}", e);
            "[]".to_string()
        })
    }

    /// Geometry and materials for the whole scene, as JSON.
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&self.ctx.scene.describe()).unwrap_or_else(|e| {
            log::error!("scene description failed: {}", e);
            "{}".to_string()
        })
    }

    pub fn scene_revision(&self) -> u32 {
        self.ctx.scene.revision()
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }
}

fn bytemuck_floats(uniform: &CameraUniform) -> &[f32] {
    orrery_engine::bytemuck::cast_slice(std::slice::from_ref(uniform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Entity, GameEvent};

    #[derive(Default)]
    struct Counter {
        updates: u32,
        seen_input: u32,
    }

    impl Game for Counter {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_tag("probe"));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            self.seen_input += input.len() as u32;
            ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: u32,
        scenes: u32,
    }

    impl RenderSurface for Recorder {
        fn backend(&self) -> &'static str {
            "headless"
        }

        fn render(&mut self, frame: &FrameData) {
            self.frames += 1;
            if frame.scene.is_some() {
                self.scenes += 1;
            }
        }

        fn resize(&mut self, _width: u32, _height: u32) {}
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(Counter::default());
        runner.tick(1.0);
        assert_eq!(runner.game().updates, 0);
    }

    #[test]
    fn input_reaches_first_step_only() {
        let mut runner = GameRunner::new(Counter::default());
        runner.init();
        runner.push_input(InputEvent::KeyDown { key_code: 32 });
        runner.tick(3.0 / 60.0 + 1e-4);
        assert_eq!(runner.game().updates, 3);
        assert_eq!(runner.game().seen_input, 1);
        assert_eq!(runner.game_events_len(), 3);
        assert_eq!(runner.instance_count(), 1);
    }

    #[test]
    fn clock_keeps_time_the_step_cap_drops() {
        let mut runner = GameRunner::new(Counter::default());
        runner.init();
        runner.tick(5.0);
        assert_eq!(runner.game().updates, runner.config.max_steps_per_frame);
        assert!((runner.context().clock - 5.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_over_ui_is_dropped() {
        let mut runner = GameRunner::new(Counter::default());
        runner.init();
        runner.pointer_down(1.0, 1.0, 0, true);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().seen_input, 0);
    }

    #[test]
    fn scene_sent_only_on_revision_change() {
        let mut runner = GameRunner::new(Counter::default());
        runner.init();
        let mut surface = Recorder::default();
        runner.present(&mut surface);
        runner.tick(1.0 / 60.0);
        runner.present(&mut surface);
        assert_eq!(surface.frames, 2);
        assert_eq!(surface.scenes, 1);
    }

    #[test]
    fn bad_manifest_is_rejected() {
        let mut runner = GameRunner::new(Counter::default());
        assert!(!runner.load_manifest("not json"));
        assert!(runner.load_manifest(r#"{ "textures": {} }"#));
        assert!(runner.bind_ui(r#"["hud"]"#));
        assert!(!runner.bind_ui("{}"));
    }

    #[test]
    fn camera_uniform_has_36_floats() {
        let runner = GameRunner::new(Counter::default());
        assert_eq!(runner.camera_uniform().len(), CameraUniform::FLOATS);
    }
}
