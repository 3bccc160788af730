pub mod runner;

pub use runner::GameRunner;

// Re-exported for `export_game!` expansions.
pub use console_error_panic_hook;
pub use console_log;
pub use js_sys;
pub use log;
pub use orrery_engine::{button, InputEvent};

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - a `with_runner()` helper that logs instead of panicking before init
/// - all wasm-bindgen exports (init, tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// The calling crate must depend on `wasm-bindgen` and have its prelude in
/// scope. `$game_type` must implement `orrery_engine::Game` and provide `new()`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(fallback: R, f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    $crate::log::warn!("{}: called before game_init()", $game_name);
                    fallback
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner((), |r| r.init());
            $crate::log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner((), |r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, button: u8, over_ui: bool) {
            with_runner((), |r| r.pointer_down(x, y, button, over_ui));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32, button: u8) {
            with_runner((), |r| r.push_input($crate::InputEvent::PointerUp { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner((), |r| r.push_input($crate::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner((), |r| r.push_input($crate::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner((), |r| r.push_input($crate::InputEvent::Resize { width, height }));
        }

        /// `json` is an array of the element ids present on the page.
        #[wasm_bindgen]
        pub fn game_bind_ui(json: &str) -> bool {
            with_runner(false, |r| r.bind_ui(json))
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) -> bool {
            with_runner(false, |r| r.load_manifest(json))
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(0, |r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_camera_uniform() -> $crate::js_sys::Float32Array {
            with_runner($crate::js_sys::Float32Array::new_with_length(0), |r| {
                $crate::js_sys::Float32Array::from(r.camera_uniform())
            })
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(0, |r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn take_ui_commands() -> String {
            with_runner(String::from("[]"), |r| r.ui_json())
        }

        #[wasm_bindgen]
        pub fn take_pending_textures() -> String {
            with_runner(String::from("[]"), |r| r.pending_textures_json())
        }

        #[wasm_bindgen]
        pub fn get_scene_json() -> String {
            with_runner(String::from("{}"), |r| r.scene_json())
        }

        #[wasm_bindgen]
        pub fn get_scene_revision() -> u32 {
            with_runner(0, |r| r.scene_revision())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(0, |r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(0, |r| r.max_events())
        }
    };
}
