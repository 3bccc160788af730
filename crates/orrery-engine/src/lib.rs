pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Math and buffer crates, re-exported so downstream crates agree on versions.
pub use bytemuck;
pub use glam;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent, Viewport};
pub use api::ui::{UiCommand, UiQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{PendingTexture, TextureHandle, TextureRegistry};
pub use components::entity::{Entity, ObjectKind};
pub use components::instances::{InstanceTransform, InstancesComponent};
pub use components::label::LabelComponent;
pub use components::mesh::{Color, MeshComponent, Shape};
pub use components::path::PathComponent;
pub use core::rng::Rng;
pub use core::scene::{Scene, SceneDescription};
pub use core::time::FixedTimestep;
pub use error::{EngineError, EngineResult};
pub use input::queue::{button, InputEvent, InputQueue};
pub use renderer::{
    CameraUniform, ControlsConfig, FrameData, OrbitControls, PerspectiveCamera, Ray,
    RenderBuffer, RenderInstance, RenderSurface,
};
pub use systems::render::build_render_buffer;

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    TweenState, Tween, TweenId, TweenTarget,
};
