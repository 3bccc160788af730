pub mod camera;
pub mod controls;
pub mod instance;
pub mod ray;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{CameraUniform, PerspectiveCamera};
pub use controls::{ControlsConfig, OrbitControls};
pub use instance::{RenderBuffer, RenderInstance};
pub use ray::Ray;
pub use traits::{FrameData, RenderSurface};
