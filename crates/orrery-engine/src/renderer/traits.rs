//! Rendering surface contract.
//!
//! In the browser the surface lives in JavaScript and reads the same data
//! from linear memory. Native or test surfaces implement this trait and are
//! driven by `GameRunner::present`.

use super::camera::CameraUniform;
use super::instance::RenderInstance;
use crate::core::scene::SceneDescription;

/// Everything a surface needs to draw one frame.
pub struct FrameData<'a> {
    /// One record per entity, in scene order.
    pub instances: &'a [RenderInstance],
    pub camera: CameraUniform,
    /// Scene revision; rebuild geometry when it changes.
    pub revision: u32,
    /// Geometry and materials. Only present when the revision changed since
    /// the previous `present`.
    pub scene: Option<SceneDescription<'a>>,
}

/// A target that can draw frames and follow viewport size.
pub trait RenderSurface {
    /// Backend identifier (e.g., "webgl", "headless").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn render(&mut self, frame: &FrameData);

    /// Handle a viewport resize, in CSS pixels.
    fn resize(&mut self, width: u32, height: u32);
}
