// extensions/mod.rs
//
// Optional extension modules for the engine.
// Decoupled from Scene: games opt in by owning these systems.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use tween::{TweenState, Tween, TweenId, TweenTarget};
