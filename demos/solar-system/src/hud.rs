/// HUD text and info-panel payloads, emitted as UI commands.

use glam::Vec3;
use orrery_engine::UiQueue;
use serde_json::{json, Value};

use crate::facts::{Encyclopedia, MISSING, PREHISTORIC};
use crate::state::SimulationState;

/// Page element ids the game writes to.
pub mod ids {
    pub const HUD_X: &str = "hud-x";
    pub const HUD_Y: &str = "hud-y";
    pub const HUD_Z: &str = "hud-z";
    pub const HUD_ELAPSED: &str = "hud-elapsed";
    pub const HUD_SPEED: &str = "hud-scale-info";
    pub const TARGET_NAME: &str = "target-name";
    pub const INFO_PANEL: &str = "info-panel";
    pub const PAUSE_BUTTON: &str = "pause-btn";
    pub const SCALE_BUTTON: &str = "scale-btn";
    pub const TOUR_BUTTON: &str = "tour-btn";
    pub const SPEED_VALUE: &str = "speed-value";
}

pub const FREE_FLIGHT: &str = "— FREE FLIGHT —";
pub const TOUR_FREE_FLIGHT: &str = "◈ FREE FLIGHT ◈";
pub const TOUR_BEGINS: &str = "★ COSMIC JOURNEY BEGINS ★";

pub fn focus_label(name: &str) -> String {
    format!("🎯 {}", name.to_uppercase())
}

pub fn approach_label(name: &str) -> String {
    format!("✈ APPROACHING {}...", name.to_uppercase())
}

pub fn visit_label(name: &str) -> String {
    format!("★ {} ★", name.to_uppercase())
}

/// `HH:MM:SS` of whole seconds. Hours keep growing past 99.
pub fn format_elapsed(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// One decimal place; negative zero prints as zero.
pub fn format_coordinate(axis: &str, value: f32) -> String {
    format!("{axis}: {:.1}", value + 0.0)
}

/// Shortest decimal form followed by `x`, e.g. `1x`, `2.5x`.
pub fn format_speed(time_scale: f32) -> String {
    format!("{time_scale}x")
}

pub fn pause_label(paused: bool) -> &'static str {
    if paused {
        "Resume ▶️"
    } else {
        "Pause ⏸️"
    }
}

pub fn scale_label(true_scale: bool) -> &'static str {
    if true_scale {
        "True Scale: ON 🔭"
    } else {
        "True Scale: OFF 📏"
    }
}

pub fn tour_label(active: bool) -> &'static str {
    if active {
        "⏹ Stop Tour"
    } else {
        "🎬 Start Tour"
    }
}

/// Panel payload for a body, with placeholders for absent facts.
pub fn info_payload(name: &str, facts: &Encyclopedia) -> Option<Value> {
    let f = facts.lookup(name)?;
    let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
    Some(json!({
        "name": name,
        "type": f.kind,
        "diameter": f.diameter,
        "temperature": f.temperature,
        "gravity": or_missing(&f.gravity),
        "escape_velocity": or_missing(&f.escape_velocity),
        "day": f.day,
        "year": f.year,
        "atmosphere": or_missing(&f.atmosphere),
        "discovery": f.discovery.clone().unwrap_or_else(|| PREHISTORIC.to_string()),
        "moons": f.moons.map_or_else(|| json!(MISSING), |m| json!(m)),
        "life": f.life,
        "description": f.description,
        "fun_fact": f.fun_fact,
    }))
}

/// Open the info panel for a body. Names the encyclopedia does not know are
/// a silent no-op. Returns whether the panel was shown.
pub fn show_info(ui: &mut UiQueue, name: &str, facts: &Encyclopedia) -> bool {
    let Some(payload) = info_payload(name, facts) else {
        log::debug!("no encyclopedia entry for {name}");
        return false;
    };
    ui.show_panel(ids::INFO_PANEL, payload);
    ui.set_text(ids::TARGET_NAME, focus_label(name));
    true
}

pub fn hide_info(ui: &mut UiQueue) {
    ui.hide_panel(ids::INFO_PANEL);
}

pub fn set_target(ui: &mut UiQueue, text: impl Into<String>) {
    ui.set_text(ids::TARGET_NAME, text);
}

/// Per-frame readout: camera coordinates, wall-clock elapsed and speed.
pub fn refresh(ui: &mut UiQueue, camera: Vec3, state: &SimulationState) {
    ui.set_text(ids::HUD_X, format_coordinate("X", camera.x));
    ui.set_text(ids::HUD_Y, format_coordinate("Y", camera.y));
    ui.set_text(ids::HUD_Z, format_coordinate("Z", camera.z));
    ui.set_text(ids::HUD_ELAPSED, format!("⏱ {}", format_elapsed(state.wall_elapsed)));
    ui.set_text(ids::HUD_SPEED, format!("⚡ {}", format_speed(state.time_scale)));
}
