use wasm_bindgen::prelude::*;

mod bodies;
mod facts;
mod factory;
mod focus;
mod game;
mod hud;
mod orbit;
mod picking;
mod state;
mod tour;
pub use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
