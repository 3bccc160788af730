/// Body catalog: the configuration every celestial body is built from.
///
/// Values are artistic: sizes and distances are exaggerated for legibility.
/// True-scale values are fixed fractions of these, see the ratios below.

use serde::Deserialize;

/// Rendered radius in true-scale mode, as a fraction of the artistic radius.
pub const TRUE_RADIUS_RATIO: f32 = 0.3;
/// Orbital distance in true-scale mode, as a multiple of the artistic distance.
pub const TRUE_DISTANCE_RATIO: f32 = 8.0;
/// The star does not follow the planet ratios; it just halves.
pub const STAR_TRUE_SCALE: f32 = 0.5;

// ── Per-frame rates (multiplied by the time scale) ──────────────────

/// Simulated time added per frame.
pub const TIME_STEP: f32 = 0.01;
/// Orbital angle = time × speed × ANGLE_RATE.
pub const ANGLE_RATE: f32 = 10.0;
pub const PLANET_SPIN: f32 = 0.02;
pub const CLOUD_SPIN: f32 = 0.025;
pub const MOON_SPIN: f32 = 0.01;
pub const STAR_SPIN: f32 = 0.002;
pub const BELT_SPIN: f32 = 0.002;
/// Moon orbital angle added per frame.
pub const MOON_ANGULAR_RATE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
}

impl BodyKind {
    /// Bodies that travel on a heliocentric circle.
    pub fn orbits_star(self) -> bool {
        matches!(self, BodyKind::Planet | BodyKind::DwarfPlanet)
    }
}

/// Orbital-plane tilt in radians: applied around X first, then around Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct OrbitTilt {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub z: f32,
}

impl OrbitTilt {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RingConfig {
    pub inner: f32,
    pub outer: f32,
    #[serde(default)]
    pub texture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoonConfig {
    pub name: String,
    pub radius: f32,
    /// Distance from the parent's center.
    pub distance: f32,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default = "default_color")]
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub kind: BodyKind,
    pub radius: f32,
    /// Orbital distance from the origin. Ignored for the star.
    #[serde(default)]
    pub distance: f32,
    /// Angular speed coefficient.
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub texture: Option<String>,
    /// Fallback color (0xRRGGBB) while or if the texture is unavailable.
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default)]
    pub tilt: Option<OrbitTilt>,
    #[serde(default)]
    pub ring: Option<RingConfig>,
    /// Cloud-shell texture; the shell sits just above the surface.
    #[serde(default)]
    pub clouds: Option<String>,
    /// Glowing back-side shell around the body.
    #[serde(default)]
    pub atmosphere: bool,
    #[serde(default)]
    pub moons: Vec<MoonConfig>,
}

/// Instanced rock field between the inner and outer planets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeltConfig {
    pub count: usize,
    pub inner: f32,
    pub outer: f32,
    /// Total vertical spread, centered on the ecliptic.
    pub thickness: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Radius of a single rock before per-instance scale.
    pub rock_radius: f32,
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            count: 1500,
            inner: 38.0,
            outer: 44.0,
            thickness: 0.1,
            min_scale: 0.3,
            max_scale: 0.7,
            rock_radius: 0.15,
            color: 0x888888,
            seed: default_seed(),
        }
    }
}

/// Everything the body factory needs to build a system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemCatalog {
    /// Directory joined to every texture file name.
    #[serde(default = "default_texture_root")]
    pub texture_root: String,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub belt: Option<BeltConfig>,
}

fn default_color() -> u32 {
    0xffffff
}

fn default_seed() -> u64 {
    0x5eed_0f_5011
}

fn default_texture_root() -> String {
    "textures".to_string()
}

impl SystemCatalog {
    /// Parse a catalog from JSON. Structural checks happen in the factory.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Path a texture file is requested under.
    pub fn texture_path(&self, file: &str) -> String {
        if self.texture_root.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.texture_root.trim_end_matches('/'), file)
        }
    }

    pub fn find(&self, name: &str) -> Option<&BodyConfig> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

fn body(name: &str, kind: BodyKind, radius: f32, distance: f32, speed: f32, texture: &str, color: u32) -> BodyConfig {
    BodyConfig {
        name: name.to_string(),
        kind,
        radius,
        distance,
        speed,
        texture: Some(texture.to_string()),
        color,
        tilt: None,
        ring: None,
        clouds: None,
        atmosphere: false,
        moons: Vec::new(),
    }
}

fn dwarf(name: &str, radius: f32, distance: f32, speed: f32, texture: &str, color: u32, tilt: OrbitTilt) -> BodyConfig {
    BodyConfig {
        tilt: Some(tilt),
        ..body(name, BodyKind::DwarfPlanet, radius, distance, speed, texture, color)
    }
}

impl Default for SystemCatalog {
    fn default() -> Self {
        use BodyKind::*;

        let earth = BodyConfig {
            clouds: Some("clouds.jpg".to_string()),
            atmosphere: true,
            moons: vec![MoonConfig {
                name: "Moon".to_string(),
                radius: 0.4,
                distance: 4.0,
                texture: Some("moon.jpg".to_string()),
                color: 0xcccccc,
            }],
            ..body("Earth", Planet, 1.0, 24.0, 0.018, "earth.jpg", 0x2233ff)
        };
        let saturn = BodyConfig {
            ring: Some(RingConfig {
                inner: 4.2,
                outer: 7.5,
                texture: Some("saturn_ring.png".to_string()),
            }),
            ..body("Saturn", Planet, 3.5, 80.0, 0.004, "saturn.jpg", 0xe3e0c0)
        };

        Self {
            texture_root: default_texture_root(),
            bodies: vec![
                body("SUN", Star, 5.0, 0.0, 0.0, "sun.jpg", 0xffcc33),
                body("Mercury", Planet, 0.38, 10.0, 0.04, "mercury.jpg", 0xaaaaaa),
                body("Venus", Planet, 0.95, 16.0, 0.025, "venus.jpg", 0xeecb8b),
                earth,
                body("Mars", Planet, 0.53, 32.0, 0.012, "mars.jpg", 0xc1440e),
                dwarf("Ceres", 0.8, 40.0, 0.01, "ceres.jpg", 0xaaaaaa, OrbitTilt::new(0.1, 0.0)),
                body("Jupiter", Planet, 4.0, 55.0, 0.006, "jupiter.jpg", 0xc99039),
                saturn,
                body("Uranus", Planet, 1.8, 100.0, 0.003, "uranus.jpg", 0x4fd0e7),
                body("Neptune", Planet, 1.7, 120.0, 0.002, "neptune.jpg", 0x4b70dd),
                dwarf("Pluto", 0.9, 145.0, 0.0015, "pluto.jpg", 0xccaacc, OrbitTilt::new(0.3, 0.1)),
                dwarf("Eris", 0.9, 170.0, 0.001, "eris.jpg", 0xffffff, OrbitTilt::new(-0.2, 0.2)),
            ],
            belt: Some(BeltConfig::default()),
        }
    }
}
