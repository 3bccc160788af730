use serde::Serialize;
use crate::assets::registry::TextureHandle;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a packed 0xRRGGBB value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mesh geometry primitive, in local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32 },
}

/// Solid geometry plus its material description.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MeshComponent {
    pub shape: Shape,
    pub color: Color,
    pub texture: Option<TextureHandle>,
    pub opacity: f32,
    pub wireframe: bool,
    /// Glow multiplier (0 = unlit surface).
    pub emissive: f32,
    /// Inverted-hull shells (atmospheres) are drawn from the back side.
    pub back_side: bool,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere { radius: 1.0 },
            color: Color::default(),
            texture: None,
            opacity: 1.0,
            wireframe: false,
            emissive: 0.0,
            back_side: false,
        }
    }
}

impl MeshComponent {
    pub fn sphere(radius: f32, color: Color) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            color,
            ..Default::default()
        }
    }

    pub fn ring(inner: f32, outer: f32, color: Color) -> Self {
        Self {
            shape: Shape::Ring { inner, outer },
            color,
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_back_side(mut self) -> Self {
        self.back_side = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_unpacks() {
        let c = Color::from_hex(0xff8000);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }
}
