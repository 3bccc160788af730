use glam::Vec3;
use serde::Serialize;
use crate::components::mesh::Color;

/// A closed polyline drawn as a line loop (orbit paths).
#[derive(Debug, Clone, Serialize)]
pub struct PathComponent {
    #[serde(serialize_with = "serialize_points")]
    pub points: Vec<Vec3>,
    pub color: Color,
    pub opacity: f32,
}

impl PathComponent {
    pub fn new(points: Vec<Vec3>, color: Color, opacity: f32) -> Self {
        Self { points, color, opacity }
    }

    /// Sample a circle of `radius` in the XZ plane, passing each point through `map`.
    /// Produces `segments + 1` points so the loop closes on itself.
    pub fn circle(radius: f32, segments: usize, map: impl Fn(Vec3) -> Vec3) -> Vec<Vec3> {
        (0..=segments)
            .map(|i| {
                let a = i as f32 / segments as f32 * std::f32::consts::TAU;
                map(Vec3::new(a.cos() * radius, 0.0, a.sin() * radius))
            })
            .collect()
    }
}

fn serialize_points<S: serde::Serializer>(points: &[Vec3], s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = s.serialize_seq(Some(points.len()))?;
    for p in points {
        seq.serialize_element(&[p.x, p.y, p.z])?;
    }
    seq.end()
}
