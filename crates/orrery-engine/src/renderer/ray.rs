use glam::{Mat4, Vec3};

/// A half-line used for picking. Distances along the ray are in units of `dir`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray with a normalized direction.
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Map the ray into another space. The direction is left unnormalized so a
    /// parameter `t` names the same point before and after the transform.
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            dir: m.transform_vector3(self.dir),
        }
    }

    /// Nearest non-negative hit against a sphere.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let a = self.dir.length_squared();
        if a <= f32::EPSILON {
            return None;
        }
        let b = 2.0 * oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let near = (-b - sq) / (2.0 * a);
        let far = (-b + sq) / (2.0 * a);
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere.
            Some(far)
        } else {
            None
        }
    }

    /// Hit against a flat annulus lying in the local XY plane, centered on the origin.
    pub fn intersect_annulus(&self, inner: f32, outer: f32) -> Option<f32> {
        if self.dir.z.abs() <= f32::EPSILON {
            return None;
        }
        let t = -self.origin.z / self.dir.z;
        if t < 0.0 {
            return None;
        }
        let r = self.at(t).truncate().length();
        (r >= inner && r <= outer).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use glam::{EulerRot, Quat};

    #[test]
    fn hits_sphere_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn misses_sphere_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn transformed_keeps_parameter() {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::IDENTITY,
            Vec3::new(5.0, 0.0, 0.0),
        );
        let ray = Ray::new(Vec3::new(5.0, 0.0, 20.0), -Vec3::Z);
        let local = ray.transformed(&world.inverse());
        // Unit sphere scaled by 2 has a world radius of 2: front face at z = 2.
        let t = local.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 18.0).abs() < 1e-4);
    }

    #[test]
    fn annulus_hit_and_hole() {
        // A ring laid flat in the world XZ plane.
        let world = Mat4::from_quat(Quat::from_euler(EulerRot::XYZ, -FRAC_PI_2, 0.0, 0.0));
        let inv = world.inverse();
        let down = |x: f32| Ray::new(Vec3::new(x, 10.0, 0.0), -Vec3::Y).transformed(&inv);
        assert!(down(5.0).intersect_annulus(4.2, 7.5).is_some());
        assert!(down(2.0).intersect_annulus(4.2, 7.5).is_none());
        assert!(down(9.0).intersect_annulus(4.2, 7.5).is_none());
    }
}
