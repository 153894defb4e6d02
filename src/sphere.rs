//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection with the half-b quadratic formulation,
//! spherical (u, v) mapping, and linear motion between two centers over the
//! shutter interval for motion blur.

use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive, optionally moving linearly during the shutter interval.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center at shutter time 0.
    center0: Vec3A,
    /// Center at shutter time 1; equals `center0` for a static sphere.
    center1: Vec3A,
    /// Radius of the sphere (non-negative; zero is a degenerate point).
    radius: f32,
    /// Material properties determining light interaction, shared by handle.
    material: Arc<Material>,
    /// Whether the two centers differ.
    is_moving: bool,
}

impl Sphere {
    /// Create a static sphere.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative; that is a construction-time programmer
    /// error. A zero radius is permitted and behaves as a point.
    pub fn new(center: Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Self::new_moving(center, center, radius, material)
    }

    /// Create a sphere moving linearly from `center0` to `center1` over the
    /// shutter interval.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative.
    pub fn new_moving(
        center0: Vec3A,
        center1: Vec3A,
        radius: f32,
        material: Arc<Material>,
    ) -> Self {
        assert!(radius >= 0.0, "sphere radius must be non-negative, got {radius}");
        Self {
            center0,
            center1,
            radius,
            material,
            is_moving: center0 != center1,
        }
    }

    /// Center position at the given shutter time in [0, 1].
    pub fn center_at(&self, time: f32) -> Vec3A {
        if self.is_moving {
            self.center0.lerp(self.center1, time)
        } else {
            self.center0
        }
    }

    /// Spherical (u, v) coordinates of a point on the unit sphere around the
    /// origin: u from the azimuth around Y, v from the polar angle.
    fn uv(p: Vec3A) -> (f32, f32) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;
        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let center = self.center_at(r.time);

        // Vector from ray origin to sphere center
        let oc = center - r.origin;

        // Half-b quadratic equation coefficients
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - center) / self.radius;
        let (u, v) = Self::uv(outward_normal);

        let mut rec = HitRecord {
            p,
            normal: outward_normal,
            t: root,
            u,
            v,
            front_face: true,
            material: Arc::clone(&self.material),
        };
        rec.set_face_normal(r, outward_normal);

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_material() -> Arc<Material> {
        Arc::new(Material::lambertian(Vec3A::ONE))
    }

    #[test]
    fn axial_ray_hits_at_distance_minus_radius() {
        let sphere = Sphere::new(Vec3A::ZERO, 1.0, unit_material());
        let d = 5.0;
        let r = Ray::new(Vec3A::new(0.0, 0.0, d), Vec3A::new(0.0, 0.0, -1.0), 0.0);

        let rec = sphere.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - (d - 1.0)).abs() < 1e-5);
        assert!((rec.normal - Vec3A::Z).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn ray_from_inside_uses_far_root_and_flips_normal() {
        let sphere = Sphere::new(Vec3A::ZERO, 1.0, unit_material());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);

        let rec = sphere.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        // Outward normal is -z there; stored normal opposes the ray.
        assert!((rec.normal - Vec3A::Z).length() < 1e-5);
    }

    #[test]
    fn interval_rejects_out_of_range_roots() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, unit_material());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);
        // Both roots (4 and 6) sit outside [0.001, 3].
        assert!(sphere.hit(&r, Interval::new(0.001, 3.0)).is_none());
    }

    #[test]
    fn miss_returns_none() {
        let sphere = Sphere::new(Vec3A::new(0.0, 10.0, 0.0), 1.0, unit_material());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&r, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn motion_interpolates_between_centers() {
        let sphere = Sphere::new_moving(
            Vec3A::ZERO,
            Vec3A::new(0.0, 1.0, 0.0),
            0.5,
            unit_material(),
        );
        assert_eq!(sphere.center_at(0.0), Vec3A::ZERO);
        assert_eq!(sphere.center_at(0.5), Vec3A::new(0.0, 0.5, 0.0));
        assert_eq!(sphere.center_at(1.0), Vec3A::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn moving_sphere_is_hit_where_the_ray_time_puts_it() {
        let sphere = Sphere::new_moving(
            Vec3A::new(0.0, 0.0, -5.0),
            Vec3A::new(0.0, 10.0, -5.0),
            1.0,
            unit_material(),
        );

        let aim = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&aim, Interval::new(0.001, f32::INFINITY)).is_some());

        // At shutter close the sphere has moved out of this ray's path.
        let late = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 1.0);
        assert!(sphere.hit(&late, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn uv_mapping_of_axis_points() {
        // +x: phi = pi, theta = pi/2.
        let (u, v) = Sphere::uv(Vec3A::X);
        assert!((u - 0.5).abs() < 1e-5);
        assert!((v - 0.5).abs() < 1e-5);

        // +y pole: theta = pi.
        let (_, v) = Sphere::uv(Vec3A::Y);
        assert!((v - 1.0).abs() < 1e-5);

        // -y pole: theta = 0.
        let (_, v) = Sphere::uv(-Vec3A::Y);
        assert!(v.abs() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "sphere radius must be non-negative")]
    fn negative_radius_is_rejected() {
        let _ = Sphere::new(Vec3A::ZERO, -1.0, unit_material());
    }
}
