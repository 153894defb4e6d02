//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, the HitRecord carrying
//! intersection data, and HittableList, the flat scene aggregate.

use std::sync::Arc;

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Contains intersection point, oriented surface normal, ray parameter,
/// surface (u, v) coordinates and the struck object's material.
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector), always
    /// oriented against the incident ray
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Surface u coordinate in [0, 1]
    pub u: f32,
    /// Surface v coordinate in [0, 1]
    pub v: f32,
    /// True if the ray struck the outward-facing side of the surface
    pub front_face: bool,
    /// Material of the object at the hit point, shared with the object
    pub material: Arc<Material>,
}

impl HitRecord {
    /// Set surface normal and determine front/back face.
    ///
    /// `outward_normal` must have unit length. The stored normal always
    /// points against the incident ray for consistent shading.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives. Must be thread-safe
/// (Sync + Send) for parallel rendering.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection with t inside the given interval.
    ///
    /// Returns the intersection details, or `None` if the ray misses.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Collection of objects forming a scene.
///
/// Uses a flat linear scan for intersection testing; objects are shared
/// handles so a primitive can appear in several lists.
#[derive(Default)]
pub struct HittableList {
    /// Objects in the scene; insertion order does not affect the result.
    pub objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Remove all objects from the scene.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        // The interval's upper bound shrinks to the closest t found so far,
        // so farther candidates are rejected without extra geometry work.
        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
