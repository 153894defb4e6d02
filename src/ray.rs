//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. Each ray additionally
//! carries the shutter-time sample it was fired at, which drives motion blur.

use glam::Vec3A;

/// Ray in 3D space defined by origin, direction and shutter time.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized; intersection code works with the
    /// squared length directly.
    pub direction: Vec3A,

    /// Normalized shutter-open sample in [0, 1).
    ///
    /// Not a wall-clock value. Moving geometry interpolates its position
    /// with this parameter, and scattered rays inherit it from their parent.
    pub time: f32,
}

impl Ray {
    /// Create a new ray with origin, direction and shutter time.
    pub fn new(origin: Vec3A, direction: Vec3A, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
