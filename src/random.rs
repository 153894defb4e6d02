//! Random sampling helpers for ray tracing.
//!
//! Every function takes the caller's random source explicitly rather than
//! touching shared state, so the render loop stays parallel-safe and a render
//! is reproducible for a given seed. Workers seed their own ChaCha generator;
//! see [`crate::camera::Camera::render`].

use glam::Vec3A;
use rand::Rng;

/// Generate a random f32 in [min, max)
pub fn random_f32_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Generate a random Vec3A with components in [0.0, 1.0)
pub fn random_vec3a<R: Rng>(rng: &mut R) -> Vec3A {
    Vec3A::new(rng.random(), rng.random(), rng.random())
}

/// Generate random unit vector uniformly distributed on the unit sphere.
///
/// Samples a uniform angle and a uniform z, then maps the cylinder onto the
/// sphere; avoids the rejection loop of the naive in-sphere method.
pub fn random_unit_vector<R: Rng>(rng: &mut R) -> Vec3A {
    let theta = 2.0 * std::f32::consts::PI * rng.random::<f32>();
    let z = 2.0 * rng.random::<f32>() - 1.0;
    let r = (1.0 - z * z).sqrt();
    Vec3A::new(r * theta.cos(), r * theta.sin(), z)
}

/// Generate a random vector on the hemisphere oriented by the given normal.
pub fn random_on_hemisphere<R: Rng>(rng: &mut R, normal: Vec3A) -> Vec3A {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Generate a random point inside the unit disk using rejection sampling.
pub fn random_in_unit_disk<R: Rng>(rng: &mut R) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a random RGB color with components in [0.0, 1.0).
pub fn random_color<R: Rng>(rng: &mut R) -> Vec3A {
    random_vec3a(rng)
}

/// Generate a random RGB color with components in [min, max).
pub fn random_color_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn unit_vectors_have_unit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn hemisphere_samples_face_the_normal() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let normal = Vec3A::Y;
        for _ in 0..100 {
            assert!(random_on_hemisphere(&mut rng, normal).dot(normal) > 0.0);
        }
    }

    #[test]
    fn disk_samples_stay_in_plane_and_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(random_vec3a(&mut a), random_vec3a(&mut b));
        }
    }
}
