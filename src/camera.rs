//! Camera for ray generation and scene rendering.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;

/// RGB color type using Vec3A for SIMD optimization.
type Color = Vec3A;

/// Camera owning image, sampling and lens parameters.
///
/// Thin-lens model with multi-sample antialiasing, defocus blur and
/// shutter-time sampling for motion blur. Configure the public fields, then
/// call [`Camera::render`]; derived state is computed once up front.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count (must be positive)
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces per path
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Variation angle of rays through each pixel (defocus blur control);
    /// zero gives an exact pinhole camera
    pub defocus_angle: f32,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f32,
    /// Radiance returned for rays that escape the scene
    pub background: Color,
    /// Base seed for the per-row random generators; same seed, same image
    pub seed: u64,

    /// Rendered image height, derived from width and aspect ratio
    image_height: u32,
    /// Camera position in world space (same as lookfrom)
    center: Vec3A,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: Vec3A,
    /// Offset vector from pixel to pixel horizontally
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically
    pixel_delta_v: Vec3A,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f32,
    /// Camera frame basis vector pointing right
    u: Vec3A,
    /// Camera frame basis vector pointing up
    v: Vec3A,
    /// Camera frame basis vector pointing opposite the view direction
    w: Vec3A,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: Vec3A,
    /// Defocus disk vertical radius vector
    defocus_disk_v: Vec3A,
    /// Whether derived state has been computed
    initialized: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 100 pixels wide at 1:1, 50 samples per pixel, 90 degree FOV,
    /// no defocus blur, sky-blue background.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Vec3A::new(0.70, 0.80, 1.00),
            seed: 0,
            image_height: 0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            pixel_samples_scale: 0.0,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            defocus_disk_u: Vec3A::ZERO,
            defocus_disk_v: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Rendered image height in pixels, available after rendering starts.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Renders the scene and returns a linear HDR image buffer.
    ///
    /// Rows are distributed over the rayon thread pool; each row owns a
    /// ChaCha generator seeded from the camera seed and the row index, so the
    /// output is identical for a given seed regardless of thread count.
    pub fn render(&mut self, world: &dyn Hittable) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();

        info!(
            "Rendering {}x{} at {} spp on {} CPU cores...",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(self.image_height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        let rows: Vec<Vec<Rgb<f32>>> = (0..self.image_height)
            .into_par_iter()
            .map(|j| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(j as u64));
                let row = (0..self.image_width)
                    .map(|i| {
                        let mut pixel_color = Color::ZERO;
                        for _sample in 0..self.samples_per_pixel {
                            let r = self.get_ray(i, j, &mut rng);
                            pixel_color += self.ray_color(&r, world, &mut rng);
                        }
                        pixel_color *= self.pixel_samples_scale;
                        Rgb([pixel_color.x, pixel_color.y, pixel_color.z])
                    })
                    .collect();
                pb.inc(1);
                row
            })
            .collect();

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        let mut image = ImageBuffer::new(self.image_width, self.image_height);
        for (j, row) in rows.into_iter().enumerate() {
            for (i, pixel) in row.into_iter().enumerate() {
                image.put_pixel(i as u32, j as u32, pixel);
            }
        }
        image
    }

    /// Initialize derived camera state from the current settings.
    ///
    /// # Panics
    ///
    /// Panics if `image_width` is zero; that is a construction-time
    /// programmer error, not a runtime condition.
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        assert!(self.image_width > 0, "camera image_width must be positive");

        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);
        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.center = self.lookfrom;

        // Determine viewport dimensions from the vertical FOV at focus
        // distance.
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera basis: w opposes the view direction.
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
    }

    /// Generate a primary ray through pixel (i, j).
    ///
    /// The sample point is jittered within the pixel square, the origin is
    /// offset on the defocus disk (exactly `lookfrom` for a pinhole camera),
    /// and the ray gets a uniform random shutter time in [0, 1).
    fn get_ray<R: Rng>(&self, i: u32, j: u32, rng: &mut R) -> Ray {
        let offset = self.sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let ray_direction = pixel_sample - ray_origin;
        let ray_time = rng.random::<f32>();

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Random offset within the [-0.5, 0.5] pixel square.
    fn sample_square<R: Rng>(&self, rng: &mut R) -> Vec3A {
        Vec3A::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5, 0.0)
    }

    /// Random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample<R: Rng>(&self, rng: &mut R) -> Vec3A {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Estimate the radiance carried back along a ray.
    ///
    /// Walks the path iteratively, carrying the accumulated attenuation
    /// (throughput) and the radiance gathered so far. The walk ends on a
    /// miss (background term), absorption, or depth exhaustion; depth
    /// exhaustion contributes nothing, bounding path cost.
    fn ray_color<R: Rng>(&self, r: &Ray, world: &dyn Hittable, rng: &mut R) -> Color {
        let mut ray = *r;
        let mut throughput = Color::ONE;
        let mut radiance = Color::ZERO;

        for _ in 0..self.max_depth {
            // The lower bound excludes self-intersection at the origin
            // (shadow acne).
            let Some(rec) = world.hit(&ray, Interval::new(0.001, f32::INFINITY)) else {
                radiance += throughput * self.background;
                break;
            };

            radiance += throughput * rec.material.emitted(rec.u, rec.v, rec.p);

            match rec.material.scatter(&ray, &rec, rng) {
                Some(scatter) => {
                    throughput *= scatter.attenuation;
                    ray = scatter.ray;
                }
                None => break,
            }
        }

        radiance
    }
}
