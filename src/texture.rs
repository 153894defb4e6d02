//! Surface textures sampled by materials at hit points.
//!
//! A texture is a pure function of surface (u, v) coordinates and the world
//! position of the hit. Evaluation never fails at render time: an image
//! texture whose backing file could not be decoded samples as solid cyan.

use std::fmt::Debug;
use std::sync::Arc;

use glam::Vec3A;
use image::RgbImage;
use log::warn;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Per-point surface color lookup.
///
/// Implementations must be pure functions of their inputs with no side
/// effects, and must be thread-safe for parallel rendering.
pub trait Texture: Send + Sync + Debug {
    /// Sample the texture at surface coordinates (u, v) and world point p.
    fn value(&self, u: f32, v: f32, p: Vec3A) -> Color;
}

/// Texture returning a single fixed color everywhere.
#[derive(Debug, Clone)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    /// Create a solid texture from a color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3A) -> Color {
        self.albedo
    }
}

/// 3D checkerboard alternating between two sub-textures.
///
/// The cell a point falls in is decided by the parity of
/// `floor(scale*x) + floor(scale*y) + floor(scale*z)`; even cells sample the
/// first sub-texture, odd cells the second.
#[derive(Debug)]
pub struct CheckerTexture {
    scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    /// Create a checker over two sub-textures.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is not strictly positive; a zero or negative cell
    /// frequency is a construction-time programmer error.
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        assert!(scale > 0.0, "checker scale must be positive, got {scale}");
        Self { scale, even, odd }
    }

    /// Create a checker alternating between two solid colors.
    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3A) -> Color {
        let x = (self.scale * p.x).floor() as i64;
        let y = (self.scale * p.y).floor() as i64;
        let z = (self.scale * p.z).floor() as i64;

        if (x + y + z) % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Fallback color for image textures with no pixel data (solid cyan).
const DIAGNOSTIC_COLOR: Color = Vec3A::new(0.0, 1.0, 1.0);

/// Texture sampling a decoded image by (u, v) coordinates.
///
/// Row 0 of the image is the top, so v is inverted during lookup. Coordinates
/// outside [0, 1] saturate rather than wrap.
#[derive(Debug)]
pub struct ImageTexture {
    image: Option<RgbImage>,
}

impl ImageTexture {
    /// Wrap an already-decoded image.
    pub fn new(image: RgbImage) -> Self {
        let image = if image.width() == 0 || image.height() == 0 {
            None
        } else {
            Some(image)
        };
        Self { image }
    }

    /// Decode an image file from disk.
    ///
    /// A missing or undecodable file is logged and produces a texture that
    /// samples as the diagnostic color; rendering proceeds regardless.
    pub fn open(path: &str) -> Self {
        match image::open(path) {
            Ok(decoded) => Self::new(decoded.to_rgb8()),
            Err(e) => {
                warn!("failed to load texture image '{}': {}", path, e);
                Self { image: None }
            }
        }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3A) -> Color {
        let Some(image) = &self.image else {
            return DIAGNOSTIC_COLOR;
        };

        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0); // image row 0 is the top

        let i = ((u * image.width() as f32) as u32).min(image.width() - 1);
        let j = ((v * image.height() as f32) as u32).min(image.height() - 1);

        let pixel = image.get_pixel(i, j);
        let color_scale = 1.0 / 255.0;
        Vec3A::new(
            color_scale * pixel[0] as f32,
            color_scale * pixel[1] as f32,
            color_scale * pixel[2] as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_ignores_inputs() {
        let t = SolidColor::new(Vec3A::new(0.1, 0.2, 0.3));
        assert_eq!(t.value(0.0, 0.0, Vec3A::ZERO), Vec3A::new(0.1, 0.2, 0.3));
        assert_eq!(
            t.value(0.9, 0.1, Vec3A::new(5.0, -2.0, 7.0)),
            Vec3A::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn checker_parity_flips_across_one_cell() {
        let scale = 4.0;
        let checker = CheckerTexture::from_colors(scale, Vec3A::ONE, Vec3A::ZERO);

        let a = checker.value(0.0, 0.0, Vec3A::ZERO);
        let b = checker.value(0.0, 0.0, Vec3A::new(1.0 / scale, 0.0, 0.0));
        assert_ne!(a, b);

        // Two cells over lands back on the first sub-texture.
        let c = checker.value(0.0, 0.0, Vec3A::new(2.0 / scale, 0.0, 0.0));
        assert_eq!(a, c);
    }

    #[test]
    #[should_panic(expected = "checker scale must be positive")]
    fn checker_rejects_non_positive_scale() {
        let _ = CheckerTexture::from_colors(0.0, Vec3A::ONE, Vec3A::ZERO);
    }

    #[test]
    fn missing_image_samples_as_diagnostic_color() {
        let t = ImageTexture::new(RgbImage::new(0, 0));
        assert_eq!(t.value(0.5, 0.5, Vec3A::ZERO), DIAGNOSTIC_COLOR);
    }

    #[test]
    fn image_lookup_inverts_v_and_saturates() {
        // 2x2 image: top row red/green, bottom row blue/white.
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 255, 0]));
        img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        img.put_pixel(1, 1, image::Rgb([255, 255, 255]));
        let t = ImageTexture::new(img);

        // v = 1 maps to the top row.
        let top_left = t.value(0.0, 1.0, Vec3A::ZERO);
        assert!((top_left - Vec3A::new(1.0, 0.0, 0.0)).length() < 1e-3);

        // Out-of-range coordinates clamp instead of failing.
        let clamped = t.value(3.0, -2.0, Vec3A::ZERO);
        assert!((clamped - Vec3A::ONE).length() < 1e-3);
    }
}
