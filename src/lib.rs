//! Lumenpath offline path tracer
//!
//! Monte Carlo rendering of spherical scenes with textured, emissive and
//! refractive materials, thin-lens defocus blur and shutter-time motion blur.
//! The binary adds scene presets, CLI selection and PNG/EXR/TEV output.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod random;
pub mod ray;
pub mod sphere;
pub mod texture;
