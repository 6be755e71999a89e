//! Ivar math - vector algebra and sampling for the CPU path tracer.
//!
//! `Vec3` is glam's three-component f32 vector and is used interchangeably
//! as a point, a direction and a linear RGB color. Everything the renderer
//! needs beyond glam lives here:
//!
//! - [`Interval`] for ray parameter windows
//! - random samplers driven by an explicit [`rand::RngCore`]
//! - reflection, refraction and Schlick's Fresnel approximation

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod optics;
mod sampling;

pub use interval::Interval;
pub use optics::{reflect, refract, schlick};
pub use sampling::{
    gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec3, random_vec3_range, stream_rng,
};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;
