//! Ivar - CPU path tracing.
//!
//! A Monte Carlo path tracer over implicit spheres with diffuse, metal and
//! glass materials, a thin-lens camera and a column-parallel render driver.
//!
//! # Example
//!
//! ```no_run
//! use ivar_renderer::{random_scene, render, Config, SCENE_STREAM};
//! use ivar_math::stream_rng;
//!
//! let config = Config::default();
//! let scene = random_scene(&mut stream_rng(config.render.seed, SCENE_STREAM));
//! let image = render(&scene, &config.camera(), &config.render)?;
//! let rgba = image.to_rgba_bytes();
//! # Ok::<(), ivar_renderer::RenderError>(())
//! ```

mod camera;
mod config;
mod driver;
mod error;
mod framebuffer;
mod hittable;
mod material;
mod ray;
mod renderer;
mod scene;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use config::{Config, RenderSettings, DEFAULT_SEED};
pub use driver::{render, render_into, spawn_render, RenderHandle, RenderStats};
pub use error::{ConfigError, ConfigResult, RenderError, RenderResult};
pub use framebuffer::{Framebuffer, Rgba8};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, MaterialId, Metal, ScatterResult};
pub use ray::Ray;
pub use renderer::{finalize_color, linear_to_gamma, ray_color, render_pixel, sky_gradient, T_MIN};
pub use scene::{random_scene, Scene, SCENE_STREAM};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from ivar_math
pub use ivar_math::{Color, Interval, Vec3};
