//! Render configuration.
//!
//! A [`Config`] bundles the integrator settings and camera parameters. It
//! can be loaded from JSON where every field is optional:
//!
//! ```json
//! {
//!     "render": { "width": 640, "height": 360, "samples_per_pixel": 32 },
//!     "camera": { "look_from": [13.0, 2.0, 3.0], "vfov": 20.0 }
//! }
//! ```

use crate::{
    error::{ConfigError, ConfigResult},
    Camera, CameraSettings, Interval,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed used when none is given, so plain runs are reproducible.
pub const DEFAULT_SEED: u64 = 0x1f5e_ed00;

/// Integrator and output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of surface interactions per path
    pub max_depth: u32,
    /// Base seed for every random stream
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            samples_per_pixel: 64,
            max_depth: 50,
            seed: DEFAULT_SEED,
        }
    }
}

impl RenderSettings {
    /// Width / height of the output image.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

/// Complete configuration for one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderSettings,
    pub camera: CameraSettings,
}

impl Config {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Reject settings the renderer cannot honor.
    ///
    /// Lens values that would collapse the viewport are rejected. The view
    /// orientation is not checked: a `vup` parallel to the view direction
    /// renders NaN rather than failing.
    pub fn validate(&self) -> ConfigResult<()> {
        self.render.validate()?;

        let camera = &self.camera;
        check_lens("vfov", camera.vfov, Interval::new(0.0, 180.0), "in (0, 180)")?;
        check_lens("focus_dist", camera.focus_dist, POSITIVE, "positive")?;
        if camera.aperture != 0.0 {
            check_lens("aperture", camera.aperture, POSITIVE, "non-negative")?;
        }
        if let Some(value) = camera.aspect_ratio {
            check_lens("aspect_ratio", value, POSITIVE, "positive")?;
        }
        Ok(())
    }

    /// Build the camera, taking the aspect ratio from the image size unless
    /// the camera settings pin one.
    pub fn camera(&self) -> Camera {
        Camera::new(&self.camera, self.render.aspect_ratio())
    }
}

const POSITIVE: Interval = Interval::forward(0.0);

/// Accept `value` only if it lies strictly inside `range`. NaN never does.
fn check_lens(
    field: &'static str,
    value: f32,
    range: Interval,
    expected: &'static str,
) -> ConfigResult<()> {
    if range.surrounds(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLens {
            field,
            value,
            expected,
        })
    }
}
