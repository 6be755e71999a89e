//! Error types for configuration and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("samples_per_pixel must be at least 1")]
    ZeroSamples,

    #[error("max_depth must be at least 1")]
    ZeroDepth,

    #[error("camera.{field} must be {expected} (got {value})")]
    InvalidLens {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by the render driver.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("framebuffer is {actual:?} but settings ask for {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("render thread panicked")]
    WorkerPanicked,

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to spawn render thread: {0}")]
    Spawn(#[source] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
