//! Command-line arguments.

use clap::Parser;
use ivar_renderer::Config;
use std::path::PathBuf;

/// Render the random spheres scene with the Ivar path tracer.
#[derive(Parser, Debug)]
#[command(name = "ivar", version, about)]
pub struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub spp: Option<u32>,

    /// Maximum bounces per path
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Seed for scene construction and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lens aperture diameter
    #[arg(long)]
    pub aperture: Option<f32>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Progress report interval in milliseconds
    #[arg(long, default_value_t = 500)]
    pub progress_ms: u64,
}

impl Args {
    /// Apply flag overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        let render = &mut config.render;
        if let Some(width) = self.width {
            render.width = width;
        }
        if let Some(height) = self.height {
            render.height = height;
        }
        if let Some(spp) = self.spp {
            render.samples_per_pixel = spp;
        }
        if let Some(max_depth) = self.max_depth {
            render.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            render.seed = seed;
        }
        if let Some(aperture) = self.aperture {
            config.camera.aperture = aperture;
        }
        config
    }
}
