mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use ivar_math::stream_rng;
use ivar_renderer::{random_scene, spawn_render, Config, SCENE_STREAM};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let config = args.apply(config);
    config.validate().context("invalid render configuration")?;

    log::info!("Starting Ivar (seed {})", config.render.seed);

    let start = Instant::now();
    let scene = random_scene(&mut stream_rng(config.render.seed, SCENE_STREAM));
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = config.camera();
    let handle = spawn_render(Arc::new(scene), camera, config.render, args.threads)?;

    // Stand-in for a live display: watch the shared framebuffer fill in
    let interval = Duration::from_millis(args.progress_ms.max(1));
    let mut last_report = -1.0;
    while handle.is_running() {
        std::thread::sleep(interval);
        let progress = handle.progress();
        if progress > last_report {
            log::info!("{:5.1}% complete", progress * 100.0);
            last_report = progress;
        }
    }

    let framebuffer = handle.framebuffer().clone();
    let stats = handle.join().context("render failed")?;
    log::info!(
        "Traced {} paths in {:?}",
        stats.pixels as u64 * stats.samples_per_pixel as u64,
        stats.elapsed
    );

    output::write_png(&framebuffer, &args.output)
}
