//! Parallel render driver.
//!
//! The image is partitioned by column. Each rayon task owns one column
//! exclusively, draws from its own seeded random stream and writes every
//! cell of that column exactly once, so no locking is needed and a given
//! seed reproduces the same image regardless of scheduling.

use crate::{
    error::{RenderError, RenderResult},
    renderer::{finalize_color, render_pixel},
    Camera, Framebuffer, RenderSettings, Scene,
};
use ivar_math::stream_rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Summary of a finished render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    pub pixels: usize,
    pub samples_per_pixel: u32,
}

impl RenderStats {
    /// Camera paths traced per second.
    pub fn samples_per_second(&self) -> f64 {
        let samples = self.pixels as f64 * self.samples_per_pixel as f64;
        samples / self.elapsed.as_secs_f64().max(f64::EPSILON)
    }
}

/// Render the scene into a new framebuffer, blocking until done.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> RenderResult<Framebuffer> {
    settings.validate()?;
    let framebuffer = Framebuffer::new(settings.width, settings.height);
    render_into(scene, camera, settings, &framebuffer)?;
    Ok(framebuffer)
}

/// Render the scene into an existing framebuffer on the current rayon pool.
///
/// Every pixel is overwritten and progress restarts from zero. Returns only
/// after every column has been written.
pub fn render_into(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    framebuffer: &Framebuffer,
) -> RenderResult<RenderStats> {
    settings.validate()?;
    let expected = (settings.width, settings.height);
    if framebuffer.dimensions() != expected {
        return Err(RenderError::SizeMismatch {
            expected,
            actual: framebuffer.dimensions(),
        });
    }

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} on {} threads",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        settings.max_depth,
        rayon::current_num_threads()
    );

    framebuffer.reset_progress();
    let start = Instant::now();
    let report_every = (settings.width as usize / 10).max(1);

    (0..settings.width).into_par_iter().for_each(|x| {
        render_column(scene, camera, settings, framebuffer, x);

        let done = framebuffer.mark_column_done();
        if done % report_every == 0 {
            log::debug!(
                "{:.0}% of columns complete",
                100.0 * done as f32 / settings.width as f32
            );
        }
    });

    let stats = RenderStats {
        elapsed: start.elapsed(),
        pixels: settings.pixel_count(),
        samples_per_pixel: settings.samples_per_pixel,
    };
    log::info!(
        "Rendered in {:?} ({:.2} Msamples/s)",
        stats.elapsed,
        stats.samples_per_second() / 1e6
    );

    Ok(stats)
}

/// Trace every pixel of column `x` with that column's random stream.
fn render_column(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    framebuffer: &Framebuffer,
    x: u32,
) {
    let mut rng = stream_rng(settings.seed, x as u64);
    for y in 0..settings.height {
        let color = render_pixel(camera, scene, x, y, settings, &mut rng);
        framebuffer.set(x, y, finalize_color(color));
    }
}

/// A render running on a background thread.
///
/// The framebuffer may be read at any time for live display. The completion
/// flag is raised once, after every worker has finished.
pub struct RenderHandle {
    framebuffer: Arc<Framebuffer>,
    complete: Arc<AtomicBool>,
    thread: JoinHandle<RenderResult<RenderStats>>,
}

impl RenderHandle {
    /// Shared framebuffer being written by the render.
    pub fn framebuffer(&self) -> &Arc<Framebuffer> {
        &self.framebuffer
    }

    /// Fraction of columns finished, in [0, 1].
    pub fn progress(&self) -> f32 {
        self.framebuffer.progress()
    }

    /// True once the render pass finished successfully. Pixels read after
    /// observing this are final.
    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Acquire)
    }

    /// True while the background thread is still working.
    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }

    /// Wait for the render to finish.
    pub fn join(self) -> RenderResult<RenderStats> {
        self.thread.join().map_err(|_| RenderError::WorkerPanicked)?
    }
}

/// Start rendering on a background thread.
///
/// `threads` sizes a dedicated rayon pool; `None` uses the global pool.
pub fn spawn_render(
    scene: Arc<Scene>,
    camera: Camera,
    settings: RenderSettings,
    threads: Option<usize>,
) -> RenderResult<RenderHandle> {
    settings.validate()?;

    let pool = threads
        .map(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build())
        .transpose()?;

    let framebuffer = Arc::new(Framebuffer::new(settings.width, settings.height));
    let complete = Arc::new(AtomicBool::new(false));

    let thread = {
        let framebuffer = framebuffer.clone();
        let complete = complete.clone();
        std::thread::Builder::new()
            .name("ivar-render".into())
            .spawn(move || -> RenderResult<RenderStats> {
                let run = || render_into(&scene, &camera, &settings, &framebuffer);
                let stats = match &pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                }?;
                complete.store(true, Ordering::Release);
                Ok(stats)
            })
            .map_err(RenderError::Spawn)?
    };

    Ok(RenderHandle {
        framebuffer,
        complete,
        thread,
    })
}
