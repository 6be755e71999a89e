//! Shared framebuffer written by render workers and read by presenters.
//!
//! Cells store f32 channel bits in atomics, so a display loop may read a
//! partially rendered image while workers are still writing. Each cell is
//! written by exactly one worker; no ordering between cells is implied.

use crate::Color;
use bytemuck::{Pod, Zeroable};
use ivar_math::Interval;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// One 8-bit RGBA pixel, laid out for direct upload or encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Quantize a display color: `floor(clamp(c, 0, 1) * 255.99)`, opaque.
    pub fn from_color(color: Color) -> Self {
        Self {
            r: to_byte(color.x),
            g: to_byte(color.y),
            b: to_byte(color.z),
            a: 255,
        }
    }
}

#[inline]
fn to_byte(channel: f32) -> u8 {
    (Interval::UNIT.clamp(channel) * 255.99) as u8
}

/// Fixed-size W x H color buffer with a bottom-left origin.
pub struct Framebuffer {
    width: u32,
    height: u32,
    cells: Box<[[AtomicU32; 3]]>,
    columns_done: AtomicUsize,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let cells = (0..width as usize * height as usize)
            .map(|_| [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)])
            .collect();

        Self {
            width,
            height,
            cells,
            columns_done: AtomicUsize::new(0),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y); y = 0 is the bottom row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        let [r, g, b] = &self.cells[self.index(x, y)];
        Color::new(
            f32::from_bits(r.load(Ordering::Relaxed)),
            f32::from_bits(g.load(Ordering::Relaxed)),
            f32::from_bits(b.load(Ordering::Relaxed)),
        )
    }

    /// Set the pixel at (x, y).
    pub fn set(&self, x: u32, y: u32, color: Color) {
        let [r, g, b] = &self.cells[self.index(x, y)];
        r.store(color.x.to_bits(), Ordering::Relaxed);
        g.store(color.y.to_bits(), Ordering::Relaxed);
        b.store(color.z.to_bits(), Ordering::Relaxed);
    }

    /// Record that one more column has been fully written.
    pub(crate) fn mark_column_done(&self) -> usize {
        self.columns_done.fetch_add(1, Ordering::Release) + 1
    }

    /// Start a new pass with no columns finished.
    pub(crate) fn reset_progress(&self) {
        self.columns_done.store(0, Ordering::Release);
    }

    /// Fraction of columns finished, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.width == 0 {
            return 1.0;
        }
        self.columns_done.load(Ordering::Acquire) as f32 / self.width as f32
    }

    /// Copy out all pixels in internal order (bottom row first).
    pub fn snapshot(&self) -> Vec<Color> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.get(x, y))
            .collect()
    }

    /// Convert to 8-bit RGBA with the top row first.
    pub fn to_rgba8(&self) -> Vec<Rgba8> {
        (0..self.height)
            .rev()
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| Rgba8::from_color(self.get(x, y)))
            .collect()
    }

    /// Raw RGBA bytes with the top row first (for display or saving).
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_rgba8()).to_vec()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("progress", &self.progress())
            .finish()
    }
}
