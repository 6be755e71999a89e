//! Image output.

use anyhow::{Context, Result};
use ivar_renderer::Framebuffer;
use std::path::Path;

/// Encode the framebuffer as an 8-bit RGBA PNG, top row first.
pub fn write_png(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    let (width, height) = framebuffer.dimensions();
    let image = image::RgbaImage::from_raw(width, height, framebuffer.to_rgba_bytes())
        .context("framebuffer size does not match its pixel data")?;

    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivar_renderer::Color;

    #[test]
    fn test_write_png_round_trip() {
        let fb = Framebuffer::new(3, 2);
        fb.set(0, 0, Color::new(1.0, 0.0, 0.0));
        fb.set(2, 1, Color::new(0.0, 0.0, 1.0));

        let path = std::env::temp_dir().join(format!("ivar_test_{}.png", std::process::id()));
        write_png(&fb, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.dimensions(), (3, 2));
        // Internal bottom row becomes the last image row
        assert_eq!(decoded.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(2, 0).0, [0, 0, 255, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_write_png_bad_path() {
        let fb = Framebuffer::new(1, 1);
        let path = Path::new("/definitely/not/a/dir/out.png");
        assert!(write_png(&fb, path).is_err());
    }
}
