//! Render output surfaces.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use lumen_math::Color;

use crate::error::RenderResult;

/// Destination for rendered pixels.
pub trait PixelWriter {
    /// Image size in pixels as `(nx, ny)`.
    fn resolution(&self) -> (u32, u32);

    /// Store the color of pixel `(x, y)`, `y` counting down from the top row.
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// In-memory image that can be saved as a PNG.
#[derive(Debug, Clone)]
pub struct ImageWriter {
    name: String,
    nx: u32,
    ny: u32,
    pixels: Vec<Color>,
}

impl ImageWriter {
    /// Create a black image named `name` of `nx x ny` pixels.
    pub fn new(name: impl Into<String>, nx: u32, ny: u32) -> Self {
        Self {
            name: name.into(),
            nx,
            ny,
            pixels: vec![Color::BLACK; nx as usize * ny as usize],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.nx as usize + x as usize
    }

    /// Encode to 8-bit RGB, clamping every channel to `[0, 255]`.
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.nx, self.ny, |x, y| image::Rgb(self.pixel(x, y).to_rgb8()))
    }

    /// Save as `<dir>/<name>.png`, creating `dir` if needed.
    pub fn write_to_file(&self, dir: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.png", self.name));
        self.to_rgb8().save(&path)?;
        info!("Wrote {}x{} image to {}", self.nx, self.ny, path.display());
        Ok(path)
    }
}

impl PixelWriter for ImageWriter {
    fn resolution(&self) -> (u32, u32) {
        (self.nx, self.ny)
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }
}
