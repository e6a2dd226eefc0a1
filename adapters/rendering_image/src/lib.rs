#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Still-image backend for Life renderings.
//!
//! Writes exactly one generation to a PNG, BMP, JPEG, TIFF or PNM file. The
//! format follows the file extension.

use anyhow::{bail, ensure, Context, Result};
use image::{ImageFormat, RgbImage};
use life_rendering::{Canvas, FrameOrigin, FrameSink, Raster, RenderStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reports whether `path` names an image format this backend can write.
#[must_use]
pub fn supports(path: &Path) -> bool {
    writable_format(path).is_some()
}

fn writable_format(path: &Path) -> Option<ImageFormat> {
    match ImageFormat::from_path(path).ok()? {
        format @ (ImageFormat::Png
        | ImageFormat::Bmp
        | ImageFormat::Jpeg
        | ImageFormat::Tiff
        | ImageFormat::Pnm) => Some(format),
        _ => None,
    }
}

/// Frame sink that saves a single generation as a true-colour image.
#[derive(Debug)]
pub struct ImageSink {
    path: PathBuf,
    format: ImageFormat,
    canvas: Canvas,
    width: u32,
    height: u32,
    table: Vec<u8>,
    background: u8,
    image: Option<RgbImage>,
}

impl ImageSink {
    /// Prepares an image of `canvas` size at `path`. Nothing is written until
    /// [`FrameSink::finish`].
    pub fn create(path: &Path, canvas: Canvas, style: &RenderStyle) -> Result<Self> {
        let Some(format) = writable_format(path) else {
            bail!("cannot write '{}' as an image", path.display());
        };
        ensure!(
            canvas.width > 0 && canvas.height > 0,
            "cannot save an empty {}x{} canvas",
            canvas.width,
            canvas.height
        );
        let width = u32::try_from(canvas.width)
            .with_context(|| format!("canvas width {} is too large", canvas.width))?;
        let height = u32::try_from(canvas.height)
            .with_context(|| format!("canvas height {} is too large", canvas.height))?;

        debug!(width, height, ?format, "image sink ready");
        Ok(Self {
            path: path.to_path_buf(),
            format,
            canvas,
            width,
            height,
            table: style.color_table(),
            background: style.background_index(),
            image: None,
        })
    }

    fn rgb(&self, index: u8) -> Result<[u8; 3]> {
        let start = usize::from(index) * 3;
        match self.table.get(start..start + 3) {
            Some(&[red, green, blue]) => Ok([red, green, blue]),
            _ => bail!("palette index {index} has no colour"),
        }
    }
}

impl FrameSink for ImageSink {
    fn push(&mut self, frame: &Raster, origin: FrameOrigin) -> Result<()> {
        ensure!(
            self.image.is_none(),
            "'{}' holds a single generation; write animations as .gif",
            self.path.display()
        );
        let placed = frame.placed_on(self.canvas, origin, self.background)?;

        let mut buffer = Vec::with_capacity(placed.pixels().len() * 3);
        for &index in placed.pixels() {
            buffer.extend_from_slice(&self.rgb(index)?);
        }
        let image = RgbImage::from_raw(self.width, self.height, buffer)
            .context("pixel buffer does not match the canvas")?;
        self.image = Some(image);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        let Some(image) = self.image else {
            bail!("no generation was drawn to '{}'", self.path.display());
        };
        image
            .save_with_format(&self.path, self.format)
            .with_context(|| format!("failed to save '{}'", self.path.display()))?;
        debug!(path = %self.path.display(), "image saved");
        Ok(())
    }
}
