#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! GIF backend for Life renderings.
//!
//! Every generation becomes one full-canvas frame. Rasters smaller than the
//! canvas are drawn at their [`FrameOrigin`] over the style's background so
//! that cells stay in place while an auto-expanding grid grows around them.

use anyhow::{ensure, Context, Result};
use gif::{Encoder, Frame, Repeat};
use life_rendering::{Canvas, FrameOrigin, FrameSink, Raster, RenderStyle};
use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::debug;

/// Timing and looping parameters of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifOptions {
    /// Delay between frames in hundredths of a second.
    pub delay_centis: u16,
    /// Whether the animation repeats forever.
    pub looping: bool,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            delay_centis: 1,
            looping: true,
        }
    }
}

/// Frame sink that encodes an animated GIF.
pub struct GifSink<W: Write> {
    encoder: Encoder<W>,
    width: u16,
    height: u16,
    background: u8,
    delay: u16,
    frames: usize,
}

impl GifSink<BufWriter<File>> {
    /// Creates the file at `path` and prepares it for frames of `canvas` size.
    pub fn create(
        path: &Path,
        canvas: Canvas,
        style: &RenderStyle,
        options: GifOptions,
    ) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        Self::new(BufWriter::new(file), canvas, style, options)
            .with_context(|| format!("failed to start GIF '{}'", path.display()))
    }
}

impl<W: Write> GifSink<W> {
    /// Writes the GIF header for `canvas` and the style's colour table to `writer`.
    pub fn new(
        writer: W,
        canvas: Canvas,
        style: &RenderStyle,
        options: GifOptions,
    ) -> Result<Self> {
        ensure!(
            canvas.width > 0 && canvas.height > 0,
            "cannot encode an empty {}x{} canvas",
            canvas.width,
            canvas.height
        );
        let width = u16::try_from(canvas.width)
            .with_context(|| format!("canvas width {} exceeds the GIF limit", canvas.width))?;
        let height = u16::try_from(canvas.height)
            .with_context(|| format!("canvas height {} exceeds the GIF limit", canvas.height))?;

        let mut encoder = Encoder::new(writer, width, height, &style.color_table())
            .context("failed to write GIF header")?;
        if options.looping {
            encoder
                .set_repeat(Repeat::Infinite)
                .context("failed to write loop extension")?;
        }

        debug!(width, height, delay = options.delay_centis, "GIF encoder ready");
        Ok(Self {
            encoder,
            width,
            height,
            background: style.background_index(),
            delay: options.delay_centis,
            frames: 0,
        })
    }

    /// Number of frames written so far.
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Writes the GIF trailer and returns the flushed writer.
    pub fn into_inner(self) -> Result<W> {
        let frames = self.frames;
        let mut writer = self
            .encoder
            .into_inner()
            .context("failed to write GIF trailer")?;
        writer.flush().context("failed to flush GIF output")?;
        debug!(frames, "GIF finished");
        Ok(writer)
    }
}

impl<W: Write> FrameSink for GifSink<W> {
    fn push(&mut self, frame: &Raster, origin: FrameOrigin) -> Result<()> {
        let canvas = Canvas {
            width: usize::from(self.width),
            height: usize::from(self.height),
        };
        let buffer = frame.placed_on(canvas, origin, self.background)?.into_pixels();

        let mut gif_frame = Frame::default();
        gif_frame.width = self.width;
        gif_frame.height = self.height;
        gif_frame.delay = self.delay;
        gif_frame.buffer = Cow::Owned(buffer);

        self.encoder
            .write_frame(&gif_frame)
            .with_context(|| format!("failed to write frame {}", self.frames + 1))?;
        self.frames += 1;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        let _ = self.into_inner()?;
        Ok(())
    }
}
