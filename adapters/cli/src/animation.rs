use anyhow::Result;
use life_core::{Grid, WrapPolicy};
use life_rendering::{rasterize, Canvas, FrameOrigin, FrameSink, RenderStyle};
use life_rendering_gif::{GifOptions, GifSink};
use life_rendering_image::ImageSink;
use life_system_seeding::TextFormat;
use life_system_stepper::{Generation, GenerationStepper};
use std::{io::Write, path::Path};
use tracing::info;

/// Parameters shared by every output of a run.
#[derive(Clone, Debug)]
pub(crate) struct Run {
    pub(crate) stepper: GenerationStepper,
    pub(crate) generations: usize,
    pub(crate) auto_expand: bool,
}

impl Run {
    fn policy(&self) -> WrapPolicy {
        WrapPolicy::from_wrap(!self.auto_expand)
    }

    /// Prints every generation as text, separated by blank lines.
    pub(crate) fn write_text<W: Write>(
        &self,
        seed: Grid,
        format: &TextFormat,
        out: &mut W,
    ) -> Result<()> {
        let lineage = self
            .stepper
            .lineage(seed, self.auto_expand)
            .take(self.generations);
        for (index, generation) in lineage.enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", format.render(&generation.grid))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Encodes every generation as one frame of the GIF at `path`.
    ///
    /// Wrapping grids keep their size, so frames are streamed. An expanding
    /// grid is stepped to the end first so the canvas fits the last
    /// generation and earlier frames are anchored where their cells will be.
    pub(crate) fn write_gif(&self, seed: Grid, style: &RenderStyle, path: &Path) -> Result<()> {
        if !self.auto_expand {
            let canvas = Canvas::for_grid(&seed, style);
            let mut sink = GifSink::create(path, canvas, style, GifOptions::default())?;
            let lineage = self.stepper.lineage(seed, false).take(self.generations);
            for (index, generation) in lineage.enumerate() {
                self.push(&mut sink, style, index, &generation.grid, FrameOrigin::default())?;
            }
            return sink.finish();
        }

        let generations: Vec<Generation> = self
            .stepper
            .lineage(seed, true)
            .take(self.generations)
            .collect();
        let canvas = generations
            .last()
            .map(|last| Canvas::for_grid(&last.grid, style))
            .unwrap_or_default();

        let scale = style.scale() as usize;
        let mut sink = GifSink::create(path, canvas, style, GifOptions::default())?;
        for (index, (generation, anchor)) in generations
            .iter()
            .zip(anchors(&generations))
            .enumerate()
        {
            let origin = FrameOrigin {
                left: anchor.left * scale,
                top: anchor.top * scale,
            };
            self.push(&mut sink, style, index, &generation.grid, origin)?;
        }
        sink.finish()
    }

    /// Saves the starting grid as a still image at `path`.
    pub(crate) fn write_image(&self, seed: Grid, style: &RenderStyle, path: &Path) -> Result<()> {
        let mut sink = ImageSink::create(path, Canvas::for_grid(&seed, style), style)?;
        self.push(&mut sink, style, 0, &seed, FrameOrigin::default())?;
        sink.finish()
    }

    fn push<S: FrameSink>(
        &self,
        sink: &mut S,
        style: &RenderStyle,
        index: usize,
        grid: &Grid,
        origin: FrameOrigin,
    ) -> Result<()> {
        info!("writing generation {}/{}", index + 1, self.generations);
        let raster = rasterize(grid, style, self.policy());
        sink.push(&raster, origin)
    }
}

/// Cell offsets placing each generation inside the last one.
///
/// Every column or row added on the left or top later in the lineage shifts
/// earlier generations right or down by one cell.
fn anchors(generations: &[Generation]) -> Vec<FrameOrigin> {
    let mut left = generations
        .iter()
        .filter(|generation| generation.expansion.left)
        .count();
    let mut top = generations
        .iter()
        .filter(|generation| generation.expansion.top)
        .count();

    generations
        .iter()
        .map(|generation| {
            left -= usize::from(generation.expansion.left);
            top -= usize::from(generation.expansion.top);
            FrameOrigin { left, top }
        })
        .collect()
}
