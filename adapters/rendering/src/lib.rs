#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Life adapters.
//!
//! Grids are rasterised into indexed pixels: every cell becomes a square
//! block whose palette index encodes its state and, when shading is enabled,
//! its live-neighbor count. Backends receive the colour table from the
//! [`RenderStyle`] and the frames through the [`FrameSink`] trait.

use anyhow::Result as AnyResult;
use life_core::{CellState, Coordinate, Grid, WrapPolicy, MAX_NEIGHBORS};
use life_system_neighbors::count_alive_neighbors;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Background used behind coloured frames unless another one is requested.
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb(50, 0, 0);

const BLACK: Color = Color::from_rgb(0, 0, 0);
const WHITE: Color = Color::from_rgb(255, 255, 255);

const DEFAULT_COLORS: [Color; 10] = [
    Color::from_rgb(100, 0, 0),
    Color::from_rgb(120, 0, 0),
    Color::from_rgb(140, 0, 0),
    Color::from_rgb(160, 0, 0),
    Color::from_rgb(180, 0, 0),
    Color::from_rgb(200, 20, 0),
    Color::from_rgb(220, 40, 0),
    Color::from_rgb(240, 60, 0),
    Color::from_rgb(255, 80, 0),
    Color::from_rgb(255, 120, 0),
];

const GREYSCALE_COLORS: [Color; 9] = [
    Color::from_rgb(160, 160, 160),
    Color::from_rgb(140, 140, 140),
    Color::from_rgb(120, 120, 120),
    Color::from_rgb(100, 100, 100),
    Color::from_rgb(80, 80, 80),
    Color::from_rgb(60, 60, 60),
    Color::from_rgb(40, 40, 40),
    Color::from_rgb(20, 20, 20),
    Color::from_rgb(0, 0, 0),
];

/// Smallest palette that covers every possible neighbor count.
pub const MIN_PALETTE_LEN: usize = MAX_NEIGHBORS as usize + 1;

/// Largest palette that still fits an 8-bit colour table next to the background.
pub const MAX_PALETTE_LEN: usize = 255;

/// Opaque 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `RRGGBB`, optionally prefixed with `#` and surrounded by whitespace.
    pub fn from_hex(value: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError {
            input: value.to_owned(),
        };
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_hex(value)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Error returned when a colour string is not in `#RRGGBB` form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("input '{input}' is not in #RRGGBB format")]
pub struct ColorParseError {
    input: String,
}

/// Colours assigned to live cells, indexed by live-neighbor count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteRepr", into = "PaletteRepr")]
pub enum Palette {
    /// Dark red to orange ramp.
    #[default]
    Default,
    /// Light grey to black ramp.
    Greyscale,
    /// Caller-supplied colours; entry `n` paints cells with `n` neighbors.
    Custom(Vec<Color>),
}

impl Palette {
    /// Colours of the palette in neighbor-count order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        match self {
            Self::Default => &DEFAULT_COLORS,
            Self::Greyscale => &GREYSCALE_COLORS,
            Self::Custom(colors) => colors,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum PaletteRepr {
    Named(String),
    Custom(Vec<Color>),
}

impl TryFrom<PaletteRepr> for Palette {
    type Error = RenderingError;

    fn try_from(repr: PaletteRepr) -> Result<Self, Self::Error> {
        match repr {
            PaletteRepr::Named(name) => match name.to_ascii_lowercase().as_str() {
                "default" => Ok(Self::Default),
                "greyscale" | "grayscale" => Ok(Self::Greyscale),
                _ => Err(RenderingError::UnknownPalette(name)),
            },
            PaletteRepr::Custom(colors) => Ok(Self::Custom(colors)),
        }
    }
}

impl From<Palette> for PaletteRepr {
    fn from(palette: Palette) -> Self {
        match palette {
            Palette::Default => Self::Named("default".to_owned()),
            Palette::Greyscale => Self::Named("greyscale".to_owned()),
            Palette::Custom(colors) => Self::Custom(colors),
        }
    }
}

/// How cell states map onto colours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Live cells black, dead cells white.
    Monochrome,
    /// Live cells coloured by neighbor count over a solid background.
    Colored {
        /// Colours for live cells.
        palette: Palette,
        /// Colour of dead cells.
        background: Color,
    },
}

/// Validated rendering parameters shared by every frame of an output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    scale: u32,
    shading: Shading,
}

impl RenderStyle {
    /// Creates a style, validating the scale and palette length.
    pub fn new(scale: u32, shading: Shading) -> Result<Self, RenderingError> {
        if scale == 0 {
            return Err(RenderingError::InvalidScale { scale });
        }

        if let Shading::Colored { palette, .. } = &shading {
            let found = palette.colors().len();
            if found < MIN_PALETTE_LEN {
                return Err(RenderingError::PaletteTooShort { found });
            }
            if found > MAX_PALETTE_LEN {
                return Err(RenderingError::PaletteTooLong { found });
            }
        }

        Ok(Self { scale, shading })
    }

    /// Black and white style with one pixel per cell.
    #[must_use]
    pub const fn monochrome() -> Self {
        Self {
            scale: 1,
            shading: Shading::Monochrome,
        }
    }

    /// Edge length in pixels of the block drawn for each cell.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Colour mapping of the style.
    #[must_use]
    pub const fn shading(&self) -> &Shading {
        &self.shading
    }

    /// RGB triples for every palette index the rasteriser emits.
    #[must_use]
    pub fn color_table(&self) -> Vec<u8> {
        let colors: Vec<Color> = match &self.shading {
            Shading::Monochrome => vec![BLACK, WHITE],
            Shading::Colored {
                palette,
                background,
            } => std::iter::once(*background)
                .chain(palette.colors().iter().copied())
                .collect(),
        };

        colors
            .iter()
            .flat_map(|color| [color.red(), color.green(), color.blue()])
            .collect()
    }

    /// Palette index of dead space, used to pad frames.
    #[must_use]
    pub fn background_index(&self) -> u8 {
        match &self.shading {
            Shading::Monochrome => 1,
            Shading::Colored { .. } => 0,
        }
    }

    fn index_for(
        &self,
        grid: &Grid,
        x: usize,
        y: usize,
        state: CellState,
        policy: WrapPolicy,
    ) -> u8 {
        match (&self.shading, state) {
            (Shading::Monochrome, CellState::Alive) => 0,
            (Shading::Monochrome, CellState::Dead) => 1,
            (Shading::Colored { .. }, CellState::Dead) => 0,
            (Shading::Colored { .. }, CellState::Alive) => {
                // Grid dimensions come from a Vec length and always fit in isize.
                let at = Coordinate::new(x as isize, y as isize);
                count_alive_neighbors(grid, at, policy) + 1
            }
        }
    }
}

/// Indexed image produced from a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Palette indices in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the raster, returning its palette indices.
    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Copies the raster onto a `canvas` filled with `fill`, its top-left
    /// corner at `origin`.
    pub fn placed_on(
        &self,
        canvas: Canvas,
        origin: FrameOrigin,
        fill: u8,
    ) -> Result<Self, RenderingError> {
        let fits = origin
            .left
            .checked_add(self.width)
            .is_some_and(|right| right <= canvas.width)
            && origin
                .top
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= canvas.height);
        if !fits {
            return Err(RenderingError::FrameOutsideCanvas {
                width: self.width,
                height: self.height,
                origin,
                canvas,
            });
        }

        let mut pixels = vec![fill; canvas.width * canvas.height];
        if self.width > 0 {
            for (row, line) in self.pixels.chunks(self.width).enumerate() {
                let start = (origin.top + row) * canvas.width + origin.left;
                pixels[start..start + line.len()].copy_from_slice(line);
            }
        }

        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            pixels,
        })
    }

    /// Palette index at pixel `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x).copied()
        } else {
            None
        }
    }
}

/// Rasterises `grid` with `style`.
///
/// Neighbor counts used for colouring are taken under `policy`, which should
/// match the policy the grid was stepped with.
#[must_use]
pub fn rasterize(grid: &Grid, style: &RenderStyle, policy: WrapPolicy) -> Raster {
    let scale = style.scale as usize;
    let width = grid.width() * scale;
    let height = grid.height() * scale;

    let mut pixels = Vec::with_capacity(width * height);
    for (y, row) in grid.rows().enumerate() {
        let line: Vec<u8> = row
            .iter()
            .enumerate()
            .flat_map(|(x, &state)| {
                std::iter::repeat(style.index_for(grid, x, y, state, policy)).take(scale)
            })
            .collect();
        for _ in 0..scale {
            pixels.extend_from_slice(&line);
        }
    }

    Raster {
        width,
        height,
        pixels,
    }
}

/// Pixel offset at which a frame is placed on the output canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameOrigin {
    /// Pixels between the canvas's left edge and the frame.
    pub left: usize,
    /// Pixels between the canvas's top edge and the frame.
    pub top: usize,
}

/// Pixel size of the output every frame is drawn on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Canvas {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Canvas {
    /// Smallest canvas that holds `raster`.
    #[must_use]
    pub const fn fitting(raster: &Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
        }
    }

    /// Canvas covering `grid` drawn with `style`.
    #[must_use]
    pub fn for_grid(grid: &Grid, style: &RenderStyle) -> Self {
        let scale = style.scale as usize;
        Self {
            width: grid.width() * scale,
            height: grid.height() * scale,
        }
    }
}

/// Destination for rasterised generations.
pub trait FrameSink {
    /// Appends `frame` drawn at `origin` on the output canvas.
    fn push(&mut self, frame: &Raster, origin: FrameOrigin) -> AnyResult<()>;

    /// Flushes and closes the output.
    fn finish(self) -> AnyResult<()>
    where
        Self: Sized;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// Cells must be drawn at least one pixel wide.
    #[error("scale must be positive (received {scale})")]
    InvalidScale {
        /// Provided scale that failed validation.
        scale: u32,
    },
    /// A palette must cover neighbor counts 0 through 8.
    #[error("palette needs at least 9 colours (received {found})")]
    PaletteTooShort {
        /// Number of colours supplied.
        found: usize,
    },
    /// A palette cannot exceed an 8-bit colour table.
    #[error("palette holds at most 255 colours (received {found})")]
    PaletteTooLong {
        /// Number of colours supplied.
        found: usize,
    },
    /// A frame does not fit the canvas at the requested origin.
    #[error(
        "frame of {width}x{height} pixels at ({}, {}) does not fit the {}x{} canvas",
        .origin.left,
        .origin.top,
        .canvas.width,
        .canvas.height
    )]
    FrameOutsideCanvas {
        /// Frame width in pixels.
        width: usize,
        /// Frame height in pixels.
        height: usize,
        /// Requested placement.
        origin: FrameOrigin,
        /// Canvas the frame was placed on.
        canvas: Canvas,
    },
    /// A named palette was not recognised.
    #[error("unknown palette '{0}', expected 'default', 'greyscale' or a list of colours")]
    UnknownPalette(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_and_without_hash() {
        assert_eq!(Color::from_hex("#FF8000"), Ok(Color::from_rgb(255, 128, 0)));
        assert_eq!(Color::from_hex("  0a0B0c "), Ok(Color::from_rgb(10, 11, 12)));
        assert_eq!("320000".parse::<Color>(), Ok(DEFAULT_BACKGROUND));
    }

    #[test]
    fn malformed_hex_colors_are_rejected() {
        for input in ["", "#FFF", "FF00000", "GG0000", "#12 456", "+1+2+3"] {
            assert!(Color::from_hex(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn color_displays_as_lowercase_hex() {
        assert_eq!(Color::from_rgb(255, 128, 0).to_string(), "#ff8000");
    }

    #[test]
    fn style_rejects_zero_scale() {
        assert_eq!(
            RenderStyle::new(0, Shading::Monochrome),
            Err(RenderingError::InvalidScale { scale: 0 })
        );
    }

    #[test]
    fn style_rejects_short_custom_palette() {
        let shading = Shading::Colored {
            palette: Palette::Custom(vec![WHITE; 8]),
            background: BLACK,
        };

        assert_eq!(
            RenderStyle::new(1, shading),
            Err(RenderingError::PaletteTooShort { found: 8 })
        );
    }

    #[test]
    fn builtin_palettes_cover_every_neighbor_count() {
        assert!(Palette::Default.colors().len() >= MIN_PALETTE_LEN);
        assert_eq!(Palette::Greyscale.colors().len(), MIN_PALETTE_LEN);
    }

    #[test]
    fn monochrome_table_is_black_then_white() {
        let style = RenderStyle::monochrome();

        assert_eq!(style.color_table(), vec![0, 0, 0, 255, 255, 255]);
        assert_eq!(style.background_index(), 1);
    }

    #[test]
    fn colored_table_starts_with_background() {
        let style = RenderStyle::new(
            2,
            Shading::Colored {
                palette: Palette::Greyscale,
                background: DEFAULT_BACKGROUND,
            },
        )
        .expect("valid style");
        let table = style.color_table();

        assert_eq!(table.len(), 3 * 10);
        assert_eq!(&table[..3], &[50, 0, 0]);
        assert_eq!(&table[3..6], &[160, 160, 160]);
        assert_eq!(style.background_index(), 0);
    }
}
