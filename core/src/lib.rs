#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Life simulation.
//!
//! This crate defines the value types that connect the pure systems and the
//! adapters. A [`Grid`] is a dense rectangle of [`CellState`] values that is
//! never mutated once built: systems read a grid and answer with a new one.
//! [`Rules`] carries the birth and survival neighbor counts, while
//! [`ExpansionVerdict`] and [`WrapPolicy`] describe how the border of a grid
//! is treated while stepping.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod rules;

pub use rules::{NeighborCounts, RuleError, Rules, MAX_NEIGHBORS};

/// Character conventionally used for a live cell in plain-text grids.
pub const DEFAULT_LIVE_CHAR: char = '@';

/// Character conventionally used for a dead cell in plain-text grids.
pub const DEFAULT_DEAD_CHAR: char = '.';

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// The cell is populated.
    Alive,
    /// The cell is empty.
    #[default]
    Dead,
}

impl CellState {
    /// Reports whether the cell is populated.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

/// Location addressed by column and row.
///
/// Coordinates are signed so that callers can name the virtual ring of cells
/// just outside a grid's border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    x: isize,
    y: isize,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// Column of the coordinate.
    #[must_use]
    pub const fn x(&self) -> isize {
        self.x
    }

    /// Row of the coordinate.
    #[must_use]
    pub const fn y(&self) -> isize {
        self.y
    }

    /// Returns the coordinate shifted by the provided deltas, or `None` if
    /// either axis overflows.
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

/// Edges that must grow by one cell to admit births just outside a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpansionVerdict {
    /// Grow by one column on the left edge.
    pub left: bool,
    /// Grow by one column on the right edge.
    pub right: bool,
    /// Grow by one row on the top edge.
    pub top: bool,
    /// Grow by one row on the bottom edge.
    pub bottom: bool,
}

impl ExpansionVerdict {
    /// Verdict that leaves every edge untouched.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };

    /// Reports whether at least one edge must grow.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Treatment of neighbors that fall outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrapPolicy {
    /// Opposite edges are adjacent; out-of-range indices wrap around.
    Wrap,
    /// Out-of-range neighbors are skipped.
    Ignore,
}

impl WrapPolicy {
    /// Maps a wrap flag onto a policy.
    #[must_use]
    pub const fn from_wrap(wrap: bool) -> Self {
        if wrap {
            Self::Wrap
        } else {
            Self::Ignore
        }
    }

    /// Reports whether the policy wraps edges.
    #[must_use]
    pub const fn wraps(self) -> bool {
        matches!(self, Self::Wrap)
    }
}

/// Errors raised while constructing a [`Grid`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// A row does not match the length of the first row.
    #[error("row {row} has {found} cells but the grid is {expected} cells wide")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The flat cell buffer does not cover the declared dimensions.
    #[error("{cells} cells cannot fill a {width}x{height} grid")]
    CellCountMismatch {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
        /// Number of cells supplied.
        cells: usize,
    },
}

/// Dense rectangular grid of cell states stored in row-major order.
///
/// Every empty grid, whether it has no rows or only zero-length rows, is
/// normalised to the same 0x0 value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates the canonical empty grid.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    /// Creates a grid with every cell set to `state`.
    #[must_use]
    pub fn filled(width: usize, height: usize, state: CellState) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }

        Self {
            width,
            height,
            cells: vec![state; width * height],
        }
    }

    /// Creates a grid by evaluating `state` for every `(x, y)` position.
    #[must_use]
    pub fn from_fn<F>(width: usize, height: usize, mut state: F) -> Self
    where
        F: FnMut(usize, usize) -> CellState,
    {
        if width == 0 || height == 0 {
            return Self::empty();
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(state(x, y));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid from explicit rows, rejecting rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        if width == 0 {
            return Ok(Self::empty());
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Reports whether the grid holds no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Returns the state at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<CellState> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Returns the state at a signed coordinate, or `None` outside the grid.
    #[must_use]
    pub fn state_at(&self, coordinate: Coordinate) -> Option<CellState> {
        let x = usize::try_from(coordinate.x()).ok()?;
        let y = usize::try_from(coordinate.y()).ok()?;
        self.cell(x, y)
    }

    /// Returns row `y` as a slice.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[CellState]> {
        self.rows().nth(y)
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Renders the grid as text, one line per row, without a trailing newline.
    #[must_use]
    pub fn to_text(&self, live: char, dead: char) -> String {
        let mut text = String::with_capacity(self.cells.len() + self.height);
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                text.push('\n');
            }
            text.extend(row.iter().map(|cell| if cell.is_alive() { live } else { dead }));
        }
        text
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(DEFAULT_LIVE_CHAR, DEFAULT_DEAD_CHAR))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.width.checked_mul(raw.height) != Some(raw.cells.len()) {
            return Err(GridError::CellCountMismatch {
                width: raw.width,
                height: raw.height,
                cells: raw.cells.len(),
            });
        }

        if raw.width == 0 || raw.height == 0 {
            return Ok(Self::empty());
        }

        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}
