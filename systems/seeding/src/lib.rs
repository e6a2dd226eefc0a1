#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Construction of initial grids from random sources and from text.

use life_core::{CellState, Grid, GridError, DEFAULT_DEAD_CHAR, DEFAULT_LIVE_CHAR};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builds a `rows` x `columns` grid where each cell is alive with probability 1/2.
#[must_use]
pub fn random_grid<R>(rows: usize, columns: usize, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    Grid::from_fn(columns, rows, |_, _| CellState::from(rng.gen::<bool>()))
}

/// Builds a random grid that is reproducible from `seed`.
#[must_use]
pub fn seeded_grid(rows: usize, columns: usize, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_grid(rows, columns, &mut rng)
}

/// Parses `text` with the given live and dead characters.
///
/// Shorthand for [`TextFormat::parse`].
pub fn parse_grid(text: &str, live: char, dead: char) -> Result<Grid, GridError> {
    TextFormat::new(live, dead).parse(text)
}

/// Pair of characters used to read and write plain-text grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextFormat {
    live: char,
    dead: char,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self::new(DEFAULT_LIVE_CHAR, DEFAULT_DEAD_CHAR)
    }
}

impl TextFormat {
    /// Creates a text format from explicit characters.
    #[must_use]
    pub const fn new(live: char, dead: char) -> Self {
        Self { live, dead }
    }

    /// Character standing for a live cell.
    #[must_use]
    pub const fn live(&self) -> char {
        self.live
    }

    /// Character standing for a dead cell.
    #[must_use]
    pub const fn dead(&self) -> char {
        self.dead
    }

    /// Parses one row per line.
    ///
    /// Empty lines are dropped and both `\n` and `\r\n` line endings are
    /// accepted. Only the live character produces a live cell; every other
    /// character, the dead character included, reads as dead. Rows of unequal
    /// length are rejected.
    pub fn parse(&self, text: &str) -> Result<Grid, GridError> {
        let rows = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|ch| CellState::from(ch == self.live))
                    .collect()
            })
            .collect();
        Grid::from_rows(rows)
    }

    /// Writes `grid` with one line per row and no trailing newline.
    #[must_use]
    pub fn render(&self, grid: &Grid) -> String {
        grid.to_text(self.live, self.dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_empty_lines_and_carriage_returns() {
        let grid = parse_grid("\r\n@.\r\n\r\n.@\r\n\r\n", '@', '.').expect("rectangular");

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn render_uses_configured_characters() {
        let format = TextFormat::new('#', ' ');
        let grid = format.parse("# #\n ##").expect("rectangular");

        assert_eq!(format.render(&grid), "# #\n ##");
        assert_eq!(format.live(), '#');
        assert_eq!(format.dead(), ' ');
    }
}
