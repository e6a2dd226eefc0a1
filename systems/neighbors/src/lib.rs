#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that counts live cells in a Moore neighborhood.

use life_core::{CellState, Coordinate, Grid, WrapPolicy};

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Counts the live cells among the eight neighbors of `at`.
///
/// `at` may lie outside the grid; the expansion planner inspects the ring just
/// past the border this way. Each neighbor axis that falls outside the grid is either
/// wrapped with Euclidean modulo or skipped, depending on `policy`. Indices
/// already inside the grid are never remapped, so on grids narrower than three
/// cells a wrapped neighbor can alias another neighbor or `at` itself and is
/// counted once per alias.
#[must_use]
pub fn count_alive_neighbors(grid: &Grid, at: Coordinate, policy: WrapPolicy) -> u8 {
    if grid.is_empty() {
        return 0;
    }

    let (Ok(width), Ok(height)) = (
        isize::try_from(grid.width()),
        isize::try_from(grid.height()),
    ) else {
        return 0;
    };

    let mut count = 0;
    for (dx, dy) in OFFSETS {
        let Some(neighbor) = at.offset(dx, dy) else {
            continue;
        };
        let Some(x) = resolve_axis(neighbor.x(), width, policy) else {
            continue;
        };
        let Some(y) = resolve_axis(neighbor.y(), height, policy) else {
            continue;
        };

        if grid.cell(x, y).is_some_and(CellState::is_alive) {
            count += 1;
        }
    }
    count
}

fn resolve_axis(index: isize, length: isize, policy: WrapPolicy) -> Option<usize> {
    let index = if (0..length).contains(&index) {
        index
    } else {
        match policy {
            WrapPolicy::Wrap => index.rem_euclid(length),
            WrapPolicy::Ignore => return None,
        }
    };
    usize::try_from(index).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_axis_wraps_negative_indices_to_last_position() {
        assert_eq!(resolve_axis(-1, 5, WrapPolicy::Wrap), Some(4));
        assert_eq!(resolve_axis(5, 5, WrapPolicy::Wrap), Some(0));
        assert_eq!(resolve_axis(-2, 5, WrapPolicy::Wrap), Some(3));
    }

    #[test]
    fn resolve_axis_skips_outside_indices_without_wrap() {
        assert_eq!(resolve_axis(-1, 5, WrapPolicy::Ignore), None);
        assert_eq!(resolve_axis(5, 5, WrapPolicy::Ignore), None);
        assert_eq!(resolve_axis(0, 5, WrapPolicy::Ignore), Some(0));
    }

    #[test]
    fn neighbors_past_the_coordinate_range_are_skipped() {
        let grid = Grid::filled(3, 3, CellState::Alive);
        let corner = Coordinate::new(isize::MAX, isize::MAX);

        assert_eq!(count_alive_neighbors(&grid, corner, WrapPolicy::Wrap), 3);
        assert_eq!(count_alive_neighbors(&grid, corner, WrapPolicy::Ignore), 0);
    }
}
