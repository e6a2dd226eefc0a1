#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides whether a grid must grow before it is stepped.
//!
//! A cell just outside the border does not exist, so it can never be born on
//! a fixed grid. The planner scans that ring (one cell past each corner, to
//! catch diagonal births) and reports which edges need a fresh column or row
//! of dead cells so the following step can evaluate the birth.

use life_core::{CellState, Coordinate, ExpansionVerdict, Grid, NeighborCounts, Rules, WrapPolicy};
use life_system_neighbors::count_alive_neighbors;

/// Expansion planner bound to the birth counts of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpansionPlanner {
    birth: NeighborCounts,
}

impl Default for ExpansionPlanner {
    fn default() -> Self {
        Self::new(Rules::CONWAY)
    }
}

impl ExpansionPlanner {
    /// Creates a planner that looks for births under `rules`.
    #[must_use]
    pub const fn new(rules: Rules) -> Self {
        Self { birth: rules.birth }
    }

    /// Computes the per-edge verdict for `grid`.
    #[must_use]
    pub fn plan(&self, grid: &Grid) -> ExpansionVerdict {
        plan_expansion(grid, self.birth)
    }
}

/// Reports which edges of `grid` must grow to admit births under `birth`.
///
/// Returns [`ExpansionVerdict::NONE`] for an empty grid.
#[must_use]
pub fn plan_expansion(grid: &Grid, birth: NeighborCounts) -> ExpansionVerdict {
    if grid.is_empty() {
        return ExpansionVerdict::NONE;
    }

    let (Ok(width), Ok(height)) = (
        isize::try_from(grid.width()),
        isize::try_from(grid.height()),
    ) else {
        return ExpansionVerdict::NONE;
    };

    let births_at = |x: isize, y: isize| {
        birth.contains(count_alive_neighbors(
            grid,
            Coordinate::new(x, y),
            WrapPolicy::Ignore,
        ))
    };

    let mut verdict = ExpansionVerdict::NONE;
    for y in -1..=height {
        verdict.left |= births_at(-1, y);
        verdict.right |= births_at(width, y);
    }
    for x in -1..=width {
        verdict.top |= births_at(x, -1);
        verdict.bottom |= births_at(x, height);
    }
    verdict
}

/// Grows `grid` by one dead column or row on every edge flagged in `verdict`.
///
/// Columns are added first (left, then right) so the new top and bottom rows
/// span the widened grid. An empty grid stays empty.
#[must_use]
pub fn apply_expansion(grid: &Grid, verdict: ExpansionVerdict) -> Grid {
    if grid.is_empty() || !verdict.any() {
        return grid.clone();
    }

    let left = usize::from(verdict.left);
    let top = usize::from(verdict.top);
    let width = grid.width() + left + usize::from(verdict.right);
    let height = grid.height() + top + usize::from(verdict.bottom);

    Grid::from_fn(width, height, |x, y| {
        match (x.checked_sub(left), y.checked_sub(top)) {
            (Some(x), Some(y)) => grid.cell(x, y).unwrap_or(CellState::Dead),
            _ => CellState::Dead,
        }
    })
}
