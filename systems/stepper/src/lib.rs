#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that advances a grid by one generation.
//!
//! A tick optionally grows the grid using the expansion planner and then
//! applies the birth and survival rule to every cell at once, reading only
//! the pre-transition grid. Growing grids are stepped without wrapping;
//! fixed grids are treated as a torus.

use std::borrow::Cow;

use life_core::{CellState, Coordinate, ExpansionVerdict, Grid, Rules, WrapPolicy};
use life_system_expansion::{apply_expansion, ExpansionPlanner};
use life_system_neighbors::count_alive_neighbors;
use tracing::{debug, trace};

/// Grid produced by a tick together with the growth applied before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    /// Cells of the generation.
    pub grid: Grid,
    /// Edges that grew by one cell before the transition was applied.
    pub expansion: ExpansionVerdict,
}

impl Generation {
    /// Wraps an initial grid that did not result from a tick.
    #[must_use]
    pub const fn seed(grid: Grid) -> Self {
        Self {
            grid,
            expansion: ExpansionVerdict::NONE,
        }
    }
}

/// Generation stepper bound to a transition rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStepper {
    rules: Rules,
    planner: ExpansionPlanner,
}

impl GenerationStepper {
    /// Creates a stepper applying `rules`.
    #[must_use]
    pub const fn new(rules: Rules) -> Self {
        Self {
            rules,
            planner: ExpansionPlanner::new(rules),
        }
    }

    /// Rule applied by the stepper.
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Computes the generation that follows `grid`.
    ///
    /// The returned grid is at least as large as `grid` and only larger when
    /// `auto_expand` is set and the planner asked for growth.
    #[must_use]
    pub fn step(&self, grid: &Grid, auto_expand: bool) -> Grid {
        self.advance(grid, auto_expand).grid
    }

    /// Computes the generation that follows `grid`, reporting applied growth.
    #[must_use]
    pub fn advance(&self, grid: &Grid, auto_expand: bool) -> Generation {
        if grid.is_empty() {
            return Generation::seed(Grid::empty());
        }

        let expansion = if auto_expand {
            self.planner.plan(grid)
        } else {
            ExpansionVerdict::NONE
        };

        let working = if expansion.any() {
            let grown = apply_expansion(grid, expansion);
            debug!(
                left = expansion.left,
                right = expansion.right,
                top = expansion.top,
                bottom = expansion.bottom,
                width = grown.width(),
                height = grown.height(),
                "grid expanded"
            );
            Cow::Owned(grown)
        } else {
            Cow::Borrowed(grid)
        };

        let policy = WrapPolicy::from_wrap(!auto_expand);
        let next = Grid::from_fn(working.width(), working.height(), |x, y| {
            let state = working.cell(x, y).unwrap_or_default();
            // Grid dimensions come from a Vec length and always fit in isize.
            let at = Coordinate::new(x as isize, y as isize);
            self.next_state(state, count_alive_neighbors(&working, at, policy))
        });

        trace!(
            width = next.width(),
            height = next.height(),
            population = next.population(),
            ?policy,
            "generation stepped"
        );

        Generation {
            grid: next,
            expansion,
        }
    }

    /// Applies the rule to a single cell with `neighbors` live neighbors.
    #[must_use]
    pub const fn next_state(&self, state: CellState, neighbors: u8) -> CellState {
        match state {
            CellState::Alive if !self.rules.survival.contains(neighbors) => CellState::Dead,
            CellState::Dead if self.rules.birth.contains(neighbors) => CellState::Alive,
            unchanged => unchanged,
        }
    }

    /// Iterates over `seed` and every generation that follows it.
    ///
    /// The first item is the seed itself with an empty verdict. The iterator
    /// never ends; callers bound it with `take`.
    #[must_use]
    pub fn lineage(&self, seed: Grid, auto_expand: bool) -> Lineage<'_> {
        Lineage {
            stepper: self,
            auto_expand,
            seed: Some(seed),
            previous: None,
        }
    }
}

/// Sequential iterator over successive generations.
#[derive(Debug)]
pub struct Lineage<'a> {
    stepper: &'a GenerationStepper,
    auto_expand: bool,
    seed: Option<Grid>,
    previous: Option<Grid>,
}

impl Iterator for Lineage<'_> {
    type Item = Generation;

    fn next(&mut self) -> Option<Self::Item> {
        let generation = match self.previous.take() {
            Some(previous) => self.stepper.advance(&previous, self.auto_expand),
            None => Generation::seed(self.seed.take()?),
        };
        self.previous = Some(generation.grid.clone());
        Some(generation)
    }
}
