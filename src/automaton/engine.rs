//! Synchronous whole-grid generation stepping

use super::presets::Seed;
use super::rules::{Rule, TransitionRule};
use super::{Grid, State};
use crate::error::CaResult;
use itertools::iproduct;
use crate::utils::GridFormatter;
use log::{debug, trace};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A cell whose value changed during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub value: State,
}

/// Mutable view of a next generation that has not been committed yet
pub struct NextGeneration<'a> {
    width: usize,
    height: usize,
    cells: &'a mut [State],
}

impl NextGeneration<'_> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<State> {
        (row < self.height && col < self.width).then(|| self.cells[row * self.width + col])
    }

    /// Overwrite a pending value; out-of-range coordinates are ignored
    pub fn set(&mut self, row: usize, col: usize, value: State) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = value;
        }
    }
}

pub type PreStepHook = Box<dyn FnMut(&Grid) + Send>;
pub type PostStepHook = Box<dyn FnMut(&Grid, &mut NextGeneration<'_>) + Send>;

/// Optional callbacks around next-generation computation
#[derive(Default)]
pub struct StepHooks {
    /// Runs before any cell is evaluated
    pub pre_step: Option<PreStepHook>,
    /// Runs on the computed buffer before it replaces the live grid
    pub post_step: Option<PostStepHook>,
}

/// Owns a grid and a rule and advances them one generation at a time
pub struct Engine<R = Rule> {
    grid: Grid,
    rule: R,
    hooks: StepHooks,
}

impl<R: TransitionRule> Engine<R> {
    pub fn new(grid: Grid, rule: R) -> Self {
        Self {
            grid,
            rule,
            hooks: StepHooks::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: StepHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for setup and seeding between steps
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    /// Replace the grid with a fresh one
    pub fn reset(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub fn seed<G: Rng>(&mut self, seed: &Seed, rng: &mut G) -> CaResult<()> {
        seed.apply(&mut self.grid, rng)
    }

    /// Advance one generation and return the cells that changed, in row-major order
    ///
    /// The next generation is computed in full against the unchanged grid,
    /// passed to the post-step hook, and only then committed. The diff is taken
    /// after the hook, so cells the hook rewrites are reported with their final
    /// values and cells it restores are not reported at all.
    pub fn step(&mut self) -> Vec<CellChange> {
        if let Some(hook) = self.hooks.pre_step.as_mut() {
            hook(&self.grid);
        }

        let (width, height) = (self.grid.width(), self.grid.height());
        let mut next: Vec<State> = iproduct!(0..height, 0..width)
            .map(|(row, col)| self.rule.next_state(&self.grid, row, col))
            .collect();

        if let Some(hook) = self.hooks.post_step.as_mut() {
            let mut view = NextGeneration {
                width,
                height,
                cells: &mut next,
            };
            hook(&self.grid, &mut view);
        }

        let changes: Vec<CellChange> = self
            .grid
            .cells()
            .iter()
            .zip(next.iter())
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(idx, (_, &value))| CellChange {
                row: idx / width,
                col: idx % width,
                value,
            })
            .collect();

        self.grid.commit(next);
        debug!(
            "Generation {} committed, {} cells changed",
            self.grid.generation(),
            changes.len()
        );
        trace!("\n{}", GridFormatter::format_grid_compact(&self.grid));

        changes
    }

    /// Advance `n` generations, returning the total number of changed cells
    pub fn step_n(&mut self, n: usize) -> usize {
        (0..n).map(|_| self.step().len()).sum()
    }
}

/// Advance independent engines by `steps` generations each, one engine per task
///
/// Each engine's own step stays single threaded.
pub fn step_ensemble<R>(engines: &mut [Engine<R>], steps: usize) -> Vec<usize>
where
    R: TransitionRule + Send,
{
    engines
        .par_iter_mut()
        .map(|engine| engine.step_n(steps))
        .collect()
}
