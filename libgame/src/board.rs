use std::mem;

use rand::Rng;

use crate::{
    evolve::evolve_into,
    grid::{CellState, Grid},
    init::random_grid,
    rule::Rule,
};

/// The simulation state: the current grid plus a spare buffer of the same size
/// that the next generation is written into before the two are swapped.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    spare: Grid,
    rule: Rule,
    generation: u64,
}

impl Board {
    pub fn new(grid: Grid, rule: Rule) -> Self {
        let spare = grid.clone();

        Self {
            grid,
            spare,
            rule,
            generation: 0,
        }
    }

    pub fn random<R>(
        width: usize,
        height: usize,
        alive_probability: f64,
        rng: &mut R,
        rule: Rule,
    ) -> Self
    where
        R: Rng,
    {
        Self::new(random_grid(width, height, alive_probability, rng), rule)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.count(CellState::Alive)
    }

    /// Advances one generation. Returns false once the board has stopped changing.
    pub fn tick(&mut self) -> bool {
        let changed = evolve_into(&self.grid, &mut self.spare, &self.rule);
        mem::swap(&mut self.grid, &mut self.spare);
        self.generation += 1;

        changed
    }

    /// Starts over from `grid`, which must have the same dimensions as the current one.
    pub fn reseed(&mut self, grid: Grid) {
        assert!(
            self.grid.same_dimensions(&grid),
            "Cannot reseed a {}x{} board with a {}x{} grid",
            self.grid.width(),
            self.grid.height(),
            grid.width(),
            grid.height()
        );

        self.spare = grid.clone();
        self.grid = grid;
        self.generation = 0;
    }
}
