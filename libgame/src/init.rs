use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{CellState, Grid};

/// Builds a grid from a row-major outcome sequence: cell `(x, y)` gets item `y * width + x`.
///
/// # Panics
///
/// If `states` yields fewer than `width * height` items.
pub fn initialize<I>(width: usize, height: usize, states: I) -> Grid
where
    I: IntoIterator<Item = CellState>,
{
    Grid::from_states(width, height, states)
}

/// An endless stream of weighted picks, `Alive` with probability `alive_probability`.
pub fn random_states<R>(rng: &mut R, alive_probability: f64) -> impl Iterator<Item = CellState>
where
    R: Rng,
{
    std::iter::repeat_with(move || CellState::from(rng.random_bool(alive_probability)))
}

pub fn random_grid<R>(width: usize, height: usize, alive_probability: f64, rng: &mut R) -> Grid
where
    R: Rng,
{
    initialize(width, height, random_states(rng, alive_probability))
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
