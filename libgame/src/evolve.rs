#[cfg(feature = "parallel")]
use rayon::iter::{
    IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator,
};

use crate::{
    grid::{Cell, Grid},
    pos::Position,
    rule::Rule,
};

/// Live cells among the in-bounds Moore neighbors of `pos`.
pub fn neighbor_count(grid: &Grid, pos: Position) -> usize {
    pos.neighbors(grid.width(), grid.height())
        .filter_map(|neighbor| grid.state(neighbor))
        .filter(|state| state.is_alive())
        .count()
}

/// Returns the successor of `grid` without touching it.
pub fn evolve(grid: &Grid, rule: &Rule) -> Grid {
    let mut next = grid.clone();
    evolve_into(grid, &mut next, rule);
    next
}

/// Writes the successor of `current` into `next`, returning whether any cell changed.
///
/// # Panics
///
/// If the two grids differ in size.
#[cfg(feature = "parallel")]
pub fn evolve_into(current: &Grid, next: &mut Grid, rule: &Rule) -> bool {
    evolve_into_par(current, next, rule)
}

#[cfg(not(feature = "parallel"))]
pub fn evolve_into(current: &Grid, next: &mut Grid, rule: &Rule) -> bool {
    evolve_into_serial(current, next, rule)
}

pub fn evolve_into_serial(current: &Grid, next: &mut Grid, rule: &Rule) -> bool {
    assert_buffers_match(current, next);

    let mut changed = false;
    for (next_cell, cell) in next.cells_mut().iter_mut().zip(current.cells()) {
        changed |= step_cell(current, cell, next_cell, rule);
    }

    changed
}

#[cfg(feature = "parallel")]
pub fn evolve_into_par(current: &Grid, next: &mut Grid, rule: &Rule) -> bool {
    assert_buffers_match(current, next);

    // Every write goes to a distinct output cell and only `current` is read,
    // so no cell can observe a partially updated generation.
    next.cells_mut()
        .par_iter_mut()
        .zip(current.cells().par_iter())
        .map(|(next_cell, cell)| step_cell(current, cell, next_cell, rule))
        .reduce(|| false, |a, b| a || b)
}

fn step_cell(current: &Grid, cell: &Cell, next_cell: &mut Cell, rule: &Rule) -> bool {
    let next_state = rule.next_state(cell.state, neighbor_count(current, cell.pos));

    *next_cell = Cell {
        pos: cell.pos,
        state: next_state,
    };

    next_state != cell.state
}

fn assert_buffers_match(current: &Grid, next: &Grid) {
    assert!(
        current.same_dimensions(next),
        "Cannot evolve a {}x{} grid into a {}x{} buffer",
        current.width(),
        current.height(),
        next.width(),
        next.height()
    );
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        grid::CellState,
        init::{random_grid, seeded_rng},
    };

    fn grid(pattern: &str) -> Grid {
        pattern.parse().unwrap()
    }

    #[test]
    fn corner_counts_only_in_bounds_neighbors() {
        // Opposite edges are full, so any wraparound would be counted.
        let g = grid(
            "
            .+...+
            ++...+
            .....+
            ++++++
            ",
        );

        assert_eq!(neighbor_count(&g, Position { x: 0, y: 0 }), 3);
        assert_eq!(neighbor_count(&g, Position { x: 5, y: 0 }), 1);
        assert_eq!(neighbor_count(&g, Position { x: 0, y: 3 }), 1);
    }

    #[test]
    fn interior_count() {
        let g = grid(
            "
            +++
            +.+
            +++
            ",
        );

        assert_eq!(neighbor_count(&g, Position { x: 1, y: 1 }), 8);
        assert_eq!(neighbor_count(&g, Position { x: 0, y: 0 }), 2);
    }

    #[test]
    fn block_is_still() {
        let block = grid(
            "
            ......
            ......
            ..++..
            ..++..
            ......
            ......
            ",
        );

        let next = evolve(&block, &Rule::default());
        assert_eq!(next, block);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = grid(
            "
            .....
            .....
            .+++.
            .....
            .....
            ",
        );
        let vertical = grid(
            "
            .....
            ..+..
            ..+..
            ..+..
            .....
            ",
        );

        let rule = Rule::default();
        let once = evolve(&horizontal, &rule);
        assert_eq!(once, vertical);
        assert_eq!(evolve(&once, &rule), horizontal);
    }

    #[test]
    fn empty_grid_is_fixed_point() {
        let empty = Grid::new(64, 32);

        let mut next = Grid::new(64, 32);
        let changed = evolve_into(&empty, &mut next, &Rule::default());

        assert!(!changed);
        assert_eq!(next, empty);
    }

    #[test]
    fn corner_cell_cannot_be_born_from_far_edge() {
        // (0, 0) would see three live cells if edges wrapped.
        let g = grid(
            "
            ....+
            ....+
            .....
            .....
            +....
            ",
        );

        let next = evolve(&g, &Rule::default());
        assert_eq!(next.state([0, 0]), Some(CellState::Empty));
    }

    #[test]
    fn glider_walks_toward_the_edge() {
        let rule = Rule::default();
        let mut g = grid(
            "
            .+......
            ..+.....
            +++.....
            ........
            ........
            ........
            ",
        );

        for _ in 0..4 {
            g = evolve(&g, &rule);
        }

        let expected = grid(
            "
            ........
            ..+.....
            ...+....
            .+++....
            ........
            ........
            ",
        );
        assert_eq!(g, expected);
    }

    #[test]
    fn reports_changes() {
        let g = grid("...\n+++\n...");
        let mut next = g.clone();

        assert!(evolve_into_serial(&g, &mut next, &Rule::default()));
    }

    #[test]
    #[should_panic(expected = "Cannot evolve")]
    fn mismatched_buffers_panic() {
        let g = Grid::new(4, 4);
        let mut next = Grid::new(4, 5);
        evolve_into(&g, &mut next, &Rule::default());
    }

    proptest! {
        #[test]
        fn keeps_dimensions_and_positions(
            width in 1usize..24,
            height in 1usize..24,
            alive_probability in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let g = random_grid(width, height, alive_probability, &mut seeded_rng(seed));
            let next = evolve(&g, &Rule::default());

            prop_assert_eq!(next.width(), width);
            prop_assert_eq!(next.height(), height);
            for (before, after) in g.cells().iter().zip(next.cells()) {
                prop_assert_eq!(before.pos, after.pos);
            }
        }

        #[test]
        fn is_deterministic(seed in any::<u64>()) {
            let g = random_grid(20, 12, 0.35, &mut seeded_rng(seed));
            let rule = Rule::default();

            prop_assert_eq!(evolve(&g, &rule), evolve(&g.clone(), &rule));
        }

        #[test]
        fn serial_matches_default_path(seed in any::<u64>(), steps in 1usize..6) {
            let rule = Rule::default();
            let mut serial = random_grid(17, 9, 0.4, &mut seeded_rng(seed));
            let mut default_path = serial.clone();

            for _ in 0..steps {
                let mut next = serial.clone();
                let serial_changed = evolve_into_serial(&serial, &mut next, &rule);
                serial = next;

                let mut next = default_path.clone();
                let changed = evolve_into(&default_path, &mut next, &rule);
                default_path = next;

                prop_assert_eq!(serial_changed, changed);
            }

            prop_assert_eq!(serial, default_path);
        }
    }
}
