use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    const NEIGHBOR_RELATIVE_POSITIONS: [[isize; 2]; 8] = [
        [-1, -1],
        [-1, 0],
        [-1, 1],
        [0, -1],
        [0, 1],
        [1, -1],
        [1, 0],
        [1, 1],
    ];

    /// Moore neighbors that lie inside a `width` x `height` grid.
    /// Edges are clamped, so corner positions only get three neighbors.
    pub fn neighbors(self, width: usize, height: usize) -> impl Iterator<Item = Position> {
        Self::NEIGHBOR_RELATIVE_POSITIONS
            .into_iter()
            .filter_map(move |[offset_x, offset_y]| {
                let x = self.x.checked_add_signed(offset_x)?;
                let y = self.y.checked_add_signed(offset_y)?;

                (x < width && y < height).then_some(Position { x, y })
            })
    }
}

impl From<[usize; 2]> for Position {
    fn from(value: [usize; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [usize; 2] {
    fn from(value: Position) -> Self {
        [value.x, value.y]
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors = Position { x: 0, y: 0 }
            .neighbors(64, 32)
            .sorted_by_key(|pos| (pos.y, pos.x))
            .collect_vec();

        assert_eq!(
            neighbors,
            vec![
                Position { x: 1, y: 0 },
                Position { x: 0, y: 1 },
                Position { x: 1, y: 1 },
            ]
        );
    }

    #[test]
    fn far_corner_does_not_wrap() {
        let neighbors = Position { x: 63, y: 31 }.neighbors(64, 32).collect_vec();

        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.iter().all(|pos| pos.x >= 62 && pos.y >= 30));
    }

    #[test]
    fn edge_and_interior_counts() {
        assert_eq!(Position { x: 5, y: 0 }.neighbors(10, 10).count(), 5);
        assert_eq!(Position { x: 0, y: 5 }.neighbors(10, 10).count(), 5);
        assert_eq!(Position { x: 5, y: 5 }.neighbors(10, 10).count(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(Position { x: 0, y: 0 }.neighbors(1, 1).count(), 0);
    }
}
