use std::{fmt, ops::Index, str::FromStr};

use anyhow::{bail, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::pos::Position;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum CellState {
    Alive,

    #[default]
    Empty,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn glyph(self) -> char {
        match self {
            CellState::Alive => '+',
            CellState::Empty => '.',
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Empty
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Position,
    pub state: CellState,
}

/// A fixed-size, row-major grid of cells.
///
/// Every cell remembers its own position, which always matches its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_states(width, height, std::iter::repeat(CellState::Empty))
    }

    /// Fills the grid row by row from `states`, taking exactly `width * height` items.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or `states` runs out early.
    pub fn from_states<I>(width: usize, height: usize, states: I) -> Self
    where
        I: IntoIterator<Item = CellState>,
    {
        assert!(
            width > 0 && height > 0,
            "Grid dimensions must be non-zero, got {width}x{height}"
        );

        let cells = (0..height)
            .cartesian_product(0..width)
            .zip(states)
            .map(|((y, x), state)| Cell {
                pos: Position { x, y },
                state,
            })
            .collect_vec();

        assert_eq!(
            cells.len(),
            width * height,
            "State sequence too short for a {width}x{height} grid"
        );

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell<P>(&self, pos: P) -> Option<&Cell>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index)
    }

    pub fn state<P>(&self, pos: P) -> Option<CellState>
    where
        P: Into<Position>,
    {
        self.cell(pos).map(|cell| cell.state)
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();

        if x >= self.width || y >= self.height {
            return None;
        }

        Some(x + (y * self.width))
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        self.cell(pos)
            .unwrap_or_else(|| panic!("{pos:?} is outside a {}x{} grid", self.width, self.height))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }

            for cell in row {
                write!(f, "{}", cell.state.glyph())?;
            }
        }

        Ok(())
    }
}

/// Parses rows of `+`, `#` or `O` (alive) and `.` or `_` (empty).
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect_vec();

        ensure!(!rows.is_empty(), "Grid pattern has no rows");

        let width = rows[0].chars().count();
        let mut states = Vec::with_capacity(width * rows.len());

        for (y, row) in rows.iter().enumerate() {
            ensure!(
                row.chars().count() == width,
                "Row {y} is {} cells wide, expected {width}",
                row.chars().count()
            );

            for (x, glyph) in row.chars().enumerate() {
                let state = match glyph {
                    '+' | '#' | 'O' => CellState::Alive,
                    '.' | '_' => CellState::Empty,
                    _ => bail!("Unexpected glyph {glyph:?} at ({x}, {y})"),
                };
                states.push(state);
            }
        }

        Ok(Self::from_states(width, rows.len(), states))
    }
}
