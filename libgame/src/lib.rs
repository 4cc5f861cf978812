//! Conway's Game of Life on a bounded grid.
//!
//! Edges are clamped: cells past the border are never counted as neighbors.

pub mod board;
pub mod evolve;
pub mod grid;
pub mod init;
pub mod pos;
pub mod rule;

pub use board::Board;
pub use grid::{Cell, CellState, Grid};
pub use pos::Position;
pub use rule::Rule;
