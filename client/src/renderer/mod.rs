mod sleeper;

use std::{
    io::{self, Write},
    sync::{Arc, RwLock},
    time::Duration,
};

use anyhow::Context;
use colored::Colorize;
use libgame::{Board, CellState};
use sleeper::Sleeper;

use crate::{State, config::Config, read_state};

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

#[derive(Debug, Clone)]
pub struct Glyphs {
    alive: String,
    empty: String,
}

impl Glyphs {
    pub fn new(alive: char, empty: char, bold_alive: bool) -> Self {
        let alive = if bold_alive {
            alive.to_string().bold().to_string()
        } else {
            alive.to_string()
        };

        Self {
            alive,
            empty: empty.to_string(),
        }
    }

    fn glyph(&self, state: CellState) -> &str {
        match state {
            CellState::Alive => &self.alive,
            CellState::Empty => &self.empty,
        }
    }
}

impl From<&Config> for Glyphs {
    fn from(config: &Config) -> Self {
        Self::new(config.alive_glyph, config.empty_glyph, config.bold_alive)
    }
}

/// Redraws the board on stdout whenever it changes, at most `target_fps` times a second.
pub fn run(state_arc: Arc<RwLock<State>>) -> anyhow::Result<()> {
    let (target_fps, glyphs) = {
        let state = read_state(&state_arc)?;
        (state.config.target_fps, Glyphs::from(&state.config))
    };

    let mut sleeper = Sleeper::new(Duration::from_micros(1_000_000 / target_fps));
    let mut stdout = io::stdout();
    let mut last_frame = None;

    loop {
        let frame = render_frame(&read_state(&state_arc)?.board, &glyphs);

        if last_frame.as_ref() != Some(&frame) {
            write!(stdout, "{CLEAR_SCREEN}{frame}").context("Writing frame")?;
            stdout.flush().context("Flushing frame")?;
            last_frame = Some(frame);
        }

        sleeper.sleep();
    }
}

/// Lays rows out top to bottom, followed by a status line.
pub fn render_frame(board: &Board, glyphs: &Glyphs) -> String {
    let grid = board.grid();
    let mut frame = String::with_capacity((grid.width() + 1) * (grid.height() + 1));

    for row in grid.rows() {
        for cell in row {
            frame.push_str(glyphs.glyph(cell.state));
        }
        frame.push('\n');
    }

    frame.push_str(&format!(
        "generation {} | population {}/{} | {}\n",
        board.generation(),
        board.population(),
        grid.cells().len(),
        board.rule()
    ));

    frame
}

#[cfg(test)]
mod tests {
    use libgame::{Grid, Rule};

    use super::*;

    #[test]
    fn renders_rows_and_status() {
        let grid: Grid = ".+.\n.+.\n.+.".parse().unwrap();
        let mut board = Board::new(grid, Rule::default());
        board.tick();

        let frame = render_frame(&board, &Glyphs::new('+', '_', false));

        assert_eq!(
            frame,
            "___\n+++\n___\ngeneration 1 | population 3/9 | B3/S23\n"
        );
    }

    #[test]
    fn custom_glyphs() {
        let grid: Grid = "+.".parse().unwrap();
        let board = Board::new(grid, Rule::default());

        let frame = render_frame(&board, &Glyphs::new('#', ' ', false));
        assert!(frame.starts_with("# \n"));
    }
}
