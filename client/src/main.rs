use std::{
    env, io,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread,
    time::Duration,
};

use anyhow::anyhow;
use config::Config;
use libgame::{Board, init};
use ticker::TickerHost;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod renderer;
mod ticker;

pub struct State {
    pub board: Board,
    pub config: Config,
    pub ticker: Option<TickerHost>,
}

impl State {
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let board = Board::random(
            config.width,
            config.height,
            config.alive_probability,
            &mut init::seeded_rng(seed),
            config.rule.clone(),
        );

        info!(
            width = config.width,
            height = config.height,
            seed,
            rule = %config.rule,
            population = board.population(),
            "board seeded"
        );

        Self {
            board,
            config,
            ticker: None,
        }
    }

    /// Replaces the board with a freshly seeded one of the same size, returning the seed used.
    pub fn reseed(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(rand::random);
        let grid = init::random_grid(
            self.config.width,
            self.config.height,
            self.config.alive_probability,
            &mut init::seeded_rng(seed),
        );

        self.board.reseed(grid);
        info!(seed, population = self.board.population(), "board reseeded");

        seed
    }
}

pub fn read_state(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<RwLockReadGuard<'_, State>> {
    state_arc.read().map_err(|_| anyhow!("State lock poisoned"))
}

pub fn write_state(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<RwLockWriteGuard<'_, State>> {
    state_arc.write().map_err(|_| anyhow!("State lock poisoned"))
}

fn main() -> anyhow::Result<()> {
    let config = match env::args().nth(1) {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    };

    tracing_subscriber::registry()
        .with(config.log_filter()?)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let autostart = config.autostart.then(|| Duration::from_millis(config.tick_millis));
    let state_arc = Arc::new(RwLock::new(State::new(config)));

    if let Some(interval) = autostart {
        ticker::start(&state_arc, interval)?;
    }

    let cli_state_arc = state_arc.clone();
    thread::spawn(move || cli::run_cli(cli_state_arc));

    renderer::run(state_arc)
}
