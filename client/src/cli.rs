use std::{
    io,
    process::exit,
    sync::{Arc, RwLock},
    time::Duration,
};

use anyhow::{Context, bail, ensure};
use tracing::error;

use crate::{
    State, read_state,
    ticker::{self, TickerHost},
    write_state,
};

pub fn run_cli(state_arc: Arc<RwLock<State>>) {
    for line_res in io::stdin().lines() {
        let line = match line_res {
            Ok(line) => line,
            Err(e) => {
                error!("reading stdin: {e}");
                break;
            }
        };

        match handle_cmd(&state_arc, line.split_whitespace()) {
            Ok(reply) => println!("{reply}"),
            Err(e) => eprintln!("! {e:#}"),
        }
    }
}

fn handle_cmd<'a, I>(state_arc: &Arc<RwLock<State>>, mut args: I) -> anyhow::Result<String>
where
    I: Iterator<Item = &'a str>,
{
    match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = write_state(state_arc)?;
            for _ in 0..times {
                state.board.tick();
            }
        }

        "run" => {
            let rate = match args.next() {
                Some(rate) => rate.parse::<u64>()?,
                None => read_state(state_arc)?.config.tick_millis,
            };
            ensure!(rate > 0, "Tick rate must be positive");

            write_state(state_arc)?.config.tick_millis = rate;
            ticker::start(state_arc, Duration::from_millis(rate))?;
        }

        "stop" => {
            if !ticker::stop(state_arc)? {
                bail!("Not running");
            }
        }

        "rate" => {
            let rate = args
                .next()
                .context("missing rate")?
                .parse::<u64>()?;
            ensure!(rate > 0, "Tick rate must be positive");

            let mut state = write_state(state_arc)?;
            let host = state.ticker.as_mut().context("Not running")?;
            ensure!(host.set_rate(rate), "Ticker has stopped");
            state.config.tick_millis = rate;
        }

        "random" => {
            let seed = args.next().map(str::parse::<u64>).transpose()?;

            let seed = write_state(state_arc)?.reseed(seed);
            return Ok(format!("OK seed {seed}"));
        }

        "status" => {
            let state = read_state(state_arc)?;
            let board = &state.board;

            return Ok(format!(
                "generation {} population {}/{} rule {} {}",
                board.generation(),
                board.population(),
                board.grid().cells().len(),
                board.rule(),
                if state.ticker.as_ref().is_some_and(TickerHost::is_running) {
                    "running"
                } else {
                    "stopped"
                },
            ));
        }

        "exit" => {
            exit(0);
        }

        _ => bail!("Unknown command"),
    }

    Ok("OK".to_owned())
}
