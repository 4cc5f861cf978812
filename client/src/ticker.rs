use std::{
    sync::{
        Arc, RwLock,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use libgame::CellState;
use strum::IntoEnumIterator;
use tracing::{Level, debug, error, info};

use crate::{State, write_state};

/// Handle to a thread advancing the board at a fixed interval.
/// Each tick holds the state write lock, so ticks never overlap with each other or with readers.
pub struct TickerHost {
    stop_sender: Sender<()>,
    rate_sender: Sender<u64>,
    thread: JoinHandle<()>,
}

impl TickerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, mut interval: Duration) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();
        let (rate_sender, rate_receiver) = mpsc::channel();

        let thread = thread::spawn(move || {
            info!(?interval, "ticker started");
            let mut settled = false;

            loop {
                let Ok(mut state) = write_state(&state_arc) else {
                    error!("state lock poisoned, stopping ticker");
                    break;
                };

                let changed = state.board.tick();
                log_tick(&state, changed, settled);
                settled = !changed;
                drop(state);

                if let Ok(rate) = rate_receiver.try_recv() {
                    interval = Duration::from_millis(rate);
                }

                // A dropped host counts as a stop request too.
                match stop_receiver.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            info!("ticker stopped");
        });

        Self {
            stop_sender,
            rate_sender,
            thread,
        }
    }

    /// Whether the ticking thread is still alive, it exits on its own if the state lock is poisoned.
    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }

    /// Stops the thread and waits for its last tick to finish.
    /// Must not be called while holding the state lock.
    pub fn stop(self) {
        // An error means the thread is already gone.
        let _ = self.stop_sender.send(());

        if self.thread.join().is_err() {
            error!("ticker thread panicked");
        }
    }

    /// Returns false if the thread is no longer there to pick the new rate up.
    pub fn set_rate(&mut self, rate_millis: u64) -> bool {
        self.rate_sender.send(rate_millis).is_ok()
    }
}

fn log_tick(state: &State, changed: bool, was_settled: bool) {
    let board = &state.board;

    if tracing::enabled!(Level::DEBUG) {
        let census = CellState::iter()
            .map(|cell_state| format!("{cell_state}={}", board.grid().count(cell_state)))
            .collect::<Vec<_>>()
            .join(" ");

        debug!(generation = board.generation(), %census, "tick");
    }

    if !changed && !was_settled {
        info!(
            generation = board.generation(),
            population = board.population(),
            "board settled"
        );
    }
}

/// Starts ticking every `interval`, replacing any ticker that is already running.
pub fn start(state_arc: &Arc<RwLock<State>>, interval: Duration) -> anyhow::Result<()> {
    let host = TickerHost::start(state_arc.clone(), interval);

    // The previous thread needs the lock to finish its tick, so release it before joining.
    let previous = write_state(state_arc)?.ticker.replace(host);
    if let Some(previous) = previous {
        previous.stop();
    }

    Ok(())
}

/// Stops the running ticker, returning whether there was one.
pub fn stop(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<bool> {
    let ticker = write_state(state_arc)?.ticker.take();

    Ok(match ticker {
        Some(ticker) => {
            ticker.stop();
            true
        }
        None => false,
    })
}
