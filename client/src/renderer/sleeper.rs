use std::time::{Duration, Instant};

pub struct Sleeper {
    pub target_delta_time: Duration,
    pub last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    /// Sleeps out whatever is left of the target delta since the previous call.
    /// Returns false when running late (or on the first call).
    pub fn sleep(&mut self) -> bool {
        let this_instant = Instant::now();

        let slept = match self.last_instant {
            Some(last_instant) => {
                let delta_time = this_instant - last_instant;

                if self.target_delta_time > delta_time {
                    spin_sleep::sleep(self.target_delta_time - delta_time);
                    true
                } else {
                    false
                }
            }
            None => false,
        };

        self.last_instant = Some(Instant::now());
        slept
    }
}
