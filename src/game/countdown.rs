use std::future;
use std::time::Duration;

use tokio::time::{self, Instant};

/// The single countdown of a game. Arming always replaces the previous schedule, so two
/// countdowns can never tick at the same time.
#[derive(Debug)]
pub struct Countdown {
    tick_interval: Duration,
    next_tick: Option<Instant>,
}

impl Countdown {
    pub fn new(tick_interval: Duration) -> Self {
        Countdown {
            tick_interval,
            next_tick: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// The first tick fires one interval after `delay`.
    pub fn arm(&mut self, delay: Duration) {
        self.next_tick = Some(Instant::now() + delay + self.tick_interval);
    }

    pub fn cancel(&mut self) {
        self.next_tick = None;
    }

    /// Resolves on the next tick and schedules the following one. Pending forever while
    /// cancelled. Cancel safe: the schedule only moves once the tick has been observed.
    pub async fn tick(&mut self) {
        match self.next_tick {
            Some(deadline) => {
                time::sleep_until(deadline).await;
                self.next_tick = Some(deadline + self.tick_interval);
            }
            None => future::pending::<()>().await,
        }
    }
}
