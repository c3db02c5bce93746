use crate::{PartialLogger, State};
use tokio::time::{sleep, Duration};

/// Drives the periodic update while the stopwatch runs, and parks while it is stopped.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(interval: u64) -> Self {
        Self::new(Duration::from_millis(interval))
    }

    pub async fn run(&self, state: &State, logger: &mut PartialLogger<'_>) {
        loop {
            state.wait_running().await;
            sleep(self.interval).await;
            if let Some(panel) = state.tick().await {
                logger.log(|index| format!("tick {}: {}", index, panel.line()));
            }
        }
    }
}
