use crate::{Logger, MonotonicClock, Mutex, Notify, Panel, RunState, RwLock, Stopwatch};

pub struct State {
    stopwatch: Mutex<Stopwatch<MonotonicClock>>,
    panel: RwLock<Panel>,
    running: Notify,
    logger: Logger,
}

impl State {
    pub fn new() -> Self {
        Self {
            stopwatch: Mutex::new(Stopwatch::new(MonotonicClock::new())),
            panel: RwLock::new(Panel::default()),
            running: Notify::new(),
            logger: Logger::new("state"),
        }
    }

    async fn command(&self, name: &str, f: impl FnOnce(&mut Stopwatch<MonotonicClock>)) -> Panel {
        let mut stopwatch = self.stopwatch.lock().await;
        let previous = stopwatch.run_state();
        f(&mut *stopwatch);
        let run_state = stopwatch.run_state();
        let panel = Panel::render(run_state, stopwatch.elapsed());
        *self.panel.write().await = panel.clone();
        if previous == RunState::Stopped && run_state == RunState::Running {
            self.running.notify_waiters();
        }
        self.logger.log(format!("{}: {}", name, panel.line()));
        panel
    }

    pub async fn toggle(&self) -> Panel {
        self.command("toggle", |stopwatch| {
            stopwatch.toggle();
        })
        .await
    }

    pub async fn start(&self) -> Panel {
        self.command("start", |stopwatch| stopwatch.start()).await
    }

    pub async fn stop(&self) -> Panel {
        self.command("stop", |stopwatch| stopwatch.stop()).await
    }

    pub async fn reset(&self) -> Panel {
        self.command("reset", |stopwatch| stopwatch.reset()).await
    }

    /// Re-renders the panel from the live elapsed value. Does nothing while stopped.
    pub async fn tick(&self) -> Option<Panel> {
        let stopwatch = self.stopwatch.lock().await;
        if stopwatch.run_state() != RunState::Running {
            return None;
        }
        let panel = Panel::render(RunState::Running, stopwatch.elapsed());
        *self.panel.write().await = panel.clone();
        Some(panel)
    }

    pub async fn panel(&self) -> Panel {
        self.panel.read().await.clone()
    }

    pub async fn wait_running(&self) {
        loop {
            // Registered before the check so a start in between is not missed.
            let notified = self.running.notified();
            if self.stopwatch.lock().await.run_state() == RunState::Running {
                return;
            }
            notified.await;
        }
    }
}
