use crate::Clock;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

impl RunState {
    /// Label of the start/stop control for this state.
    pub fn button_label(&self) -> &'static str {
        match self {
            RunState::Stopped => "Start",
            RunState::Running => "Stop",
        }
    }
}

/// Elapsed time accumulated across start/stop cycles since the last reset.
#[derive(Debug)]
pub struct Stopwatch<C: Clock> {
    clock: C,
    run_state: RunState,
    accumulated: Duration,
    reference: Duration,
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            run_state: RunState::Stopped,
            accumulated: Duration::ZERO,
            reference: Duration::ZERO,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Ignored while already running, so the reference instant never moves mid-run.
    pub fn start(&mut self) {
        if self.run_state == RunState::Stopped {
            self.reference = self.clock.now();
            self.run_state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            self.accumulated = self.elapsed_duration();
            self.run_state = RunState::Stopped;
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.reference = Duration::ZERO;
        self.run_state = RunState::Stopped;
    }

    pub fn toggle(&mut self) -> RunState {
        match self.run_state {
            RunState::Stopped => self.start(),
            RunState::Running => self.stop(),
        }
        self.run_state
    }

    pub fn elapsed_duration(&self) -> Duration {
        match self.run_state {
            RunState::Running => self.accumulated + self.clock.now().saturating_sub(self.reference),
            RunState::Stopped => self.accumulated,
        }
    }

    /// Elapsed milliseconds, fractional.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_duration().as_nanos() as f64 / 1_000_000.0
    }
}
