use crate::Chronometer;
use std::fmt::Display;

#[derive(Clone, Copy)]
pub struct Logger {
    component: &'static str,
    chronometer: Chronometer,
}

impl Logger {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            chronometer: Chronometer::new(),
        }
    }

    pub fn log(&self, value: impl Display) {
        println!("{} ({} elapsed) [{}]", value, self.chronometer.elapsed(), self.component);
    }
}

/// Logs one event out of every `interval`.
pub struct PartialLogger<'a> {
    index: usize,
    interval: usize,
    logger: &'a Logger,
}

impl<'a> PartialLogger<'a> {
    pub fn new(interval: usize, logger: &'a Logger) -> Self {
        Self {
            index: 0,
            interval: interval.max(1),
            logger,
        }
    }

    pub fn log<D: Display>(&mut self, f: impl FnOnce(usize) -> D) -> bool {
        let logged = self.index % self.interval == 0;
        if logged {
            self.logger.log(f(self.index));
        }
        self.index += 1;
        logged
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}
