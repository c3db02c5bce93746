use crate::{Unit, UnitBreakdown};
use std::time::Instant;

#[derive(Clone, Copy)]
pub struct Chronometer {
    start: Instant,
}

impl Chronometer {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> String {
        let elapsed = self.start.elapsed().as_nanos() as f64 / 1_000_000.0;
        format_elapsed(&UnitBreakdown::from_millis(elapsed))
    }
}

fn format_elapsed(breakdown: &UnitBreakdown) -> String {
    format!(
        "{}:{}:{}.{}",
        breakdown.render(Unit::Hour),
        breakdown.render(Unit::Minute),
        breakdown.render(Unit::Second),
        breakdown.render(Unit::Millisecond)
    )
}
