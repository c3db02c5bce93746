use crate::{RunState, Unit, UnitBreakdown};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub unit: &'static str,
    pub value: String,
}

/// What the display surface shows: eleven named slots and the start/stop control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    running: bool,
    button: &'static str,
    elapsed: f64,
    slots: Vec<Slot>,
    #[serde(skip)]
    breakdown: UnitBreakdown,
}

impl Panel {
    pub fn render(run_state: RunState, elapsed: f64) -> Self {
        let breakdown = UnitBreakdown::from_millis(elapsed);
        let slots = breakdown
            .slots()
            .into_iter()
            .map(|(unit, value)| Slot { unit: unit.name(), value })
            .collect();
        Self {
            running: run_state == RunState::Running,
            button: run_state.button_label(),
            elapsed,
            slots,
            breakdown,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn button(&self) -> &str {
        self.button
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, unit: Unit) -> &str {
        let index = Unit::ALL.iter().position(|&candidate| candidate == unit).unwrap_or_default();
        &self.slots[index].value
    }

    pub fn line(&self) -> String {
        format!("[{}] {}", self.button, self.breakdown)
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::render(RunState::Stopped, 0.0)
    }
}
