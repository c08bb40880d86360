use crate::core::components::module::ModuleTable;
use crate::core::components::state_machine::apply;
use crate::core::types::{ModuleName, Pulse};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Outcome of draining one wave
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveResult {
    /// Low pulses processed, including the trigger pulse
    pub low_count: u64,
    pub high_count: u64,
    /// Modules that emitted at least one low pulse during the wave
    pub low_emitters: BTreeSet<ModuleName>,
}

impl WaveResult {
    pub fn total(&self) -> u64 {
        self.low_count + self.high_count
    }

    pub fn emitted_low(&self, name: &str) -> bool {
        self.low_emitters.contains(name)
    }
}

/// Observer called for every pulse as it is dequeued
pub trait PulseProbe {
    fn on_pulse(&mut self, pulse: &Pulse);
}

impl<F: FnMut(&Pulse)> PulseProbe for F {
    fn on_pulse(&mut self, pulse: &Pulse) {
        self(pulse)
    }
}

/// FIFO pulse queue.
///
/// Pulses produced while processing a pulse are appended to the tail, so every
/// pulse caused at step k is handled only after all other step-k pulses.
pub struct PulseScheduler {
    queue: VecDeque<Pulse>,
    sequence_counter: u64,
}

impl PulseScheduler {
    /// Create a new, empty PulseScheduler
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            sequence_counter: 0,
        }
    }

    /// Append a pulse to the tail of the queue
    pub fn schedule(&mut self, pulse: Pulse) {
        self.queue.push_back(pulse);
    }

    /// Pop the oldest pending pulse
    pub fn next_pulse(&mut self) -> Option<Pulse> {
        let pulse = self.queue.pop_front()?;
        self.sequence_counter += 1;
        Some(pulse)
    }

    /// Check if there are any pulses remaining in the queue
    pub fn has_pulses(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Pulses dequeued over the scheduler's lifetime
    pub fn processed(&self) -> u64 {
        self.sequence_counter
    }

    /// Drain one full wave starting from `entry`
    pub fn run_wave(&mut self, table: &mut ModuleTable, entry: Pulse) -> WaveResult {
        self.run_wave_with_probe(table, entry, &mut |_: &Pulse| {})
    }

    /// Drain one full wave, reporting every dequeued pulse to `probe`
    pub fn run_wave_with_probe(
        &mut self,
        table: &mut ModuleTable,
        entry: Pulse,
        probe: &mut dyn PulseProbe,
    ) -> WaveResult {
        let mut result = WaveResult::default();
        self.schedule(entry);

        while let Some(pulse) = self.next_pulse() {
            trace!("{}", pulse);
            probe.on_pulse(&pulse);

            if pulse.value {
                result.high_count += 1;
            } else {
                result.low_count += 1;
            }

            let Some(module) = table.get_mut(&pulse.destination) else {
                trace!("No module '{}', pulse absorbed", pulse.destination);
                continue;
            };

            let emitted = apply(module, &pulse);
            if emitted.iter().any(|p| !p.value) {
                result.low_emitters.insert(module.name.clone());
            }
            self.queue.extend(emitted);
        }

        result
    }
}

impl Default for PulseScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain one wave with a fresh scheduler
pub fn run_wave(table: &mut ModuleTable, entry: Pulse) -> WaveResult {
    PulseScheduler::new().run_wave(table, entry)
}
