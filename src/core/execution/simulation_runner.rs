use crate::core::components::module::ModuleTable;
use crate::core::errors::SimulationError;
use crate::core::execution::config::SimulationConfig;
use crate::core::execution::cycle_detector::{CycleDetector, PeriodReport};
use crate::core::execution::pulse_scheduler::{PulseProbe, PulseScheduler, WaveResult};
use crate::core::execution::state_cycle::{StateCycle, StateCycleFinder};
use crate::core::graph::ModuleGraph;
use crate::core::types::{ModuleKind, Pulse};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Observer trait for completed waves
pub trait WaveObserver {
    /// Called after each wave has been drained
    fn on_wave_complete(&mut self, wave: u64, result: &WaveResult);
}

/// Totals of a bounded run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedOutcome {
    pub waves: u64,
    pub total_low: u64,
    pub total_high: u64,
}

impl BoundedOutcome {
    /// `total_low * total_high`
    pub fn product(&self) -> u128 {
        u128::from(self.total_low) * u128::from(self.total_high)
    }
}

/// Owns the graph and module table and sequences waves over them
pub struct SimulationRunner {
    graph: ModuleGraph,
    config: SimulationConfig,
    initial: ModuleTable,
    table: ModuleTable,
    scheduler: PulseScheduler,
    waves_run: u64,
    observers: Vec<Box<dyn WaveObserver>>,
}

impl SimulationRunner {
    /// Create a runner; the configured entry module must be declared
    pub fn new(graph: ModuleGraph, config: SimulationConfig) -> Result<Self, SimulationError> {
        if !graph.is_declared(&config.entry_module) {
            return Err(SimulationError::MissingEntry(config.entry_module.clone()));
        }

        let initial = graph.instantiate();
        Ok(Self {
            table: initial.clone(),
            initial,
            graph,
            config,
            scheduler: PulseScheduler::new(),
            waves_run: 0,
            observers: Vec::new(),
        })
    }

    /// Parse a module list and create a runner for it
    pub fn from_text(text: &str, config: SimulationConfig) -> Result<Self, SimulationError> {
        let graph = ModuleGraph::from_text(text)?;
        Self::new(graph, config)
    }

    /// Add an observer notified after every wave
    pub fn add_observer(&mut self, observer: Box<dyn WaveObserver>) {
        self.observers.push(observer);
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    pub fn table(&self) -> &ModuleTable {
        &self.table
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Waves run since creation or the last reset
    pub fn waves_run(&self) -> u64 {
        self.waves_run
    }

    /// The canonical low pulse from the button into the entry module
    pub fn trigger_pulse(&self) -> Pulse {
        Pulse::low(&self.config.button_name, &self.config.entry_module)
    }

    /// Restore the initial module state and wave counter
    pub fn reset(&mut self) {
        self.table = self.initial.clone();
        self.waves_run = 0;
    }

    /// Run one wave from the button
    pub fn press_button(&mut self) -> WaveResult {
        self.press_button_with_probe(&mut |_: &Pulse| {})
    }

    /// Run one wave from the button, reporting each pulse to `probe`
    pub fn press_button_with_probe(&mut self, probe: &mut dyn PulseProbe) -> WaveResult {
        let trigger = self.trigger_pulse();
        let result = self.scheduler.run_wave_with_probe(&mut self.table, trigger, probe);
        self.waves_run += 1;

        debug!(
            "Wave {}: {} low, {} high, low emitters {:?}",
            self.waves_run, result.low_count, result.high_count, result.low_emitters
        );
        self.notify_wave_complete(&result);

        result
    }

    fn notify_wave_complete(&mut self, result: &WaveResult) {
        for observer in &mut self.observers {
            observer.on_wave_complete(self.waves_run, result);
        }
    }

    /// Run the configured number of waves from the current state
    pub fn run_bounded(&mut self) -> BoundedOutcome {
        self.run_bounded_waves(self.config.bounded_waves)
    }

    /// Run exactly `waves` waves from the current state, summing pulse counts
    pub fn run_bounded_waves(&mut self, waves: u64) -> BoundedOutcome {
        let mut outcome = BoundedOutcome {
            waves,
            total_low: 0,
            total_high: 0,
        };

        for _ in 0..waves {
            let result = self.press_button();
            outcome.total_low += result.low_count;
            outcome.total_high += result.high_count;
        }

        info!(
            "Bounded run of {} waves: {} low, {} high",
            waves, outcome.total_low, outcome.total_high
        );
        outcome
    }

    /// Reset, then press the button until every watched module has emitted a
    /// low pulse, and combine the first occurrences with an LCM.
    ///
    /// Bounded by `max_waves` from the configuration.
    pub fn find_period<S: AsRef<str>>(&mut self, watched: &[S]) -> Result<PeriodReport, SimulationError> {
        for name in watched {
            let name = name.as_ref();
            if !self.graph.contains(name) {
                return Err(SimulationError::UnknownWatchedModule(name.to_string()));
            }
            if self.graph.kind_of(name) == ModuleKind::Sink {
                warn!("Watched module '{}' is a sink and never emits", name);
            }
        }

        let mut detector = CycleDetector::new(watched.iter().map(|name| name.as_ref().to_string()))?
            .with_max_waves(self.config.max_waves);

        self.reset();
        detector.run(|| self.press_button())
    }

    /// Reset, then press the button until the full module state repeats
    pub fn find_state_cycle(&mut self) -> Result<StateCycle, SimulationError> {
        let mut finder = StateCycleFinder::new().with_max_waves(self.config.max_waves);

        self.reset();
        let initial = self.table.snapshot();
        finder.run(initial, || {
            self.press_button();
            self.table.snapshot()
        })
    }
}
