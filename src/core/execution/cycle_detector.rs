//! Period inference from first low emissions.
//!
//! The detector records, for each watched module, the first wave in which it
//! emits a low pulse, and combines those wave indices with a least common
//! multiple. This is an approximation: it is exact only when each watched
//! module fires with a period equal to its first occurrence, which holds when
//! the network splits into independent counters that feed one terminal
//! conjunction. For arbitrary networks use
//! [`StateCycleFinder`](super::state_cycle::StateCycleFinder), which detects
//! real repetition of the full module state.

use crate::core::errors::SimulationError;
use crate::core::execution::pulse_scheduler::WaveResult;
use crate::core::graph::ModuleGraph;
use crate::core::types::{ModuleKind, ModuleName};
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of an unbounded run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// First wave (1-based) in which each watched module emitted low
    pub first_lows: BTreeMap<ModuleName, u64>,
    pub waves_run: u64,
    /// Least common multiple of `first_lows`
    pub period: u64,
}

pub struct CycleDetector {
    watched: IndexMap<ModuleName, Option<u64>>,
    waves: u64,
    max_waves: Option<u64>,
}

impl CycleDetector {
    /// Watch the given modules. At least one name is required.
    pub fn new<I, S>(watched: I) -> Result<Self, SimulationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ModuleName>,
    {
        let watched: IndexMap<ModuleName, Option<u64>> =
            watched.into_iter().map(|name| (name.into(), None)).collect();
        if watched.is_empty() {
            return Err(SimulationError::NoWatchedModules);
        }

        Ok(Self {
            watched,
            waves: 0,
            max_waves: None,
        })
    }

    /// Fail with [`SimulationError::CycleNotFound`] after this many waves
    pub fn with_max_waves(mut self, max_waves: Option<u64>) -> Self {
        self.max_waves = max_waves;
        self
    }

    /// Record the first low emission of any watched module in this wave
    pub fn observe(&mut self, wave: u64, result: &WaveResult) {
        for (name, first) in self.watched.iter_mut() {
            if first.is_none() && result.emitted_low(name) {
                debug!("Watched module '{}' first emitted low in wave {}", name, wave);
                *first = Some(wave);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.watched.values().all(Option::is_some)
    }

    /// Watched modules that have not fired yet
    pub fn pending(&self) -> Vec<ModuleName> {
        self.watched
            .iter()
            .filter(|(_, first)| first.is_none())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn first_lows(&self) -> BTreeMap<ModuleName, u64> {
        self.watched
            .iter()
            .filter_map(|(name, first)| first.map(|wave| (name.clone(), wave)))
            .collect()
    }

    pub fn waves_run(&self) -> u64 {
        self.waves
    }

    /// Combine the recorded first occurrences once every module has fired
    pub fn combined_period(&self) -> Result<u64, SimulationError> {
        if !self.is_complete() {
            return Err(SimulationError::CycleNotFound {
                max_waves: self.waves,
                pending: self.pending(),
            });
        }
        let periods: Vec<u64> = self.watched.values().flatten().copied().collect();
        lcm_all(&periods).ok_or(SimulationError::PeriodOverflow(periods))
    }

    /// Trigger waves until every watched module has fired.
    ///
    /// `trigger` runs exactly one wave. Wave indices start at 1.
    pub fn run<F>(&mut self, mut trigger: F) -> Result<PeriodReport, SimulationError>
    where
        F: FnMut() -> WaveResult,
    {
        while !self.is_complete() {
            if let Some(max) = self.max_waves {
                if self.waves >= max {
                    return Err(SimulationError::CycleNotFound {
                        max_waves: max,
                        pending: self.pending(),
                    });
                }
            }

            self.waves += 1;
            let result = trigger();
            self.observe(self.waves, &result);
        }

        let period = self.combined_period()?;
        info!("Combined period {} after {} waves", period, self.waves);

        Ok(PeriodReport {
            first_lows: self.first_lows(),
            waves_run: self.waves,
            period,
        })
    }
}

/// Choose the modules whose low emissions drive `terminal`.
///
/// `terminal` must be fed by exactly one conjunction. Each input of that
/// conjunction is watched, except single-input conjunctions (inverters), which
/// are replaced by their own input.
pub fn infer_watch_set(graph: &ModuleGraph, terminal: &str) -> Result<Vec<ModuleName>, SimulationError> {
    if !graph.contains(terminal) {
        return Err(SimulationError::UnsupportedTopology(format!(
            "module '{}' is not part of the network",
            terminal
        )));
    }

    let feeder = match graph.inputs_of(terminal) {
        [feeder] if graph.kind_of(feeder) == ModuleKind::Conjunction => feeder,
        inputs => {
            return Err(SimulationError::UnsupportedTopology(format!(
                "'{}' must be fed by exactly one conjunction, found {:?}",
                terminal, inputs
            )))
        }
    };

    let mut watched: Vec<ModuleName> = Vec::new();
    for input in graph.inputs_of(feeder) {
        let candidate = match graph.inputs_of(input) {
            [upstream] if graph.kind_of(input) == ModuleKind::Conjunction => upstream,
            _ => {
                warn!(
                    "'{}' ({}) is not an inverter, watching it directly for low pulses",
                    input,
                    graph.kind_of(input)
                );
                input
            }
        };
        if !watched.contains(candidate) {
            watched.push(candidate.clone());
        }
    }

    Ok(watched)
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple, `None` on overflow
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

pub fn lcm_all(values: &[u64]) -> Option<u64> {
    values.iter().try_fold(1u64, |acc, &value| lcm(acc, value))
}
