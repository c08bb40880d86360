use crate::core::components::module::StateSnapshot;
use crate::core::errors::SimulationError;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A repetition of the full module state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCycle {
    /// Wave index at which the repeating state first occurred (0 = initial state)
    pub offset: u64,
    /// Waves between the two occurrences
    pub period: u64,
}

/// Exact cycle detection by hashing full state snapshots.
///
/// Works for any network, but memory and time grow with the number of
/// distinct states visited before the first repetition.
pub struct StateCycleFinder {
    seen: HashMap<StateSnapshot, u64>,
    max_waves: Option<u64>,
}

impl StateCycleFinder {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
            max_waves: None,
        }
    }

    pub fn with_max_waves(mut self, max_waves: Option<u64>) -> Self {
        self.max_waves = max_waves;
        self
    }

    /// Distinct states recorded so far
    pub fn states_seen(&self) -> usize {
        self.seen.len()
    }

    /// Step waves until a snapshot repeats.
    ///
    /// `step` runs one wave and returns the snapshot taken after it.
    pub fn run<F>(&mut self, initial: StateSnapshot, mut step: F) -> Result<StateCycle, SimulationError>
    where
        F: FnMut() -> StateSnapshot,
    {
        self.seen.clear();
        self.seen.insert(initial, 0);
        let mut wave = 0u64;

        loop {
            if let Some(max) = self.max_waves {
                if wave >= max {
                    return Err(SimulationError::CycleNotFound {
                        max_waves: max,
                        pending: Vec::new(),
                    });
                }
            }

            wave += 1;
            let snapshot = step();
            if let Some(&previous) = self.seen.get(&snapshot) {
                let cycle = StateCycle {
                    offset: previous,
                    period: wave - previous,
                };
                info!(
                    "State after wave {} repeats wave {}: period {}",
                    wave, previous, cycle.period
                );
                return Ok(cycle);
            }
            self.seen.insert(snapshot, wave);
        }
    }
}

impl Default for StateCycleFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(bits: &[bool]) -> StateSnapshot {
        StateSnapshot::from_bits(bits.to_vec())
    }

    #[test]
    fn test_transient_prefix_before_cycle() {
        // A, then B C D C: C first appears after wave 2 and again after wave 4
        let a = state(&[false, false]);
        let mut steps = vec![
            state(&[true, false]),
            state(&[false, true]),
            state(&[true, true]),
            state(&[false, true]),
        ]
        .into_iter();

        let mut finder = StateCycleFinder::new();
        let cycle = finder.run(a, || steps.next().unwrap()).unwrap();

        assert_eq!(cycle, StateCycle { offset: 2, period: 2 });
        assert_eq!(finder.states_seen(), 4);
        assert!(steps.next().is_none());
    }

    #[test]
    fn test_return_to_initial_state() {
        let mut finder = StateCycleFinder::default();
        let cycle = finder
            .run(state(&[false]), || state(&[false]))
            .unwrap();
        assert_eq!(cycle, StateCycle { offset: 0, period: 1 });
        assert_eq!(finder.states_seen(), 1);
    }

    #[test]
    fn test_bound_reached_before_repeat() {
        let mut wave = 0u8;
        let mut finder = StateCycleFinder::new().with_max_waves(Some(5));
        let err = finder
            .run(state(&[]), || {
                wave += 1;
                state(&(0..wave).map(|_| true).collect::<Vec<_>>())
            })
            .unwrap_err();

        assert_eq!(
            err,
            SimulationError::CycleNotFound {
                max_waves: 5,
                pending: Vec::new(),
            }
        );
        assert_eq!(finder.states_seen(), 6);
    }
}
