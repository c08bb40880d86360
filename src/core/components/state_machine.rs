use crate::core::components::module::{Module, ModuleState};
use crate::core::types::Pulse;
use log::warn;

/// Apply one incoming pulse to a module, mutating its state in place.
///
/// Returns the emitted pulses in destination order.
pub fn apply(module: &mut Module, pulse: &Pulse) -> Vec<Pulse> {
    let output = match &mut module.state {
        ModuleState::Broadcaster => Some(pulse.value),
        ModuleState::FlipFlop { on } => {
            if pulse.value {
                None
            } else {
                *on = !*on;
                Some(*on)
            }
        }
        ModuleState::Conjunction { memory } => {
            match memory.get_mut(&pulse.source) {
                Some(slot) => *slot = pulse.value,
                None => warn!(
                    "Conjunction '{}' received a pulse from unknown input '{}'",
                    module.name, pulse.source
                ),
            }
            let all_high = memory.values().all(|value| *value);
            Some(!all_high)
        }
        ModuleState::Sink => None,
    };

    match output {
        Some(value) => emit(module, value),
        None => Vec::new(),
    }
}

fn emit(module: &Module, value: bool) -> Vec<Pulse> {
    module
        .destinations
        .iter()
        .map(|dest| Pulse {
            source: module.name.clone(),
            destination: dest.clone(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::ModuleGraph;

    fn module(text: &str, name: &str) -> Module {
        let graph = ModuleGraph::from_text(text).unwrap();
        graph.instantiate().get(name).unwrap().clone()
    }

    #[test]
    fn test_broadcaster_relays_value_in_order() {
        let mut b = module("broadcaster -> x, y, z", "broadcaster");
        for value in [false, true] {
            let out = apply(&mut b, &Pulse::new("button", "broadcaster", value));
            let dests: Vec<&str> = out.iter().map(|p| p.destination.as_str()).collect();
            assert_eq!(dests, vec!["x", "y", "z"]);
            assert!(out.iter().all(|p| p.value == value && p.source == "broadcaster"));
        }
    }

    #[test]
    fn test_flip_flop_ignores_high() {
        let mut ff = module("broadcaster -> a\n%a -> b", "a");
        assert!(apply(&mut ff, &Pulse::high("broadcaster", "a")).is_empty());
        assert_eq!(ff.is_on(), Some(false));
    }

    #[test]
    fn test_flip_flop_toggles_on_low() {
        let mut ff = module("broadcaster -> a\n%a -> b", "a");

        let out = apply(&mut ff, &Pulse::low("broadcaster", "a"));
        assert_eq!(out, vec![Pulse::high("a", "b")]);
        assert_eq!(ff.is_on(), Some(true));

        let out = apply(&mut ff, &Pulse::low("broadcaster", "a"));
        assert_eq!(out, vec![Pulse::low("a", "b")]);
        assert_eq!(ff.is_on(), Some(false));
    }

    #[test]
    fn test_flip_flop_returns_to_initial_after_even_lows() {
        let mut ff = module("broadcaster -> a\n%a -> b", "a");
        for n in 1..=10 {
            apply(&mut ff, &Pulse::low("broadcaster", "a"));
            apply(&mut ff, &Pulse::high("broadcaster", "a"));
            apply(&mut ff, &Pulse::low("broadcaster", "a"));
            assert_eq!(ff.is_on(), Some(false), "after {} low pairs", n);
        }
    }

    #[test]
    fn test_conjunction_low_only_when_all_high() {
        let mut conj = module("broadcaster -> a, b, c\n%a -> k\n%b -> k\n%c -> k\n&k -> out", "k");

        assert_eq!(apply(&mut conj, &Pulse::high("a", "k")), vec![Pulse::high("k", "out")]);
        assert_eq!(apply(&mut conj, &Pulse::high("b", "k")), vec![Pulse::high("k", "out")]);
        assert_eq!(apply(&mut conj, &Pulse::high("c", "k")), vec![Pulse::low("k", "out")]);

        // Any single input going low forces a high output
        assert_eq!(apply(&mut conj, &Pulse::low("b", "k")), vec![Pulse::high("k", "out")]);
        assert_eq!(conj.memory().unwrap().get("b"), Some(&false));
        assert_eq!(apply(&mut conj, &Pulse::high("b", "k")), vec![Pulse::low("k", "out")]);
    }

    #[test]
    fn test_conjunction_ignores_unknown_source() {
        let mut conj = module("broadcaster -> k\n&k -> out", "k");
        let out = apply(&mut conj, &Pulse::high("stranger", "k"));
        assert_eq!(out, vec![Pulse::high("k", "out")]);
        assert_eq!(conj.memory().unwrap().len(), 1);
    }

    #[test]
    fn test_sink_never_emits() {
        let mut sink = module("broadcaster -> out", "out");
        assert!(apply(&mut sink, &Pulse::low("broadcaster", "out")).is_empty());
        assert!(apply(&mut sink, &Pulse::high("broadcaster", "out")).is_empty());
    }
}
