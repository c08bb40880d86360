use crate::core::graph::module_graph::{ModuleGraph, ModuleNode};
use crate::core::types::{ModuleKind, ModuleName};
use indexmap::IndexMap;

/// Per-kind module state. The variant is the module's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    Broadcaster,
    /// Starts off (low)
    FlipFlop { on: bool },
    /// Last value received from each known input, all low at start.
    /// Keyed once from the reverse-input map and never resized.
    Conjunction { memory: IndexMap<ModuleName, bool> },
    Sink,
}

impl ModuleState {
    /// Initial state for a topology node
    pub fn initial(node: &ModuleNode) -> Self {
        match node.kind {
            ModuleKind::Broadcaster => ModuleState::Broadcaster,
            ModuleKind::FlipFlop => ModuleState::FlipFlop { on: false },
            ModuleKind::Conjunction => ModuleState::Conjunction {
                memory: node.inputs.iter().map(|input| (input.clone(), false)).collect(),
            },
            ModuleKind::Sink => ModuleState::Sink,
        }
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleState::Broadcaster => ModuleKind::Broadcaster,
            ModuleState::FlipFlop { .. } => ModuleKind::FlipFlop,
            ModuleState::Conjunction { .. } => ModuleKind::Conjunction,
            ModuleState::Sink => ModuleKind::Sink,
        }
    }
}

/// A module instance: identity, wiring and mutable state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: ModuleName,
    pub destinations: Vec<ModuleName>,
    pub state: ModuleState,
}

impl Module {
    pub fn from_node(node: &ModuleNode) -> Self {
        Self {
            name: node.name.clone(),
            destinations: node.destinations.clone(),
            state: ModuleState::initial(node),
        }
    }

    pub fn kind(&self) -> ModuleKind {
        self.state.kind()
    }

    /// Stored value of a flip-flop, `None` for other kinds
    pub fn is_on(&self) -> Option<bool> {
        match &self.state {
            ModuleState::FlipFlop { on } => Some(*on),
            _ => None,
        }
    }

    /// Input memory of a conjunction, `None` for other kinds
    pub fn memory(&self) -> Option<&IndexMap<ModuleName, bool>> {
        match &self.state {
            ModuleState::Conjunction { memory } => Some(memory),
            _ => None,
        }
    }
}

/// Flattened state bits of a whole table, used for repetition detection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateSnapshot(Vec<bool>);

impl StateSnapshot {
    #[cfg(test)]
    pub(crate) fn from_bits(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }
}

/// The module state table.
///
/// Created once from a [`ModuleGraph`] and mutated in place only by the
/// pulse scheduler while a wave is drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTable {
    modules: IndexMap<ModuleName, Module>,
}

impl ModuleTable {
    pub fn from_graph(graph: &ModuleGraph) -> Self {
        Self {
            modules: graph
                .nodes()
                .map(|node| (node.name.clone(), Module::from_node(node)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Capture every flip-flop bit and conjunction memory slot in table order
    pub fn snapshot(&self) -> StateSnapshot {
        let mut bits = Vec::new();
        for module in self.modules.values() {
            match &module.state {
                ModuleState::FlipFlop { on } => bits.push(*on),
                ModuleState::Conjunction { memory } => bits.extend(memory.values().copied()),
                ModuleState::Broadcaster | ModuleState::Sink => {}
            }
        }
        StateSnapshot(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let graph = ModuleGraph::from_text("broadcaster -> a, inv\n%a -> inv\n&inv -> out\n").unwrap();
        let table = graph.instantiate();

        assert_eq!(table.len(), 4);
        assert_eq!(table.get("a").unwrap().is_on(), Some(false));
        assert_eq!(table.get("broadcaster").unwrap().kind(), ModuleKind::Broadcaster);
        assert_eq!(table.get("out").unwrap().kind(), ModuleKind::Sink);

        let memory = table.get("inv").unwrap().memory().unwrap();
        let keys: Vec<&str> = memory.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["broadcaster", "a"]);
        assert!(memory.values().all(|value| !value));
    }

    #[test]
    fn test_snapshot_changes_with_state() {
        let graph = ModuleGraph::from_text("broadcaster -> a\n%a -> out\n").unwrap();
        let mut table = graph.instantiate();
        let before = table.snapshot();

        table.get_mut("a").unwrap().state = ModuleState::FlipFlop { on: true };
        assert_ne!(before, table.snapshot());
        assert_eq!(table.snapshot().bits(), &[true]);
    }
}
