use serde::{Deserialize, Serialize};

/// Name of a module in the network
pub type ModuleName = String;

/// Closed set of module behaviours, resolved once when the graph is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Broadcaster,
    FlipFlop,
    Conjunction,
    Sink,
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModuleKind::Broadcaster => "broadcaster",
            ModuleKind::FlipFlop => "flip-flop",
            ModuleKind::Conjunction => "conjunction",
            ModuleKind::Sink => "sink",
        };
        write!(f, "{}", name)
    }
}

/// One declared module, as produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub name: ModuleName,
    pub kind: ModuleKind,
    pub destinations: Vec<ModuleName>,
}

impl ModuleRecord {
    pub fn new(name: &str, kind: ModuleKind, destinations: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            destinations: destinations.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// A binary signal travelling along one wire
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pulse {
    pub source: ModuleName,
    pub destination: ModuleName,
    /// `true` is high, `false` is low
    pub value: bool,
}

impl Pulse {
    pub fn new(source: &str, destination: &str, value: bool) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            value,
        }
    }

    pub fn low(source: &str, destination: &str) -> Self {
        Self::new(source, destination, false)
    }

    pub fn high(source: &str, destination: &str) -> Self {
        Self::new(source, destination, true)
    }

    pub fn is_high(&self) -> bool {
        self.value
    }
}

impl std::fmt::Display for Pulse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.value { "high" } else { "low" };
        write!(f, "{} -{}-> {}", self.source, level, self.destination)
    }
}
