use crate::core::components::module::ModuleTable;
use crate::core::errors::ParseError;
use crate::core::graph::validator::RecordValidator;
use crate::core::parser::parse_module_list;
use crate::core::types::{ModuleKind, ModuleName, ModuleRecord};
use indexmap::IndexMap;
use log::debug;

/// Immutable topology entry for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    pub name: ModuleName,
    pub kind: ModuleKind,
    /// Emission order within a wave follows this order
    pub destinations: Vec<ModuleName>,
    /// Every module that lists this one as a destination, in declaration order
    pub inputs: Vec<ModuleName>,
    /// False for implicit sinks that were only ever referenced
    pub declared: bool,
}

/// Module topology: name to kind, destinations and the reverse-input map.
///
/// Built once and never mutated; per-module state lives in a [`ModuleTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGraph {
    nodes: IndexMap<ModuleName, ModuleNode>,
}

impl ModuleGraph {
    /// Build the graph from parsed records.
    ///
    /// Destinations without a declaration become implicit sinks.
    pub fn build(records: Vec<ModuleRecord>) -> Result<Self, ParseError> {
        RecordValidator::validate_records(&records)?;

        let mut nodes: IndexMap<ModuleName, ModuleNode> = IndexMap::with_capacity(records.len());
        for record in records {
            nodes.insert(
                record.name.clone(),
                ModuleNode {
                    name: record.name,
                    kind: record.kind,
                    destinations: record.destinations,
                    inputs: Vec::new(),
                    declared: true,
                },
            );
        }

        // Reverse-input map, adding implicit sinks as they are discovered
        let edges: Vec<(ModuleName, ModuleName)> = nodes
            .values()
            .flat_map(|node| {
                node.destinations
                    .iter()
                    .map(move |dest| (node.name.clone(), dest.clone()))
            })
            .collect();

        for (source, dest) in edges {
            let target = nodes.entry(dest.clone()).or_insert_with(|| {
                debug!("Module '{}' is undeclared, treating it as a sink", dest);
                ModuleNode {
                    name: dest.clone(),
                    kind: ModuleKind::Sink,
                    destinations: Vec::new(),
                    inputs: Vec::new(),
                    declared: false,
                }
            });
            if !target.inputs.contains(&source) {
                target.inputs.push(source);
            }
        }

        Ok(Self { nodes })
    }

    /// Parse the text format and build the graph in one step
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        Self::build(parse_module_list(text)?)
    }

    pub fn get(&self, name: &str) -> Option<&ModuleNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// True only for modules that appeared on the left of a declaration
    pub fn is_declared(&self, name: &str) -> bool {
        self.nodes.get(name).map_or(false, |node| node.declared)
    }

    /// Kind of a module; anything unknown behaves as a sink
    pub fn kind_of(&self, name: &str) -> ModuleKind {
        self.nodes.get(name).map_or(ModuleKind::Sink, |node| node.kind)
    }

    pub fn destinations_of(&self, name: &str) -> &[ModuleName] {
        self.nodes
            .get(name)
            .map(|node| node.destinations.as_slice())
            .unwrap_or(&[])
    }

    pub fn inputs_of(&self, name: &str) -> &[ModuleName] {
        self.nodes
            .get(name)
            .map(|node| node.inputs.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes in declaration order, implicit sinks last
    pub fn nodes(&self) -> impl Iterator<Item = &ModuleNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create the mutable module table in its initial state
    pub fn instantiate(&self) -> ModuleTable {
        ModuleTable::from_graph(self)
    }
}
