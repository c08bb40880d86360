pub mod core;

// Re-export commonly used types
pub use crate::core::components::{Module, ModuleState, ModuleTable};
pub use crate::core::errors::{ParseError, SimulationError};
pub use crate::core::execution::{
    BoundedOutcome, CycleDetector, PeriodReport, SimulationConfig, SimulationRunner, StateCycle,
    WaveResult,
};
pub use crate::core::graph::ModuleGraph;
pub use crate::core::parser::parse_module_list;
pub use crate::core::types::{ModuleKind, ModuleName, ModuleRecord, Pulse};
