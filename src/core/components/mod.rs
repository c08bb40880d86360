pub mod module;
pub mod state_machine;

// Re-export commonly used types
pub use module::{Module, ModuleState, ModuleTable, StateSnapshot};
pub use state_machine::apply;
