pub mod module_graph;
pub mod validator;

// Re-export commonly used types
pub use module_graph::{ModuleGraph, ModuleNode};
pub use validator::RecordValidator;
