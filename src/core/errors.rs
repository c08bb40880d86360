use super::types::ModuleName;
use thiserror::Error;

/// Errors raised while reading or validating the module list.
///
/// All of these are fatal: no wave is simulated once one is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line that does not follow `<prefix><name> -> <dest>, ...`
    #[error("line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("module declared with an empty name")]
    EmptyName,

    #[error("module '{0}' is declared more than once")]
    DuplicateModule(ModuleName),

    #[error("module '{module}' lists an empty destination")]
    EmptyDestination { module: ModuleName },
}

/// Errors raised while driving the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("entry module '{0}' is not declared in the network")]
    MissingEntry(ModuleName),

    #[error("watched module '{0}' is not part of the network")]
    UnknownWatchedModule(ModuleName),

    #[error("no modules to watch")]
    NoWatchedModules,

    /// The safety bound on unbounded runs was reached first
    #[error("no cycle found within {max_waves} waves; still waiting on {pending:?}")]
    CycleNotFound {
        max_waves: u64,
        pending: Vec<ModuleName>,
    },

    #[error("combined period of {0:?} does not fit in 64 bits")]
    PeriodOverflow(Vec<u64>),

    #[error("unsupported topology: {0}")]
    UnsupportedTopology(String),
}
