pub mod config;
pub mod cycle_detector;
pub mod pulse_scheduler;
pub mod simulation_runner;
pub mod state_cycle;

// Re-export commonly used types
pub use config::SimulationConfig;
pub use cycle_detector::{infer_watch_set, CycleDetector, PeriodReport};
pub use pulse_scheduler::{run_wave, PulseProbe, PulseScheduler, WaveResult};
pub use simulation_runner::{BoundedOutcome, SimulationRunner, WaveObserver};
pub use state_cycle::{StateCycle, StateCycleFinder};
