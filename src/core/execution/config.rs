//! Configuration for wave simulation runs
//!
//! This module provides the knobs that control how the runner triggers waves
//! and how long unbounded runs may go before giving up.

use serde::{Deserialize, Serialize};

/// Default number of waves for bounded runs
pub const DEFAULT_BOUNDED_WAVES: u64 = 1000;

/// Default safety bound for unbounded runs
pub const DEFAULT_MAX_WAVES: u64 = 1_000_000;

/// Configuration for simulation execution
///
/// Holds the names used for the external trigger and the wave counts for
/// bounded and unbounded runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Module that receives the button pulse
    pub entry_module: String,
    /// Source name carried by the button pulse
    pub button_name: String,
    /// Number of waves executed by a bounded run
    pub bounded_waves: u64,
    /// Safety bound for unbounded runs
    /// `None` lets an unbounded run loop until every watched module fires
    pub max_waves: Option<u64>,
}

impl SimulationConfig {
    /// Create a new configuration with default values
    ///
    /// Defaults: entry `broadcaster`, button `button`, 1000 bounded waves and
    /// a one million wave safety bound
    pub fn new() -> Self {
        Self {
            entry_module: "broadcaster".to_string(),
            button_name: "button".to_string(),
            bounded_waves: DEFAULT_BOUNDED_WAVES,
            max_waves: Some(DEFAULT_MAX_WAVES),
        }
    }

    /// Set the module that receives the button pulse
    pub fn with_entry_module(mut self, name: &str) -> Self {
        self.entry_module = name.to_string();
        self
    }

    /// Set the source name of the button pulse
    pub fn with_button_name(mut self, name: &str) -> Self {
        self.button_name = name.to_string();
        self
    }

    /// Set the number of waves executed by a bounded run
    pub fn with_bounded_waves(mut self, waves: u64) -> Self {
        self.bounded_waves = waves;
        self
    }

    /// Set the safety bound for unbounded runs
    ///
    /// # Arguments
    /// * `max_waves` - Maximum number of waves, or `None` for no bound
    pub fn with_max_waves(mut self, max_waves: Option<u64>) -> Self {
        self.max_waves = max_waves;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.entry_module, "broadcaster");
        assert_eq!(config.button_name, "button");
        assert_eq!(config.bounded_waves, 1000);
        assert_eq!(config.max_waves, Some(DEFAULT_MAX_WAVES));
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new()
            .with_entry_module("start")
            .with_button_name("trigger")
            .with_bounded_waves(4)
            .with_max_waves(None);

        assert_eq!(config.entry_module, "start");
        assert_eq!(config.button_name, "trigger");
        assert_eq!(config.bounded_waves, 4);
        assert_eq!(config.max_waves, None);
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"bounded_waves": 10}"#).unwrap();
        assert_eq!(config.bounded_waves, 10);
        assert_eq!(config.entry_module, "broadcaster");
    }
}
