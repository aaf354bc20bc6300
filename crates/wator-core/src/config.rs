//! Configuration types for the simulation.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatorConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Initial fish population placed by `populate`
    pub fish_pop_size: u32,
    /// Initial shark population placed by `populate`
    pub shark_pop_size: u32,
    /// Ticks of activity before a fish reproduces
    pub fish_breed_time: u32,
    /// Ticks of activity before a shark reproduces
    pub shark_breed_time: u32,
    /// Ticks without feeding before a shark dies
    pub shark_starve_time: u32,
    /// Random seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for WatorConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            fish_pop_size: 0,
            shark_pop_size: 0,
            fish_breed_time: 5,
            shark_breed_time: 10,
            shark_starve_time: 5,
            seed: None,
        }
    }
}

impl WatorConfig {
    /// Decode a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-call population overrides for `populate`.
///
/// A `None` (or zero) count falls back to the configured population size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PopulateOverrides {
    pub fish_pop_size: Option<u32>,
    pub shark_pop_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatorConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 10);
        assert_eq!(config.fish_pop_size, 0);
        assert_eq!(config.shark_pop_size, 0);
        assert_eq!(config.fish_breed_time, 5);
        assert_eq!(config.shark_breed_time, 10);
        assert_eq!(config.shark_starve_time, 5);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_config_from_json() {
        let config = WatorConfig::from_json(r#"{"width": 4, "shark_starve_time": 3}"#).unwrap();
        assert_eq!(config.width, 4);
        assert_eq!(config.shark_starve_time, 3);
        // Everything else keeps its default
        assert_eq!(config.height, 10);
        assert_eq!(config.fish_breed_time, 5);
    }

    #[test]
    fn test_config_round_trip() {
        let config = WatorConfig {
            seed: Some(42),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let decoded = WatorConfig::from_json(&json).unwrap();
        assert_eq!(decoded.seed, Some(42));
        assert_eq!(decoded.width, config.width);
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        assert!(WatorConfig::from_json("{\"width\": \"wide\"}").is_err());
    }
}
