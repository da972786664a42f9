//! Run Configuration
//!
//! Simulation settings loaded from a TOML file. Every field has a default,
//! so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::primes::DEFAULT_PRIME_LIMIT;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "monkey.toml";

/// Settings for a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of rounds to run
    pub rounds: u64,
    /// Floor-divide worry by 3 after each direct inspection
    pub relieve_after_inspect: bool,
    /// Exclusive upper bound of the prime cache
    pub prime_limit: u64,
    /// Where to write the JSONL inspection trace, if anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_path: Option<PathBuf>,
    /// Where to write the final JSON snapshot, if anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 20,
            relieve_after_inspect: true,
            prime_limit: DEFAULT_PRIME_LIMIT,
            events_path: None,
            snapshot_path: None,
        }
    }
}

impl SimulationConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses TOML text; missing keys take their defaults.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Config file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Commented TOML matching `SimulationConfig::default()`
pub fn default_config_toml() -> String {
    r#"# Monkey simulation configuration

# Rounds to run
rounds = 20

# Divide worry by 3 after each inspection (values stay small).
# Turn off to let values grow into the factored representation.
relieve_after_inspect = true

# Primes below this seed the factored representation
prime_limit = 100

# Optional outputs
# events_path = "output/events.jsonl"
# snapshot_path = "output/snapshot.json"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SimulationConfig::from_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.rounds, 20);
        assert!(config.relieve_after_inspect);
        assert_eq!(config.prime_limit, 100);
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let config = SimulationConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SimulationConfig::from_str(
            "rounds = 10000\nrelieve_after_inspect = false\nevents_path = \"out/events.jsonl\"\n",
        )
        .unwrap();
        assert_eq!(config.rounds, 10000);
        assert!(!config.relieve_after_inspect);
        assert_eq!(config.prime_limit, 100);
        assert_eq!(config.events_path, Some(PathBuf::from("out/events.jsonl")));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = SimulationConfig {
            rounds: 3,
            snapshot_path: Some(PathBuf::from("snap.json")),
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(SimulationConfig::from_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rounds = 7").unwrap();

        let config = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.rounds, 7);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SimulationConfig::from_str("rounds = \"many\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimulationConfig::from_file(Path::new("/nonexistent/monkey.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
