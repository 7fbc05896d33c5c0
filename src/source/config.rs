// Detector configuration: weights table, command sets, extra signatures
//
// Confidence weights are keyed by detector id and injected into detectors at
// construction, so calibrating a detector never touches matching code.

use crate::source::{Confidence, CronDetector, ShellDetector, SourceType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_SHELL_WEIGHT: f64 = 0.5;
pub const DEFAULT_CRON_WEIGHT: f64 = 0.6;

pub const DEFAULT_SHELL_PRIORITY: u32 = 100;
pub const DEFAULT_CRON_PRIORITY: u32 = 200;

/// Weights for the built-in detectors
pub fn default_weights() -> BTreeMap<String, Confidence> {
    [
        (ShellDetector::ID, DEFAULT_SHELL_WEIGHT),
        (CronDetector::ID, DEFAULT_CRON_WEIGHT),
    ]
    .into_iter()
    .filter_map(|(id, w)| Confidence::new(w).ok().map(|c| (id.to_string(), c)))
    .collect()
}

/// Command set and priority for a built-in detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSetConfig {
    pub commands: Vec<String>,
    /// Evaluation priority; the detector's built-in priority when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl CommandSetConfig {
    fn new(commands: &[&str], priority: u32) -> Self {
        Self {
            commands: commands.iter().map(|c| c.to_string()).collect(),
            priority: Some(priority),
        }
    }
}

/// A detector defined entirely in configuration
///
/// # Example TOML
/// ```toml
/// [[source.detector]]
/// id = "supervisor"
/// source_type = "supervisor"
/// name = "supervisord"
/// commands = ["supervisord"]
/// priority = 150
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureConfig {
    /// Detector id, also its key in `[source.weights]`
    pub id: String,
    pub source_type: SourceType,
    /// Name reported on match
    pub name: String,
    pub commands: Vec<String>,
    pub priority: u32,
}

/// Source detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Confidence per detector id
    pub weights: BTreeMap<String, Confidence>,
    pub shell: CommandSetConfig,
    pub cron: CommandSetConfig,
    #[serde(rename = "detector", skip_serializing_if = "Vec::is_empty")]
    pub detectors: Vec<SignatureConfig>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            shell: CommandSetConfig::new(&["bash", "zsh", "sh", "fish"], DEFAULT_SHELL_PRIORITY),
            cron: CommandSetConfig::new(&["cron", "crond"], DEFAULT_CRON_PRIORITY),
            detectors: Vec::new(),
        }
    }
}

impl SourceConfig {
    /// Fill in built-in weights and priorities a user file left out
    pub fn with_defaults(mut self) -> Self {
        for (id, weight) in default_weights() {
            self.weights.entry(id).or_insert(weight);
        }
        self.shell.priority = Some(self.shell_priority());
        self.cron.priority = Some(self.cron_priority());
        self
    }

    /// Effective priority of the shell detector
    pub fn shell_priority(&self) -> u32 {
        self.shell.priority.unwrap_or(DEFAULT_SHELL_PRIORITY)
    }

    /// Effective priority of the cron detector
    pub fn cron_priority(&self) -> u32 {
        self.cron.priority.unwrap_or(DEFAULT_CRON_PRIORITY)
    }

    /// Weight for a detector id
    pub fn weight(&self, id: &str) -> Option<Confidence> {
        self.weights.get(id).copied()
    }

    /// Validate configuration
    ///
    /// Weights are range-checked when deserialized; this checks that every
    /// configured detector is usable.
    pub fn validate(&self) -> Result<(), String> {
        let mut ids: HashSet<&str> = HashSet::from([ShellDetector::ID, CronDetector::ID]);

        for (id, set) in [(ShellDetector::ID, &self.shell), (CronDetector::ID, &self.cron)] {
            if self.weight(id).is_none() {
                return Err(format!("no weight configured for detector '{}'", id));
            }
            if set.commands.is_empty() {
                return Err(format!("detector '{}' has an empty command set", id));
            }
        }

        for detector in &self.detectors {
            if !ids.insert(detector.id.as_str()) {
                return Err(format!("duplicate detector id '{}'", detector.id));
            }
            if self.weight(&detector.id).is_none() {
                return Err(format!(
                    "no weight configured for detector '{}'",
                    detector.id
                ));
            }
            if detector.commands.is_empty() {
                return Err(format!(
                    "detector '{}' has an empty command set",
                    detector.id
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.weight("shell").map(Confidence::value), Some(0.5));
        assert_eq!(config.weight("cron").map(Confidence::value), Some(0.6));
        assert_eq!(config.shell.commands, vec!["bash", "zsh", "sh", "fish"]);
        assert_eq!(config.cron.commands, vec!["cron", "crond"]);
        assert!(config.cron_priority() > config.shell_priority());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_defaults_keeps_overrides() {
        let mut config = SourceConfig::default();
        config.weights.clear();
        config
            .weights
            .insert("shell".to_string(), Confidence::new(0.4).unwrap());

        let config = config.with_defaults();
        assert_eq!(config.weight("shell").map(Confidence::value), Some(0.4));
        assert_eq!(config.weight("cron").map(Confidence::value), Some(0.6));
    }

    #[test]
    fn test_missing_weight_for_signature() {
        let mut config = SourceConfig::default();
        config.detectors.push(SignatureConfig {
            id: "supervisor".to_string(),
            source_type: SourceType::Other("supervisor".to_string()),
            name: "supervisord".to_string(),
            commands: vec!["supervisord".to_string()],
            priority: 150,
        });

        let err = config.validate().unwrap_err();
        assert!(err.contains("no weight"));
    }

    #[test]
    fn test_duplicate_detector_id() {
        let mut config = SourceConfig::default();
        config.detectors.push(SignatureConfig {
            id: "shell".to_string(),
            source_type: SourceType::Shell,
            name: "tcsh".to_string(),
            commands: vec!["tcsh".to_string()],
            priority: 10,
        });

        let err = config.validate().unwrap_err();
        assert!(err.contains("duplicate detector id"));
    }

    #[test]
    fn test_with_defaults_fills_missing_priority() {
        let mut config = SourceConfig::default();
        config.shell.priority = None;
        assert_eq!(config.shell_priority(), DEFAULT_SHELL_PRIORITY);

        let config = config.with_defaults();
        assert_eq!(config.shell.priority, Some(DEFAULT_SHELL_PRIORITY));
        assert_eq!(config.cron.priority, Some(DEFAULT_CRON_PRIORITY));
    }

    #[test]
    fn test_empty_shell_set_rejected() {
        let mut config = SourceConfig::default();
        config.shell.commands.clear();
        assert!(config.validate().is_err());
    }
}
