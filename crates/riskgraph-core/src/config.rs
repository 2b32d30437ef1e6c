//! Model loading configuration

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// How the ceiling used by inverse level numbers is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelCeiling {
    /// A fixed ceiling
    Fixed(i64),
    /// Highest likelihood level value declared by the loaded domain model
    Derived,
}

impl Default for LevelCeiling {
    fn default() -> Self {
        LevelCeiling::Fixed(5)
    }
}

/// What to do when a system graph has several candidate asserted graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedGraphPolicy {
    /// Fail the load
    #[default]
    Strict,
    /// Keep the last candidate seen
    LastWins,
}

/// Settings shared by the domain and system model loaders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub level_ceiling: LevelCeiling,
    pub named_graphs: NamedGraphPolicy,
    /// Suffix of the named graph holding inferred facts
    pub inferred_suffix: String,
    /// Suffix of the named graph holding UI-only facts
    pub ui_suffix: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            level_ceiling: LevelCeiling::default(),
            named_graphs: NamedGraphPolicy::default(),
            inferred_suffix: "/inf".to_string(),
            ui_suffix: "/ui".to_string(),
        }
    }
}

impl ModelConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let LevelCeiling::Fixed(ceiling) = self.level_ceiling {
            if ceiling < 0 {
                return Err(ConfigError::Invalid(format!("level ceiling must not be negative, got {}", ceiling)));
            }
        }
        if self.inferred_suffix.is_empty() || self.ui_suffix.is_empty() {
            return Err(ConfigError::Invalid("named graph suffixes must not be empty".to_string()));
        }
        if self.inferred_suffix == self.ui_suffix {
            return Err(ConfigError::Invalid("inferred and ui suffixes must differ".to_string()));
        }
        Ok(())
    }

    pub fn with_level_ceiling(mut self, level_ceiling: LevelCeiling) -> Self {
        self.level_ceiling = level_ceiling;
        self
    }

    pub fn with_named_graphs(mut self, policy: NamedGraphPolicy) -> Self {
        self.named_graphs = policy;
        self
    }
}
