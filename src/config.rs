// WHY: Optional TOML file adding override entries and engine options at startup
// The built-in tables are never touched; merged tables are a separate value

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::alignment::AlignOptions;
use crate::error::ConfigError;
use crate::pali::OverrideTables;

/// One manual normalization: an exact raw term and the tokens to match instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub term: Vec<String>,
    pub normalized: Vec<String>,
}

/// Contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub alignment: AlignOptions,
    /// Extra compound splits, keyed by sanitized spelling
    pub compounds: HashMap<String, Vec<String>>,
    pub manual_overrides: Vec<ManualOverride>,
}

impl AlignConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AlignConfig = toml::from_str(text)?;
        if let Some(bad) = config.manual_overrides.iter().find(|o| o.term.is_empty()) {
            return Err(ConfigError::EmptyOverrideTerm(bad.normalized.clone()));
        }
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Built-in tables with this file's entries merged over them
    pub fn override_tables(&self) -> OverrideTables {
        let mut tables = OverrideTables::builtin().clone();
        for (token, parts) in &self.compounds {
            tables = tables.with_compound(token.clone(), parts.clone());
        }
        for entry in &self.manual_overrides {
            tables = tables.with_manual(entry.term.clone(), entry.normalized.clone());
        }
        tables
    }
}
