//! Optional TOML configuration for the `urllex` binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::UrlLexError;
use crate::url::psl::{RuleSet, BUNDLED_RULES};

/// Where suffix rules come from (`[rules]` section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// PSL-format file to load instead of the bundled list.
    pub path: Option<PathBuf>,
    /// Keep rules from the PRIVATE DOMAINS section (e.g. `github.io`).
    pub include_private: bool,
}

/// Log filter used when `RUST_LOG` is unset (`[logging]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Default classifier artifact (`[model]` section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: Option<PathBuf>,
}

/// Top-level configuration. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlLexConfig {
    pub rules: RulesConfig,
    pub logging: LoggingConfig,
    pub model: ModelConfig,
}

impl UrlLexConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, UrlLexError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from `path`; the file must exist.
    pub fn load(path: &Path) -> Result<Self, UrlLexError> {
        let data = fs::read_to_string(path)
            .map_err(|e| UrlLexError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&data)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, UrlLexError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Build the rule set this configuration points at.
    pub fn rule_set(&self) -> Result<RuleSet, UrlLexError> {
        match &self.rules.path {
            Some(path) => RuleSet::load(path, self.rules.include_private),
            None => RuleSet::parse_with_private(BUNDLED_RULES, self.rules.include_private),
        }
    }
}
