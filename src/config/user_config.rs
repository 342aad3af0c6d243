//! User-level configuration for veracity
//!
//! Supports loading config from:
//! - ~/.config/veracity/config.toml (or an explicit path)
//! - Environment variables

use crate::classifier::normalize::{DEFAULT_MAX_CHARS, DEFAULT_TRUNCATION_MARKER};
use crate::classifier::{
    CorpusFile, DetectorConfig, FeatureNorm, ModelStore, Normalizer, RiskTier, TierBand,
    TierPolicy, TrainConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides `[model] path`
pub const MODEL_PATH_ENV: &str = "VERACITY_MODEL_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VeracityConfig {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub policy: PolicySection,
    #[serde(default)]
    pub corpus: CorpusSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSection {
    /// Model artifact path (default: <data_dir>/veracity/model.bin)
    pub path: Option<PathBuf>,
    /// Vocabulary cap
    pub max_features: usize,
    /// Additive smoothing
    pub alpha: f64,
    /// Feature row normalization: "none" or "l2"
    pub norm: FeatureNorm,
}

impl Default for ModelSection {
    fn default() -> Self {
        let train = TrainConfig::default();
        Self {
            path: None,
            max_features: train.max_features,
            alpha: train.alpha,
            norm: train.norm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSection {
    pub max_chars: usize,
    pub truncation_marker: String,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            truncation_marker: DEFAULT_TRUNCATION_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicySection {
    /// Evaluated top to bottom, first `probability > above` wins
    pub bands: Vec<TierBand>,
    /// Tier when no band matches
    pub floor: RiskTier,
}

impl Default for PolicySection {
    fn default() -> Self {
        let policy = TierPolicy::default();
        Self {
            bands: policy.bands().to_vec(),
            floor: policy.floor(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusSection {
    /// Labeled corpus path (default: <data_dir>/veracity/corpus.jsonl)
    pub path: Option<PathBuf>,
}

impl VeracityConfig {
    /// Load config with priority:
    /// 1. Environment variables (highest)
    /// 2. `explicit` path if given, else ~/.config/veracity/config.toml
    /// 3. Built-in defaults
    ///
    /// A missing default config file is not an error; a missing explicit one is.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::user_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Some(path) = std::env::var_os(MODEL_PATH_ENV).filter(|v| !v.is_empty()) {
            config.model.path = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("veracity").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.max_features == 0 {
            return Err(ConfigError::Invalid("model.max_features must be at least 1".into()));
        }
        if !(self.model.alpha.is_finite() && self.model.alpha > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "model.alpha must be positive, got {}",
                self.model.alpha
            )));
        }
        if self.input.max_chars == 0 {
            return Err(ConfigError::Invalid("input.max_chars must be at least 1".into()));
        }
        self.normalizer()?;
        self.tier_policy().map(|_| ())
    }

    pub fn tier_policy(&self) -> Result<TierPolicy, ConfigError> {
        TierPolicy::new(self.policy.bands.clone(), self.policy.floor)
            .map_err(|e| ConfigError::Invalid(format!("policy: {}", e)))
    }

    pub fn normalizer(&self) -> Result<Normalizer, ConfigError> {
        Normalizer::new(self.input.max_chars, self.input.truncation_marker.clone())
            .map_err(|e| ConfigError::Invalid(format!("input: {}", e)))
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            max_features: self.model.max_features,
            alpha: self.model.alpha,
            norm: self.model.norm,
        }
    }

    pub fn detector_config(&self) -> Result<DetectorConfig, ConfigError> {
        Ok(DetectorConfig {
            normalizer: self.normalizer()?,
            train: self.train_config(),
            policy: self.tier_policy()?,
        })
    }

    pub fn model_path(&self) -> PathBuf {
        self.model.path.clone().unwrap_or_else(ModelStore::default_path)
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.corpus.path.clone().unwrap_or_else(CorpusFile::default_path)
    }

    /// Write the example config unless one already exists. Returns the path.
    pub fn init_user_config(path: Option<&Path>) -> anyhow::Result<(PathBuf, bool)> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::user_config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
        };

        if config_path.exists() {
            return Ok((config_path, false));
        }
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, EXAMPLE_CONFIG)?;
        Ok((config_path, true))
    }
}

/// Written by `veracity init`
pub const EXAMPLE_CONFIG: &str = r#"# Veracity Configuration

[model]
# Where the trained model is stored (env VERACITY_MODEL_PATH overrides)
# path = "/home/me/.local/share/veracity/model.bin"

# Vocabulary size cap
max_features = 1000

# Additive smoothing for the naive Bayes classifier
alpha = 1.0

# Feature normalization: "none" (tf x idf) or "l2"
norm = "none"

[input]
# Longer input is cut to this many characters
max_chars = 5000
truncation_marker = "..."

[policy]
# Checked top to bottom; first band with probability > above wins
bands = [
    { above = 0.7, tier = "high" },
    { above = 0.4, tier = "moderate" },
]
floor = "low"

[corpus]
# Labeled examples recorded with `veracity label`
# path = "/home/me/.local/share/veracity/corpus.jsonl"
"#;
