//! Configuration module for veracity
//!
//! This module handles:
//! - User-level configuration (~/.config/veracity/config.toml)
//! - Model location and training parameters
//! - Input normalization limits
//! - Risk tier thresholds

mod user_config;

pub use user_config::{
    ConfigError, CorpusSection, InputSection, ModelSection, PolicySection, VeracityConfig,
    EXAMPLE_CONFIG, MODEL_PATH_ENV,
};
