//! Misinformation risk classifier
//!
//! Architecture: normalize → TF-IDF features → multinomial naive Bayes →
//! tier thresholds. Speed: well under 1ms per text.
//!
//! The vectorizer and the classifier are always fitted on the same corpus and
//! persisted as one artifact ([`FittedPipeline`]), so a model can never be
//! paired with a vocabulary it was not trained on.

pub mod corpus;
mod detector;
pub mod model;
pub mod normalize;
pub mod seed;
pub mod store;
pub mod thresholds;
pub mod train;
pub mod vectorizer;

pub use corpus::CorpusFile;
pub use detector::{Detector, DetectorConfig, RetrainReport};
pub use model::{MultinomialNb, Prediction};
pub use normalize::Normalizer;
pub use seed::seed_corpus;
pub use store::{ModelSource, ModelStore};
pub use thresholds::{RiskTier, TierBand, TierPolicy, Verdict};
pub use train::{train, FittedPipeline, PipelineMetadata, TrainConfig};
pub use vectorizer::{FeatureNorm, FeatureVector, TfidfVectorizer};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Training label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Reliable,
    Misinformation,
}

impl Label {
    /// Class index used by the model
    pub fn index(self) -> usize {
        match self {
            Label::Reliable => 0,
            Label::Misinformation => 1,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Reliable => write!(f, "reliable"),
            Label::Misinformation => write!(f, "misinformation"),
        }
    }
}

impl std::str::FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reliable" => Ok(Label::Reliable),
            "misinformation" | "misinfo" => Ok(Label::Misinformation),
            other => Err(format!("unknown label '{}'", other)),
        }
    }
}

/// One training example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExample {
    pub text: String,
    pub label: Label,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Problems with a training corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("training corpus is empty")]
    Empty,

    #[error("training corpus must contain both reliable and misinformation examples")]
    SingleClass,

    #[error("training corpus produced an empty vocabulary (only stop words or short tokens)")]
    EmptyVocabulary,

    #[error("{vectors} feature vectors but {labels} labels")]
    LengthMismatch { vectors: usize, labels: usize },

    #[error("feature dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("smoothing must be positive and finite, got {0}")]
    InvalidSmoothing(f64),
}

/// Problems reading or writing the model artifact
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a model artifact (bad magic)")]
    BadMagic,

    #[error("unsupported artifact version {0}")]
    UnsupportedVersion(u16),

    #[error("artifact truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("artifact checksum mismatch")]
    ChecksumMismatch,

    #[error("failed to encode model: {0}")]
    Encode(String),

    #[error("failed to decode model: {0}")]
    Decode(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

/// Errors surfaced by the [`Detector`]
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("model store error: {0}")]
    Store(#[from] StoreError),

    #[error("a retraining run is already in progress")]
    TrainingInProgress,
}

pub type ClassifierResult<T> = Result<T, ClassifierError>;
