//! Training for the misinformation classifier
//!
//! Fits the vectorizer and the naive Bayes model on one corpus and freezes
//! them together as a [`FittedPipeline`].

use super::model::{MultinomialNb, Prediction, DEFAULT_ALPHA};
use super::vectorizer::{FeatureNorm, TfidfVectorizer, DEFAULT_MAX_FEATURES};
use super::{CorpusError, Label, LabeledExample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Training configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Vocabulary cap
    pub max_features: usize,
    /// Additive smoothing for the classifier
    pub alpha: f64,
    /// Row normalization of feature vectors
    pub norm: FeatureNorm,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            alpha: DEFAULT_ALPHA,
            norm: FeatureNorm::None,
        }
    }
}

/// Provenance recorded alongside the fitted parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    pub reliable_examples: usize,
    pub misinformation_examples: usize,
    pub trained_at: DateTime<Utc>,
    /// Crate version that produced the artifact
    pub version: String,
}

/// Vectorizer + classifier fitted on the same corpus. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
    metadata: PipelineMetadata,
}

impl FittedPipeline {
    /// Probabilities for already-normalized text
    pub fn predict_proba(&self, text: &str) -> Prediction {
        let features = self.vectorizer.transform(text);
        self.model.predict_proba(&features)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &MultinomialNb {
        &self.model
    }

    pub fn metadata(&self) -> &PipelineMetadata {
        &self.metadata
    }

    /// Both halves must agree on the feature space
    pub fn validate(&self) -> Result<(), String> {
        self.vectorizer.validate()?;
        self.model.validate()?;
        if self.vectorizer.dim() != self.model.dim() {
            return Err(format!(
                "vectorizer has {} features but classifier expects {}",
                self.vectorizer.dim(),
                self.model.dim()
            ));
        }
        Ok(())
    }
}

/// Fit a pipeline on labeled examples
pub fn train(corpus: &[LabeledExample], config: &TrainConfig) -> Result<FittedPipeline, CorpusError> {
    if corpus.is_empty() {
        return Err(CorpusError::Empty);
    }

    let reliable = corpus.iter().filter(|e| e.label == Label::Reliable).count();
    let misinformation = corpus.len() - reliable;
    if reliable == 0 || misinformation == 0 {
        return Err(CorpusError::SingleClass);
    }

    let texts: Vec<&str> = corpus.iter().map(|e| e.text.as_str()).collect();
    let labels: Vec<Label> = corpus.iter().map(|e| e.label).collect();

    let (vectorizer, vectors) =
        TfidfVectorizer::fit_transform(&texts, config.max_features, config.norm)?;
    let model = MultinomialNb::fit(&vectors, &labels, config.alpha)?;

    tracing::info!(
        "Trained classifier: {} examples ({} reliable, {} misinformation), {} features",
        corpus.len(),
        reliable,
        misinformation,
        vectorizer.dim()
    );

    Ok(FittedPipeline {
        vectorizer,
        model,
        metadata: PipelineMetadata {
            reliable_examples: reliable,
            misinformation_examples: misinformation,
            trained_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}
