//! Classification entry point
//!
//! Holds the active pipeline behind an `RwLock<Arc<_>>`. Evaluation clones the
//! `Arc` and classifies without holding the lock; retraining fits a complete
//! pipeline first and only then swaps it in.

use super::normalize::Normalizer;
use super::store::{ModelSource, ModelStore};
use super::thresholds::{TierPolicy, Verdict};
use super::train::{train, FittedPipeline, TrainConfig};
use super::{ClassifierError, ClassifierResult, LabeledExample, StoreError};
use std::sync::{Arc, Mutex, PoisonError, RwLock, TryLockError};

/// Everything the detector needs besides the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorConfig {
    pub normalizer: Normalizer,
    pub train: TrainConfig,
    pub policy: TierPolicy,
}

/// Outcome of a successful retrain
#[derive(Debug)]
pub struct RetrainReport {
    pub examples: usize,
    pub vocabulary_size: usize,
    /// Set when the new model is active but could not be persisted
    pub save_error: Option<StoreError>,
}

impl RetrainReport {
    pub fn persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Misinformation detector. `Send + Sync`; share it behind an `Arc`.
pub struct Detector {
    pipeline: RwLock<Arc<FittedPipeline>>,
    source: RwLock<ModelSource>,
    training: Mutex<()>,
    store: ModelStore,
    config: DetectorConfig,
}

impl Detector {
    /// Load the persisted model, or train one from the seed corpus.
    pub fn open(store: ModelStore, config: DetectorConfig) -> ClassifierResult<Self> {
        let (pipeline, source) = store.load_or_train(&config.train)?;
        Ok(Self::with_pipeline(pipeline, source, store, config))
    }

    /// Wrap an already fitted pipeline
    pub fn with_pipeline(
        pipeline: FittedPipeline,
        source: ModelSource,
        store: ModelStore,
        config: DetectorConfig,
    ) -> Self {
        Self {
            pipeline: RwLock::new(Arc::new(pipeline)),
            source: RwLock::new(source),
            training: Mutex::new(()),
            store,
            config,
        }
    }

    /// Classify raw text
    pub fn evaluate(&self, raw_text: &str) -> Verdict {
        let text = self.config.normalizer.normalize(raw_text);
        if text.is_empty() {
            return Verdict::no_content();
        }

        let pipeline = self.pipeline();
        let probability = pipeline.predict_proba(&text).p_misinformation;
        let tier = self.config.policy.classify(probability);
        tracing::debug!("Evaluated {} chars: p={:.4} tier={}", text.len(), probability, tier);

        Verdict { probability, tier }
    }

    /// Fit a new pipeline on `corpus`, install it, then persist it.
    ///
    /// On a corpus error the current pipeline stays active. A save failure
    /// does not undo the swap; it is reported in the returned report.
    pub fn retrain(&self, corpus: &[LabeledExample]) -> ClassifierResult<RetrainReport> {
        let _guard = match self.training.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return Err(ClassifierError::TrainingInProgress),
        };

        let fitted = train(corpus, &self.config.train)?;
        let vocabulary_size = fitted.vectorizer().dim();
        let fitted = Arc::new(fitted);

        *self.pipeline.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&fitted);

        let save_error = match self.store.save(&fitted) {
            Ok(()) => {
                *self.source.write().unwrap_or_else(PoisonError::into_inner) = ModelSource::Loaded;
                None
            }
            Err(e) => {
                tracing::warn!("Retrained model is active but was not saved: {}", e);
                Some(e)
            }
        };

        Ok(RetrainReport {
            examples: corpus.len(),
            vocabulary_size,
            save_error,
        })
    }

    /// Snapshot of the active pipeline
    pub fn pipeline(&self) -> Arc<FittedPipeline> {
        Arc::clone(&self.pipeline.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// How the pipeline in use was obtained at startup or last retrain
    pub fn source(&self) -> ModelSource {
        *self.source.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}
