//! Model persistence
//!
//! The fitted pipeline is stored as one artifact:
//!
//! ```text
//! magic "VRCT" | version u16 LE | payload len u64 LE | xxh3-64 u64 LE | bitcode payload
//! ```
//!
//! Writes go to a sibling temp file which is renamed over the artifact, so
//! readers never observe a half-written model.

use super::seed::seed_corpus;
use super::train::{train, FittedPipeline, TrainConfig};
use super::{ClassifierError, StoreError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

const MAGIC: &[u8; 4] = b"VRCT";
const FORMAT_VERSION: u16 = 1;
const HEADER_LEN: usize = 4 + 2 + 8 + 8;

/// Where the active pipeline came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Read from the persisted artifact
    Loaded,
    /// Trained from the bundled seed corpus (cold start or corrupt artifact)
    TrainedFromSeed,
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Loaded => write!(f, "loaded"),
            ModelSource::TrainedFromSeed => write!(f, "trained_from_seed"),
        }
    }
}

/// Encode a pipeline into the artifact format
pub fn encode(pipeline: &FittedPipeline) -> Result<Vec<u8>, StoreError> {
    let payload = bitcode::serialize(pipeline).map_err(|e| StoreError::Encode(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&xxh3_64(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode and validate an artifact
pub fn decode(bytes: &[u8]) -> Result<FittedPipeline, StoreError> {
    if bytes.len() < HEADER_LEN {
        return Err(StoreError::Truncated {
            expected: HEADER_LEN,
            found: bytes.len(),
        });
    }
    if &bytes[0..4] != MAGIC {
        return Err(StoreError::BadMagic);
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&bytes[6..14]);
    let payload_len = u64::from_le_bytes(len_bytes) as usize;

    let mut sum_bytes = [0u8; 8];
    sum_bytes.copy_from_slice(&bytes[14..22]);
    let checksum = u64::from_le_bytes(sum_bytes);

    let payload = &bytes[HEADER_LEN..];
    if payload.len() != payload_len {
        return Err(StoreError::Truncated {
            expected: HEADER_LEN.saturating_add(payload_len),
            found: bytes.len(),
        });
    }
    if xxh3_64(payload) != checksum {
        return Err(StoreError::ChecksumMismatch);
    }

    let pipeline: FittedPipeline =
        bitcode::deserialize(payload).map_err(|e| StoreError::Decode(e.to_string()))?;
    pipeline.validate().map_err(StoreError::Invalid)?;
    Ok(pipeline)
}

/// File-backed store for the single model artifact
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    /// Default location: `<data_dir>/veracity/model.bin`
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("veracity")
            .join("model.bin")
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// `Ok(None)` when there is no artifact; `Err` when it is unreadable or corrupt
    pub fn load(&self) -> Result<Option<FittedPipeline>, StoreError> {
        if !self.path.exists() {
            tracing::debug!("No model artifact at {}", self.path.display());
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        let pipeline = decode(&bytes)?;
        tracing::debug!("Loaded model from {}", self.path.display());
        Ok(Some(pipeline))
    }

    /// Persist atomically (temp file + rename)
    pub fn save(&self, pipeline: &FittedPipeline) -> Result<(), StoreError> {
        let bytes = encode(pipeline)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            fs::remove_file(&tmp_path).ok();
            return Err(e.into());
        }

        tracing::info!("Model saved to {}", self.path.display());
        Ok(())
    }

    /// Delete the artifact. Returns whether anything was removed.
    pub fn remove(&self) -> Result<bool, StoreError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }

    /// Load the artifact, or train on the seed corpus and persist the result.
    ///
    /// A corrupt artifact is treated like a missing one. A failed save is
    /// logged; the trained pipeline is still returned for this process.
    pub fn load_or_train(
        &self,
        config: &TrainConfig,
    ) -> Result<(FittedPipeline, ModelSource), ClassifierError> {
        match self.load() {
            Ok(Some(pipeline)) => return Ok((pipeline, ModelSource::Loaded)),
            Ok(None) => {
                tracing::info!("No saved model found, training from seed corpus");
            }
            Err(e) => {
                tracing::warn!(
                    "Model artifact at {} is unusable ({}), retraining from seed corpus",
                    self.path.display(),
                    e
                );
            }
        }

        let pipeline = train(&seed_corpus(), config)?;
        if let Err(e) = self.save(&pipeline) {
            tracing::warn!("Failed to save model to {}: {}", self.path.display(), e);
        }
        Ok((pipeline, ModelSource::TrainedFromSeed))
    }
}
