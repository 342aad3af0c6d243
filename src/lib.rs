//! Veracity - local misinformation risk classifier
//!
//! Scores a block of text for misinformation risk with a TF-IDF + naive
//! Bayes model and maps the probability to a risk tier. The model trains
//! itself from a bundled seed corpus on first use and is persisted so later
//! runs load it instead of retraining.
//!
//! ```no_run
//! use veracity::classifier::{Detector, DetectorConfig, ModelStore};
//!
//! let store = ModelStore::new(ModelStore::default_path());
//! let detector = Detector::open(store, DetectorConfig::default())?;
//! let verdict = detector.evaluate("Drinking bleach can cure coronavirus");
//! println!("{} ({:.1}%)", verdict.label(), verdict.probability * 100.0);
//! # Ok::<(), veracity::classifier::ClassifierError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod reporters;
