//! Multinomial naive Bayes over tf-idf features
//!
//! Two classes only: index 0 = reliable, 1 = misinformation.
//! Pure Rust, runs in microseconds per text.

use super::vectorizer::FeatureVector;
use super::{CorpusError, Label};
use serde::{Deserialize, Serialize};

/// Default additive smoothing
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Class probabilities for one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Probability of being reliable content
    pub p_reliable: f64,
    /// Probability of being misinformation
    pub p_misinformation: f64,
}

impl Prediction {
    /// Most likely label (ties go to reliable)
    pub fn label(&self) -> Label {
        if self.p_misinformation > self.p_reliable {
            Label::Misinformation
        } else {
            Label::Reliable
        }
    }
}

/// Fitted classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Smoothing used at fit time
    alpha: f64,
    /// ln P(class)
    class_log_prior: [f64; 2],
    /// ln P(feature | class), one row per class
    feature_log_prob: [Vec<f64>; 2],
    /// Training documents per class
    class_count: [usize; 2],
}

impl MultinomialNb {
    /// Fit on feature vectors and their labels.
    pub fn fit(vectors: &[FeatureVector], labels: &[Label], alpha: f64) -> Result<Self, CorpusError> {
        if vectors.is_empty() {
            return Err(CorpusError::Empty);
        }
        if vectors.len() != labels.len() {
            return Err(CorpusError::LengthMismatch {
                vectors: vectors.len(),
                labels: labels.len(),
            });
        }
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(CorpusError::InvalidSmoothing(alpha));
        }

        let dim = vectors[0].dim();
        if let Some(bad) = vectors.iter().find(|v| v.dim() != dim) {
            return Err(CorpusError::DimensionMismatch {
                expected: dim,
                found: bad.dim(),
            });
        }

        let mut class_count = [0usize; 2];
        let mut feature_count = [vec![0.0f64; dim], vec![0.0f64; dim]];
        for (vector, label) in vectors.iter().zip(labels) {
            let class = label.index();
            class_count[class] += 1;
            for &(idx, weight) in vector.entries() {
                feature_count[class][idx as usize] += weight;
            }
        }

        if class_count.iter().any(|&c| c == 0) {
            return Err(CorpusError::SingleClass);
        }

        let n_docs = vectors.len() as f64;
        let class_log_prior = [
            (class_count[0] as f64 / n_docs).ln(),
            (class_count[1] as f64 / n_docs).ln(),
        ];

        let smoothed_row = |counts: &[f64]| -> Vec<f64> {
            let total: f64 = counts.iter().sum::<f64>() + alpha * dim as f64;
            counts.iter().map(|c| ((c + alpha) / total).ln()).collect()
        };
        let feature_log_prob = [
            smoothed_row(&feature_count[0]),
            smoothed_row(&feature_count[1]),
        ];

        Ok(Self {
            alpha,
            class_log_prior,
            feature_log_prob,
            class_count,
        })
    }

    /// Class probabilities. An empty vector yields the priors.
    pub fn predict_proba(&self, vector: &FeatureVector) -> Prediction {
        let mut joint = self.class_log_prior;
        for (class, ll) in joint.iter_mut().enumerate() {
            let row = &self.feature_log_prob[class];
            for &(idx, weight) in vector.entries() {
                if let Some(lp) = row.get(idx as usize) {
                    *ll += weight * lp;
                }
            }
        }

        // log-sum-exp
        let max = joint[0].max(joint[1]);
        let e0 = (joint[0] - max).exp();
        let e1 = (joint[1] - max).exp();
        let sum = e0 + e1;

        Prediction {
            p_reliable: e0 / sum,
            p_misinformation: e1 / sum,
        }
    }

    /// Prior probabilities (what an empty vector predicts)
    pub fn priors(&self) -> Prediction {
        Prediction {
            p_reliable: self.class_log_prior[0].exp(),
            p_misinformation: self.class_log_prior[1].exp(),
        }
    }

    pub fn dim(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Training documents seen for a label
    pub fn class_count(&self, label: Label) -> usize {
        self.class_count[label.index()]
    }

    /// Structural checks run after deserializing
    pub fn validate(&self) -> Result<(), String> {
        if self.feature_log_prob[0].len() != self.feature_log_prob[1].len() {
            return Err("per-class parameter rows differ in length".into());
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(format!("invalid smoothing {}", self.alpha));
        }
        let all_finite = self
            .class_log_prior
            .iter()
            .chain(self.feature_log_prob.iter().flatten())
            .all(|v| v.is_finite() && *v <= 0.0);
        if !all_finite {
            return Err("non-finite or positive log-probability".into());
        }
        let prior_sum = self.class_log_prior[0].exp() + self.class_log_prior[1].exp();
        if (prior_sum - 1.0).abs() > 1e-6 {
            return Err(format!("class priors sum to {}", prior_sum));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(pairs: &[(u32, f64)]) -> FeatureVector {
        FeatureVector::from_pairs(3, pairs.iter().copied())
    }

    fn toy_model() -> MultinomialNb {
        let vectors = vec![
            fv(&[(0, 1.0)]),
            fv(&[(0, 2.0), (2, 1.0)]),
            fv(&[(1, 1.0)]),
            fv(&[(1, 1.5)]),
            fv(&[(1, 1.0), (2, 1.0)]),
        ];
        let labels = vec![
            Label::Reliable,
            Label::Reliable,
            Label::Misinformation,
            Label::Misinformation,
            Label::Misinformation,
        ];
        MultinomialNb::fit(&vectors, &labels, DEFAULT_ALPHA).unwrap()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = toy_model();
        for v in [fv(&[]), fv(&[(0, 3.0)]), fv(&[(1, 0.2), (2, 9.0)])] {
            let p = model.predict_proba(&v);
            assert!((p.p_reliable + p.p_misinformation - 1.0).abs() < 1e-9);
            assert!((0.0..=1.0).contains(&p.p_misinformation));
        }
    }

    #[test]
    fn test_evidence_moves_probability() {
        let model = toy_model();
        assert_eq!(model.predict_proba(&fv(&[(0, 2.0)])).label(), Label::Reliable);
        assert_eq!(
            model.predict_proba(&fv(&[(1, 2.0)])).label(),
            Label::Misinformation
        );
    }

    #[test]
    fn test_empty_vector_yields_priors() {
        let model = toy_model();
        let p = model.predict_proba(&fv(&[]));
        assert!((p.p_reliable - 0.4).abs() < 1e-9);
        assert!((p.p_misinformation - 0.6).abs() < 1e-9);
        let priors = model.priors();
        assert!((p.p_reliable - priors.p_reliable).abs() < 1e-12);
        assert!((p.p_misinformation - priors.p_misinformation).abs() < 1e-12);
    }

    #[test]
    fn test_smoothing_avoids_zero_probabilities() {
        let model = toy_model();
        // Feature 1 never appears in reliable docs
        let p = model.predict_proba(&fv(&[(1, 50.0)]));
        assert!(p.p_misinformation.is_finite());
        assert!(p.p_misinformation > 0.5);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_single_class_rejected() {
        let vectors = vec![fv(&[(0, 1.0)]), fv(&[(1, 1.0)])];
        let labels = vec![Label::Reliable, Label::Reliable];
        assert!(matches!(
            MultinomialNb::fit(&vectors, &labels, 1.0),
            Err(CorpusError::SingleClass)
        ));
    }

    #[test]
    fn test_fit_input_errors() {
        let vectors = vec![fv(&[(0, 1.0)])];
        assert!(matches!(
            MultinomialNb::fit(&vectors, &[], 1.0),
            Err(CorpusError::LengthMismatch { .. })
        ));
        assert!(matches!(
            MultinomialNb::fit(&vectors, &[Label::Reliable], 0.0),
            Err(CorpusError::InvalidSmoothing(_))
        ));
        let mixed = vec![fv(&[]), FeatureVector::empty(5)];
        assert!(matches!(
            MultinomialNb::fit(&mixed, &[Label::Reliable, Label::Misinformation], 1.0),
            Err(CorpusError::DimensionMismatch { .. })
        ));
    }
}
