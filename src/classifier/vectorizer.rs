//! TF-IDF vectorizer over a bounded vocabulary
//!
//! Tokens are lowercased runs of two or more word characters with the
//! English stop-word list removed. The vocabulary keeps the `max_features`
//! most frequent terms (ties broken lexicographically) and indexes them in
//! lexicographic order, so refitting on the same corpus is reproducible.

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::CorpusError;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// Classic English stop-word list (same set scikit-learn ships)
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn stop_words() -> &'static FxHashSet<&'static str> {
    static STOP_WORDS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

fn token_pattern() -> &'static Regex {
    static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

/// Split text into vocabulary candidates. Shared by fit and transform.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    token_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !stop_words().contains(t))
        .map(str::to_string)
        .collect()
}

/// Row normalization applied after tf × idf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureNorm {
    /// Plain term count × idf
    #[default]
    None,
    /// Scale each row to unit Euclidean length
    L2,
}

/// Sparse tf-idf vector with a fixed dimension (= vocabulary size)
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    /// (index, weight) sorted by index, weights > 0
    entries: Vec<(u32, f64)>,
}

impl FeatureVector {
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from unsorted pairs; zero weights are dropped, duplicates summed.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let mut map: FxHashMap<u32, f64> = FxHashMap::default();
        for (idx, w) in pairs {
            if (idx as usize) < dim && w > 0.0 {
                *map.entry(idx).or_insert(0.0) += w;
            }
        }
        let mut entries: Vec<(u32, f64)> = map.into_iter().collect();
        entries.sort_unstable_by_key(|(idx, _)| *idx);
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at `index`, zero if absent
    pub fn get(&self, index: u32) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }
}

/// Fitted tf-idf vectorizer: frozen vocabulary + idf weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Token to feature index
    vocabulary: HashMap<String, u32>,
    /// Smoothed idf per feature index
    idf: Vec<f64>,
    norm: FeatureNorm,
}

impl TfidfVectorizer {
    /// Fit on a corpus of documents.
    pub fn fit<S: AsRef<str>>(
        documents: &[S],
        max_features: usize,
        norm: FeatureNorm,
    ) -> Result<Self, CorpusError> {
        if documents.is_empty() {
            return Err(CorpusError::Empty);
        }

        let mut term_count: FxHashMap<String, usize> = FxHashMap::default();
        let mut doc_freq: FxHashMap<String, usize> = FxHashMap::default();

        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            for token in &tokens {
                *term_count.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        if term_count.is_empty() || max_features == 0 {
            return Err(CorpusError::EmptyVocabulary);
        }

        // Most frequent first, lexicographic among equals
        let mut ranked: Vec<(String, usize)> = term_count.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        kept.sort();

        let n_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, term) in kept.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0) as f64;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, idx as u32);
        }

        tracing::debug!("Fitted vocabulary with {} terms", vocabulary.len());

        Ok(Self {
            vocabulary,
            idf,
            norm,
        })
    }

    /// Fit, then transform every document
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        max_features: usize,
        norm: FeatureNorm,
    ) -> Result<(Self, Vec<FeatureVector>), CorpusError> {
        let vectorizer = Self::fit(documents, max_features, norm)?;
        let vectors = documents
            .iter()
            .map(|d| vectorizer.transform(d.as_ref()))
            .collect();
        Ok((vectorizer, vectors))
    }

    /// Map text to a feature vector. Unknown tokens are dropped.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: FxHashMap<u32, f64> = FxHashMap::default();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut pairs: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx as usize]))
            .collect();

        if self.norm == FeatureNorm::L2 {
            let length = pairs.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if length > 0.0 {
                for (_, w) in pairs.iter_mut() {
                    *w /= length;
                }
            }
        }

        FeatureVector::from_pairs(self.dim(), pairs)
    }

    /// Feature dimension
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, u32> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn norm(&self) -> FeatureNorm {
        self.norm
    }

    /// Structural checks run after deserializing
    pub fn validate(&self) -> Result<(), String> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &idx) in &self.vocabulary {
            let slot = seen
                .get_mut(idx as usize)
                .ok_or_else(|| format!("index {} for '{}' out of range", idx, term))?;
            if *slot {
                return Err(format!("duplicate vocabulary index {}", idx));
            }
            *slot = true;
        }
        if let Some(bad) = self.idf.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(format!("invalid idf weight {}", bad));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_rules() {
        let tokens = tokenize("The 5G towers ARE spreading a deadly radiation!");
        assert_eq!(tokens, vec!["5g", "towers", "spreading", "deadly", "radiation"]);

        // Single characters are not tokens
        assert!(tokenize("a b c x").is_empty());
    }

    #[test]
    fn test_fit_builds_sorted_vocabulary() {
        let docs = ["zebra apple", "apple mango"];
        let v = TfidfVectorizer::fit(&docs, 100, FeatureNorm::None).unwrap();
        assert_eq!(v.dim(), 3);
        assert_eq!(v.vocabulary()["apple"], 0);
        assert_eq!(v.vocabulary()["mango"], 1);
        assert_eq!(v.vocabulary()["zebra"], 2);

        // apple in both docs -> lowest idf
        assert!((v.idf()[0] - 1.0).abs() < 1e-12);
        assert!(v.idf()[1] > v.idf()[0]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = ["alpha alpha beta", "alpha gamma delta", "beta"];
        let v = TfidfVectorizer::fit(&docs, 2, FeatureNorm::None).unwrap();
        assert_eq!(v.dim(), 2);
        assert!(v.vocabulary().contains_key("alpha"));
        assert!(v.vocabulary().contains_key("beta"));
    }

    #[test]
    fn test_ties_broken_lexicographically() {
        let docs = ["delta charlie bravo"];
        let v = TfidfVectorizer::fit(&docs, 2, FeatureNorm::None).unwrap();
        assert!(v.vocabulary().contains_key("bravo"));
        assert!(v.vocabulary().contains_key("charlie"));
        assert!(!v.vocabulary().contains_key("delta"));
    }

    #[test]
    fn test_refit_is_reproducible() {
        let docs = ["one two three fish", "red fish blue fish", "fish tacos"];
        let a = TfidfVectorizer::fit(&docs, 4, FeatureNorm::None).unwrap();
        let b = TfidfVectorizer::fit(&docs, 4, FeatureNorm::None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_transform_drops_unknown_tokens() {
        let docs = ["apple mango"];
        let v = TfidfVectorizer::fit(&docs, 10, FeatureNorm::None).unwrap();
        let fv = v.transform("banana kiwi");
        assert!(fv.is_empty());
        assert_eq!(fv.dim(), 2);
        assert!(v.transform("").is_empty());
    }

    #[test]
    fn test_transform_tf_times_idf() {
        let docs = ["apple mango", "apple"];
        let v = TfidfVectorizer::fit(&docs, 10, FeatureNorm::None).unwrap();
        let fv = v.transform("mango mango apple banana");
        let mango = v.vocabulary()["mango"];
        let apple = v.vocabulary()["apple"];
        assert!((fv.get(mango) - 2.0 * v.idf()[mango as usize]).abs() < 1e-12);
        assert!((fv.get(apple) - v.idf()[apple as usize]).abs() < 1e-12);
    }

    #[test]
    fn test_l2_norm() {
        let docs = ["apple mango", "apple"];
        let v = TfidfVectorizer::fit(&docs, 10, FeatureNorm::L2).unwrap();
        let fv = v.transform("mango apple apple");
        let length: f64 = fv.entries().iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((length - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            TfidfVectorizer::fit(&empty, 10, FeatureNorm::None),
            Err(CorpusError::Empty)
        ));
        assert!(matches!(
            TfidfVectorizer::fit(&["the and of"], 10, FeatureNorm::None),
            Err(CorpusError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_validate_detects_mismatch() {
        let mut v = TfidfVectorizer::fit(&["apple mango"], 10, FeatureNorm::None).unwrap();
        assert!(v.validate().is_ok());
        v.idf.pop();
        assert!(v.validate().is_err());
    }
}
