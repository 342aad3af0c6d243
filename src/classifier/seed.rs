//! Bundled seed corpus
//!
//! Ships with the binary so a fresh install can classify on day one. Used on
//! cold start and whenever the persisted model is missing or corrupt.

use super::corpus::parse_jsonl;
use super::LabeledExample;

const SEED_CORPUS_JSONL: &str = include_str!("../../models/seed_corpus.jsonl");

/// The embedded labeled examples
pub fn seed_corpus() -> Vec<LabeledExample> {
    parse_jsonl(SEED_CORPUS_JSONL, "seed_corpus.jsonl")
}
