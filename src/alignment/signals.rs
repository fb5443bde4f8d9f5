/*!
 * Similarity signals between a source word and a destination word.
 *
 * Exact lexical evidence (dictionary, cached machine translation in either
 * direction) scores a flat `1.0` and is checked first, in that order. Word
 * vectors are only consulted when none of the lexical signals fire.
 */

use std::collections::HashMap;

use crate::resources::embeddings::dot;
use crate::resources::{DictionaryTranslator, EmbeddingMap};

/// Minimum score for a destination token to be assigned
pub const ACCEPTANCE_THRESHOLD: f64 = 0.3;

/// Score of any exact lexical match
pub const EXACT_MATCH_SCORE: f64 = 1.0;

/// The signal that decided a score
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Destination word listed as a dictionary translation of the source word
    Dictionary,
    /// Cached translation of the source word equals the destination word
    SourceToTarget,
    /// Cached back-translation of the destination word equals the source word
    TargetToSource,
    /// Cosine similarity of the two word vectors
    Embedding(f64),
    /// No evidence at all
    None,
}

impl Signal {
    pub fn score(self) -> f64 {
        match self {
            Self::Dictionary | Self::SourceToTarget | Self::TargetToSource => EXACT_MATCH_SCORE,
            Self::Embedding(similarity) => similarity,
            Self::None => 0.0,
        }
    }
}

/// Every translation signal the engine scores with, fully materialized
#[derive(Debug, Clone, Copy)]
pub struct SimilaritySignals<'a> {
    pub source_embeddings: &'a EmbeddingMap,
    pub destination_embeddings: &'a EmbeddingMap,
    pub dictionary: &'a DictionaryTranslator,
    pub source_to_target: &'a HashMap<String, String>,
    pub target_to_source: &'a HashMap<String, String>,
}

impl<'a> SimilaritySignals<'a> {
    /// Strongest applicable signal for two lowercase words
    pub fn signal(&self, source_word: &str, destination_word: &str) -> Signal {
        if self.dictionary.contains(source_word, destination_word) {
            return Signal::Dictionary;
        }
        if self.source_to_target.get(source_word).is_some_and(|t| t == destination_word) {
            return Signal::SourceToTarget;
        }
        if self.target_to_source.get(destination_word).is_some_and(|s| s == source_word) {
            return Signal::TargetToSource;
        }
        match (
            self.destination_embeddings.get(destination_word),
            self.source_embeddings.get(source_word),
        ) {
            (Some(d), Some(s)) => Signal::Embedding(dot(d, s)),
            _ => Signal::None,
        }
    }

    /// Similarity score for two lowercase words
    pub fn score(&self, source_word: &str, destination_word: &str) -> f64 {
        self.signal(source_word, destination_word).score()
    }
}
