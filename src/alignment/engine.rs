/*!
 * Token alignment between a source caption stream and its destination-language
 * counterpart.
 *
 * The engine walks destination captions in order. For every destination token
 * it scores all source tokens of the temporally admitted source captions and
 * assigns the token to the best-scoring one when the score reaches
 * `ACCEPTANCE_THRESHOLD`. Assignments are visible immediately, so a source
 * token never receives the same destination word twice.
 */

use log::debug;
use std::collections::{HashMap, HashSet};

use super::signals::{SimilaritySignals, ACCEPTANCE_THRESHOLD};
use super::window::TemporalWindow;
use crate::captions::{AlignedToken, Caption, Token};
use crate::resources::{DictionaryTranslator, EmbeddingMap};

/// Position of a destination token: `(caption index, token index)`
type DestinationRef = (usize, usize);

/// Counters collected during one alignment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    /// Destination tokens that took part (punctuation and symbols excluded)
    pub considered: usize,
    /// Destination tokens assigned to a source token
    pub aligned: usize,
    /// Destination tokens with no admissible candidate at all
    pub without_candidates: usize,
}

impl AlignmentStats {
    pub fn unaligned(&self) -> usize {
        self.considered - self.aligned
    }
}

/// Single-pass, deterministic token aligner
#[derive(Debug, Clone, Copy)]
pub struct AlignmentEngine<'a> {
    signals: SimilaritySignals<'a>,
    window: TemporalWindow,
}

impl<'a> AlignmentEngine<'a> {
    pub fn new(signals: SimilaritySignals<'a>, tolerance_ms: u64) -> Self {
        Self {
            signals,
            window: TemporalWindow::new(tolerance_ms),
        }
    }

    /// Align and discard the statistics
    pub fn align(&self, source: &[Caption<Token>], destination: &[Caption<Token>]) -> Vec<Caption<AlignedToken>> {
        self.align_with_stats(source, destination).0
    }

    /// Align `destination` tokens onto `source` tokens.
    ///
    /// Returns captions parallel to `source`, each token wrapped in an
    /// `AlignedToken` whose `aligned` list holds its destination tokens in
    /// assignment order. Inputs are left untouched.
    pub fn align_with_stats(
        &self,
        source: &[Caption<Token>],
        destination: &[Caption<Token>],
    ) -> (Vec<Caption<AlignedToken>>, AlignmentStats) {
        let mut aligned: Vec<Caption<AlignedToken>> = source
            .iter()
            .map(|c| c.with_payload(c.payload.iter().cloned().map(AlignedToken::new).collect()))
            .collect();

        let mut stats = AlignmentStats::default();
        let mut consumed: HashSet<DestinationRef> = HashSet::new();

        for (d_idx, caption) in destination.iter().enumerate() {
            let candidates = self.window.candidate_tokens(&aligned, caption);

            for (t_idx, token) in caption.payload.iter().enumerate() {
                if !token.is_alignable() {
                    continue;
                }
                stats.considered += 1;
                if candidates.is_empty() {
                    stats.without_candidates += 1;
                    continue;
                }

                let Some(((c, t), score)) = self.best_candidate(&aligned, &candidates, &token.lowercase()) else {
                    continue;
                };
                if score < ACCEPTANCE_THRESHOLD {
                    continue;
                }

                // A destination token is handed out at most once
                if consumed.insert((d_idx, t_idx)) {
                    aligned[c].payload[t].aligned.push(token.clone());
                    stats.aligned += 1;
                }
            }
        }

        debug!(
            "Aligned {} of {} destination tokens ({} without temporal candidates)",
            stats.aligned, stats.considered, stats.without_candidates
        );

        (aligned, stats)
    }

    /// Highest-scoring admissible candidate. Ties keep the earliest candidate.
    fn best_candidate(
        &self,
        aligned: &[Caption<AlignedToken>],
        candidates: &[(usize, usize)],
        destination_word: &str,
    ) -> Option<((usize, usize), f64)> {
        let mut best: Option<((usize, usize), f64)> = None;

        for &(c, t) in candidates {
            let candidate = &aligned[c].payload[t];
            if !candidate.token.is_alignable() || candidate.has_aligned(destination_word) {
                continue;
            }

            let score = self.signals.score(&candidate.token.lowercase(), destination_word);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some(((c, t), score));
            }
        }

        best
    }
}

/// Align two tagged caption streams in one call
#[allow(clippy::too_many_arguments)]
pub fn align(
    source: &[Caption<Token>],
    destination: &[Caption<Token>],
    source_embeddings: &EmbeddingMap,
    destination_embeddings: &EmbeddingMap,
    dictionary: &DictionaryTranslator,
    source_to_target: &HashMap<String, String>,
    target_to_source: &HashMap<String, String>,
    tolerance_ms: u64,
) -> Vec<Caption<AlignedToken>> {
    let signals = SimilaritySignals {
        source_embeddings,
        destination_embeddings,
        dictionary,
        source_to_target,
        target_to_source,
    };
    AlignmentEngine::new(signals, tolerance_ms).align(source, destination)
}
