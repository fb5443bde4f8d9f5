use crate::captions::Caption;

/// Temporal candidate window around a destination caption.
///
/// A source caption is a candidate when its signed overlap with the
/// destination caption is at least `-tolerance_ms`, so captions that merely
/// touch are always admitted and small gaps are forgiven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalWindow {
    tolerance_ms: u64,
}

impl TemporalWindow {
    pub fn new(tolerance_ms: u64) -> Self {
        Self { tolerance_ms }
    }

    pub fn tolerance_ms(&self) -> u64 {
        self.tolerance_ms
    }

    /// Whether a source caption may hold translations of the destination caption
    pub fn admits<S, D>(&self, source: &Caption<S>, destination: &Caption<D>) -> bool {
        i128::from(source.overlap(destination)) >= -i128::from(self.tolerance_ms)
    }

    /// Indices of the admitted source captions, in source order
    pub fn candidate_captions<S, D>(&self, sources: &[Caption<S>], destination: &Caption<D>) -> Vec<usize> {
        sources
            .iter()
            .enumerate()
            .filter(|(_, source)| self.admits(source, destination))
            .map(|(i, _)| i)
            .collect()
    }

    /// Flattened `(caption, token)` positions of all candidate tokens,
    /// caption order first, then token order within each caption
    pub fn candidate_tokens<S, D>(&self, sources: &[Caption<S>], destination: &Caption<D>) -> Vec<(usize, usize)> {
        self.candidate_captions(sources, destination)
            .into_iter()
            .flat_map(|c| (0..sources[c].payload.len()).map(move |t| (c, t)))
            .collect()
    }
}
