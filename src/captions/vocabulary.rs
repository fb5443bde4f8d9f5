use std::collections::BTreeSet;

use super::{Caption, Token};

/// Distinct lowercase surface forms of a tagged caption stream.
///
/// Punctuation and symbol tokens are left out. Ordered so that sweeps over the
/// vocabulary are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Vocabulary {
    pub fn from_captions(captions: &[Caption<Token>]) -> Self {
        let words = captions
            .iter()
            .flat_map(|c| c.payload.iter())
            .filter(|t| t.is_alignable())
            .map(Token::lowercase)
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
