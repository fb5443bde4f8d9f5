/*!
 * Tokenization and part-of-speech tagging of caption text.
 *
 * The alignment engine only needs to tell punctuation and symbols apart from
 * everything else, so the bundled `RuleTagger` splits text with a regex and
 * assigns coarse categories. Richer taggers plug in through the `Tagger` trait.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::{PartOfSpeech, Token};

// @const: word (with inner apostrophes/hyphens) or a single non-space character
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:['’\-]\w+)*|[^\w\s]").expect("token pattern is valid")
});

const SYMBOL_CHARS: &[char] = &[
    '$', '%', '+', '<', '=', '>', '^', '|', '~', '#', '&', '*', '@', '©', '®', '°', '§', '×',
    '÷', '€', '£', '¥', '¢', '™', '♪', '♫',
];

/// Converts raw caption text into tagged tokens
pub trait Tagger {
    /// Tag one caption line; blank text yields no tokens
    fn tag(&self, text: &str) -> Vec<Token>;
}

/// Regex tokenizer with coarse categories (`PUNCT`, `SYM`, `NUM`, `X`)
#[derive(Debug, Clone, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    fn classify(surface: &str) -> PartOfSpeech {
        let mut chars = surface.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_alphanumeric() && c != '_' => {
                if SYMBOL_CHARS.contains(&c) {
                    PartOfSpeech::Sym
                } else {
                    PartOfSpeech::Punct
                }
            }
            _ if surface.chars().all(|c| c.is_numeric()) => PartOfSpeech::Num,
            _ => PartOfSpeech::X,
        }
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, text: &str) -> Vec<Token> {
        let line = text.trim();
        if line.is_empty() {
            return Vec::new();
        }

        TOKEN_REGEX
            .find_iter(line)
            .map(|m| Token::new(m.as_str(), Self::classify(m.as_str())))
            .collect()
    }
}
