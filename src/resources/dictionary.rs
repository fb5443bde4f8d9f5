/*!
 * Bidirectional word-list dictionary.
 *
 * For a language pair `src`/`dst` two files are expected in the dictionary
 * directory: `src-dst.txt` (`source translation` per line) and `dst-src.txt`
 * (`translation source` per line). Both are merged into a single lookup from a
 * lowercase source word to its candidate destination words.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigurationError;
use crate::language_utils::base_language_code;

// @const: word-list line, split on the last whitespace run
static ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)\s+(.+)$").expect("entry pattern is valid"));

/// Which column of a word-list line holds the source word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Inverse,
}

/// Word-level translations for one language pair
#[derive(Debug, Clone, Default)]
pub struct DictionaryTranslator {
    entries: HashMap<String, HashSet<String>>,
}

impl DictionaryTranslator {
    /// Build a translator from `(source, translation)` pairs
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for (source, translation) in pairs {
            dictionary.add(source.as_ref(), translation.as_ref());
        }
        dictionary
    }

    /// Paths of the two word lists for a language pair, forward first
    pub fn resource_paths(dir: &Path, source_language: &str, target_language: &str) -> (PathBuf, PathBuf) {
        let src = base_language_code(source_language);
        let dst = base_language_code(target_language);
        (
            dir.join(format!("{}-{}.txt", src, dst)),
            dir.join(format!("{}-{}.txt", dst, src)),
        )
    }

    /// Fail unless both word lists exist
    pub fn check_resources(dir: &Path, source_language: &str, target_language: &str) -> Result<(), ConfigurationError> {
        let (forward, inverse) = Self::resource_paths(dir, source_language, target_language);
        let src = base_language_code(source_language);
        let dst = base_language_code(target_language);

        if !forward.is_file() {
            return Err(ConfigurationError::MissingDictionary {
                source_language: src.to_string(),
                target_language: dst.to_string(),
                path: forward,
            });
        }
        if !inverse.is_file() {
            return Err(ConfigurationError::MissingDictionary {
                source_language: dst.to_string(),
                target_language: src.to_string(),
                path: inverse,
            });
        }
        Ok(())
    }

    /// Load and merge both word lists of a language pair
    pub fn load(dir: &Path, source_language: &str, target_language: &str) -> Result<Self> {
        Self::check_resources(dir, source_language, target_language)?;
        let (forward, inverse) = Self::resource_paths(dir, source_language, target_language);

        let mut dictionary = Self::default();
        dictionary.merge_file(&forward, Direction::Forward)?;
        dictionary.merge_file(&inverse, Direction::Inverse)?;

        if dictionary.is_empty() {
            return Err(ConfigurationError::EmptyDictionary {
                source_language: base_language_code(source_language).to_string(),
                target_language: base_language_code(target_language).to_string(),
            }
            .into());
        }

        info!(
            "Loaded dictionary {} <-> {} with {} entries",
            source_language,
            target_language,
            dictionary.len()
        );
        Ok(dictionary)
    }

    fn merge_file(&mut self, path: &Path, direction: Direction) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary: {}", path.display()))?;
        let before = self.len();
        self.merge_str(&content, direction);
        debug!("{}: {} new source words", path.display(), self.len() - before);
        Ok(())
    }

    fn merge_str(&mut self, content: &str, direction: Direction) {
        for line in content.lines() {
            let Some(caps) = ENTRY_REGEX.captures(line.trim()) else {
                continue;
            };
            let (first, second) = (caps[1].trim(), caps[2].trim());
            match direction {
                Direction::Forward => self.add(first, second),
                Direction::Inverse => self.add(second, first),
            }
        }
    }

    fn add(&mut self, source: &str, translation: &str) {
        self.entries
            .entry(source.to_lowercase())
            .or_default()
            .insert(translation.to_lowercase());
    }

    /// Whether `candidate` (lowercase) is a listed translation of `word` (lowercase)
    pub fn contains(&self, word: &str, candidate: &str) -> bool {
        self.entries
            .get(word)
            .is_some_and(|translations| translations.contains(candidate))
    }

    /// Number of distinct source words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
