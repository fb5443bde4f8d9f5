/*!
 * Vocabulary sweep: online translation of every distinct word of a caption
 * stream, used to build the phrase tables.
 */

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::collections::HashMap;

use super::cache::{normalize_phrase, PhraseTables};
use super::core::WordTranslator;
use crate::captions::Vocabulary;

/// Options shared by both sweeps of a run
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Maximum number of in-flight requests
    pub concurrent_requests: usize,
    /// Optional progress display, advanced once per word
    pub progress: Option<ProgressBar>,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            concurrent_requests: 4,
            progress: None,
        }
    }
}

/// Translate every word of `vocabulary`.
///
/// A word whose translation fails is logged and left out. Results are trimmed
/// and lowercased so they compare directly against lowercase token surfaces.
pub async fn translate_vocabulary<T: WordTranslator + ?Sized>(
    translator: &T,
    vocabulary: &Vocabulary,
    source_language: &str,
    target_language: &str,
    options: &SweepOptions,
) -> HashMap<String, String> {
    let words: Vec<&str> = vocabulary.iter().filter(|w| !w.trim().is_empty()).collect();
    if let Some(progress) = &options.progress {
        progress.set_length(words.len() as u64);
        progress.set_position(0);
        progress.set_message(format!("{} -> {}", source_language, target_language));
    }

    let results: Vec<Option<(String, String)>> = stream::iter(words)
        .map(|word| async move {
            let outcome = translator.translate(word, source_language, target_language).await;
            if let Some(progress) = &options.progress {
                progress.inc(1);
            }
            match outcome {
                Ok(translated) => match normalize_phrase(&translated) {
                    Some(normalized) => Some((word.to_string(), normalized)),
                    None => {
                        debug!("Empty translation for '{}' ignored", word);
                        None
                    }
                },
                Err(e) => {
                    warn!("Cannot translate '{}' ({} -> {}): {}", word, source_language, target_language, e);
                    None
                }
            }
        })
        .buffer_unordered(options.concurrent_requests.max(1))
        .collect()
        .await;

    let requested = results.len();
    let translations: HashMap<String, String> = results.into_iter().flatten().collect();

    info!(
        "Translated {} of {} words ({} -> {})",
        translations.len(),
        requested,
        source_language,
        target_language
    );
    translations
}

/// Sweep both vocabularies: source words into the destination language and
/// destination words back into the source language
pub async fn build_phrase_tables<T: WordTranslator + ?Sized>(
    translator: &T,
    source_vocabulary: &Vocabulary,
    destination_vocabulary: &Vocabulary,
    source_language: &str,
    destination_language: &str,
    options: &SweepOptions,
) -> PhraseTables {
    let source_to_target =
        translate_vocabulary(translator, source_vocabulary, source_language, destination_language, options).await;
    let target_to_source =
        translate_vocabulary(translator, destination_vocabulary, destination_language, source_language, options).await;

    if let Some(progress) = &options.progress {
        progress.finish_and_clear();
    }

    PhraseTables {
        source_to_target,
        target_to_source,
    }
}
