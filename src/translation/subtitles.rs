/*!
 * Whole-file caption translation, one request per non-empty caption.
 */

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;

use super::core::WordTranslator;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};

/// Translate the text of every caption, keeping numbering and timing.
///
/// Empty captions are copied unchanged. The first failing caption aborts the run.
pub async fn translate_collection<T: WordTranslator + ?Sized>(
    translator: &T,
    collection: &SubtitleCollection,
    target_language: &str,
    concurrent_requests: usize,
    progress: Option<&ProgressBar>,
) -> Result<SubtitleCollection> {
    let source_language = collection.language.as_str();
    if let Some(progress) = progress {
        progress.set_length(collection.entries.len() as u64);
    }

    let entries: Vec<SubtitleEntry> = stream::iter(&collection.entries)
        .map(|entry| async move {
            let text = if entry.text.trim().is_empty() {
                entry.text.clone()
            } else {
                translator
                    .translate(&entry.text, source_language, target_language)
                    .await
                    .with_context(|| format!("Failed to translate caption {}", entry.seq_num))?
            };
            if let Some(progress) = progress {
                progress.inc(1);
            }
            Ok::<_, anyhow::Error>(SubtitleEntry::new(entry.seq_num, entry.start_time_ms, entry.end_time_ms, text))
        })
        .buffered(concurrent_requests.max(1))
        .try_collect()
        .await?;

    Ok(SubtitleCollection {
        source_file: collection.source_file.clone(),
        entries,
        language: target_language.to_string(),
    })
}
