use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::alignment::{AlignmentEngine, AlignmentStats, SimilaritySignals};
use crate::app_config::Config;
use crate::captions::{tag_entries, AlignedToken, Caption, RuleTagger, Tagger, Token, Vocabulary};
use crate::errors::ConfigurationError;
use crate::file_utils::FileManager;
use crate::language_utils::normalize_to_part1_or_part2t;
use crate::presentation::AlignmentDocument;
use crate::resources::{DictionaryTranslator, WordVectorSource};
use crate::subtitle_processor::SubtitleCollection;
use crate::translation::{build_phrase_tables, translate_collection, OnlineTranslator, PhraseCache, SweepOptions, WordTranslator};

// @module: Application controller for caption alignment

/// Everything produced by one alignment run
#[derive(Debug, Clone)]
pub struct AlignmentOutcome {
    /// Source captions with their assigned destination tokens
    pub aligned: Vec<Caption<AlignedToken>>,
    /// Tagged destination captions
    pub destination: Vec<Caption<Token>>,
    /// Engine counters
    pub stats: AlignmentStats,
    /// Where the output document was written
    pub output_path: PathBuf,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Tokenizer and POS tagger used for both streams
    tagger: Box<dyn Tagger + Send + Sync>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            tagger: Box::new(RuleTagger::new()),
        })
    }

    /// Replace the default rule-based tagger
    pub fn with_tagger(mut self, tagger: Box<dyn Tagger + Send + Sync>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check every fatal precondition before any work is done: configuration,
    /// dictionary, word vectors, then the credential if the phrase cache has to
    /// be fetched. Returns the normalized source and destination codes.
    pub fn preflight(&self, output_path: &Path) -> Result<(String, String), ConfigurationError> {
        let config = &self.config;
        config.validate()?;
        let (source, target) = config.language_pair()?;

        DictionaryTranslator::check_resources(&config.resources.dictionary_dir, &source, &target)?;

        let vectors = WordVectorSource::new(&config.resources.word_vectors_dir);
        vectors.locate(&source)?;
        vectors.locate(&target)?;

        if !PhraseCache::for_output(output_path).exists() {
            config.require_credential()?;
        }

        Ok((source, target))
    }

    /// Align two SRT files using the configured online translator
    pub async fn run_align(&self, source_path: &Path, destination_path: &Path, output_path: &Path) -> Result<AlignmentOutcome> {
        let languages = self.preflight(output_path)?;
        let translator = OnlineTranslator::new(&self.config.translation)?;

        if !PhraseCache::for_output(output_path).exists() {
            translator.test_connection().await.with_context(|| {
                format!(
                    "Failed to connect to {}",
                    self.config.translation.provider.display_name()
                )
            })?;
        }

        self.align_prepared(&languages, source_path, destination_path, output_path, &translator)
            .await
    }

    /// Align two SRT files, fetching missing phrase translations with `translator`
    pub async fn align_files<T: WordTranslator + ?Sized>(
        &self,
        source_path: &Path,
        destination_path: &Path,
        output_path: &Path,
        translator: &T,
    ) -> Result<AlignmentOutcome> {
        let languages = self.preflight(output_path)?;
        self.align_prepared(&languages, source_path, destination_path, output_path, translator)
            .await
    }

    async fn align_prepared<T: WordTranslator + ?Sized>(
        &self,
        (source_language, target_language): &(String, String),
        source_path: &Path,
        destination_path: &Path,
        output_path: &Path,
        translator: &T,
    ) -> Result<AlignmentOutcome> {
        let start_time = Instant::now();
        FileManager::require_file(source_path, "Source captions")?;
        FileManager::require_file(destination_path, "Destination captions")?;

        let config = &self.config;
        let (source_language, target_language) = (source_language.as_str(), target_language.as_str());

        let source_subtitles = SubtitleCollection::load(source_path, source_language)?;
        let destination_subtitles = SubtitleCollection::load(destination_path, target_language)?;

        let source = self.tag_with_progress(&source_subtitles, source_language);
        let destination = self.tag_with_progress(&destination_subtitles, target_language);

        let source_vocabulary = Vocabulary::from_captions(&source);
        let destination_vocabulary = Vocabulary::from_captions(&destination);
        debug!(
            "Vocabulary sizes: {} \"{}\" words, {} \"{}\" words",
            source_vocabulary.len(),
            source_language,
            destination_vocabulary.len(),
            target_language
        );

        let vectors = WordVectorSource::new(&config.resources.word_vectors_dir);
        let source_embeddings = vectors.load(source_language, &source_vocabulary)?;
        let destination_embeddings = vectors.load(target_language, &destination_vocabulary)?;

        let dictionary = DictionaryTranslator::load(&config.resources.dictionary_dir, source_language, target_language)?;

        let cache = PhraseCache::for_output(output_path);
        let sweep_options = SweepOptions {
            concurrent_requests: config.translation.concurrent_requests(),
            progress: Some(progress_bar(0, "words")),
        };
        let (source_words, destination_words, options) = (&source_vocabulary, &destination_vocabulary, &sweep_options);
        let phrase_tables = cache
            .get_or_fetch(|| async move {
                info!(
                    "Translating vocabularies with {}",
                    config.translation.provider.display_name()
                );
                Ok::<_, anyhow::Error>(
                    build_phrase_tables(translator, source_words, destination_words, source_language, target_language, options)
                        .await,
                )
            })
            .await?;

        let signals = SimilaritySignals {
            source_embeddings: &source_embeddings,
            destination_embeddings: &destination_embeddings,
            dictionary: &dictionary,
            source_to_target: &phrase_tables.source_to_target,
            target_to_source: &phrase_tables.target_to_source,
        };
        info!("Aligning \"{}\" -> \"{}\"", source_language, target_language);
        let (aligned, stats) =
            AlignmentEngine::new(signals, config.alignment.tolerance_ms).align_with_stats(&source, &destination);

        AlignmentDocument::new(&source, &destination, &aligned)
            .write_to(output_path)
            .context("Failed to write alignment document")?;

        info!(
            "Aligned {} of {} destination tokens in {:.1}s, wrote {}",
            stats.aligned,
            stats.considered,
            start_time.elapsed().as_secs_f64(),
            output_path.display()
        );

        Ok(AlignmentOutcome {
            aligned,
            destination,
            stats,
            output_path: output_path.to_path_buf(),
        })
    }

    /// Machine-translate a whole SRT file with the configured online translator
    pub async fn run_translate(&self, source_file: &Path, source_language: &str, destination_file: &Path, destination_language: &str) -> Result<()> {
        self.config.require_credential()?;
        let translator = OnlineTranslator::new(&self.config.translation)?;
        self.translate_file(source_file, source_language, destination_file, destination_language, &translator)
            .await
    }

    /// Translate every caption of `source_file` and write the result to `destination_file`
    pub async fn translate_file<T: WordTranslator + ?Sized>(
        &self,
        source_file: &Path,
        source_language: &str,
        destination_file: &Path,
        destination_language: &str,
        translator: &T,
    ) -> Result<()> {
        let source_language = normalize_to_part1_or_part2t(source_language)?;
        let destination_language = normalize_to_part1_or_part2t(destination_language)?;
        info!(
            "Translating {} from {} to {}",
            source_file.display(),
            source_language,
            destination_language
        );
        let subtitles = SubtitleCollection::load(source_file, &source_language)?;

        let progress = progress_bar(subtitles.entries.len() as u64, "captions");
        let translated = translate_collection(
            translator,
            &subtitles,
            &destination_language,
            self.config.translation.concurrent_requests(),
            Some(&progress),
        )
        .await?;
        progress.finish_and_clear();

        translated.write_to_srt(destination_file)?;
        info!(
            "Wrote {} captions to {}",
            destination_language,
            destination_file.display()
        );
        Ok(())
    }

    fn tag_with_progress(&self, subtitles: &SubtitleCollection, language: &str) -> Vec<Caption<Token>> {
        let progress = progress_bar(subtitles.entries.len() as u64, "captions");
        progress.set_message(format!("Running \"{}\" tagger", language));
        let tagged = tag_entries(&subtitles.entries, &*self.tagger, Some(&progress));
        progress.finish_and_clear();
        tagged
    }
}

/// Progress bar in the application's style
fn progress_bar(len: u64, unit: &str) -> ProgressBar {
    let progress_bar = ProgressBar::new(len);
    let template = format!(
        "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
        unit
    );
    let style = ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));
    progress_bar
}
