/*!
 * # subalign - word alignment between subtitle tracks
 *
 * A Rust library that aligns the words of a source-language subtitle track
 * with its English counterpart.
 *
 * ## Features
 *
 * - SRT loading and writing
 * - Rule-based tokenization and coarse part-of-speech tagging
 * - Bilingual word lists and aligned fastText word vectors as similarity signals
 * - Word translations from an online translator, persisted per output document:
 *   - Google Cloud Translation
 *   - Ollama (local LLM)
 * - Deterministic single-pass alignment constrained to overlapping captions
 * - Colorized console rendering and a JSON alignment document
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT file handling
 * - `captions`: Caption and token types, tagging and vocabularies
 * - `resources`: Dictionary and word-vector loaders
 * - `translation`: Online translation:
 *   - `translation::core`: The `WordTranslator` seam and the provider-backed translator
 *   - `translation::cache`: The persisted phrase cache
 *   - `translation::sweep`: Vocabulary translation
 *   - `translation::subtitles`: Whole-file caption translation
 * - `alignment`: The alignment engine
 * - `presentation`: Console rendering and JSON export
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the online translators:
 *   - `providers::google`: Google Cloud Translation client
 *   - `providers::ollama`: Ollama API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod captions;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod presentation;
pub mod providers;
pub mod resources;
pub mod subtitle_processor;
pub mod translation;

// Re-export main types for easier usage
pub use alignment::{align, AlignmentEngine, SimilaritySignals};
pub use app_config::Config;
pub use captions::{AlignedToken, Caption, PartOfSpeech, Token};
pub use errors::{ConfigurationError, ProviderError, SubtitleError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part1_or_part2t};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
