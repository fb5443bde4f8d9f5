/*!
 * Online translation used to build the phrase tables.
 *
 * - `core`: the `WordTranslator` seam and its provider-backed implementation
 * - `cache`: the persisted phrase tables of one output document
 * - `sweep`: concurrent translation of a whole vocabulary
 * - `subtitles`: caption-by-caption translation of an SRT file
 */

pub mod cache;
pub mod core;
pub mod subtitles;
pub mod sweep;

pub use self::cache::{PhraseCache, PhraseTables};
pub use self::core::{OnlineTranslator, RetryPolicy, WordTranslator};
pub use self::subtitles::translate_collection;
pub use self::sweep::{build_phrase_tables, translate_vocabulary, SweepOptions};
