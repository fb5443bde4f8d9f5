/*!
 * Static language resources feeding the alignment signals.
 *
 * - `dictionary`: bidirectional word lists per language pair
 * - `embeddings`: aligned word vectors per language
 */

pub mod dictionary;
pub mod embeddings;

pub use self::dictionary::DictionaryTranslator;
pub use self::embeddings::{EmbeddingMap, WordVectorSource};
