/*!
 * Token alignment between two timed caption streams.
 *
 * - `window`: temporal candidate selection (signed overlap with tolerance)
 * - `signals`: similarity scoring from dictionary, phrase cache and word vectors
 * - `engine`: the single-pass aligner itself
 */

pub mod engine;
pub mod signals;
pub mod window;

pub use self::engine::{align, AlignmentEngine, AlignmentStats};
pub use self::signals::{Signal, SimilaritySignals, ACCEPTANCE_THRESHOLD};
pub use self::window::TemporalWindow;
