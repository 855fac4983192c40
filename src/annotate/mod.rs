//! Linguistic annotation provider seam.
//!
//! The engine consumes annotated sentences — it never tokenizes or tags
//! text itself. [`Annotator`] is the boundary: the built-in
//! [`HeuristicAnnotator`] is a lexicon/suffix-rule English tagger good
//! enough for the engine's query patterns (main verb, subject, pronouns),
//! and a deployment with a full parser can swap its own implementation in.

pub mod heuristic;

pub use heuristic::HeuristicAnnotator;

use crate::models::Sentence;
use crate::ProsaicError;

/// Per-document annotation: sentence segmentation plus a token sequence
/// with surface, lemma, part of speech, dependency label, and head index.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Vec<Sentence>, ProsaicError>;
}
