//! Transformation outcomes and the document-level rewrite record.

use serde::Serialize;

/// The five hedging strategies, in default weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeStrategy {
    /// Replace a strong verb with a hedged alternative.
    ModalReplacement,
    /// Insert a frequency adverb before the main verb.
    FrequencyAdverb,
    /// Insert a degree modifier before a strong adjective.
    Approximator,
    /// Insert an epistemic marker and convert the verb to base form.
    EpistemicMarker,
    /// Prepend a sentence-initial limiting phrase.
    ScopeLimiter,
}

impl HedgeStrategy {
    pub const ALL: [HedgeStrategy; 5] = [
        HedgeStrategy::ModalReplacement,
        HedgeStrategy::FrequencyAdverb,
        HedgeStrategy::Approximator,
        HedgeStrategy::EpistemicMarker,
        HedgeStrategy::ScopeLimiter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HedgeStrategy::ModalReplacement => "modal-replacement",
            HedgeStrategy::FrequencyAdverb => "frequency-adverb",
            HedgeStrategy::Approximator => "approximator",
            HedgeStrategy::EpistemicMarker => "epistemic-marker",
            HedgeStrategy::ScopeLimiter => "scope-limiter",
        }
    }

    /// Whether the strategy rewrites or modifies the main verb. These are
    /// the strategies a literal verb usage rules out.
    pub fn anchors_on_verb(&self) -> bool {
        matches!(
            self,
            HedgeStrategy::ModalReplacement
                | HedgeStrategy::FrequencyAdverb
                | HedgeStrategy::EpistemicMarker
        )
    }
}

/// Semantic relationship between two adjacent sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Addition,
    Contrast,
    Cause,
    None,
}

/// Which rule fired for a sentence. "Unchanged" is a normal outcome, not a
/// failure — protection and declined combines land here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "detail")]
pub enum AppliedRule {
    Unchanged,
    Hedged(HedgeStrategy),
    Transitioned,
    Combined(RelationshipType),
}

/// Per-sentence transformation record.
#[derive(Debug, Clone, Serialize)]
pub struct TransformResult {
    /// Sentence index in the original segmentation.
    pub index: usize,
    pub rules: Vec<AppliedRule>,
    pub text: String,
}

/// Document-level rewrite outcome, mirroring the word/sentence bookkeeping
/// of the service response.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteOutcome {
    pub original_text: String,
    pub rewritten_text: String,
    pub original_word_count: usize,
    pub rewritten_word_count: usize,
    pub original_sentence_count: usize,
    pub rewritten_sentence_count: usize,
    /// One entry per original sentence, recording which rules fired.
    pub log: Vec<TransformResult>,
}

impl RewriteOutcome {
    /// Whether any transformation fired at all.
    pub fn changed(&self) -> bool {
        self.log
            .iter()
            .any(|r| r.rules.iter().any(|rule| *rule != AppliedRule::Unchanged))
    }
}
