//! Document rewrite orchestrator.
//!
//! Thin sequencing over the engine stages: citation extraction, contraction
//! expansion, annotation, per-sentence classify/hedge, the adjacent-pair
//! combine pass, transition insertion, then reassembly, citation
//! restoration, and spacing normalization. Transitions come after combining
//! so an inserted transition can never be mistaken for an author-written
//! relationship cue. All randomness flows through the caller-provided
//! source, so a fixed seed reproduces the output byte for byte.

use rand::Rng;
use tracing::{debug, info};

use crate::annotate::{Annotator, HeuristicAnnotator};
use crate::config::RewriteConfig;
use crate::models::{AppliedRule, ProtectionFlags, RewriteOutcome, Sentence, TransformResult};
use crate::services::citations::CitationVault;
use crate::services::combine::{CombineLimits, Combiner};
use crate::services::hedging::{HedgeOutcome, Hedger};
use crate::services::safety::SafetyClassifier;
use crate::services::surface::SurfaceEditor;
use crate::utils::text::{count_words, normalize_spacing};
use crate::lexicon::LEXICONS;
use crate::ProsaicError;

/// One sentence of the output stream: either a worked original sentence or
/// a merged pair, with the log bookkeeping for both constituents.
struct OutputUnit {
    index: usize,
    sentence: Sentence,
    rules: Vec<AppliedRule>,
    absorbed: Option<(usize, Vec<AppliedRule>)>,
    protected: bool,
}

pub struct Rewriter<A: Annotator = HeuristicAnnotator> {
    annotator: A,
    classifier: SafetyClassifier,
    hedger: Hedger,
    combiner: Combiner,
    surface: SurfaceEditor,
    config: RewriteConfig,
}

impl Rewriter<HeuristicAnnotator> {
    pub fn new(config: RewriteConfig) -> Result<Self, ProsaicError> {
        Self::with_annotator(HeuristicAnnotator::new(), config)
    }
}

impl<A: Annotator> Rewriter<A> {
    pub fn with_annotator(annotator: A, config: RewriteConfig) -> Result<Self, ProsaicError> {
        config.validate()?;
        Ok(Self {
            annotator,
            classifier: SafetyClassifier::new(&LEXICONS),
            hedger: Hedger::new(&LEXICONS, config.strategy_weights)?,
            combiner: Combiner::new(&LEXICONS, CombineLimits::default()),
            surface: SurfaceEditor::new(&LEXICONS),
            config,
        })
    }

    /// Rewrite one document. Sentences are processed independently except
    /// for the pairwise combine pass; nothing is mutated until a
    /// transformation is finalized.
    pub fn rewrite<R: Rng>(&self, text: &str, rng: &mut R) -> Result<RewriteOutcome, ProsaicError> {
        let original_word_count = count_words(text);

        let (without_citations, vault) = CitationVault::extract(text);
        let expanded = self.surface.expand_contractions(&without_citations);
        let sentences = self.annotator.annotate(&expanded)?;
        let original_sentence_count = sentences.len();

        // Per-sentence stage: classify once, then gate hedging.
        let mut worked: Vec<(usize, Sentence, ProtectionFlags, Vec<AppliedRule>)> = Vec::new();
        for (index, sentence) in sentences.into_iter().enumerate() {
            let flags = self.classifier.classify(&sentence);
            let mut rules = Vec::new();
            let mut current = sentence;

            if rng.gen::<f64>() < self.config.hedging_probability {
                if let HedgeOutcome::Applied { sentence, strategy } =
                    self.hedger.hedge(&current, &flags, rng)
                {
                    current = sentence;
                    rules.push(AppliedRule::Hedged(strategy));
                }
            }

            worked.push((index, current, flags, rules));
        }

        // Pairwise combine pass. A merged pair is consumed whole; the
        // second sentence's log entry records the merge with empty text.
        let mut units: Vec<OutputUnit> = Vec::new();
        let mut i = 0;
        while i < worked.len() {
            let (index, sentence, flags, rules) = &worked[i];
            let merged = worked.get(i + 1).and_then(|(_, next, _, _)| {
                if rng.gen::<f64>() < self.config.sentence_combine_probability {
                    self.combiner.try_combine(sentence, next, rng)
                } else {
                    None
                }
            });

            match merged {
                Some((combined, relationship)) => {
                    let (next_index, _, next_flags, next_rules) = &worked[i + 1];
                    let mut rules = rules.clone();
                    rules.push(AppliedRule::Combined(relationship));
                    let mut absorbed = next_rules.clone();
                    absorbed.push(AppliedRule::Combined(relationship));
                    units.push(OutputUnit {
                        index: *index,
                        sentence: combined,
                        rules,
                        absorbed: Some((*next_index, absorbed)),
                        protected: flags.blocks_sentence() || next_flags.blocks_sentence(),
                    });
                    i += 2;
                }
                None => {
                    units.push(OutputUnit {
                        index: *index,
                        sentence: sentence.clone(),
                        rules: rules.clone(),
                        absorbed: None,
                        protected: flags.blocks_sentence(),
                    });
                    i += 1;
                }
            }
        }

        // Transition pass, over the combined units. Protected sentences and
        // questions keep their openings; the first sentence never gets one.
        for (position, unit) in units.iter_mut().enumerate() {
            if position == 0 || unit.protected || unit.sentence.is_question() {
                continue;
            }
            if rng.gen::<f64>() < self.config.transition_probability {
                if let Some(sentence) = self.surface.add_transition(&unit.sentence, rng) {
                    unit.sentence = sentence;
                    unit.rules.push(AppliedRule::Transitioned);
                }
            }
        }

        let mut log: Vec<TransformResult> = Vec::new();
        let mut parts: Vec<String> = Vec::new();
        for unit in units {
            let mut rules = unit.rules;
            if rules.is_empty() {
                rules.push(AppliedRule::Unchanged);
            }
            let text = unit.sentence.text();
            parts.push(text.clone());
            log.push(TransformResult {
                index: unit.index,
                rules,
                text,
            });
            if let Some((next_index, absorbed)) = unit.absorbed {
                log.push(TransformResult {
                    index: next_index,
                    rules: absorbed,
                    text: String::new(),
                });
            }
        }

        let rewritten_sentence_count = parts.len();
        let reassembled = parts.join(" ");
        let restored = vault.restore(&reassembled);
        let rewritten_text = normalize_spacing(&restored);
        let rewritten_word_count = count_words(&rewritten_text);

        debug!(
            original_sentences = original_sentence_count,
            rewritten_sentences = rewritten_sentence_count,
            citations = vault.len(),
            "rewrite complete"
        );
        info!(
            original_words = original_word_count,
            rewritten_words = rewritten_word_count,
            "document rewritten"
        );

        Ok(RewriteOutcome {
            original_text: text.to_string(),
            rewritten_text,
            original_word_count,
            rewritten_word_count,
            original_sentence_count,
            rewritten_sentence_count,
            log,
        })
    }

    /// Per-sentence protection analysis without transformation, for the
    /// inspection surface.
    pub fn inspect(&self, text: &str) -> Result<Vec<(Sentence, ProtectionFlags)>, ProsaicError> {
        let (without_citations, _) = CitationVault::extract(text);
        let expanded = self.surface.expand_contractions(&without_citations);
        let sentences = self.annotator.annotate(&expanded)?;
        Ok(sentences
            .into_iter()
            .map(|s| {
                let flags = self.classifier.classify(&s);
                (s, flags)
            })
            .collect())
    }
}
