//! Multi-signal safety classifier.
//!
//! Decides, per sentence and per verb, whether transformation is safe.
//! Every check is independent and the full flag set is computed before any
//! transformation begins; classification is deterministic, side-effect
//! free, and never mutates the sentence.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::lexicon::{Lexicons, LEXICONS};
use crate::models::{Pos, ProtectionFlags, Sentence, Tag, Token};

static ARITHMETIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\s*[+\-*/=^]\s*\d").expect("valid regex"));

static DEFINING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:is defined as|refers to|means that|by definition|is called|is known as)\b")
        .expect("valid regex")
});

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\s*%").expect("valid regex"));

// Single-letter unit abbreviations are deliberately left out; they collide
// with ordinary words and initials.
static UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s*(?:percent|degrees?|km|cm|mm|mi|kg|mg|lbs?|oz|ml|gb|mb|kb|tb|ghz|mhz|hz|ms|px)\b",
    )
    .expect("valid regex")
});

/// Sentences shorter than this many words are never transformed.
const MIN_WORDS: usize = 4;

pub struct SafetyClassifier {
    lexicons: &'static Lexicons,
}

impl Default for SafetyClassifier {
    fn default() -> Self {
        Self::new(&LEXICONS)
    }
}

impl SafetyClassifier {
    pub fn new(lexicons: &'static Lexicons) -> Self {
        Self { lexicons }
    }

    /// Compute the full protection flag set for one sentence.
    pub fn classify(&self, sentence: &Sentence) -> ProtectionFlags {
        let mut flags = ProtectionFlags::default();

        flags.too_short = sentence.word_count() < MIN_WORDS;
        flags.question = sentence.is_question();
        flags.citation = sentence.contains_placeholder();

        flags.technical_keyword = sentence.tokens.iter().any(|t| {
            !t.is_citation_placeholder()
                && (self.lexicons.is_technical_keyword(&t.lemma)
                    || self.lexicons.is_technical_keyword(&t.lower()))
        });

        let text = sentence.text();
        flags.factual_pattern = ARITHMETIC_RE.is_match(&text) || DEFINING_RE.is_match(&text);
        flags.measurement = PERCENT_RE.is_match(&text) || UNIT_RE.is_match(&text);

        flags.command = sentence
            .tokens
            .first()
            .map(|t| t.pos == Pos::Verb && t.tag == Tag::Vb)
            .unwrap_or(false)
            && sentence.subject().is_none()
            && !flags.question;

        if let Some(subject) = sentence.subject() {
            flags.technical_subject = self
                .lexicons
                .technical_subjects
                .contains(subject.lemma.as_str());
            flags.research_subject = self
                .lexicons
                .research_subjects
                .contains(subject.lemma.as_str());
        }

        if let Some(verb) = sentence.main_verb() {
            flags.spec_guarantee = flags.technical_subject
                && self.lexicons.guarantee_verbs.contains(&verb.lemma.as_str());
            flags.literal_verb = self.is_literal_usage(verb, sentence);
        }

        if flags.blocks_sentence() || flags.literal_verb {
            debug!(flags = ?flags.raised(), "sentence protected");
        }
        flags
    }

    /// Whether a specific verb is used in its literal, non-claim sense —
    /// i.e. a noun from the verb's literal-context list co-occurs in the
    /// sentence. Other verbs in the sentence are unaffected.
    pub fn is_literal_usage(&self, verb: &Token, sentence: &Sentence) -> bool {
        let Some(contexts) = self.lexicons.literal_contexts.get(verb.lemma.as_str()) else {
            return false;
        };
        // Lemma comparison over every token rather than nouns only: the
        // context words are unambiguous nouns, so a looser scan is safe and
        // robust to tagging mistakes.
        sentence.tokens.iter().any(|t| {
            t.index != verb.index
                && (contexts.contains(&t.lemma.as_str()) || contexts.contains(&t.lower().as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::HeuristicAnnotator;

    fn classify(text: &str) -> ProtectionFlags {
        SafetyClassifier::default().classify(&HeuristicAnnotator::new().annotate_sentence(text))
    }

    #[test]
    fn test_technical_guarantee_is_protected() {
        let flags = classify("The API guarantees thread safety.");
        assert!(flags.technical_subject);
        assert!(flags.spec_guarantee);
        assert!(flags.technical_keyword); // "api", "thread"
        assert!(flags.blocks_sentence());
    }

    #[test]
    fn test_literal_show_is_flagged_per_verb() {
        let flags = classify("The screen shows the menu.");
        assert!(flags.literal_verb);
        // "menu" is also UI vocabulary.
        assert!(flags.technical_keyword);
    }

    #[test]
    fn test_research_claim_is_not_protected() {
        let flags = classify("The study shows improvement.");
        assert!(flags.research_subject);
        assert!(!flags.literal_verb);
        assert!(!flags.blocks_sentence());
    }

    #[test]
    fn test_arithmetic_is_factual() {
        let flags = classify("2 + 2 = 4");
        assert!(flags.factual_pattern);
        assert!(flags.too_short);
        assert!(flags.blocks_sentence());
    }

    #[test]
    fn test_defining_construction_is_factual() {
        let flags = classify("Entropy refers to disorder in a closed context.");
        assert!(flags.factual_pattern);
    }

    #[test]
    fn test_measurement_is_protected() {
        assert!(classify("The error rate dropped by 12 percent overall.").measurement);
        assert!(classify("The tumor measured 3.5 cm across the sample.").measurement);
        assert!(classify("Coverage reached 95% in every trial run.").measurement);
        assert!(!classify("The error rate dropped noticeably overall.").measurement);
    }

    #[test]
    fn test_question_and_command() {
        assert!(classify("Does the approach generalize to other data?").question);
        let flags = classify("Click the button to continue now.");
        assert!(flags.command);
    }

    #[test]
    fn test_too_short() {
        assert!(classify("It works well.").too_short);
        assert!(!classify("It works well enough.").too_short);
    }

    #[test]
    fn test_citation_placeholder_protects() {
        let flags = classify("The effect is well documented [[REF_1]].");
        assert!(flags.citation);
        assert!(flags.blocks_sentence());
    }

    #[test]
    fn test_literal_usage_requires_context_noun() {
        let annotator = HeuristicAnnotator::new();
        let classifier = SafetyClassifier::default();

        let literal = annotator.annotate_sentence("The figure shows the trend clearly.");
        let verb = literal.main_verb().expect("verb");
        assert!(classifier.is_literal_usage(verb, &literal));

        let claim = annotator.annotate_sentence("The survey shows a strong trend.");
        let verb = claim.main_verb().expect("verb");
        assert!(!classifier.is_literal_usage(verb, &claim));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let a = classify("The study shows improvement.");
        let b = classify("The study shows improvement.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_sentence_is_only_too_short() {
        let flags = SafetyClassifier::default().classify(&Sentence::default());
        assert!(flags.too_short);
        assert!(!flags.question);
        assert!(!flags.technical_keyword);
        assert!(!flags.command);
    }
}
