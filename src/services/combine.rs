//! Adjacent-sentence relationship detection and combination.
//!
//! Two short neighbouring sentences whose relationship is recognizable from
//! the second one can be merged into a single compound sentence. Detection
//! is ordered: an explicit contrast cue anywhere in the sentence wins over
//! a cause cue, which wins over an anaphoric opening pronoun. The merge
//! uses coordinating connectors only, because they are valid between any
//! two independent clauses; subordinators would require clause analysis
//! this engine does not do. No comma is written before the connector; the
//! merged clauses are short by construction.

use rand::Rng;
use tracing::debug;

use crate::lexicon::{Lexicons, LEXICONS};
use crate::models::{Dep, Pos, RelationshipType, Sentence, Tag, Token};
use crate::services::hedging::demote_leading_capital;

/// Length gates for combination.
#[derive(Debug, Clone, Copy)]
pub struct CombineLimits {
    /// Each input sentence must have fewer words than this.
    pub max_short_words: usize,
    /// The merged sentence must not exceed this many words.
    pub max_words: usize,
}

impl Default for CombineLimits {
    fn default() -> Self {
        Self {
            max_short_words: 6,
            max_words: 20,
        }
    }
}

pub struct Combiner {
    lexicons: &'static Lexicons,
    limits: CombineLimits,
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new(&LEXICONS, CombineLimits::default())
    }
}

impl Combiner {
    pub fn new(lexicons: &'static Lexicons, limits: CombineLimits) -> Self {
        Self { lexicons, limits }
    }

    /// Classify how `next` relates to `prev`. Contrast and cause cues count
    /// anywhere in `next` ("It failed, however." is still a contrast); the
    /// anaphoric continuation pronoun must open the sentence. Contrast
    /// beats cause beats addition.
    pub fn detect_relationship(&self, _prev: &Sentence, next: &Sentence) -> RelationshipType {
        if contains_cue(next, self.lexicons.contrast_cues) {
            return RelationshipType::Contrast;
        }
        if contains_cue(next, self.lexicons.cause_cues) {
            return RelationshipType::Cause;
        }
        let Some(first) = next.first_word() else {
            return RelationshipType::None;
        };
        if self
            .lexicons
            .addition_pronouns
            .contains(&first.lower().as_str())
        {
            RelationshipType::Addition
        } else {
            RelationshipType::None
        }
    }

    /// Merge two adjacent sentences when a relationship is detected and
    /// both pass the length gates. Returns the merged sentence and the
    /// relationship, or `None` when the pair should stay separate.
    pub fn try_combine<R: Rng>(
        &self,
        prev: &Sentence,
        next: &Sentence,
        rng: &mut R,
    ) -> Option<(Sentence, RelationshipType)> {
        let relationship = self.detect_relationship(prev, next);
        if relationship == RelationshipType::None {
            return None;
        }
        if prev.word_count() >= self.limits.max_short_words
            || next.word_count() >= self.limits.max_short_words
        {
            return None;
        }
        // Only merge full clauses; verbless fragments read badly after a
        // coordinator, and a question keeps its own terminal punctuation.
        if prev.main_verb().is_none() || next.main_verb().is_none() {
            return None;
        }
        if prev.is_question() || next.is_question() {
            return None;
        }

        let mut merged = prev.clone();
        strip_terminal_punctuation(&mut merged);
        if merged.is_empty() {
            return None;
        }

        let mut tail = next.clone();
        match relationship {
            RelationshipType::Contrast => {
                drop_leading_cue(&mut tail, self.lexicons.contrast_cues)
            }
            RelationshipType::Cause => drop_leading_cue(&mut tail, self.lexicons.cause_cues),
            _ => {}
        }
        let first_word = tail.tokens.iter().position(|t| t.is_word())?;
        demote_leading_capital(&mut tail.tokens[first_word]);

        let connectors = self.lexicons.connectors(relationship);
        let connector = connectors[rng.gen_range(0..connectors.len())];

        let at = merged.tokens.len();
        let bridge: Vec<Token> = connector
            .split_whitespace()
            .map(|w| Token::new(w, w, Pos::Cconj, Tag::Other, Dep::Other, 0, 0))
            .collect();
        merged.insert_tokens(at, bridge);

        let offset = merged.tokens.len();
        for token in &mut tail.tokens {
            token.index += offset;
            token.head += offset;
        }
        merged.tokens.extend(tail.tokens);

        if merged.word_count() > self.limits.max_words {
            return None;
        }
        debug!(relationship = ?relationship, connector, "combined adjacent sentences");
        Some((merged, relationship))
    }
}

fn strip_terminal_punctuation(sentence: &mut Sentence) {
    while sentence
        .tokens
        .last()
        .map(|t| t.pos == Pos::Punct)
        .unwrap_or(false)
    {
        let at = sentence.tokens.len() - 1;
        sentence.remove_token(at);
    }
}

fn contains_cue(sentence: &Sentence, cues: &[&str]) -> bool {
    sentence
        .tokens
        .iter()
        .any(|t| t.is_word() && cues.contains(&t.lower().as_str()))
}

/// Remove a sentence-initial cue word ("However", "Therefore") and the
/// comma that usually follows it; the connector takes over its job. A cue
/// sitting mid-sentence ("It failed, however.") stays where it is.
fn drop_leading_cue(sentence: &mut Sentence, cues: &[&str]) {
    let Some(first) = sentence.tokens.iter().position(|t| t.is_word()) else {
        return;
    };
    if !cues.contains(&sentence.tokens[first].lower().as_str()) {
        return;
    }
    sentence.remove_token(first);
    if sentence
        .tokens
        .get(first)
        .map(|t| t.text == ",")
        .unwrap_or(false)
    {
        sentence.remove_token(first);
    }
}
