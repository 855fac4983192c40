//! Weighted hedging strategy selector and applier.
//!
//! Given a sentence that passed the safety gate, draws one of five
//! strategies by weighted probability and applies it at the right insertion
//! or replacement point. A strategy whose trigger is not met falls through
//! to the next by weight; running out of strategies is a normal "unchanged"
//! outcome, never an error.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

use crate::lexicon::{Lexicons, LEXICONS};
use crate::models::{Dep, HedgeStrategy, Pos, ProtectionFlags, Sentence, Tag, Token};
use crate::utils::inflect::agree_phrase;
use crate::utils::text::lowercase_first;
use crate::ProsaicError;

/// Default strategy weights, in [`HedgeStrategy::ALL`] order.
pub const DEFAULT_WEIGHTS: [u32; 5] = [30, 25, 20, 15, 10];

/// Result of a hedging attempt. "Unchanged" is a success: protection and
/// unmet triggers are expected outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum HedgeOutcome {
    Unchanged,
    Applied {
        sentence: Sentence,
        strategy: HedgeStrategy,
    },
}

pub struct Hedger {
    lexicons: &'static Lexicons,
    distribution: WeightedIndex<u32>,
}

impl Default for Hedger {
    fn default() -> Self {
        Self::new(&LEXICONS, DEFAULT_WEIGHTS).expect("default weights are valid")
    }
}

impl Hedger {
    pub fn new(lexicons: &'static Lexicons, weights: [u32; 5]) -> Result<Self, ProsaicError> {
        let distribution = WeightedIndex::new(weights).map_err(|e| {
            ProsaicError::Validation(format!("invalid strategy weights {:?}: {}", weights, e))
        })?;
        Ok(Self {
            lexicons,
            distribution,
        })
    }

    /// Attempt to hedge one sentence. The probability gate has already been
    /// applied by the caller; this decides *whether a transformation is
    /// safe* and *which strategy realizes it*.
    pub fn hedge<R: Rng>(
        &self,
        sentence: &Sentence,
        flags: &ProtectionFlags,
        rng: &mut R,
    ) -> HedgeOutcome {
        if flags.blocks_sentence() {
            return HedgeOutcome::Unchanged;
        }
        if self.already_hedged(sentence) {
            debug!("double-hedge guard: sentence already contains hedge vocabulary");
            return HedgeOutcome::Unchanged;
        }

        for strategy in self.strategy_order(rng) {
            if let Some(hedged) = self.apply(strategy, sentence, flags, rng) {
                debug!(strategy = strategy.name(), "hedge applied");
                return HedgeOutcome::Applied {
                    sentence: hedged,
                    strategy,
                };
            }
        }
        HedgeOutcome::Unchanged
    }

    /// Global double-hedge guard: any existing hedge-vocabulary token skips
    /// hedging entirely, regardless of the probability draw.
    fn already_hedged(&self, sentence: &Sentence) -> bool {
        sentence.tokens.iter().any(|t| {
            !t.is_citation_placeholder()
                && (self.lexicons.catalog.is_hedge_word(&t.lemma)
                    || self.lexicons.catalog.is_hedge_word(&t.lower()))
        })
    }

    /// Weighted draw for the first pick, then the remaining strategies in
    /// descending default-weight order.
    fn strategy_order<R: Rng>(&self, rng: &mut R) -> Vec<HedgeStrategy> {
        let first = HedgeStrategy::ALL[self.distribution.sample(rng)];
        let mut order = vec![first];
        order.extend(HedgeStrategy::ALL.iter().copied().filter(|s| *s != first));
        order
    }

    fn apply<R: Rng>(
        &self,
        strategy: HedgeStrategy,
        sentence: &Sentence,
        flags: &ProtectionFlags,
        rng: &mut R,
    ) -> Option<Sentence> {
        // A literal main verb ("The chart shows a trend") rules out the
        // strategies that rewrite or modify the verb; adjective and
        // sentence-level strategies remain available.
        if flags.literal_verb && strategy.anchors_on_verb() {
            return None;
        }
        match strategy {
            HedgeStrategy::ModalReplacement => self.replace_strong_verb(sentence, rng),
            HedgeStrategy::FrequencyAdverb => self.insert_frequency_adverb(sentence, rng),
            HedgeStrategy::Approximator => self.insert_approximator(sentence, rng),
            HedgeStrategy::EpistemicMarker => self.insert_epistemic_marker(sentence, rng),
            HedgeStrategy::ScopeLimiter => self.prepend_scope_limiter(sentence, rng),
        }
    }

    /// Strategy 1: replace a strong main verb (or its modal auxiliary) with
    /// a hedged alternative, preserving agreement.
    fn replace_strong_verb<R: Rng>(&self, sentence: &Sentence, rng: &mut R) -> Option<Sentence> {
        let root = sentence.main_verb()?;
        let catalog = &self.lexicons.catalog;

        // The table may match the root itself ("shows") or a bare modal
        // auxiliary ("will").
        let target = if catalog.verb_hedges.contains_key(root.lemma.as_str()) {
            root
        } else {
            sentence
                .tokens
                .iter()
                .find(|t| t.dep == Dep::Aux && catalog.verb_hedges.contains_key(t.lemma.as_str()))?
        };

        let alternatives = catalog.verb_hedges[target.lemma.as_str()];
        let choice = alternatives[rng.gen_range(0..alternatives.len())];
        let inflected = agree_phrase(choice, target.tag);
        let replacement = verb_phrase_tokens(&inflected, choice);
        let mut hedged = sentence.clone();
        hedged.replace_token(target.index, replacement);
        Some(hedged)
    }

    /// Strategy 2: insert a frequency adverb immediately before the main
    /// verb. The double-hedge guard has already ruled out existing hedges.
    fn insert_frequency_adverb<R: Rng>(
        &self,
        sentence: &Sentence,
        rng: &mut R,
    ) -> Option<Sentence> {
        let root = sentence.main_verb()?;
        let adverbs = self.lexicons.catalog.frequency_adverbs;
        let adverb = adverbs[rng.gen_range(0..adverbs.len())];
        let token = Token::new(adverb, adverb, Pos::Adv, Tag::Other, Dep::Other, root.index, 0);
        let mut hedged = sentence.clone();
        hedged.insert_tokens(root.index, vec![token]);
        Some(hedged)
    }

    /// Strategy 3: insert a degree modifier before the first strong
    /// adjective.
    fn insert_approximator<R: Rng>(&self, sentence: &Sentence, rng: &mut R) -> Option<Sentence> {
        let adjective = sentence.tokens.iter().find(|t| {
            t.pos == Pos::Adj
                && self
                    .lexicons
                    .strong_adjectives
                    .contains(t.lower().as_str())
        })?;
        let approximators = self.lexicons.catalog.approximators;
        let choice = approximators[rng.gen_range(0..approximators.len())];
        let token = Token::new(choice, choice, Pos::Adv, Tag::Other, Dep::Other, adjective.index, 0);
        let mut hedged = sentence.clone();
        hedged.insert_tokens(adjective.index, vec![token]);
        Some(hedged)
    }

    /// Strategy 4: insert an epistemic marker before the main verb and
    /// convert the verb to base form ("shows" → "appears to show").
    fn insert_epistemic_marker<R: Rng>(
        &self,
        sentence: &Sentence,
        rng: &mut R,
    ) -> Option<Sentence> {
        let root = sentence.main_verb()?;
        // An existing auxiliary chain ("has shown", "will fail") would turn
        // ungrammatical; decline and let another strategy handle it.
        if sentence.tokens.iter().any(|t| t.dep == Dep::Aux) {
            return None;
        }
        if matches!(root.tag, Tag::Vbg | Tag::Vbn | Tag::Md) {
            return None;
        }
        let markers = self.lexicons.catalog.epistemic_markers;
        let marker = markers[rng.gen_range(0..markers.len())];
        let inflected = agree_phrase(marker, root.tag);
        let phrase = format!("{} {}", inflected, root.lemma);
        let replacement = verb_phrase_tokens(&phrase, marker);
        let mut hedged = sentence.clone();
        hedged.replace_token(root.index, replacement);
        Some(hedged)
    }

    /// Strategy 5: prepend a scope-limiting phrase and lowercase the
    /// displaced first word (proper nouns keep their capital).
    fn prepend_scope_limiter<R: Rng>(&self, sentence: &Sentence, rng: &mut R) -> Option<Sentence> {
        let first = sentence.first_word()?;
        if self.lexicons.is_opener(&first.lower()) {
            return None;
        }
        let limiters = self.lexicons.catalog.scope_limiters;
        let limiter = limiters[rng.gen_range(0..limiters.len())];

        let mut hedged = sentence.clone();
        let first_idx = first.index;
        demote_leading_capital(&mut hedged.tokens[first_idx]);

        let mut prefix: Vec<Token> = limiter
            .split_whitespace()
            .map(|w| Token::new(w, w.to_lowercase(), Pos::Adv, Tag::Other, Dep::Other, 0, 0))
            .collect();
        prefix.push(Token::new(",", ",", Pos::Punct, Tag::Other, Dep::Other, 0, 0));
        hedged.insert_tokens(0, prefix);
        Some(hedged)
    }
}

/// Build tokens for an inflected verb phrase, assigning verb/particle tags.
/// `source` is the uninflected phrase; its words supply the lemmas.
fn verb_phrase_tokens(inflected: &str, source: &str) -> Vec<Token> {
    let lemmas: Vec<&str> = source.split_whitespace().collect();
    inflected
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lemma = lemmas.get(i).copied().unwrap_or(word).to_lowercase();
            let (pos, tag) = if word == "to" {
                (Pos::Part, Tag::Other)
            } else if crate::utils::inflect::MODALS.contains(&word) {
                (Pos::Aux, Tag::Md)
            } else {
                (Pos::Verb, if i == 0 { Tag::Vbz } else { Tag::Vb })
            };
            Token::new(word, lemma, pos, tag, Dep::Other, 0, 0)
        })
        .collect()
}

/// Lowercase a sentence-initial word unless it is a proper noun, the
/// pronoun "I", an acronym, or a citation placeholder.
pub(crate) fn demote_leading_capital(token: &mut Token) {
    let keep = token.pos == Pos::ProperNoun
        || token.text == "I"
        || token.is_citation_placeholder()
        || (token.text.len() >= 2 && token.text.chars().all(|c| c.is_uppercase()));
    if !keep {
        token.text = lowercase_first(&token.text);
    }
}
