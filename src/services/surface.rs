//! Surface-level edits that sit outside the token pipeline.
//!
//! Contraction expansion runs on raw text *before* annotation, so the
//! tagger only ever sees expanded forms. Transition insertion runs on
//! annotated sentences and shares the opener guard with the scope-limiter
//! strategy: a sentence that already opens with a hedge or transition is
//! left alone.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};

use crate::lexicon::{Lexicons, LEXICONS};
use crate::models::{Dep, Pos, Sentence, Tag, Token};
use crate::services::hedging::demote_leading_capital;
use crate::utils::text::capitalize_first;

static CONTRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z]+'[A-Za-z]+\b").expect("valid regex"));

/// Stems for which a trailing "'s" is a copula rather than a possessive.
const COPULA_S_STEMS: &[&str] = &["it", "that", "there", "here", "what", "who", "she", "he"];

pub struct SurfaceEditor {
    lexicons: &'static Lexicons,
}

impl Default for SurfaceEditor {
    fn default() -> Self {
        Self::new(&LEXICONS)
    }
}

impl SurfaceEditor {
    pub fn new(lexicons: &'static Lexicons) -> Self {
        Self { lexicons }
    }

    /// Expand English contractions in raw text. Possessive "'s" is left
    /// alone: only pronoun-like stems take the copula reading.
    pub fn expand_contractions(&self, text: &str) -> String {
        CONTRACTION_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let word = &caps[0];
                self.expand_word(word).unwrap_or_else(|| word.to_string())
            })
            .into_owned()
    }

    fn expand_word(&self, word: &str) -> Option<String> {
        let lower = word.to_lowercase();
        let titlecased = word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
        let recase = |s: String| if titlecased { capitalize_first(&s) } else { s };

        // Irregulars where suffix stripping gives the wrong stem.
        let irregular = match lower.as_str() {
            "won't" => Some("will not"),
            "can't" => Some("cannot"),
            "shan't" => Some("shall not"),
            "ain't" => Some("is not"),
            "let's" => Some("let us"),
            _ => None,
        };
        if let Some(expansion) = irregular {
            return Some(recase(expansion.to_string()));
        }

        for (suffix, expansion) in self.lexicons.contractions {
            let Some(stem) = lower.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            if *suffix == "'s" && !COPULA_S_STEMS.contains(&stem) {
                return None;
            }
            let original_stem = &word[..stem.len()];
            return Some(format!("{}{}", original_stem, expansion));
        }
        None
    }

    /// Prepend an academic transition phrase and a comma, lowercasing the
    /// displaced first word. Declines when the sentence already opens with
    /// hedge or transition vocabulary.
    pub fn add_transition<R: Rng>(&self, sentence: &Sentence, rng: &mut R) -> Option<Sentence> {
        let first = sentence.first_word()?;
        if self.lexicons.is_opener(&first.lower()) {
            return None;
        }
        let transitions = self.lexicons.transitions;
        let transition = transitions[rng.gen_range(0..transitions.len())];

        let mut edited = sentence.clone();
        let first_idx = first.index;
        demote_leading_capital(&mut edited.tokens[first_idx]);

        let mut prefix: Vec<Token> = transition
            .split_whitespace()
            .map(|w| Token::new(w, w.to_lowercase(), Pos::Adv, Tag::Other, Dep::Other, 0, 0))
            .collect();
        prefix.push(Token::new(",", ",", Pos::Punct, Tag::Other, Dep::Other, 0, 0));
        edited.insert_tokens(0, prefix);
        Some(edited)
    }
}
