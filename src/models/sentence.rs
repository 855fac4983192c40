//! Transient sentence representation shared by every engine stage.
//!
//! A sentence is an ordered token sequence plus small pure query functions
//! over its dependency links (main verb, subject, word count). Derived
//! attributes are computed on demand — nothing is cached, so token edits
//! cannot leave stale state behind.

use serde::{Deserialize, Serialize};

use crate::models::token::{Dep, Pos, Token};
use crate::utils::text::detokenize;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of word tokens (punctuation and symbols excluded).
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_word()).count()
    }

    /// The main verb: the token carrying the root dependency, when it is
    /// verbal. Returns `None` for verbless sentences.
    pub fn main_verb(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.dep == Dep::Root && t.is_verb())
    }

    /// The grammatical subject: the leftward subject-labelled dependent of
    /// the main verb.
    pub fn subject(&self) -> Option<&Token> {
        let root = self.main_verb()?;
        self.tokens
            .iter()
            .filter(|t| t.dep == Dep::Subj && t.head == root.index && t.index < root.index)
            .next_back()
    }

    /// First word token, skipping leading punctuation.
    pub fn first_word(&self) -> Option<&Token> {
        self.tokens.iter().find(|t| t.is_word())
    }

    pub fn contains_placeholder(&self) -> bool {
        self.tokens.iter().any(|t| t.is_citation_placeholder())
    }

    /// Case-insensitive check for a lemma or surface match anywhere in the
    /// sentence.
    pub fn contains_word(&self, word: &str) -> bool {
        self.tokens
            .iter()
            .any(|t| t.lemma == word || t.lower() == word)
    }

    /// Nouns (common and proper), for literal-context lookups.
    pub fn nouns(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|t| matches!(t.pos, Pos::Noun | Pos::ProperNoun))
    }

    /// Ends with a question mark.
    pub fn is_question(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|t| t.pos == Pos::Punct)
            .map(|t| t.text == "?")
            .unwrap_or(false)
    }

    /// Surface rendering with conventional spacing around punctuation.
    pub fn text(&self) -> String {
        detokenize(&self.tokens)
    }

    /// Insert tokens before `at`, shifting indices and head links of
    /// everything at or after the insertion point.
    pub fn insert_tokens(&mut self, at: usize, mut new_tokens: Vec<Token>) {
        let shift = new_tokens.len();
        for t in &mut self.tokens {
            if t.index >= at {
                t.index += shift;
            }
            if t.head >= at {
                t.head += shift;
            }
        }
        for (offset, t) in new_tokens.iter_mut().enumerate() {
            t.index = at + offset;
        }
        self.tokens.splice(at..at, new_tokens);
    }

    /// Replace the token at `at` with one or more tokens. The first
    /// replacement token inherits the dependency role of the original.
    pub fn replace_token(&mut self, at: usize, mut replacement: Vec<Token>) {
        if replacement.is_empty() || at >= self.tokens.len() {
            return;
        }
        let old = self.tokens[at].clone();
        let extra = replacement.len() - 1;
        for t in &mut self.tokens {
            if t.index > at {
                t.index += extra;
            }
            if t.head > at {
                t.head += extra;
            }
        }
        replacement[0].dep = old.dep;
        replacement[0].head = old.head;
        for (offset, t) in replacement.iter_mut().enumerate() {
            t.index = at + offset;
        }
        self.tokens.splice(at..=at, replacement);
    }

    /// Remove the token at `at`, shifting indices and head links down.
    pub fn remove_token(&mut self, at: usize) {
        if at >= self.tokens.len() {
            return;
        }
        self.tokens.remove(at);
        for t in &mut self.tokens {
            if t.index > at {
                t.index -= 1;
            }
            if t.head > at {
                t.head -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::{Dep, Pos, Tag};

    fn tok(text: &str, pos: Pos, dep: Dep, head: usize, index: usize) -> Token {
        Token::new(text, text.to_lowercase(), pos, Tag::Other, dep, head, index)
    }

    /// "The study shows improvement ."
    fn study_sentence() -> Sentence {
        Sentence::new(vec![
            tok("The", Pos::Det, Dep::Other, 2, 0),
            tok("study", Pos::Noun, Dep::Subj, 2, 1),
            Token::new("shows", "show", Pos::Verb, Tag::Vbz, Dep::Root, 2, 2),
            tok("improvement", Pos::Noun, Dep::Obj, 2, 3),
            tok(".", Pos::Punct, Dep::Other, 2, 4),
        ])
    }

    #[test]
    fn test_main_verb_is_root() {
        let s = study_sentence();
        assert_eq!(s.main_verb().map(|t| t.text.as_str()), Some("shows"));
    }

    #[test]
    fn test_subject_is_left_dependent_of_root() {
        let s = study_sentence();
        assert_eq!(s.subject().map(|t| t.text.as_str()), Some("study"));
    }

    #[test]
    fn test_word_count_excludes_punctuation() {
        assert_eq!(study_sentence().word_count(), 4);
    }

    #[test]
    fn test_no_main_verb_in_verbless_sentence() {
        let s = Sentence::new(vec![
            tok("2", Pos::Num, Dep::Other, 0, 0),
            tok("+", Pos::Sym, Dep::Other, 0, 1),
            tok("2", Pos::Num, Dep::Other, 0, 2),
        ]);
        assert!(s.main_verb().is_none());
        assert!(s.subject().is_none());
    }

    #[test]
    fn test_insert_tokens_shifts_indices_and_heads() {
        let mut s = study_sentence();
        s.insert_tokens(
            2,
            vec![tok("typically", Pos::Adv, Dep::Other, 2, 0)],
        );
        assert_eq!(s.tokens[2].text, "typically");
        // Root moved from 2 to 3 and the subject's head followed it.
        assert_eq!(s.main_verb().map(|t| t.index), Some(3));
        assert_eq!(s.subject().map(|t| t.head), Some(3));
        assert_eq!(s.text(), "The study typically shows improvement.");
    }

    #[test]
    fn test_replace_token_inherits_dependency_role() {
        let mut s = study_sentence();
        s.replace_token(
            2,
            vec![
                Token::new("appears", "appear", Pos::Verb, Tag::Vbz, Dep::Other, 0, 0),
                tok("to", Pos::Part, Dep::Other, 0, 0),
                Token::new("show", "show", Pos::Verb, Tag::Vb, Dep::Other, 0, 0),
            ],
        );
        assert_eq!(s.main_verb().map(|t| t.text.as_str()), Some("appears"));
        assert_eq!(s.text(), "The study appears to show improvement.");
        // Trailing tokens shifted by two.
        assert_eq!(s.tokens.last().map(|t| t.index), Some(6));
    }

    #[test]
    fn test_remove_token_shifts_down() {
        let mut s = study_sentence();
        s.remove_token(0);
        assert_eq!(s.tokens[0].text, "study");
        assert_eq!(s.main_verb().map(|t| t.index), Some(1));
        assert_eq!(s.subject().map(|t| t.head), Some(1));
    }

    #[test]
    fn test_is_question() {
        let mut s = study_sentence();
        assert!(!s.is_question());
        s.tokens.last_mut().unwrap().text = "?".to_string();
        assert!(s.is_question());
    }
}
