//! Annotated token produced by the annotation provider.
//!
//! Tokens are immutable once produced; the engine only ever builds *new*
//! tokens when a transformation inserts or replaces material.

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech category (universal-tagset style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pos {
    Noun,
    ProperNoun,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Num,
    Cconj,
    Sconj,
    Part,
    Punct,
    Sym,
    Other,
}

/// Fine-grained tag. Only verb inflection classes are distinguished —
/// they are what the hedging strategies need for agreement repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tag {
    /// Base form ("show")
    Vb,
    /// Non-3rd-person present ("show" after plural subject)
    Vbp,
    /// 3rd-person singular present ("shows")
    Vbz,
    /// Past tense ("showed")
    Vbd,
    /// Gerund/participle ("showing")
    Vbg,
    /// Past participle ("shown")
    Vbn,
    /// Modal ("will", "may")
    Md,
    Other,
}

impl Tag {
    pub fn is_verbal(&self) -> bool {
        !matches!(self, Tag::Other)
    }
}

/// Dependency label, reduced to the relations the engine queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dep {
    /// Sentence root (the main verb when the sentence has one).
    Root,
    /// Nominal subject of the root.
    Subj,
    /// Direct object of the root.
    Obj,
    /// Auxiliary attached to the root.
    Aux,
    Other,
}

/// One annotated token. Owned by the [`Sentence`](super::Sentence) that
/// contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as it appeared in the input.
    pub text: String,
    /// Lowercased base form.
    pub lemma: String,
    pub pos: Pos,
    pub tag: Tag,
    pub dep: Dep,
    /// Index of the syntactic head within the sentence.
    pub head: usize,
    /// Sentence-relative position.
    pub index: usize,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: Pos,
        tag: Tag,
        dep: Dep,
        head: usize,
        index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            tag,
            dep,
            head,
            index,
        }
    }

    /// A token that counts toward the sentence word count.
    pub fn is_word(&self) -> bool {
        !matches!(self.pos, Pos::Punct | Pos::Sym)
    }

    /// Opaque citation placeholder (`[[REF_n]]`) — never altered.
    pub fn is_citation_placeholder(&self) -> bool {
        self.text.starts_with("[[REF_") && self.text.ends_with("]]")
    }

    pub fn is_verb(&self) -> bool {
        matches!(self.pos, Pos::Verb | Pos::Aux)
    }

    /// Lowercased surface form, for case-insensitive lexicon lookups.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, pos: Pos) -> Token {
        Token::new(text, text.to_lowercase(), pos, Tag::Other, Dep::Other, 0, 0)
    }

    #[test]
    fn test_is_word_excludes_punctuation() {
        assert!(word("study", Pos::Noun).is_word());
        assert!(word("it", Pos::Pron).is_word());
        assert!(!word(".", Pos::Punct).is_word());
        assert!(!word("+", Pos::Sym).is_word());
    }

    #[test]
    fn test_citation_placeholder_detection() {
        assert!(word("[[REF_1]]", Pos::Other).is_citation_placeholder());
        assert!(word("[[REF_42]]", Pos::Other).is_citation_placeholder());
        assert!(!word("[REF_1]", Pos::Other).is_citation_placeholder());
        assert!(!word("reference", Pos::Noun).is_citation_placeholder());
    }

    #[test]
    fn test_lower_is_case_insensitive_lookup_form() {
        assert_eq!(word("API", Pos::ProperNoun).lower(), "api");
        assert_eq!(word("Shows", Pos::Verb).lower(), "shows");
    }
}
