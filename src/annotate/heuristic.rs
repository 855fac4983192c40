//! Built-in rule-based English annotator.
//!
//! Closed-class words come from fixed lexicons, open-class words from a
//! common-verb list plus suffix heuristics, and the dependency pass assigns
//! only the relations the engine queries: one root, its subject, its object,
//! and its auxiliaries. This is deliberately not a general parser; it is the
//! default [`Annotator`](super::Annotator) for deployments without one.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Dep, Pos, Sentence, Tag, Token};
use crate::ProsaicError;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[\s*REF_\d+\s*\]\]|[A-Za-z]+(?:'[A-Za-z]+)?|\d+(?:\.\d+)?|\S")
        .expect("valid regex")
});

static BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+[)"']*\s+"#).expect("valid regex"));

const DETERMINERS: &[&str] = &["the", "a", "an", "each", "every", "no", "another"];

const PRONOUNS: &[&str] = &[
    "it", "this", "these", "they", "he", "she", "we", "you", "i", "that", "those", "them", "him",
    "her", "us", "who", "what", "which",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "about", "over", "under", "through",
    "between", "within", "without", "during", "against", "across", "into", "onto", "upon",
    "after", "before",
];

const COORDINATORS: &[&str] = &["and", "but", "or", "nor", "yet", "so"];

const SUBORDINATORS: &[&str] = &[
    "because", "since", "although", "though", "if", "unless", "while", "whereas", "when",
];

const ADVERBS: &[&str] = &[
    "often", "generally", "typically", "usually", "frequently", "commonly", "relatively",
    "fairly", "rather", "somewhat", "quite", "very", "well", "also", "never", "always",
    "sometimes", "rarely", "perhaps", "possibly", "probably", "however", "moreover", "therefore",
    "thus", "hence", "furthermore", "additionally", "nonetheless", "nevertheless",
    "consequently", "reportedly", "apparently", "seemingly", "arguably", "not", "hard",
];

const ADJECTIVES: &[&str] = &[
    "useful", "good", "bad", "easy", "new", "old", "large", "small", "high", "low", "important",
    "significant", "critical", "essential", "major", "perfect", "optimal", "crucial", "vital",
    "fundamental", "necessary", "ideal", "complete", "total", "absolute", "definitive",
    "effective", "efficient", "reliable", "robust", "safe", "fast", "slow", "simple", "common",
    "clear", "strong", "weak", "better", "best", "different", "similar", "possible", "difficult",
    "likely",
];

const ADJ_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "ant", "ent", "ic", "al"];

/// Checked before adjective suffixes: "-ment"/"-tion" nouns would otherwise
/// match "-ent"/"-ion"-style adjective endings.
const NOUN_SUFFIXES: &[&str] = &["ment", "tion", "sion", "ness", "ity", "ance", "ence", "ship"];

const MODAL_AUX: &[&str] = &[
    "will", "would", "can", "could", "may", "might", "shall", "should", "must",
];

/// Abbreviations whose trailing period is not a sentence boundary.
const ABBREVIATIONS: &[&str] = &["e.g", "i.e", "etc", "vs", "cf", "dr", "mr", "mrs", "ms", "fig"];

const VERB_BASES: &[&str] = &[
    "accept", "achieve", "add", "address", "affect", "allow", "analyze", "appear", "apply",
    "argue", "ask", "assume", "become", "begin", "believe", "build", "call", "cause", "change",
    "check", "claim", "click", "combine", "compare", "compile", "complete", "compute", "confirm",
    "connect", "consider", "contain", "contribute", "convert", "create", "decide", "define",
    "deliver", "demonstrate", "depend", "describe", "design", "detect", "determine", "develop",
    "differ", "discover", "display", "download", "drive", "eliminate", "enable", "encourage",
    "ensure", "enter", "establish", "examine", "exist", "expect", "explain", "fail", "find",
    "fix", "focus", "follow", "gain", "generate", "get", "give", "go", "grow", "guarantee",
    "handle", "happen", "help", "hold", "identify", "imply", "improve", "include", "increase",
    "indicate", "install", "introduce", "involve", "keep", "know", "lead", "learn", "like",
    "limit", "load", "maintain", "make", "manage", "mean", "measure", "move", "need", "note",
    "observe", "obtain", "occur", "offer", "open", "parse", "pass", "perform", "plan", "point",
    "predict", "press", "prevent", "produce", "propose", "prove", "provide", "raise", "reach",
    "read", "receive", "reduce", "refer", "reflect", "remain", "remove", "replace", "report",
    "represent", "require", "resolve", "restart", "return", "reveal", "run", "save", "say",
    "see", "seem", "select", "send", "serve", "set", "show", "solve", "start", "state", "stop",
    "study", "succeed", "suggest", "support", "take", "tend", "test", "think", "try", "turn",
    "understand", "update", "use", "validate", "vary", "verify", "wait", "want", "work", "write",
];

struct TagLexicon {
    determiners: HashSet<&'static str>,
    pronouns: HashSet<&'static str>,
    prepositions: HashSet<&'static str>,
    coordinators: HashSet<&'static str>,
    subordinators: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    verb_bases: HashSet<&'static str>,
    modals: HashSet<&'static str>,
    /// Inflected auxiliary form → (lemma, tag).
    aux_forms: HashMap<&'static str, (&'static str, Tag)>,
}

static TAG_LEXICON: Lazy<TagLexicon> = Lazy::new(|| TagLexicon {
    determiners: DETERMINERS.iter().copied().collect(),
    pronouns: PRONOUNS.iter().copied().collect(),
    prepositions: PREPOSITIONS.iter().copied().collect(),
    coordinators: COORDINATORS.iter().copied().collect(),
    subordinators: SUBORDINATORS.iter().copied().collect(),
    adverbs: ADVERBS.iter().copied().collect(),
    adjectives: ADJECTIVES.iter().copied().collect(),
    verb_bases: VERB_BASES.iter().copied().collect(),
    modals: MODAL_AUX.iter().copied().collect(),
    aux_forms: [
        ("is", ("be", Tag::Vbz)),
        ("are", ("be", Tag::Vbp)),
        ("was", ("be", Tag::Vbd)),
        ("were", ("be", Tag::Vbd)),
        ("be", ("be", Tag::Vb)),
        ("been", ("be", Tag::Vbn)),
        ("being", ("be", Tag::Vbg)),
        ("am", ("be", Tag::Vbp)),
        ("has", ("have", Tag::Vbz)),
        ("have", ("have", Tag::Vbp)),
        ("had", ("have", Tag::Vbd)),
        ("does", ("do", Tag::Vbz)),
        ("do", ("do", Tag::Vbp)),
        ("did", ("do", Tag::Vbd)),
    ]
    .into_iter()
    .collect(),
});

/// The built-in annotation provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAnnotator;

impl HeuristicAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Annotate a single pre-segmented sentence.
    pub fn annotate_sentence(&self, text: &str) -> Sentence {
        let raw: Vec<&str> = TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();
        let mut tokens = provisional_tags(&raw);
        disambiguate(&mut tokens);
        attach_dependencies(&mut tokens);
        Sentence::new(tokens)
    }
}

impl super::Annotator for HeuristicAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Sentence>, ProsaicError> {
        let sentences: Vec<Sentence> = segment(text)
            .into_iter()
            .map(|s| self.annotate_sentence(&s))
            .filter(|s| !s.is_empty())
            .collect();
        Ok(sentences)
    }
}

/// Split text into sentences on terminal punctuation followed by an
/// uppercase letter, digit, or placeholder bracket. Common abbreviations
/// are not boundaries.
pub fn segment(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last = 0;
    for m in BOUNDARY_RE.find_iter(text) {
        let next = text[m.end()..].chars().next();
        let opens_sentence = next
            .map(|c| c.is_uppercase() || c.is_ascii_digit() || c == '[')
            .unwrap_or(false);
        if !opens_sentence || ends_with_abbreviation(&text[..m.start() + 1]) {
            continue;
        }
        let candidate = text[last..m.end()].trim();
        if !candidate.is_empty() {
            sentences.push(candidate.to_string());
        }
        last = m.end();
    }
    let tail = text[last..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn ends_with_abbreviation(prefix: &str) -> bool {
    let word_start = prefix
        .rfind(|c: char| c.is_whitespace())
        .map(|i| i + 1)
        .unwrap_or(0);
    let word = prefix[word_start..].trim_end_matches('.').to_lowercase();
    ABBREVIATIONS.contains(&word.as_str())
}

fn is_punct_char(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '"' | '\'' | '-' | '—' | '…'
    )
}

/// Strip a plural/3sg suffix, validating verb bases against the lexicon.
fn verb_base(lower: &str) -> Option<(&'static str, Tag)> {
    let lex = &TAG_LEXICON;
    let known = |candidate: &str| lex.verb_bases.get(candidate).copied();
    if let Some(base) = known(lower) {
        return Some((base, Tag::Vbp));
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        if let Some(base) = known(&format!("{}y", stem)) {
            return Some((base, Tag::Vbz));
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if let Some(base) = known(stem) {
            return Some((base, Tag::Vbz));
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if let Some(base) = known(stem) {
            return Some((base, Tag::Vbz));
        }
    }
    if let Some(stem) = lower.strip_suffix("ied") {
        if let Some(base) = known(&format!("{}y", stem)) {
            return Some((base, Tag::Vbd));
        }
    }
    if let Some(stem) = lower.strip_suffix("ed") {
        if let Some(base) = known(stem).or_else(|| known(&format!("{}e", stem))) {
            return Some((base, Tag::Vbd));
        }
    }
    if let Some(stem) = lower.strip_suffix("ing") {
        if let Some(base) = known(stem).or_else(|| known(&format!("{}e", stem))) {
            return Some((base, Tag::Vbg));
        }
    }
    None
}

fn noun_lemma(lower: &str) -> String {
    if lower.len() > 3 {
        if let Some(stem) = lower.strip_suffix("ies") {
            return format!("{}y", stem);
        }
        if !lower.ends_with("ss") && !lower.ends_with("us") && !lower.ends_with("is") {
            for suffix in ["ses", "xes", "zes", "ches", "shes"] {
                if let Some(stem) = lower.strip_suffix(suffix) {
                    return format!("{}{}", stem, &suffix[..suffix.len() - 2]);
                }
            }
            if let Some(stem) = lower.strip_suffix('s') {
                return stem.to_string();
            }
        }
    }
    lower.to_string()
}

fn provisional_tags(raw: &[&str]) -> Vec<Token> {
    let lex = &TAG_LEXICON;
    raw.iter()
        .enumerate()
        .map(|(index, text)| {
            if text.starts_with("[[") {
                return Token::new(*text, *text, Pos::Other, Tag::Other, Dep::Other, 0, index);
            }
            let mut chars = text.chars();
            let first = chars.next().unwrap_or(' ');
            if text.chars().count() == 1 && !first.is_alphanumeric() {
                let pos = if is_punct_char(first) { Pos::Punct } else { Pos::Sym };
                return Token::new(*text, *text, pos, Tag::Other, Dep::Other, 0, index);
            }
            if first.is_ascii_digit() {
                return Token::new(*text, *text, Pos::Num, Tag::Other, Dep::Other, 0, index);
            }

            let lower = text.to_lowercase();
            let (pos, tag, lemma): (Pos, Tag, String) = if let Some((lemma, tag)) =
                lex.aux_forms.get(lower.as_str())
            {
                (Pos::Aux, *tag, (*lemma).to_string())
            } else if lex.modals.contains(lower.as_str()) {
                (Pos::Aux, Tag::Md, lower.clone())
            } else if lex.determiners.contains(lower.as_str()) {
                (Pos::Det, Tag::Other, lower.clone())
            } else if lex.pronouns.contains(lower.as_str()) {
                (Pos::Pron, Tag::Other, lower.clone())
            } else if lower == "to" {
                (Pos::Part, Tag::Other, lower.clone())
            } else if lex.prepositions.contains(lower.as_str()) {
                (Pos::Adp, Tag::Other, lower.clone())
            } else if lex.coordinators.contains(lower.as_str()) {
                (Pos::Cconj, Tag::Other, lower.clone())
            } else if lex.subordinators.contains(lower.as_str()) {
                (Pos::Sconj, Tag::Other, lower.clone())
            } else if lex.adverbs.contains(lower.as_str()) || lower.ends_with("ly") {
                (Pos::Adv, Tag::Other, lower.clone())
            } else if let Some((base, tag)) = verb_base(&lower) {
                let tag = if tag == Tag::Vbp && index == 0 { Tag::Vb } else { tag };
                (Pos::Verb, tag, base.to_string())
            } else if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s))
                || NOUN_SUFFIXES.iter().any(|s| {
                    lower
                        .strip_suffix('s')
                        .map(|stem| stem.ends_with(s))
                        .unwrap_or(false)
                })
            {
                (Pos::Noun, Tag::Other, noun_lemma(&lower))
            } else if lex.adjectives.contains(lower.as_str())
                || ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s))
            {
                (Pos::Adj, Tag::Other, lower.clone())
            } else {
                let all_caps = text.len() >= 2 && text.chars().all(|c| c.is_uppercase());
                let pos = if all_caps || (index > 0 && first.is_uppercase()) {
                    Pos::ProperNoun
                } else {
                    Pos::Noun
                };
                (pos, Tag::Other, noun_lemma(&lower))
            };
            Token::new(*text, lemma, pos, tag, Dep::Other, 0, index)
        })
        .collect()
}

/// Neighborhood fixes for noun/verb ambiguity.
fn disambiguate(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if tokens[i].pos != Pos::Verb {
            continue;
        }
        // A verb-form word right after a determiner, adjective, or
        // preposition is a noun ("the study", "of work").
        let after_nominal_marker = i > 0
            && matches!(
                tokens[i - 1].pos,
                Pos::Det | Pos::Adj | Pos::Adp | Pos::Num
            );
        // A verb-form word immediately followed by another finite verb is a
        // plural noun heading the subject ("studies show").
        let before_finite_verb = tokens
            .get(i + 1)
            .map(|next| {
                next.pos == Pos::Verb && matches!(next.tag, Tag::Vbz | Tag::Vbp)
                    || next.pos == Pos::Aux
            })
            .unwrap_or(false);
        if after_nominal_marker || before_finite_verb {
            let lower = tokens[i].lower();
            tokens[i].pos = Pos::Noun;
            tokens[i].tag = Tag::Other;
            tokens[i].lemma = noun_lemma(&lower);
        }
    }
}

/// Assign root, subject, object, and auxiliary relations.
fn attach_dependencies(tokens: &mut [Token]) {
    let root = find_root(tokens);
    let root_idx = match root {
        Some(idx) => idx,
        None => {
            for t in tokens.iter_mut() {
                t.dep = Dep::Other;
                t.head = t.index;
            }
            return;
        }
    };

    for t in tokens.iter_mut() {
        t.head = root_idx;
        t.dep = Dep::Other;
    }
    tokens[root_idx].dep = Dep::Root;

    // Auxiliaries before the root with no intervening verb.
    for i in (0..root_idx).rev() {
        match tokens[i].pos {
            Pos::Aux => tokens[i].dep = Dep::Aux,
            Pos::Verb => break,
            _ => {}
        }
    }

    // Subject: rightmost nominal before the root (skipping auxiliaries).
    if let Some(subj_idx) = (0..root_idx)
        .rev()
        .find(|&i| matches!(tokens[i].pos, Pos::Noun | Pos::ProperNoun | Pos::Pron))
    {
        tokens[subj_idx].dep = Dep::Subj;
    }

    // Object: first nominal after the root.
    if let Some(obj_idx) = (root_idx + 1..tokens.len())
        .find(|&i| matches!(tokens[i].pos, Pos::Noun | Pos::ProperNoun | Pos::Pron))
    {
        tokens[obj_idx].dep = Dep::Obj;
    }
}

fn find_root(tokens: &[Token]) -> Option<usize> {
    // Finite verb first.
    if let Some(idx) = tokens
        .iter()
        .position(|t| t.pos == Pos::Verb && !matches!(t.tag, Tag::Vbg | Tag::Vbn))
    {
        return Some(idx);
    }
    // Participle with a preceding auxiliary ("is showing").
    if let Some(idx) = tokens.iter().position(|t| {
        t.pos == Pos::Verb && tokens[..t.index].iter().any(|p| p.pos == Pos::Aux)
    }) {
        return Some(idx);
    }
    // Copula/auxiliary-only sentence ("AI is useful").
    tokens.iter().position(|t| t.pos == Pos::Aux)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::Annotator;
    use crate::models::{Dep, Pos, Tag};

    fn annotate_one(text: &str) -> Sentence {
        HeuristicAnnotator::new().annotate_sentence(text)
    }

    #[test]
    fn test_segmentation_basic() {
        let parts = segment("AI is useful. It helps researchers.");
        assert_eq!(parts, vec!["AI is useful.", "It helps researchers."]);
    }

    #[test]
    fn test_segmentation_keeps_abbreviations_together() {
        let parts = segment("Results improved (see Fig. 2). The study ended.");
        assert_eq!(parts.len(), 2);
        let parts = segment("Methods differ, e.g. Sampling varies.");
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn test_segmentation_placeholder_opens_sentence() {
        let parts = segment("The study ended. [[REF_1]] disagrees.");
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_study_sentence_parse() {
        let s = annotate_one("The study shows improvement.");
        assert_eq!(s.main_verb().map(|t| t.text.as_str()), Some("shows"));
        assert_eq!(s.main_verb().map(|t| t.lemma.as_str()), Some("show"));
        assert_eq!(s.main_verb().map(|t| t.tag), Some(Tag::Vbz));
        assert_eq!(s.subject().map(|t| t.text.as_str()), Some("study"));
    }

    #[test]
    fn test_copula_sentence_parse() {
        let s = annotate_one("AI is useful.");
        let root = s.main_verb().expect("copula root");
        assert_eq!(root.text, "is");
        assert_eq!(root.lemma, "be");
        assert_eq!(s.subject().map(|t| t.text.as_str()), Some("AI"));
        assert_eq!(s.tokens[0].pos, Pos::ProperNoun);
        assert_eq!(s.tokens[2].pos, Pos::Adj);
    }

    #[test]
    fn test_api_guarantee_parse() {
        let s = annotate_one("The API guarantees thread safety.");
        let root = s.main_verb().expect("root");
        assert_eq!(root.lemma, "guarantee");
        assert_eq!(root.tag, Tag::Vbz);
        assert_eq!(s.subject().map(|t| t.lemma.as_str()), Some("api"));
    }

    #[test]
    fn test_plural_noun_before_verb_is_not_a_verb() {
        let s = annotate_one("Studies show improvement.");
        assert_eq!(s.tokens[0].pos, Pos::Noun);
        assert_eq!(s.tokens[0].lemma, "study");
        assert_eq!(s.main_verb().map(|t| t.text.as_str()), Some("show"));
    }

    #[test]
    fn test_imperative_has_base_verb_and_no_subject() {
        let s = annotate_one("Click the button.");
        let root = s.main_verb().expect("root");
        assert_eq!(root.tag, Tag::Vb);
        assert_eq!(root.index, 0);
        assert!(s.subject().is_none());
    }

    #[test]
    fn test_modal_is_auxiliary_of_following_verb() {
        let s = annotate_one("The system will fail.");
        assert_eq!(s.main_verb().map(|t| t.lemma.as_str()), Some("fail"));
        let will = &s.tokens[2];
        assert_eq!(will.pos, Pos::Aux);
        assert_eq!(will.tag, Tag::Md);
        assert_eq!(will.dep, Dep::Aux);
    }

    #[test]
    fn test_verbless_sentence_has_no_root() {
        let s = annotate_one("2 + 2 = 4");
        assert!(s.main_verb().is_none());
        assert_eq!(s.word_count(), 3);
    }

    #[test]
    fn test_placeholder_token_survives_intact() {
        let s = annotate_one("The study shows improvement [[REF_1]].");
        assert!(s.contains_placeholder());
        let placeholder = s
            .tokens
            .iter()
            .find(|t| t.is_citation_placeholder())
            .expect("placeholder");
        assert_eq!(placeholder.text, "[[REF_1]]");
    }

    #[test]
    fn test_annotate_document() {
        let sentences = HeuristicAnnotator::new()
            .annotate("AI is useful. It helps researchers.")
            .expect("annotate");
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[1].first_word().map(|t| t.pos),
            Some(Pos::Pron)
        );
    }

    #[test]
    fn test_empty_input() {
        let sentences = HeuristicAnnotator::new().annotate("").expect("annotate");
        assert!(sentences.is_empty());
    }
}
