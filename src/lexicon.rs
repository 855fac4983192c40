//! Immutable, process-lifetime lexicons driving classification and hedging.
//!
//! Every fixed table lives here rather than inline in control flow, so a
//! domain-specific deployment can construct its own [`Lexicons`] and inject
//! it into the services. The [`LEXICONS`] static is the built-in English
//! default shared by all requests; nothing in it is mutated after startup.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::models::RelationshipType;

/// Hedge phrase categories, keyed by how a phrase attaches to the sentence.
#[derive(Debug, Clone)]
pub struct HedgeCatalog {
    /// Inserted before the main verb ("typically").
    pub frequency_adverbs: &'static [&'static str],
    /// Inserted before the verb, which drops to base form ("appear to").
    pub epistemic_markers: &'static [&'static str],
    /// Inserted before a strong adjective ("relatively").
    pub approximators: &'static [&'static str],
    /// Detected as existing hedges; never inserted by the engine.
    pub quantifiers: &'static [&'static str],
    /// Prepended to the sentence (comma added at apply time).
    pub scope_limiters: &'static [&'static str],
    /// Detected as existing hedges; never inserted by the engine.
    pub evidential_markers: &'static [&'static str],
    /// Strong verb lemma → hedged alternatives, base form. Multi-word
    /// alternatives inflect their head word only.
    pub verb_hedges: HashMap<&'static str, &'static [&'static str]>,
    /// Union of hedge words for the double-hedge guard.
    vocabulary: HashSet<&'static str>,
}

impl HedgeCatalog {
    fn builtin() -> Self {
        let verb_hedges: HashMap<&'static str, &'static [&'static str]> = [
            ("prove", &["suggest", "indicate", "point to"][..]),
            ("demonstrate", &["suggest", "indicate", "appear to demonstrate"][..]),
            ("show", &["suggest", "indicate", "appear to show", "tend to show"][..]),
            ("confirm", &["support", "suggest", "appear to confirm"][..]),
            ("guarantee", &["tend to ensure", "help ensure"][..]),
            ("ensure", &["help ensure", "tend to ensure", "help support"][..]),
            ("be", &["may be", "appear to be", "tend to be"][..]),
            ("will", &["may", "might", "could"][..]),
            ("cause", &["may cause", "contribute to", "tend to cause"][..]),
            ("solve", &["help solve", "may solve", "address"][..]),
            ("prevent", &["help prevent", "may prevent", "reduce"][..]),
            ("eliminate", &["reduce", "may eliminate", "help eliminate"][..]),
            ("improve", &["may improve", "tend to improve", "help improve"][..]),
        ]
        .into_iter()
        .collect();

        let mut catalog = HedgeCatalog {
            frequency_adverbs: &["often", "generally", "typically", "usually", "frequently", "commonly"],
            epistemic_markers: &["appear to", "seem to", "tend to"],
            approximators: &["relatively", "fairly", "rather", "somewhat", "quite"],
            quantifiers: &["most", "many", "some", "several"],
            scope_limiters: &[
                "In most cases",
                "In many cases",
                "Generally speaking",
                "Typically",
                "More often than not",
            ],
            evidential_markers: &["reportedly", "apparently", "seemingly", "arguably"],
            verb_hedges,
            vocabulary: HashSet::new(),
        };
        catalog.vocabulary = catalog.build_vocabulary();
        catalog
    }

    /// Collect the hedge vocabulary for the double-hedge guard: the hedge
    /// word categories plus epistemic/modal heads. Verb-hedge alternatives
    /// ("suggest", "reduce") are ordinary verbs, not hedge vocabulary, and
    /// must not make their host sentences guard-exempt.
    fn build_vocabulary(&self) -> HashSet<&'static str> {
        let mut vocab: HashSet<&'static str> = HashSet::new();
        for list in [
            self.frequency_adverbs,
            self.approximators,
            self.quantifiers,
            self.evidential_markers,
        ] {
            vocab.extend(list.iter().copied());
        }
        // Heads of epistemic insertions ("appear to", "seem to", "tend to").
        for phrase in self.epistemic_markers {
            if let Some(head) = phrase.split_whitespace().next() {
                vocab.insert(head);
            }
        }
        // General epistemic/modal vocabulary detected but never inserted.
        vocab.extend([
            "perhaps", "possibly", "probably", "likely", "presumably", "may", "might", "could",
        ]);
        vocab
    }

    /// Whether a lowercased word or lemma is hedge vocabulary.
    pub fn is_hedge_word(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }
}

/// All fixed tables consumed by the safety classifier, hedger, and combiner.
#[derive(Debug, Clone)]
pub struct Lexicons {
    /// Domain terms that protect a whole sentence (case-insensitive,
    /// whole-word).
    pub technical_keywords: HashSet<&'static str>,
    /// Verb lemma → co-occurring nouns that signal literal usage.
    pub literal_contexts: HashMap<&'static str, &'static [&'static str]>,
    /// Subject lemmas marking technical-specification sentences.
    pub technical_subjects: HashSet<&'static str>,
    /// Subject lemmas marking research-claim sentences (preferred hedge
    /// targets).
    pub research_subjects: HashSet<&'static str>,
    /// Verb lemmas that, with a technical subject, protect the sentence.
    pub guarantee_verbs: &'static [&'static str],
    /// Absolute adjectives eligible for approximator insertion.
    pub strong_adjectives: HashSet<&'static str>,
    pub contrast_cues: &'static [&'static str],
    pub cause_cues: &'static [&'static str],
    /// Anaphoric pronouns opening a continuation sentence.
    pub addition_pronouns: &'static [&'static str],
    /// Academic transition phrases (comma added at apply time).
    pub transitions: &'static [&'static str],
    /// Contraction suffix → expansion, longest-suffix first.
    pub contractions: &'static [(&'static str, &'static str)],
    pub catalog: HedgeCatalog,
    /// Lowercased words that mark a sentence as already opening with a
    /// hedge or transition.
    openers: HashSet<String>,
}

pub static LEXICONS: Lazy<Lexicons> = Lazy::new(Lexicons::builtin);

impl Lexicons {
    pub fn builtin() -> Self {
        let catalog = HedgeCatalog::builtin();

        let technical_keywords: HashSet<&'static str> = [
            // software
            "algorithm", "api", "application", "array", "boolean", "browser", "buffer", "byte",
            "cache", "class", "client", "compiler", "cpu", "database", "dataset", "debug",
            "dependency", "directory", "encryption", "endpoint", "enum", "exception", "firewall",
            "framework", "function", "gpu", "hash", "html", "http", "https", "integer",
            "interface", "json", "kernel", "latency", "library", "linux", "memory", "method",
            "module", "mutex", "network", "object", "parameter", "parser", "pointer", "protocol",
            "query", "queue", "regex", "repository", "runtime", "schema", "server", "socket",
            "sql", "string", "syntax", "thread", "url", "variable", "xml",
            // mathematics
            "equation", "theorem", "integral", "derivative", "matrix", "polynomial",
            "coefficient", "vertex",
            // measurement vocabulary
            "kilometer", "kilogram", "millisecond", "gigabyte", "megabyte",
            // UI vocabulary
            "button", "checkbox", "dropdown", "menu", "toolbar", "widget", "scrollbar",
        ]
        .into_iter()
        .collect();

        let literal_contexts: HashMap<&'static str, &'static [&'static str]> = [
            ("show", &["screen", "display", "monitor", "figure", "table", "chart", "diagram", "image"][..]),
            ("display", &["screen", "monitor", "window", "page", "interface", "panel"][..]),
            ("indicate", &["arrow", "label", "icon", "marker", "light", "gauge"][..]),
            ("represent", &["symbol", "node", "diagram", "figure", "color", "glyph"][..]),
            ("contain", &["file", "folder", "directory", "box", "list", "array", "table"][..]),
            ("return", &["function", "method", "call", "api", "endpoint", "query"][..]),
            ("produce", &["machine", "printer", "compiler", "generator", "process"][..]),
        ]
        .into_iter()
        .collect();

        let technical_subjects: HashSet<&'static str> = [
            "system", "algorithm", "api", "interface", "application", "server", "database",
            "compiler", "function", "method", "module", "protocol", "framework", "library",
            "program", "software", "platform", "engine", "service", "network", "processor",
            "kernel", "implementation",
        ]
        .into_iter()
        .collect();

        let research_subjects: HashSet<&'static str> = [
            "study", "research", "finding", "data", "experiment", "analysis", "survey",
            "evidence", "literature", "result", "paper", "author", "observation",
        ]
        .into_iter()
        .collect();

        let strong_adjectives: HashSet<&'static str> = [
            "significant", "important", "critical", "essential", "major", "perfect", "optimal",
            "crucial", "vital", "fundamental", "necessary", "ideal", "complete", "total",
            "absolute", "definitive",
        ]
        .into_iter()
        .collect();

        let transitions: &'static [&'static str] = &[
            "Moreover",
            "Additionally",
            "Furthermore",
            "Hence",
            "Therefore",
            "Consequently",
            "Nonetheless",
            "Nevertheless",
            "In contrast",
            "On the other hand",
            "In addition",
            "As a result",
        ];

        let mut openers: HashSet<String> =
            catalog.vocabulary.iter().map(|w| w.to_string()).collect();
        for phrase in transitions.iter().chain(catalog.scope_limiters.iter()) {
            if let Some(head) = phrase.split_whitespace().next() {
                openers.insert(head.to_lowercase());
            }
        }
        for word in ["however", "but", "yet", "so", "overall", "thus", "still"] {
            openers.insert(word.to_string());
        }

        Lexicons {
            technical_keywords,
            literal_contexts,
            technical_subjects,
            research_subjects,
            guarantee_verbs: &["guarantee", "ensure"],
            strong_adjectives,
            contrast_cues: &[
                "however", "but", "yet", "although", "though", "despite", "nevertheless",
                "nonetheless", "unlike", "conversely", "whereas",
            ],
            cause_cues: &[
                "because", "since", "therefore", "thus", "so", "consequently", "hence",
                "accordingly",
            ],
            addition_pronouns: &["it", "this", "these", "they"],
            transitions,
            contractions: &[
                ("n't", " not"),
                ("'re", " are"),
                ("'ve", " have"),
                ("'ll", " will"),
                ("'d", " would"),
                ("'m", " am"),
                ("'s", " is"),
            ],
            catalog,
            openers,
        }
    }

    pub fn is_technical_keyword(&self, word: &str) -> bool {
        self.technical_keywords.contains(word)
    }

    /// Connector vocabulary per relationship. Restricted to conjunctions
    /// valid in nearly all syntactic positions; subordinators are excluded
    /// because the analyzer does not verify clause structure.
    pub fn connectors(&self, relationship: RelationshipType) -> &'static [&'static str] {
        match relationship {
            RelationshipType::Contrast => &["but", "yet"],
            RelationshipType::Cause => &["so", "and so"],
            RelationshipType::Addition => &["and"],
            RelationshipType::None => &[],
        }
    }

    /// Whether a sentence-initial word (lowercased) already signals a hedge
    /// or transition.
    pub fn is_opener(&self, word: &str) -> bool {
        self.openers.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technical_keyword_table_has_sixty_plus_terms() {
        assert!(
            LEXICONS.technical_keywords.len() >= 60,
            "only {} technical keywords",
            LEXICONS.technical_keywords.len()
        );
    }

    #[test]
    fn test_keyword_lookup_is_lowercase_whole_word() {
        assert!(LEXICONS.is_technical_keyword("api"));
        assert!(LEXICONS.is_technical_keyword("thread"));
        assert!(LEXICONS.is_technical_keyword("menu"));
        assert!(!LEXICONS.is_technical_keyword("study"));
        assert!(!LEXICONS.is_technical_keyword("useful"));
    }

    #[test]
    fn test_literal_context_for_show() {
        let contexts = LEXICONS.literal_contexts.get("show").expect("show entry");
        assert!(contexts.contains(&"screen"));
        assert!(contexts.contains(&"figure"));
    }

    #[test]
    fn test_show_hedges_match_expected_alternatives() {
        let hedges = LEXICONS.catalog.verb_hedges.get("show").expect("show");
        assert_eq!(
            *hedges,
            &["suggest", "indicate", "appear to show", "tend to show"][..]
        );
    }

    #[test]
    fn test_verb_hedge_heads_are_verbs_or_modals() {
        // Adverb heads would break agreement repair ("generallys").
        for alternatives in LEXICONS.catalog.verb_hedges.values() {
            for phrase in alternatives.iter() {
                let head = phrase.split_whitespace().next().unwrap();
                assert!(
                    !head.ends_with("ly"),
                    "adverb head in verb hedge: {}",
                    phrase
                );
            }
        }
    }

    #[test]
    fn test_hedge_vocabulary_covers_hedge_categories() {
        let catalog = &LEXICONS.catalog;
        for word in catalog.frequency_adverbs {
            assert!(catalog.is_hedge_word(word), "{} missing from vocab", word);
        }
        for word in catalog.approximators {
            assert!(catalog.is_hedge_word(word), "{} missing from vocab", word);
        }
        for word in catalog.quantifiers {
            assert!(catalog.is_hedge_word(word), "{} missing from vocab", word);
        }
        // Heads of epistemic insertions and modal vocabulary.
        assert!(catalog.is_hedge_word("appear"));
        assert!(catalog.is_hedge_word("tend"));
        assert!(catalog.is_hedge_word("may"));
        assert!(catalog.is_hedge_word("most"));
        // Not hedges.
        assert!(!catalog.is_hedge_word("shows"));
        assert!(!catalog.is_hedge_word("study"));
    }

    #[test]
    fn test_plain_verbs_are_not_hedge_vocabulary() {
        // Verb-hedge alternatives are ordinary verbs; a sentence using one
        // of them ("The treatment reduces recovery time.") must still be
        // hedgeable.
        let catalog = &LEXICONS.catalog;
        for word in ["reduce", "address", "support", "help", "contribute", "point", "suggest", "indicate"] {
            assert!(!catalog.is_hedge_word(word), "{} wrongly guarded", word);
        }
    }

    #[test]
    fn test_openers_cover_transitions_and_limiters() {
        for word in ["moreover", "in", "typically", "generally", "more", "however"] {
            assert!(LEXICONS.is_opener(word), "{} should open-guard", word);
        }
        assert!(!LEXICONS.is_opener("the"));
        assert!(!LEXICONS.is_opener("researchers"));
    }

    #[test]
    fn test_connectors_are_position_free_conjunctions() {
        use crate::models::RelationshipType::*;
        assert_eq!(LEXICONS.connectors(Contrast), &["but", "yet"]);
        assert_eq!(LEXICONS.connectors(Cause), &["so", "and so"]);
        assert_eq!(LEXICONS.connectors(Addition), &["and"]);
        assert!(LEXICONS.connectors(None).is_empty());
        for rel in [Addition, Contrast, Cause] {
            for c in LEXICONS.connectors(rel) {
                assert!(!["which", "because", "although"].contains(c));
            }
        }
    }

    #[test]
    fn test_contraction_suffix_order_keeps_nt_first() {
        // "n't" must be checked before "'t"-style suffixes would ever match.
        assert_eq!(LEXICONS.contractions[0], ("n't", " not"));
        // "'s" last: it is the most ambiguous (possessive vs. copula).
        assert_eq!(LEXICONS.contractions.last(), Some(&("'s", " is")));
    }
}
