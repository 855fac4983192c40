//! Protection flags emitted by the safety classifier.

use serde::Serialize;

/// The full flag set computed once per sentence before any transformation
/// begins. Flags are independent — a sentence can be simultaneously
/// technical and too short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProtectionFlags {
    /// Contains a domain term from the technical keyword lexicon.
    pub technical_keyword: bool,
    /// The main verb is used in its literal, non-claim sense.
    pub literal_verb: bool,
    /// Arithmetic or defining/naming construction.
    pub factual_pattern: bool,
    /// Number adjacent to a unit or percent token.
    pub measurement: bool,
    pub question: bool,
    /// Imperative: leading base-form verb with no overt subject.
    pub command: bool,
    /// Fewer than four words.
    pub too_short: bool,
    /// Contains a citation placeholder.
    pub citation: bool,
    /// Subject drawn from the research lexicon (study, findings, data…).
    /// A preference signal, never a protection.
    pub research_subject: bool,
    /// Subject drawn from the technical lexicon (system, API, interface…).
    pub technical_subject: bool,
    /// Technical subject paired with a guarantee/ensure main verb — a
    /// specification's guarantee is intentional and must not be softened.
    pub spec_guarantee: bool,
}

impl ProtectionFlags {
    /// Whether any whole-sentence protection applies. `literal_verb` is
    /// excluded here: it is per-verb, and the hedger consults it separately.
    pub fn blocks_sentence(&self) -> bool {
        self.technical_keyword
            || self.factual_pattern
            || self.measurement
            || self.question
            || self.command
            || self.too_short
            || self.citation
            || self.spec_guarantee
    }

    /// Whether any flag at all is raised.
    pub fn any(&self) -> bool {
        self.blocks_sentence()
            || self.literal_verb
            || self.research_subject
            || self.technical_subject
    }

    /// Names of the raised flags, for inspection output and logs.
    pub fn raised(&self) -> Vec<&'static str> {
        let pairs = [
            (self.technical_keyword, "technical-keyword"),
            (self.literal_verb, "literal-verb"),
            (self.factual_pattern, "factual-pattern"),
            (self.measurement, "measurement"),
            (self.question, "question"),
            (self.command, "command"),
            (self.too_short, "too-short"),
            (self.citation, "citation-present"),
            (self.research_subject, "research-subject"),
            (self.technical_subject, "technical-subject"),
            (self.spec_guarantee, "spec-guarantee"),
        ];
        pairs
            .into_iter()
            .filter_map(|(raised, name)| raised.then_some(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags_block_nothing() {
        let flags = ProtectionFlags::default();
        assert!(!flags.blocks_sentence());
        assert!(!flags.any());
        assert!(flags.raised().is_empty());
    }

    #[test]
    fn test_subject_flags_do_not_block() {
        let flags = ProtectionFlags {
            research_subject: true,
            technical_subject: true,
            ..Default::default()
        };
        assert!(!flags.blocks_sentence());
        assert!(flags.any());
    }

    #[test]
    fn test_literal_verb_does_not_block_sentence() {
        let flags = ProtectionFlags {
            literal_verb: true,
            ..Default::default()
        };
        assert!(!flags.blocks_sentence());
        assert!(flags.any());
    }

    #[test]
    fn test_each_whole_sentence_flag_blocks() {
        for raise in [
            |f: &mut ProtectionFlags| f.technical_keyword = true,
            |f: &mut ProtectionFlags| f.factual_pattern = true,
            |f: &mut ProtectionFlags| f.measurement = true,
            |f: &mut ProtectionFlags| f.question = true,
            |f: &mut ProtectionFlags| f.command = true,
            |f: &mut ProtectionFlags| f.too_short = true,
            |f: &mut ProtectionFlags| f.citation = true,
            |f: &mut ProtectionFlags| f.spec_guarantee = true,
        ] {
            let mut flags = ProtectionFlags::default();
            raise(&mut flags);
            assert!(flags.blocks_sentence(), "raised: {:?}", flags.raised());
        }
    }

    #[test]
    fn test_raised_names() {
        let flags = ProtectionFlags {
            technical_keyword: true,
            too_short: true,
            ..Default::default()
        };
        assert_eq!(flags.raised(), vec!["technical-keyword", "too-short"]);
    }
}
