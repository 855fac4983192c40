//! Minimal English verb inflection for agreement repair.
//!
//! Hedge replacements are drawn from the catalog in base form; when a
//! replacement lands where an inflected verb stood, its head word must take
//! the same inflection or the sentence turns ungrammatical.

use crate::models::Tag;

/// Modal auxiliaries never inflect for person or tense.
pub const MODALS: &[&str] = &[
    "may", "might", "could", "can", "would", "should", "will", "shall", "must",
];

const IRREGULAR_THIRD: &[(&str, &str)] = &[("be", "is"), ("have", "has"), ("do", "does")];

const IRREGULAR_PAST: &[(&str, &str)] = &[
    ("be", "was"),
    ("have", "had"),
    ("do", "did"),
    ("show", "showed"),
    ("prove", "proved"),
    ("lead", "led"),
    ("make", "made"),
    ("hold", "held"),
];

fn ends_with_any(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| word.ends_with(s))
}

/// Third-person singular present form ("show" → "shows", "address" →
/// "addresses", "study" → "studies").
pub fn third_person(base: &str) -> String {
    if let Some((_, form)) = IRREGULAR_THIRD.iter().find(|(b, _)| *b == base) {
        return (*form).to_string();
    }
    if ends_with_any(base, &["s", "x", "z", "ch", "sh", "o"]) {
        return format!("{}es", base);
    }
    if let Some(stem) = base.strip_suffix('y') {
        let preceded_by_consonant = stem
            .chars()
            .next_back()
            .map(|c| !"aeiou".contains(c))
            .unwrap_or(false);
        if preceded_by_consonant {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", base)
}

/// Simple past form ("suggest" → "suggested", "indicate" → "indicated").
pub fn past_tense(base: &str) -> String {
    if let Some((_, form)) = IRREGULAR_PAST.iter().find(|(b, _)| *b == base) {
        return (*form).to_string();
    }
    if base.ends_with('e') {
        return format!("{}d", base);
    }
    if let Some(stem) = base.strip_suffix('y') {
        let preceded_by_consonant = stem
            .chars()
            .next_back()
            .map(|c| !"aeiou".contains(c))
            .unwrap_or(false);
        if preceded_by_consonant {
            return format!("{}ied", stem);
        }
    }
    format!("{}ed", base)
}

/// Inflect a base-form word to agree with the slot the original verb held.
/// Modals pass through untouched.
pub fn agree(base: &str, tag: Tag) -> String {
    if MODALS.contains(&base) {
        return base.to_string();
    }
    match tag {
        Tag::Vbz => third_person(base),
        Tag::Vbd | Tag::Vbn => past_tense(base),
        _ => base.to_string(),
    }
}

/// Inflect the head word of a multi-word hedge phrase ("appear to show" →
/// "appears to show" for a third-person slot).
pub fn agree_phrase(phrase: &str, tag: Tag) -> String {
    let mut words = phrase.split_whitespace();
    let head = match words.next() {
        Some(w) => w,
        None => return String::new(),
    };
    let inflected = agree(head, tag);
    let rest: Vec<&str> = words.collect();
    if rest.is_empty() {
        inflected
    } else {
        format!("{} {}", inflected, rest.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_person_regular() {
        assert_eq!(third_person("suggest"), "suggests");
        assert_eq!(third_person("indicate"), "indicates");
        assert_eq!(third_person("tend"), "tends");
    }

    #[test]
    fn test_third_person_sibilant_and_o() {
        assert_eq!(third_person("address"), "addresses");
        assert_eq!(third_person("reach"), "reaches");
        assert_eq!(third_person("go"), "goes");
    }

    #[test]
    fn test_third_person_consonant_y() {
        assert_eq!(third_person("study"), "studies");
        assert_eq!(third_person("imply"), "implies");
        // Vowel + y keeps the y.
        assert_eq!(third_person("stay"), "stays");
    }

    #[test]
    fn test_third_person_irregular() {
        assert_eq!(third_person("be"), "is");
        assert_eq!(third_person("have"), "has");
        assert_eq!(third_person("do"), "does");
    }

    #[test]
    fn test_past_tense() {
        assert_eq!(past_tense("suggest"), "suggested");
        assert_eq!(past_tense("indicate"), "indicated");
        assert_eq!(past_tense("imply"), "implied");
        assert_eq!(past_tense("show"), "showed");
        assert_eq!(past_tense("be"), "was");
    }

    #[test]
    fn test_agree_modals_never_inflect() {
        assert_eq!(agree("may", Tag::Vbz), "may");
        assert_eq!(agree("could", Tag::Vbd), "could");
    }

    #[test]
    fn test_agree_phrase_inflects_head_only() {
        assert_eq!(agree_phrase("appear to show", Tag::Vbz), "appears to show");
        assert_eq!(agree_phrase("tend to show", Tag::Vbz), "tends to show");
        assert_eq!(agree_phrase("may cause", Tag::Vbz), "may cause");
        assert_eq!(agree_phrase("suggest", Tag::Vb), "suggest");
        assert_eq!(agree_phrase("appear to show", Tag::Vbd), "appeared to show");
    }
}
